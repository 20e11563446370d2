use tracing::{info, warn};

use super::{StageConfig, StageResult};
use crate::api::ApiClient;
use crate::error::EtlError;
use crate::io::write_table;
use crate::models::{EntitySentence, SentenceSentiment};
use crate::table::{Record, SchemaMapping, Table, record_of};

const ENTITY_MAPPING: SchemaMapping = SchemaMapping {
    renames: &[
        ("text", "entity_text"),
        ("category", "entity_category"),
        ("subcategory", "entity_subcategory"),
        ("confidenceScore", "confidence_entity"),
    ],
    optional: &["entity_subcategory"],
};

/// Execute the entity stage
///
/// Every column of the input sentence row is copied onto the first returned
/// document, so each exploded entity row repeats the whole sentence row.
/// Sentences with no detected entities produce no rows.
pub async fn execute_entities(
    client: &ApiClient,
    config: StageConfig<SentenceSentiment>,
) -> Result<StageResult<EntitySentence>, EtlError> {
    let sentences = config.input.resolve()?;
    info!("Entity stage: recognizing entities in {} sentences", sentences.len());

    let mut documents: Vec<Record> = Vec::with_capacity(sentences.len());
    let mut skipped = 0;

    for (index, sentence) in sentences.iter().enumerate() {
        let response = client.entities(&sentence.sentence_text).await?;

        let Some(mut document) = response.into_first_document() else {
            warn!(
                "Sentence {} of {}: no entity results, skipping",
                index, sentence.place_id
            );
            skipped += 1;
            continue;
        };

        document.extend(record_of(sentence)?);
        documents.push(document);
    }

    let table = Table::from_records(documents)
        .explode("entities")?
        .spread("entities", None)?;
    let entities: Vec<EntitySentence> = ENTITY_MAPPING.conform(table)?;

    write_table(&config.output, &entities)?;

    info!(
        "Entity stage: {} entities from {} sentences ({} skipped)",
        entities.len(),
        sentences.len(),
        skipped
    );

    Ok(StageResult {
        rows: entities,
        inputs: sentences.len(),
        skipped,
        output: config.output,
    })
}
