use serde_json::Value;
use tracing::{debug, info, warn};

use super::{StageConfig, StageResult};
use crate::api::ApiClient;
use crate::error::EtlError;
use crate::io::write_table;
use crate::models::{Review, SentenceSentiment};
use crate::table::{Record, SchemaMapping, Table};

const SENTIMENT_MAPPING: SchemaMapping = SchemaMapping {
    renames: &[
        ("text", "sentence_text"),
        ("sentiment", "sentence_sentiment"),
        ("confidenceScores.positive", "confidence_positive"),
        ("confidenceScores.neutral", "confidence_neutral"),
        ("confidenceScores.negative", "confidence_negative"),
    ],
    optional: &[],
};

/// Execute the sentiment stage
///
/// Each review's text is analyzed; the first returned document is tagged with
/// the review's place and author columns. Documents are then exploded to one
/// row per sentence, and each sentence and its confidence scores are spread
/// into columns. Sentence-level `sentiment` and `confidenceScores` replace the
/// document-level ones during the spread.
pub async fn execute_sentiment(
    client: &ApiClient,
    config: StageConfig<Review>,
) -> Result<StageResult<SentenceSentiment>, EtlError> {
    let reviews = config.input.resolve()?;
    info!("Sentiment stage: analyzing {} reviews", reviews.len());

    let mut documents: Vec<Record> = Vec::with_capacity(reviews.len());
    let mut skipped = 0;

    for (index, review) in reviews.iter().enumerate() {
        let response = client.sentiment(&review.text).await?;

        let Some(mut document) = response.into_first_document() else {
            warn!(
                "Review {} ({} on {}): no sentiment results, skipping",
                index, review.author_name, review.place_id
            );
            skipped += 1;
            continue;
        };

        document.insert("place_id".to_string(), Value::from(review.place_id.clone()));
        document.insert(
            "place_name".to_string(),
            Value::from(review.place_name.clone()),
        );
        document.insert(
            "author_name".to_string(),
            Value::from(review.author_name.clone()),
        );
        document.insert("rating".to_string(), Value::from(review.rating));
        documents.push(document);
    }

    let table = Table::from_records(documents).explode("sentences")?;
    debug!("Sentiment stage: {} sentences after explode", table.len());

    let table = table
        .spread("sentences", None)?
        .spread("confidenceScores", Some("confidenceScores"))?;
    let sentences: Vec<SentenceSentiment> = SENTIMENT_MAPPING.conform(table)?;

    write_table(&config.output, &sentences)?;

    info!(
        "Sentiment stage: {} sentences from {} reviews ({} skipped)",
        sentences.len(),
        reviews.len(),
        skipped
    );

    Ok(StageResult {
        rows: sentences,
        inputs: reviews.len(),
        skipped,
        output: config.output,
    })
}
