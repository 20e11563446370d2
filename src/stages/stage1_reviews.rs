use serde_json::Value;
use tracing::{info, warn};

use super::{StageConfig, StageResult};
use crate::api::ApiClient;
use crate::error::EtlError;
use crate::io::write_table;
use crate::models::{PlaceId, Review};
use crate::table::{Record, SchemaMapping, Table};

const REVIEWS_MAPPING: SchemaMapping = SchemaMapping {
    renames: &[("name", "place_name")],
    optional: &[],
};

/// Execute the reviews stage
///
/// For each place identifier:
/// 1. Look up the place details
/// 2. Keep the place name and its review list, tagged with the identifier
///
/// Then explode the review lists into one row per review, trim to the
/// [`Review`] columns and overwrite the reviews cache.
pub async fn execute_reviews(
    client: &ApiClient,
    config: StageConfig<PlaceId>,
) -> Result<StageResult<Review>, EtlError> {
    let places = config.input.resolve()?;
    info!("Reviews stage: looking up {} places", places.len());

    let mut results: Vec<Record> = Vec::with_capacity(places.len());
    let mut skipped = 0;

    for place in &places {
        let response = client.place_details(&place.place_identifier).await?;

        let Some(mut details) = response.result else {
            warn!("Place {}: no result in response, skipping", place.place_identifier);
            skipped += 1;
            continue;
        };

        let mut record = Record::new();
        record.insert(
            "place_id".to_string(),
            Value::String(place.place_identifier.clone()),
        );
        record.insert(
            "name".to_string(),
            details.remove("name").unwrap_or(Value::Null),
        );
        record.insert(
            "reviews".to_string(),
            details.remove("reviews").unwrap_or(Value::Null),
        );
        results.push(record);
    }

    let table = Table::from_records(results)
        .explode("reviews")?
        .spread("reviews", None)?;
    let reviews: Vec<Review> = REVIEWS_MAPPING.conform(table)?;

    write_table(&config.output, &reviews)?;

    info!(
        "Reviews stage: {} reviews from {} places ({} skipped)",
        reviews.len(),
        places.len(),
        skipped
    );

    Ok(StageResult {
        rows: reviews,
        inputs: places.len(),
        skipped,
        output: config.output,
    })
}
