use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};

/// A flat row type with a fixed, ordered header
pub trait TableRow: Serialize + DeserializeOwned {
    /// Column names in output order; must match the serialized field names
    const COLUMNS: &'static [&'static str];
}

/// Star ratings are whole numbers upstream; write them as `5`, not `5.0`
fn serialize_rating<S: Serializer>(rating: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if rating.fract() == 0.0 && rating.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*rating as i64)
    } else {
        serializer.serialize_f64(*rating)
    }
}

/// One place to look up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceId {
    #[serde(alias = "Google Place ID")]
    pub place_identifier: String,
}

impl PlaceId {
    pub fn new(place_identifier: impl Into<String>) -> Self {
        Self {
            place_identifier: place_identifier.into(),
        }
    }
}

impl TableRow for PlaceId {
    const COLUMNS: &'static [&'static str] = &["place_identifier"];
}

/// One customer review of a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub place_id: String,
    pub place_name: String,
    pub author_name: String,
    #[serde(serialize_with = "serialize_rating")]
    pub rating: f64,
    pub text: String,
}

impl TableRow for Review {
    const COLUMNS: &'static [&'static str] =
        &["place_id", "place_name", "author_name", "rating", "text"];
}

/// Sentiment label assigned to a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// One sentence of a review with its sentiment scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSentiment {
    pub place_id: String,
    pub place_name: String,
    pub author_name: String,
    #[serde(serialize_with = "serialize_rating")]
    pub rating: f64,
    pub sentence_text: String,
    pub sentence_sentiment: SentimentLabel,
    /// Confidence in [0, 1]
    pub confidence_positive: f64,
    /// Confidence in [0, 1]
    pub confidence_neutral: f64,
    /// Confidence in [0, 1]
    pub confidence_negative: f64,
}

impl TableRow for SentenceSentiment {
    const COLUMNS: &'static [&'static str] = &[
        "place_id",
        "place_name",
        "author_name",
        "rating",
        "sentence_text",
        "sentence_sentiment",
        "confidence_positive",
        "confidence_neutral",
        "confidence_negative",
    ];
}

/// One named entity found in a review sentence
///
/// Carries every column of the source [`SentenceSentiment`] row unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySentence {
    pub place_id: String,
    pub place_name: String,
    pub author_name: String,
    #[serde(serialize_with = "serialize_rating")]
    pub rating: f64,
    pub sentence_text: String,
    pub sentence_sentiment: SentimentLabel,
    pub confidence_positive: f64,
    pub confidence_neutral: f64,
    pub confidence_negative: f64,
    pub entity_text: String,
    pub entity_category: String,
    #[serde(default)]
    pub entity_subcategory: Option<String>,
    pub confidence_entity: f64,
}

impl EntitySentence {
    /// The sentence row this entity was extracted from
    pub fn sentence(&self) -> SentenceSentiment {
        SentenceSentiment {
            place_id: self.place_id.clone(),
            place_name: self.place_name.clone(),
            author_name: self.author_name.clone(),
            rating: self.rating,
            sentence_text: self.sentence_text.clone(),
            sentence_sentiment: self.sentence_sentiment,
            confidence_positive: self.confidence_positive,
            confidence_neutral: self.confidence_neutral,
            confidence_negative: self.confidence_negative,
        }
    }
}

impl TableRow for EntitySentence {
    const COLUMNS: &'static [&'static str] = &[
        "place_id",
        "place_name",
        "author_name",
        "rating",
        "sentence_text",
        "sentence_sentiment",
        "confidence_positive",
        "confidence_neutral",
        "confidence_negative",
        "entity_text",
        "entity_category",
        "entity_subcategory",
        "confidence_entity",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::record_of;

    fn assert_columns_match<R: TableRow>(row: &R) {
        let record = record_of(row).unwrap();
        let mut keys: Vec<&str> = record.keys().map(String::as_str).collect();
        let mut columns = R::COLUMNS.to_vec();
        keys.sort();
        columns.sort();
        assert_eq!(keys, columns);
    }

    fn sentence() -> SentenceSentiment {
        SentenceSentiment {
            place_id: "p1".to_string(),
            place_name: "Cafe X".to_string(),
            author_name: "Ann".to_string(),
            rating: 5.0,
            sentence_text: "Great food.".to_string(),
            sentence_sentiment: SentimentLabel::Positive,
            confidence_positive: 0.98,
            confidence_neutral: 0.01,
            confidence_negative: 0.01,
        }
    }

    #[test]
    fn test_columns_match_serialized_fields() {
        assert_columns_match(&PlaceId::new("p1"));
        assert_columns_match(&Review {
            place_id: "p1".to_string(),
            place_name: "Cafe X".to_string(),
            author_name: "Ann".to_string(),
            rating: 5.0,
            text: "Great food.".to_string(),
        });
        assert_columns_match(&sentence());
    }

    #[test]
    fn test_place_id_accepts_legacy_header() {
        let row: PlaceId =
            serde_json::from_value(serde_json::json!({"Google Place ID": "ChIJ123"})).unwrap();
        assert_eq!(row.place_identifier, "ChIJ123");
    }

    #[test]
    fn test_sentiment_label_is_lowercase() {
        let label: SentimentLabel = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(label, SentimentLabel::Negative);
        assert_eq!(
            serde_json::to_string(&SentimentLabel::Neutral).unwrap(),
            "\"neutral\""
        );
    }

    #[test]
    fn test_entity_sentence_recovers_source_row() {
        let source = sentence();
        let entity = EntitySentence {
            place_id: source.place_id.clone(),
            place_name: source.place_name.clone(),
            author_name: source.author_name.clone(),
            rating: source.rating,
            sentence_text: source.sentence_text.clone(),
            sentence_sentiment: source.sentence_sentiment,
            confidence_positive: source.confidence_positive,
            confidence_neutral: source.confidence_neutral,
            confidence_negative: source.confidence_negative,
            entity_text: "food".to_string(),
            entity_category: "Product".to_string(),
            entity_subcategory: None,
            confidence_entity: 0.8,
        };

        assert_columns_match(&entity);
        assert_eq!(entity.sentence(), source);
    }
}
