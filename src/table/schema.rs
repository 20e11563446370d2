use tracing::debug;

use super::{Table, TableError};
use crate::models::TableRow;

/// Static rename and keep rules that turn a stage's wide table into typed rows
#[derive(Debug, Clone, Copy)]
pub struct SchemaMapping {
    /// Old column name to new column name, applied first
    pub renames: &'static [(&'static str, &'static str)],
    /// Output columns that may be absent from the whole table
    pub optional: &'static [&'static str],
}

impl SchemaMapping {
    /// Rename, keep exactly `R::COLUMNS`, then decode each row as `R`
    ///
    /// A required column missing from a non-empty table is an error. An empty
    /// table carries no observed schema and conforms to the header directly.
    pub fn conform<R: TableRow>(&self, table: Table) -> Result<Vec<R>, TableError> {
        let mut table = table.rename(self.renames);

        if table.is_empty() {
            return Table::with_columns(R::COLUMNS.iter().copied()).into_rows();
        }

        for column in self.optional {
            if table.column_index(column).is_none() {
                debug!("Optional column `{}` absent, filling with nulls", column);
                table = table.with_null_column(column);
            }
        }

        table.select(R::COLUMNS)?.into_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntitySentence, Review};
    use crate::table::Record;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    const REVIEW_MAPPING: SchemaMapping = SchemaMapping {
        renames: &[("name", "place_name")],
        optional: &[],
    };

    #[test]
    fn test_conform_renames_and_trims() {
        let table = Table::from_records(vec![record(json!({
            "place_id": "p1",
            "name": "Cafe X",
            "author_name": "Ann",
            "rating": 4,
            "text": "Nice",
            "language": "en"
        }))]);

        let rows: Vec<Review> = REVIEW_MAPPING.conform(table).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].place_name, "Cafe X");
        assert_eq!(rows[0].rating, 4.0);
    }

    #[test]
    fn test_conform_missing_required_column() {
        let table = Table::from_records(vec![record(json!({"place_id": "p1", "name": "Cafe X"}))]);

        let err = REVIEW_MAPPING.conform::<Review>(table).unwrap_err();

        assert!(matches!(err, TableError::MissingColumn(c) if c == "author_name"));
    }

    #[test]
    fn test_conform_empty_table() {
        let rows: Vec<Review> = REVIEW_MAPPING.conform(Table::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_conform_fills_optional_column() {
        let mapping = SchemaMapping {
            renames: &[("text", "entity_text")],
            optional: &["entity_subcategory"],
        };
        let table = Table::from_records(vec![record(json!({
            "place_id": "p1",
            "place_name": "Cafe X",
            "author_name": "Ann",
            "rating": 5,
            "sentence_text": "Great food.",
            "sentence_sentiment": "positive",
            "confidence_positive": 0.98,
            "confidence_neutral": 0.01,
            "confidence_negative": 0.01,
            "text": "food",
            "category": "Product",
            "confidence_entity": 0.8
        }))]);

        let rows: Vec<EntitySentence> = mapping.conform(table).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity_text, "food");
        assert_eq!(rows[0].entity_subcategory, None);
    }
}
