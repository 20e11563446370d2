pub mod api;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod stages;
pub mod table;

pub use api::{ApiClient, ApiConfig};
pub use config::CachePaths;
pub use error::EtlError;
pub use io::{Source, read_table, write_table};
pub use models::{
    EntitySentence, PlaceId, Review, SentenceSentiment, SentimentLabel, TableRow,
};
pub use stages::{
    StageConfig, StageResult, execute_entities, execute_reviews, execute_sentiment,
};
pub use table::{SchemaMapping, Table, TableError};
