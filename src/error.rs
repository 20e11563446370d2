use std::path::PathBuf;

use thiserror::Error;

use crate::table::TableError;

/// Errors raised by a pipeline stage
#[derive(Debug, Error)]
pub enum EtlError {
    /// The stage input could not be loaded as a table of the expected shape
    #[error("cannot load {} as a table: {source}", .path.display())]
    InputType {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A remote endpoint answered with a non-success status
    #[error("{endpoint} returned {status}: {body}")]
    Remote {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request never produced a usable response
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Schema(#[from] TableError),

    #[error("failed to write cache file {}: {source}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),
}
