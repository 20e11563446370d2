pub mod stage1_reviews;
pub mod stage2_sentiment;
pub mod stage3_entities;

pub use stage1_reviews::*;
pub use stage2_sentiment::*;
pub use stage3_entities::*;

use std::path::PathBuf;

use crate::io::Source;

/// Input and cache location for one stage run
#[derive(Debug, Clone)]
pub struct StageConfig<R> {
    /// Rows to process, or the cache file holding them
    pub input: Source<R>,
    /// Cache file to overwrite with the stage output
    pub output: PathBuf,
}

impl<R> StageConfig<R> {
    pub fn new(input: impl Into<Source<R>>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Result of one stage run
#[derive(Debug)]
pub struct StageResult<R> {
    /// Output rows, as written to the cache file
    pub rows: Vec<R>,
    /// Number of input rows processed
    pub inputs: usize,
    /// Input rows whose response carried no payload
    pub skipped: usize,
    /// Cache file written
    pub output: PathBuf,
}
