use std::path::{Path, PathBuf};

/// Default on-disk layout of the pipeline's input and cache files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    /// Place identifiers to look up
    pub place_ids: PathBuf,
    /// Reviews stage output
    pub reviews: PathBuf,
    /// Sentiment stage output
    pub sentiment: PathBuf,
    /// Entity stage output
    pub entities: PathBuf,
}

impl CachePaths {
    /// Standard file names under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            place_ids: dir.join("place_ids.csv"),
            reviews: dir.join("reviews.csv"),
            sentiment: dir.join("reviews_sentiment_by_sentence.csv"),
            entities: dir.join("reviews_sentiment_by_sentence_with_entities.csv"),
        }
    }
}

impl Default for CachePaths {
    fn default() -> Self {
        Self::in_dir(Path::new("cache"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = CachePaths::default();
        assert_eq!(paths.place_ids, PathBuf::from("cache/place_ids.csv"));
        assert_eq!(paths.reviews, PathBuf::from("cache/reviews.csv"));
        assert_eq!(
            paths.sentiment,
            PathBuf::from("cache/reviews_sentiment_by_sentence.csv")
        );
        assert_eq!(
            paths.entities,
            PathBuf::from("cache/reviews_sentiment_by_sentence_with_entities.csv")
        );
    }
}
