use serde::Deserialize;

use crate::table::Record;

/// Response from the place-details endpoint
///
/// `result` is absent when the lookup found nothing usable.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub result: Option<Record>,
}

/// Response from the sentiment and entity-recognition endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub results: Option<AnalysisResults>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResults {
    #[serde(default)]
    pub documents: Vec<Record>,
}

impl AnalysisResponse {
    /// The first analyzed document, if the response carried one
    pub fn into_first_document(self) -> Option<Record> {
        self.results?.documents.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_details() {
        let json = r#"{
            "html_attributions": [],
            "result": {
                "name": "Cafe X",
                "reviews": [
                    {"author_name": "Ann", "rating": 5, "text": "Great food."}
                ]
            },
            "status": "OK"
        }"#;

        let response: PlaceDetailsResponse = serde_json::from_str(json).unwrap();
        let result = response.result.unwrap();

        assert_eq!(result["name"], "Cafe X");
        assert_eq!(result["reviews"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_place_details_without_result() {
        let response: PlaceDetailsResponse =
            serde_json::from_str(r#"{"status": "INVALID_REQUEST"}"#).unwrap();
        assert!(response.result.is_none());
    }

    #[test]
    fn test_first_document() {
        let json = r#"{
            "kind": "SentimentAnalysisResults",
            "results": {
                "documents": [
                    {"id": "1", "sentiment": "positive", "sentences": []},
                    {"id": "2", "sentiment": "negative", "sentences": []}
                ],
                "errors": []
            }
        }"#;

        let response: AnalysisResponse = serde_json::from_str(json).unwrap();
        let document = response.into_first_document().unwrap();

        assert_eq!(document["id"], "1");
    }

    #[test]
    fn test_missing_or_empty_results() {
        let missing: AnalysisResponse = serde_json::from_str(r#"{"error": "bad"}"#).unwrap();
        assert!(missing.into_first_document().is_none());

        let empty: AnalysisResponse =
            serde_json::from_str(r#"{"results": {"documents": [], "errors": [{"id": "1"}]}}"#)
                .unwrap();
        assert!(empty.into_first_document().is_none());
    }
}
