use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::EtlError;
use crate::models::{AnalysisResponse, PlaceDetailsResponse};

const DEFAULT_BASE_URL: &str = "https://cent.ischool-iot.net";

const PLACE_DETAILS: &str = "/api/google/places/details";
const SENTIMENT: &str = "/api/azure/sentiment";
const ENTITY_RECOGNITION: &str = "/api/azure/entityrecognition";

/// Configuration for the API gateway client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Static key sent as `X-API-KEY` (from REVIEW_ETL_API_KEY env var)
    pub api_key: String,
    /// Gateway root, without trailing slash
    pub base_url: String,
}

impl ApiConfig {
    /// Create config from environment variables, reading `.env` if present
    pub fn from_env() -> Result<Self, EtlError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("REVIEW_ETL_API_KEY")
            .map_err(|_| EtlError::MissingCredential("REVIEW_ETL_API_KEY"))?;
        let base_url = std::env::var("REVIEW_ETL_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(api_key, base_url))
    }

    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Client for the place-details, sentiment and entity-recognition endpoints
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Look up a place and its reviews
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse, EtlError> {
        let request = self
            .client
            .get(self.url(PLACE_DETAILS))
            .query(&[("place_id", place_id)]);
        self.send(PLACE_DETAILS, request).await
    }

    /// Sentence-level sentiment for a piece of text
    pub async fn sentiment(&self, text: &str) -> Result<AnalysisResponse, EtlError> {
        let request = self
            .client
            .post(self.url(SENTIMENT))
            .form(&[("text", text)]);
        self.send(SENTIMENT, request).await
    }

    /// Named entities found in a piece of text
    pub async fn entities(&self, text: &str) -> Result<AnalysisResponse, EtlError> {
        let request = self
            .client
            .post(self.url(ENTITY_RECOGNITION))
            .form(&[("text", text)]);
        self.send(ENTITY_RECOGNITION, request).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, EtlError> {
        let transport = |source| EtlError::Transport { endpoint, source };

        debug!("Calling {}", endpoint);
        let response = request
            .header("X-API-KEY", &self.config.api_key)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EtlError::Remote {
                endpoint,
                status,
                body,
            });
        }

        response.json().await.map_err(transport)
    }
}
