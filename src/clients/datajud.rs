use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::DatajudConfig;
use crate::constants::api::USER_AGENT;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("DataJud request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("DataJud returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("DataJud response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Option<SearchHits>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub hits: Option<Vec<SearchHit>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,
}

impl SearchResponse {
    /// Source document of the first hit, if the search matched anything.
    #[must_use]
    pub fn first_hit(&self) -> Option<&Map<String, Value>> {
        self.hits
            .as_ref()
            .and_then(|h| h.hits.as_ref())
            .and_then(|hits| hits.first())
            .and_then(|hit| hit.source.as_ref())
    }

    /// Wraps source documents as a response, mostly for fakes in tests.
    #[must_use]
    pub fn from_sources(sources: Vec<Map<String, Value>>) -> Self {
        Self {
            hits: Some(SearchHits {
                hits: Some(
                    sources
                        .into_iter()
                        .map(|source| SearchHit {
                            source: Some(source),
                        })
                        .collect(),
                ),
            }),
        }
    }
}

#[async_trait]
pub trait CaseSearch: Send + Sync {
    /// Looks up one case number in a tribunal's index.
    async fn search(
        &self,
        tribunal_alias: &str,
        case_number: &str,
    ) -> Result<SearchResponse, SearchError>;
}

#[derive(Clone)]
pub struct DatajudClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DatajudClient {
    pub fn new(config: &DatajudConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(u64::from(
                config.request_timeout_seconds.max(1),
            )))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn search_url(&self, tribunal_alias: &str) -> String {
        format!("{}/{}/_search", self.base_url, tribunal_alias)
    }

    fn search_body(case_number: &str) -> Value {
        json!({
            "query": { "match": { "numeroProcesso": case_number } },
            "size": 1
        })
    }
}

#[async_trait]
impl CaseSearch for DatajudClient {
    async fn search(
        &self,
        tribunal_alias: &str,
        case_number: &str,
    ) -> Result<SearchResponse, SearchError> {
        let url = self.search_url(tribunal_alias);
        debug!(tribunal = tribunal_alias, case_number, "Querying DataJud");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("APIKey {}", self.api_key))
            .json(&Self::search_body(case_number))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SearchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DatajudClient {
        let config = DatajudConfig {
            base_url: "https://datajud.example/".to_string(),
            api_key: "k".to_string(),
            request_timeout_seconds: 5,
        };
        DatajudClient::new(&config).unwrap()
    }

    #[test]
    fn search_url_uses_alias_path() {
        assert_eq!(
            client().search_url("api_publica_tjsp"),
            "https://datajud.example/api_publica_tjsp/_search"
        );
    }

    #[test]
    fn search_body_matches_case_number() {
        let body = DatajudClient::search_body("00012345620248260100");
        assert_eq!(body["query"]["match"]["numeroProcesso"], "00012345620248260100");
        assert_eq!(body["size"], 1);
    }

    #[test]
    fn first_hit_reads_source() {
        let raw = r#"{"hits":{"total":{"value":1},"hits":[{"_id":"x","_source":{"numeroProcesso":"1"}}]}}"#;
        let response: SearchResponse = serde_json::from_str(raw).unwrap();
        let source = response.first_hit().unwrap();
        assert_eq!(source["numeroProcesso"], "1");
    }

    #[test]
    fn first_hit_is_none_without_hits() {
        for raw in [
            r"{}",
            r#"{"hits":{}}"#,
            r#"{"hits":{"hits":[]}}"#,
            r#"{"hits":{"hits":[{"_id":"x"}]}}"#,
        ] {
            let response: SearchResponse = serde_json::from_str(raw).unwrap();
            assert!(response.first_hit().is_none(), "{raw}");
        }
    }
}
