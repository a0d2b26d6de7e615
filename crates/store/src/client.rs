//! The search seam consumed by the resolver, and its HTTP implementation.

use crate::query::SearchRequest;
use async_trait::async_trait;
use chronicle_types::error::StoreError;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// The document-store search capability.
///
/// One call, one round-trip: implementations perform no retries and no
/// partial-result fallback. Failures propagate to the caller's transport
/// layer.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Issues a single search and returns the ordered hit list.
    async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, StoreError>;
}

/// The store's hit envelope.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Hit container.
    pub hits: Hits,
}

/// The `hits` object of a search response.
#[derive(Debug, Deserialize)]
pub struct Hits {
    /// Exact total, present when `track_total_hits` was requested.
    /// Informational only.
    #[serde(default)]
    pub total: Option<Value>,
    /// Matching documents, in sort order.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// A single search hit.
#[derive(Debug, Deserialize)]
pub struct Hit {
    /// The stored document.
    #[serde(rename = "_source")]
    pub source: Value,
}

impl SearchResponse {
    /// The winning document, if any matched.
    pub fn into_first_source(self) -> Option<Value> {
        self.hits.hits.into_iter().next().map(|h| h.source)
    }
}

/// A search client speaking the store's HTTP `_search` API.
pub struct HttpSearchStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSearchStore {
    /// Builds a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchStore for HttpSearchStore {
    async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, StoreError> {
        let url = format!("{}/{}/_search", self.base_url, req.index);
        tracing::debug!(target: "store", index = %req.index, size = req.size, "search");

        let response = self
            .client
            .post(&url)
            .json(&req.body())
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_envelope_deserializes_and_yields_first_source() {
        let raw = json!({
            "took": 4,
            "hits": {
                "total": { "value": 2, "relation": "eq" },
                "hits": [
                    { "_index": "ala-schedule-v1", "_source": { "version": 9 } },
                    { "_index": "ala-schedule-v1", "_source": { "version": 8 } }
                ]
            }
        });
        let resp: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.into_first_source(), Some(json!({ "version": 9 })));
    }

    #[test]
    fn empty_hit_list_yields_none() {
        let resp: SearchResponse =
            serde_json::from_value(json!({ "hits": { "hits": [] } })).unwrap();
        assert!(resp.into_first_source().is_none());
    }
}
