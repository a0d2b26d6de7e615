//! Behavioral tests for schedule resolution against a canned store.

use async_trait::async_trait;
use chronicle_history::resolve_schedule;
use chronicle_store::client::{Hit, Hits, SearchResponse, SearchStore};
use chronicle_store::query::{Predicate, SearchRequest};
use chronicle_types::error::{HistoryError, StoreError};
use chronicle_types::schedule::{ScheduleFilters, ScheduleMode};
use serde_json::{json, Value};
use std::sync::Mutex;

// Matching pair generated from 33 key bytes 0x02 0x01..0x20.
const MODERN: &str = "PUB_K1_4tw6e36FfsDL3C8YZXGwhpPRYydrvZkSzYtmo7gMxG21Xa88m3";
const LEGACY: &str = "ALA4tw6e36FfsDL3C8YZXGwhpPRYydrvZkSzYtmo7gMxG21UcLQTH";

struct MockStore {
    hits: Vec<Value>,
    fail: bool,
    last: Mutex<Option<SearchRequest>>,
}

impl MockStore {
    fn with_hits(hits: Vec<Value>) -> Self {
        Self {
            hits,
            fail: false,
            last: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            hits: Vec::new(),
            fail: true,
            last: Mutex::new(None),
        }
    }

    fn last_request(&self) -> SearchRequest {
        self.last.lock().unwrap().clone().expect("no search issued")
    }
}

#[async_trait]
impl SearchStore for MockStore {
    async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, StoreError> {
        *self.last.lock().unwrap() = Some(req.clone());
        if self.fail {
            return Err(StoreError::Transport("connection refused".to_string()));
        }
        Ok(SearchResponse {
            hits: Hits {
                total: Some(json!({ "value": self.hits.len(), "relation": "eq" })),
                hits: self
                    .hits
                    .iter()
                    .cloned()
                    .map(|source| Hit { source })
                    .collect(),
            },
        })
    }
}

fn activated_block_doc() -> Value {
    json!({
        "@timestamp": "2024-05-01T12:00:00.000Z",
        "block_num": 90000,
        "producer": "bootproducer",
        "new_producers": {
            "version": 3,
            "producers": [
                { "name": "alice", "block_signing_key": MODERN },
                { "name": "bob", "block_signing_key": LEGACY }
            ]
        }
    })
}

#[tokio::test]
async fn activated_match_projects_and_enriches_keys() {
    let store = MockStore::with_hits(vec![activated_block_doc()]);
    let resp = resolve_schedule(
        &store,
        "ala",
        ScheduleMode::Activated,
        &ScheduleFilters::default(),
    )
    .await
    .unwrap();

    assert_eq!(resp.timestamp.as_deref(), Some("2024-05-01T12:00:00.000Z"));
    assert_eq!(resp.block_num, Some(90000));
    assert_eq!(resp.proposal_block_num, None);
    assert_eq!(resp.version, Some(3));
    assert_eq!(resp.producers.len(), 2);

    // Both the original and the derived encoding are retrievable.
    let alice = &resp.producers[0];
    assert_eq!(alice["name"], "alice");
    assert_eq!(alice["block_signing_key"], MODERN);
    assert_eq!(alice["legacy_key"], LEGACY);

    // A key already in legacy form passes through unchanged.
    let bob = &resp.producers[1];
    assert_eq!(bob["block_signing_key"], LEGACY);
    assert_eq!(bob["legacy_key"], LEGACY);

    // The query that was issued: block index, existence predicate on the
    // embedded version, single most-recent hit.
    let req = store.last_request();
    assert_eq!(req.index, "ala-block-*");
    assert_eq!(req.size, 1);
    assert_eq!(req.must, vec![Predicate::exists("new_producers.version")]);
}

#[tokio::test]
async fn proposed_match_projects_without_key_conversion() {
    let store = MockStore::with_hits(vec![json!({
        "@timestamp": "2024-04-30T08:00:00.000Z",
        "block_num": 88000,
        "version": 11,
        "producers": [
            { "name": "alice", "keys": [MODERN] }
        ]
    })]);
    let resp = resolve_schedule(
        &store,
        "ala",
        ScheduleMode::Proposed,
        &ScheduleFilters::default(),
    )
    .await
    .unwrap();

    assert_eq!(resp.proposal_block_num, Some(88000));
    assert_eq!(resp.block_num, None);
    assert_eq!(resp.version, Some(11));
    // Proposed producers pass through untransformed.
    assert_eq!(
        resp.producers,
        vec![json!({ "name": "alice", "keys": [MODERN] })]
    );
}

#[tokio::test]
async fn zero_hits_is_an_empty_response_not_an_error() {
    for mode in [ScheduleMode::Activated, ScheduleMode::Proposed] {
        let store = MockStore::with_hits(Vec::new());
        let resp = resolve_schedule(&store, "ala", mode, &ScheduleFilters::default())
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "producers": [] })
        );
    }
}

#[tokio::test]
async fn store_failure_propagates_unrecovered() {
    let store = MockStore::failing();
    let err = resolve_schedule(
        &store,
        "ala",
        ScheduleMode::Proposed,
        &ScheduleFilters::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HistoryError::Store(StoreError::Transport(_))));
}

#[tokio::test]
async fn malformed_signing_key_aborts_the_request() {
    let mut doc = activated_block_doc();
    doc["new_producers"]["producers"][0]["block_signing_key"] = json!("PUB_K1_0OIl");
    let store = MockStore::with_hits(vec![doc]);
    let err = resolve_schedule(
        &store,
        "ala",
        ScheduleMode::Activated,
        &ScheduleFilters::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HistoryError::Key(_)));
}

#[tokio::test]
async fn non_object_producer_entry_is_a_malformed_record() {
    let mut doc = activated_block_doc();
    doc["new_producers"]["producers"] = json!(["not-an-object"]);
    let store = MockStore::with_hits(vec![doc]);
    let err = resolve_schedule(
        &store,
        "ala",
        ScheduleMode::Activated,
        &ScheduleFilters::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HistoryError::Malformed(_)));
}

#[tokio::test]
async fn missing_signing_key_is_a_malformed_record() {
    let mut doc = activated_block_doc();
    doc["new_producers"]["producers"] = json!([{ "name": "alice" }]);
    let store = MockStore::with_hits(vec![doc]);
    let err = resolve_schedule(
        &store,
        "ala",
        ScheduleMode::Activated,
        &ScheduleFilters::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HistoryError::Malformed(_)));
}
