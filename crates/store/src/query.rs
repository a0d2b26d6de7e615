//! Immutable query construction for the store's `_search` API.
//!
//! Predicates are plain values rendered to JSON on demand; building a request
//! never touches the network, so query-shaping logic is testable in
//! isolation from the client.

use chronicle_types::schedule::SortOrder;
use serde_json::{json, Map, Value};

/// A single boolean `must` predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact match on a field value.
    Term {
        /// Document field to match.
        field: String,
        /// The value the field must equal.
        value: Value,
    },
    /// The field must exist on the document.
    Exists {
        /// Document field that must be present.
        field: String,
    },
}

impl Predicate {
    /// An exact-match predicate.
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// An existence predicate.
    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists {
            field: field.into(),
        }
    }

    /// Renders the store's JSON form of this predicate.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Term { field, value } => {
                let mut term = Map::new();
                term.insert(field.clone(), json!({ "value": value }));
                json!({ "term": term })
            }
            Self::Exists { field } => json!({ "exists": { "field": field } }),
        }
    }
}

/// Sort specification: one field, one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    /// Field to order by.
    pub field: String,
    /// Direction of the ordering.
    pub order: SortOrder,
}

impl SortSpec {
    /// Builds a sort spec.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// A complete, immutable `_search` request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Index or index pattern to search.
    pub index: String,
    /// Maximum number of hits to return.
    pub size: u32,
    /// Ask the store for an exact total. Informational; resolution logic
    /// never reads it.
    pub track_total_hits: bool,
    /// Boolean `must` predicates, ANDed together.
    pub must: Vec<Predicate>,
    /// Result ordering.
    pub sort: SortSpec,
}

impl SearchRequest {
    /// Renders the request body sent to `{index}/_search`.
    pub fn body(&self) -> Value {
        let must: Vec<Value> = self.must.iter().map(Predicate::to_json).collect();
        let mut sort = Map::new();
        sort.insert(
            self.sort.field.clone(),
            Value::String(self.sort.order.as_str().to_string()),
        );
        json!({
            "track_total_hits": self.track_total_hits,
            "size": self.size,
            "query": { "bool": { "must": must } },
            "sort": sort,
        })
    }
}
