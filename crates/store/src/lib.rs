#![forbid(unsafe_code)]

//! # Chronicle Store
//!
//! The document-store collaborator: an immutable search DSL and a thin HTTP
//! client for the store's `_search` endpoint. The resolver consumes the
//! [`client::SearchStore`] trait, never the concrete client, so tests can
//! substitute canned responses.

/// The `SearchStore` seam and the HTTP implementation.
pub mod client;
/// Immutable predicate and request types rendering the store's query JSON.
pub mod query;

pub use client::{HttpSearchStore, SearchResponse, SearchStore};
pub use query::{Predicate, SearchRequest, SortSpec};
