//! Resolution: issue the search, model the winning record explicitly, and
//! project it into the response shape for the requested view.

use crate::query::schedule_search;
use chronicle_keys::convert_to_legacy_key;
use chronicle_store::client::SearchStore;
use chronicle_types::error::HistoryError;
use chronicle_types::schedule::{
    ActivatedScheduleDoc, NewProducers, ProposedScheduleDoc, ScheduleFilters, ScheduleMode,
    ScheduleResponse,
};
use serde_json::Value;

/// Producer field carrying the modern signing key in activated records.
const SIGNING_KEY_FIELD: &str = "block_signing_key";
/// Producer field added with the re-encoded legacy key.
const LEGACY_KEY_FIELD: &str = "legacy_key";

/// Resolves the producer schedule for `chain` in the requested view.
///
/// Issues exactly one search. Zero hits is the normal "no schedule found"
/// outcome and yields an empty producer list; store and key-codec failures
/// propagate unrecovered, with no retry and no partial result.
pub async fn resolve_schedule(
    store: &dyn SearchStore,
    chain: &str,
    mode: ScheduleMode,
    filters: &ScheduleFilters,
) -> Result<ScheduleResponse, HistoryError> {
    let request = schedule_search(chain, mode, filters);
    tracing::debug!(target: "history", index = %request.index, ?mode, "resolving schedule");

    let response = store.search(&request).await?;
    let Some(source) = response.into_first_source() else {
        return Ok(ScheduleResponse::empty());
    };

    match mode {
        ScheduleMode::Activated => project_activated(source),
        ScheduleMode::Proposed => project_proposed(source),
    }
}

fn project_activated(source: Value) -> Result<ScheduleResponse, HistoryError> {
    let doc: ActivatedScheduleDoc =
        serde_json::from_value(source).map_err(|e| HistoryError::Malformed(e.to_string()))?;
    let NewProducers { version, producers } = doc.new_producers;

    let producers = producers
        .into_iter()
        .map(with_legacy_key)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScheduleResponse {
        timestamp: Some(doc.timestamp),
        block_num: Some(doc.block_num),
        proposal_block_num: None,
        version: Some(version),
        producers,
    })
}

fn project_proposed(source: Value) -> Result<ScheduleResponse, HistoryError> {
    let doc: ProposedScheduleDoc =
        serde_json::from_value(source).map_err(|e| HistoryError::Malformed(e.to_string()))?;

    Ok(ScheduleResponse {
        timestamp: Some(doc.timestamp),
        block_num: None,
        proposal_block_num: Some(doc.block_num),
        version: Some(doc.version),
        producers: doc.producers,
    })
}

/// Adds the derived legacy key alongside the original signing key.
///
/// The original `block_signing_key` is preserved so both encodings stay
/// retrievable; an existing `legacy_key` field is overwritten by the derived
/// value. A producer entry without a string signing key is a malformed
/// record, not something to skip over.
fn with_legacy_key(producer: Value) -> Result<Value, HistoryError> {
    let Value::Object(mut fields) = producer else {
        return Err(HistoryError::Malformed(
            "producer entry is not an object".to_string(),
        ));
    };

    let signing_key = fields
        .get(SIGNING_KEY_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            HistoryError::Malformed(format!("producer entry lacks a string {SIGNING_KEY_FIELD}"))
        })?;

    let legacy = convert_to_legacy_key(signing_key)?;
    fields.insert(LEGACY_KEY_FIELD.to_string(), Value::String(legacy));
    Ok(Value::Object(fields))
}
