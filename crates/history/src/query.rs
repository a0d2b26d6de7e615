//! Builds the single search that answers a schedule query.

use chronicle_store::query::{Predicate, SearchRequest, SortSpec};
use chronicle_types::schedule::{ScheduleFilters, ScheduleMode};

/// Sequencing field of activated schedules, embedded in block documents.
const ACTIVATED_SEQ_FIELD: &str = "new_producers.version";
/// Sequencing field of proposed schedules.
const PROPOSED_SEQ_FIELD: &str = "version";

/// Constructs the search request for `mode` and `filters` against `chain`'s
/// indices.
///
/// The sequencing field carries exactly one predicate: an exact match when a
/// version filter is present, otherwise an existence check. Never both; an
/// exact match already implies existence.
///
/// `producer` and `key` filters only apply to the proposed view; the
/// activated view ignores them.
pub fn schedule_search(
    chain: &str,
    mode: ScheduleMode,
    filters: &ScheduleFilters,
) -> SearchRequest {
    let (index, seq_field, sort_field) = match mode {
        ScheduleMode::Activated => (format!("{chain}-block-*"), ACTIVATED_SEQ_FIELD, "block_num"),
        ScheduleMode::Proposed => (format!("{chain}-schedule-*"), PROPOSED_SEQ_FIELD, "version"),
    };

    let mut must = vec![match filters.version {
        Some(version) => Predicate::term(seq_field, version),
        None => Predicate::exists(seq_field),
    }];

    if mode == ScheduleMode::Proposed {
        if let Some(producer) = &filters.producer {
            must.push(Predicate::term("producers.name", producer.as_str()));
        }
        if let Some(key) = &filters.key {
            must.push(Predicate::term("producers.keys", key.as_str()));
        }
    }

    SearchRequest {
        index,
        size: 1,
        track_total_hits: true,
        must,
        sort: SortSpec::new(sort_field, filters.sort),
    }
}
