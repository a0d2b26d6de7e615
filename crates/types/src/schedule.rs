//! The producer-schedule data model.
//!
//! Producer entries are deliberately opaque JSON objects: the two index
//! shapes evolved independently and the resolver must not assume a producer
//! schema beyond the signing-key field it transforms.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which historical view of the producer schedule is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    /// The schedule actually adopted into block production.
    Activated,
    /// The governance-submitted schedule pending activation. The default.
    Proposed,
}

impl ScheduleMode {
    /// Resolves the request's `mode` parameter once, at the boundary.
    ///
    /// Only the exact literal `"activated"` selects the activated view; any
    /// other value, including absent or empty, is the proposed default.
    pub fn from_param(mode: Option<&str>) -> Self {
        match mode {
            Some("activated") => Self::Activated,
            _ => Self::Proposed,
        }
    }
}

/// Sort direction over the sequencing field of a schedule query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Least-recent record first.
    Asc,
    /// Most-recent record first. The default.
    #[default]
    Desc,
}

impl SortOrder {
    /// Resolves the request's `sort` parameter once, at the boundary.
    /// `"asc"` (case-insensitive) selects ascending; anything else falls
    /// back to descending.
    pub fn from_param(sort: Option<&str>) -> Self {
        match sort {
            Some(s) if s.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// The store's wire spelling of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Optional filters narrowing a schedule query.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilters {
    /// Exact schedule version to match instead of the most recent.
    pub version: Option<u64>,
    /// Exact producer account name. Proposed mode only.
    pub producer: Option<String>,
    /// Exact encoded signing key. Proposed mode only.
    pub key: Option<String>,
    /// Tie-break direction over the sequencing field.
    pub sort: SortOrder,
}

/// An activated-schedule hit from a `{chain}-block-*` index.
///
/// Block documents carry many more fields; everything outside the schedule
/// projection is ignored.
#[derive(Debug, Deserialize)]
pub struct ActivatedScheduleDoc {
    /// Activation time of the schedule.
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    /// The block in which the schedule took effect.
    pub block_num: u64,
    /// The embedded schedule payload.
    pub new_producers: NewProducers,
}

/// The `new_producers` sub-object of a block document.
#[derive(Debug, Deserialize)]
pub struct NewProducers {
    /// The activated schedule version.
    pub version: u64,
    /// Opaque producer entries; each carries a `block_signing_key`.
    pub producers: Vec<Value>,
}

/// A proposed-schedule hit from a `{chain}-schedule-*` index.
#[derive(Debug, Deserialize)]
pub struct ProposedScheduleDoc {
    /// Time the proposal was recorded.
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    /// The block in which the proposal was recorded.
    pub block_num: u64,
    /// The proposed schedule version.
    pub version: u64,
    /// Opaque producer entries.
    pub producers: Vec<Value>,
}

/// The externally visible schedule projection.
///
/// Fields other than `producers` are populated only on a match; the empty
/// response serializes as `{"producers":[]}`.
#[derive(Debug, Default, Serialize)]
pub struct ScheduleResponse {
    /// Record timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Activation block. Activated mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_num: Option<u64>,
    /// Proposal block. Proposed mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_block_num: Option<u64>,
    /// Schedule version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Producer entries; empty when no record matched.
    pub producers: Vec<Value>,
}

impl ScheduleResponse {
    /// The well-formed "no schedule found" outcome. Not an error.
    pub fn empty() -> Self {
        Self::default()
    }
}
