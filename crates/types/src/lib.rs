#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Chronicle Types
//!
//! This crate is the foundational library for the Chronicle history service,
//! containing the schedule data model, error taxonomy and configuration
//! objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `chronicle-types` has minimal dependencies and is itself
//! a dependency for every other crate in the workspace. This structure
//! prevents circular dependencies and provides a stable, canonical definition
//! for shared types like `ScheduleMode`, `ScheduleResponse` and the error
//! enums.

/// Shared configuration structures for the node, store client and gateway.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// The producer-schedule data model: modes, filters, stored documents and
/// the response projection.
pub mod schedule;
