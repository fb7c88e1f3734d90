//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the persisted task record and the theme preference.
//! - Derive read-only progress counters from a list snapshot.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - List order is owned by the service layer, not by the records.

pub mod counters;
pub mod task;
pub mod theme;
