//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate list mutations, persistence and re-rendering.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod notice;
pub mod task_service;
pub(crate) mod timed_slot;
