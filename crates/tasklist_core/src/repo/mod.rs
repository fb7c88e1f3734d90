//! Persistence layer.
//!
//! # Responsibility
//! - Define the durable key-value store contract and its implementations.
//! - Encode the task list and theme preference into store values.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`Codec`) in addition to DB
//!   transport errors.

pub mod kv_repo;
pub mod task_list_repo;
