//! Optional host capabilities.
//!
//! Providers are injected as `Option<Box<dyn …>>`; a missing provider disables
//! the feature and leaves every list operation working.

pub mod celebration;
pub mod reorder;
