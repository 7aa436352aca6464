//! Core domain types
//!
//! These types describe what the analysis service reports about a single
//! analysis run. None of them are persisted.

pub mod credentials;
pub mod quality_gate;
pub mod task;
