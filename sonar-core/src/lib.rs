//! Sonar Core
//!
//! Core types shared by the Sonar poller crates.
//!
//! This crate contains:
//! - Domain types: analysis task status, quality gate verdicts, credentials
//! - DTOs: response bodies of the analysis service endpoints

pub mod domain;
pub mod dto;
