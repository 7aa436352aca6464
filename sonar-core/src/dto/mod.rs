//! Data Transfer Objects
//!
//! Response bodies returned by the analysis service. Only the fields the
//! poller reads are modelled; everything else in the payload is ignored.

pub mod quality_gate;
pub mod task;
