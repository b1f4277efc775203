//! Runtime layer for gate access-log reports.
//!
//! Owns the per-employee selection lifecycle and the seam to wherever the
//! access logs come from.

pub mod report_session;

pub use gate_core as core;
pub use gate_data as data;
