//! Data layer for gate access-log reports.
//!
//! Reads backend JSON exports from disk, summarizes one employee's access
//! log with the [`aggregator::ReportAggregator`], and assembles the
//! [`report::EmployeeReport`] handed to the presentation layer.

pub mod aggregator;
pub mod reader;
pub mod report;

pub use gate_core as core;
