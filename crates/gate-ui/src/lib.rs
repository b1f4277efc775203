//! Terminal UI layer for gate access-log reports.
//!
//! Provides themes, the report view (stat cards, efficiency gauge and log
//! table) built on [`ratatui`], the event loop that shows it, and a
//! plain-text renderer for non-interactive output.

pub mod app;
pub mod plain;
pub mod report_view;
pub mod themes;

pub use gate_core as core;
