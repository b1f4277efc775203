//! Core types and pure helpers for gate access-log reporting.
//!
//! Holds the data model shared by every other crate, the error type, status
//! classification, confidence normalization, display formatting, time
//! helpers and CLI settings.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod status;
pub mod time_utils;

pub use error::{ReportError, Result};
