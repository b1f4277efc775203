//! Report statistics and display projection over one employee's access log.
//!
//! Everything here is a pure function of the borrowed records. Nothing is
//! cached between calls.

use std::collections::BTreeMap;

use chrono_tz::Tz;

use gate_core::calculations::{mean_confidence, normalize_confidence};
use gate_core::formatting::{format_confidence, or_dash};
use gate_core::models::{AccessLogRecord, DisplayRow, ReportStats};
use gate_core::status::{classify_success, status_label, status_tag};
use gate_core::time_utils::format_log_time;

/// QR result that, paired with [`FACE_MISMATCH`], marks an incident.
const QR_PASSED: &str = "OK";
const FACE_MISMATCH: &str = "NO_MATCH";

/// Day key for records without a timestamp; sorts after every date.
pub const UNKNOWN_DAY: &str = "unknown";

// ── DisplayOptions ────────────────────────────────────────────────────────────

/// How record times are rendered in display rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayOptions {
    pub timezone: Tz,
    pub use_12h: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            use_12h: false,
        }
    }
}

// ── DailyReport ───────────────────────────────────────────────────────────────

/// Stats for all attempts on one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DailyReport {
    /// `"%Y-%m-%d"` in the display timezone, or [`UNKNOWN_DAY`].
    pub day: String,
    pub stats: ReportStats,
}

// ── ReportAggregator ──────────────────────────────────────────────────────────

/// Stateless summary and projection helpers.
pub struct ReportAggregator;

impl ReportAggregator {
    /// `true` when the attempt was flagged explicitly, or passed the QR check
    /// while failing the face match.
    pub fn is_suspicious(record: &AccessLogRecord) -> bool {
        record.suspicious_flag == Some(true)
            || (record.qr_result.as_deref() == Some(QR_PASSED)
                && record.biometric_result.as_deref() == Some(FACE_MISMATCH))
    }

    /// Summarize `records`.
    ///
    /// Every record lands in exactly one of `granted` / `denied`.
    pub fn aggregate(records: &[AccessLogRecord]) -> ReportStats {
        Self::aggregate_refs(records.iter())
    }

    /// Project one record into its display row.
    pub fn project_for_display(record: &AccessLogRecord, options: &DisplayOptions) -> DisplayRow {
        let status = record.final_status.as_deref();
        DisplayRow {
            time: record
                .timestamp
                .map(|ts| format_log_time(&ts, options.timezone, options.use_12h))
                .unwrap_or_else(|| "-".to_string()),
            gate: or_dash(record.gate_id.as_deref()),
            qr: or_dash(record.qr_result.as_deref()),
            confidence_label: format_confidence(record.similarity_value),
            status_label: status_label(status),
            status_tag: status_tag(status),
        }
    }

    /// Lazily project every record, in input order.
    pub fn project_all<'a>(
        records: &'a [AccessLogRecord],
        options: &'a DisplayOptions,
    ) -> impl Iterator<Item = DisplayRow> + 'a {
        records
            .iter()
            .map(move |record| Self::project_for_display(record, options))
    }

    /// Group records by local calendar day and summarize each day.
    ///
    /// Days are returned in ascending order; undated records come last under
    /// [`UNKNOWN_DAY`].
    pub fn aggregate_daily(records: &[AccessLogRecord], tz: Tz) -> Vec<DailyReport> {
        let mut days: BTreeMap<String, Vec<&AccessLogRecord>> = BTreeMap::new();

        for record in records {
            let key = record
                .timestamp
                .map(|ts| ts.with_timezone(&tz).format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| UNKNOWN_DAY.to_string());
            days.entry(key).or_default().push(record);
        }

        days.into_iter()
            .map(|(day, group)| DailyReport {
                day,
                stats: Self::aggregate_refs(group.into_iter()),
            })
            .collect()
    }

    fn aggregate_refs<'a>(records: impl Iterator<Item = &'a AccessLogRecord>) -> ReportStats {
        let mut stats = ReportStats::default();
        let mut confidences = Vec::new();

        for record in records {
            if classify_success(record.final_status.as_deref()) {
                stats.granted += 1;
            } else {
                stats.denied += 1;
            }
            if Self::is_suspicious(record) {
                stats.suspicious += 1;
            }
            confidences.push(normalize_confidence(record.similarity_value));
        }

        stats.efficiency = mean_confidence(confidences);
        stats
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
