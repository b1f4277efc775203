//! Assembly of a complete per-employee report.

use serde::Serialize;

use gate_core::models::{AccessLogRecord, DisplayRow, Employee, ReportStats};

use crate::aggregator::{DailyReport, DisplayOptions, ReportAggregator};

/// Everything the presentation layer needs for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeReport {
    /// Database id the records were selected by.
    pub employee_id: i64,
    /// Employee details, when the listing was available.
    pub employee: Option<Employee>,
    pub stats: ReportStats,
    /// One row per record, in the order the records were supplied.
    pub rows: Vec<DisplayRow>,
    /// Per-day breakdown in the display timezone.
    pub daily: Vec<DailyReport>,
}

impl EmployeeReport {
    /// Build the report from a fully loaded record sequence.
    pub fn build(
        employee_id: i64,
        employee: Option<Employee>,
        records: &[AccessLogRecord],
        options: &DisplayOptions,
    ) -> Self {
        Self {
            employee_id,
            employee,
            stats: ReportAggregator::aggregate(records),
            rows: ReportAggregator::project_all(records, options).collect(),
            daily: ReportAggregator::aggregate_daily(records, options.timezone),
        }
    }

    /// Title line: the employee's display name, or the bare id.
    pub fn title(&self) -> String {
        match &self.employee {
            Some(e) => e.display_name(),
            None => format!("Employee #{}", self.employee_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::models::StatusTag;

    fn records() -> Vec<AccessLogRecord> {
        serde_json::from_str(
            r#"[
                {"id": 2, "pracownik_id": 3, "data_czas": "2024-01-16T08:00:00Z",
                 "wynik_qr": "OK", "wynik_biometryczny": "NO_MATCH",
                 "procent_podobienstwa": 40.0, "status_finalny": "DENIED"},
                {"id": 1, "pracownik_id": 3, "data_czas": "2024-01-15T08:00:00Z",
                 "wynik_qr": "OK", "wynik_biometryczny": "MATCH",
                 "procent_podobienstwa": 0.98, "status_finalny": "GRANTED"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_report() {
        let report = EmployeeReport::build(3, None, &records(), &DisplayOptions::default());

        assert_eq!(
            report.stats,
            ReportStats {
                granted: 1,
                denied: 1,
                suspicious: 1,
                efficiency: 69
            }
        );
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].status_tag, StatusTag::Danger);
        assert_eq!(report.rows[1].confidence_label, "98.0%");
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.title(), "Employee #3");
        assert!(!report.is_empty());
    }

    #[test]
    fn test_build_empty_report() {
        let report = EmployeeReport::build(5, None, &[], &DisplayOptions::default());
        assert!(report.is_empty());
        assert_eq!(report.stats, ReportStats::default());
        assert!(report.daily.is_empty());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = EmployeeReport::build(3, None, &records(), &DisplayOptions::default());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["stats"]["efficiency"], 69);
        assert_eq!(value["rows"][0]["status_tag"], "danger");
        assert_eq!(value["daily"][0]["day"], "2024-01-15");
    }
}
