//! Plain-text rendering for non-interactive output.

use std::fmt::Write as _;

use gate_core::formatting::{format_count, format_efficiency};
use gate_core::models::Employee;
use gate_data::report::EmployeeReport;

use crate::report_view::fit_width;

/// Render a report as aligned text lines.
pub fn render_plain(report: &EmployeeReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();

    let _ = writeln!(out, "Activity report: {}", report.title());
    let _ = writeln!(
        out,
        "Granted: {}  Denied: {}  Incidents: {}  Face match: {}",
        format_count(stats.granted),
        format_count(stats.denied),
        format_count(stats.suspicious),
        format_efficiency(stats.efficiency),
    );

    if report.is_empty() {
        let _ = writeln!(out, "No access attempts recorded.");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<22} {:<8} {:<10} {:>10}  Status",
        "Time", "Gate", "QR", "Biometrics"
    );
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{:<22} {:<8} {:<10} {:>10}  {}",
            row.time,
            fit_width(&row.gate, 8),
            fit_width(&row.qr, 10),
            row.confidence_label,
            row.status_label,
        );
    }

    if !report.daily.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>8} {:>10} {:>11}",
            "Day", "Granted", "Denied", "Incidents", "Face match"
        );
        for day in &report.daily {
            let _ = writeln!(
                out,
                "{:<12} {:>8} {:>8} {:>10} {:>11}",
                day.day,
                day.stats.granted,
                day.stats.denied,
                day.stats.suspicious,
                format_efficiency(day.stats.efficiency),
            );
        }
    }

    out
}

/// Render the employee picker list, one employee per line.
pub fn render_employee_list(employees: &[Employee]) -> String {
    let mut out = String::new();
    for e in employees {
        let marker = if e.active { "" } else { " [inactive]" };
        let _ = writeln!(out, "{:>6}  {}{}", e.id, e.display_name(), marker);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::models::{AccessLogRecord, ReportStats};
    use gate_data::aggregator::DisplayOptions;

    fn report() -> EmployeeReport {
        let records: Vec<AccessLogRecord> = serde_json::from_str(
            r#"[
                {"id": 1, "data_czas": "2024-01-15T08:00:00Z", "bramka_id": 1,
                 "wynik_qr": "OK", "procent_podobienstwa": 0.98, "status_finalny": "GRANTED"},
                {"id": 2, "data_czas": "2024-01-15T09:00:00Z", "bramka_id": 1,
                 "wynik_qr": "INVALID", "procent_podobienstwa": 0.40, "status_finalny": "DENIED"}
            ]"#,
        )
        .unwrap();
        EmployeeReport::build(3, None, &records, &DisplayOptions::default())
    }

    #[test]
    fn test_render_plain_contains_stats_and_rows() {
        let text = render_plain(&report());
        assert!(text.starts_with("Activity report: Employee #3\n"));
        assert!(text.contains("Granted: 1  Denied: 1  Incidents: 0  Face match: 69%"));
        assert!(text.contains("2024-01-15 08:00:00"));
        assert!(text.contains("98.0%"));
        assert!(text.contains("SUKCES"));
        assert!(text.contains("ODMOWA"));
        assert!(text.contains("2024-01-15  "));
    }

    #[test]
    fn test_render_plain_empty_report() {
        let empty = EmployeeReport {
            stats: ReportStats::default(),
            rows: vec![],
            daily: vec![],
            ..report()
        };
        let text = render_plain(&empty);
        assert!(text.contains("Face match: 0%"));
        assert!(text.contains("No access attempts recorded."));
    }

    #[test]
    fn test_render_employee_list() {
        let employees: Vec<Employee> = serde_json::from_str(
            r#"[
                {"id": 3, "id_pracownika": "EMP003", "imie": "Anna", "nazwisko": "Nowak"},
                {"id": 4, "id_pracownika": "EMP004", "imie": "Jan", "nazwisko": "Kowalski", "aktywny": false}
            ]"#,
        )
        .unwrap();
        let text = render_employee_list(&employees);
        assert!(text.contains("     3  Anna Nowak (ID: EMP003)\n"));
        assert!(text.contains("Jan Kowalski (ID: EMP004) [inactive]"));
    }
}
