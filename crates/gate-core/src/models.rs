use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::time_utils::parse_timestamp_value;

/// A single access attempt as exported by the access-control backend.
///
/// The backend names its columns in Polish snake_case (`data_czas`,
/// `status_finalny`, ...). Both those names and the English field names
/// below are accepted on input; output always uses the English names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessLogRecord {
    /// Opaque record identifier (numeric ids are kept as their decimal text).
    #[serde(default, deserialize_with = "de_flexible_string")]
    pub id: String,
    /// Database id of the employee the attempt was matched to.
    #[serde(default, alias = "pracownik_id")]
    pub employee_id: Option<i64>,
    /// When the attempt happened.
    #[serde(default, alias = "data_czas", deserialize_with = "de_opt_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Physical entry point, if recorded.
    #[serde(default, alias = "bramka_id", deserialize_with = "de_opt_flexible_string")]
    pub gate_id: Option<String>,
    /// Outcome of the QR pass check, e.g. `OK` or `INVALID`.
    #[serde(default, alias = "wynik_qr")]
    pub qr_result: Option<String>,
    /// Outcome of the face match, e.g. `MATCH` or `NO_MATCH`.
    #[serde(default, alias = "wynik_biometryczny")]
    pub biometric_result: Option<String>,
    /// Face-match confidence; either a fraction in `[0, 1]` or a percentage.
    #[serde(default, alias = "procent_podobienstwa")]
    pub similarity_value: Option<f64>,
    /// Final decision text. Two vocabularies occur: `GRANTED` / `DENIED`
    /// and the localized `SUKCES` / `ODMOWA - ...` forms.
    #[serde(default, alias = "status_finalny")]
    pub final_status: Option<String>,
    /// Explicit suspicious-attempt marker set by the backend.
    #[serde(default, alias = "podejrzana")]
    pub suspicious_flag: Option<bool>,
    /// Path of the snapshot taken at the gate.
    #[serde(default, alias = "sciezka_zdjecia")]
    pub photo_path: Option<String>,
}

/// An employee as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Numeric database id; access logs are keyed by this value.
    pub id: i64,
    /// Human-facing employee code, e.g. `EMP001`.
    #[serde(alias = "id_pracownika", alias = "employeeId")]
    pub employee_code: String,
    #[serde(alias = "imie", alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "nazwisko", alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "stanowisko")]
    pub position: Option<String>,
    #[serde(default, alias = "data_zatrudnienia", alias = "hireDate")]
    pub hire_date: Option<NaiveDate>,
    #[serde(default = "default_active", alias = "aktywny", alias = "isActive")]
    pub active: bool,
}

impl Employee {
    /// Label used by the employee picker: `"Jan Kowalski (ID: EMP001)"`.
    pub fn display_name(&self) -> String {
        format!(
            "{} {} (ID: {})",
            self.first_name, self.last_name, self.employee_code
        )
    }
}

fn default_active() -> bool {
    true
}

/// Summary counters for one employee's access log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Attempts whose final status counts as a success.
    pub granted: usize,
    /// Every other attempt.
    pub denied: usize,
    /// Attempts flagged suspicious, explicitly or by a QR pass paired with a
    /// face mismatch.
    pub suspicious: usize,
    /// Rounded mean face-match confidence on the 0–100 scale. Not clamped.
    pub efficiency: i64,
}

impl ReportStats {
    /// Number of records the stats were computed from.
    pub fn total(&self) -> usize {
        self.granted + self.denied
    }
}

/// Visual category of a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTag {
    Success,
    Danger,
    Neutral,
}

/// One access-log record prepared for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Local date and time, or `-`.
    pub time: String,
    /// Gate id, or `-`.
    pub gate: String,
    /// QR check outcome, or `-`.
    pub qr: String,
    /// Normalized confidence with one decimal, e.g. `"97.9%"`.
    pub confidence_label: String,
    /// `SUKCES`, `ODMOWA`, the raw status, or `-`.
    pub status_label: String,
    pub status_tag: StatusTag,
}

// ── Serde helpers ─────────────────────────────────────────────────────────────

/// Accept a JSON string or number; `null` becomes `None`.
fn de_opt_flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn de_flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_flexible_string(deserializer)?.unwrap_or_default())
}

/// Unparseable timestamps become `None` instead of failing the whole record.
fn de_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp_value))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
