//! Per-employee report selection.
//!
//! A [`ReportSession`] tracks which employee is selected and the report
//! built for them. Each [`ReportSession::select`] fetches that employee's access log
//! from a [`LogSource`] on the blocking pool and builds a fresh report.
//! When a newer selection starts before an older fetch completes, the older
//! result is dropped (last write wins). Nothing is cached across selections.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::Mutex;

use gate_core::models::{AccessLogRecord, Employee};
use gate_core::{ReportError, Result};
use gate_data::aggregator::DisplayOptions;
use gate_data::reader;
use gate_data::report::EmployeeReport;

/// Message shown to the user when access logs could not be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch access logs";

/// Maximum number of fetch attempts per selection.
const MAX_RETRY_ATTEMPTS: u32 = 3;

// ── LogSource ─────────────────────────────────────────────────────────────────

/// Where access logs and the employee listing come from.
///
/// Implementations are blocking; the session calls them off the async
/// runtime.
pub trait LogSource: Send + Sync + 'static {
    /// All access-log records of one employee, newest first.
    fn fetch_logs(&self, employee_id: i64) -> Result<Vec<AccessLogRecord>>;

    /// The full employee listing.
    fn list_employees(&self) -> Result<Vec<Employee>>;
}

/// [`LogSource`] over backend JSON exports on disk.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    data_path: PathBuf,
}

impl FileLogSource {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }
}

impl LogSource for FileLogSource {
    fn fetch_logs(&self, employee_id: i64) -> Result<Vec<AccessLogRecord>> {
        reader::load_employee_logs(&self.data_path, employee_id)
    }

    fn list_employees(&self) -> Result<Vec<Employee>> {
        reader::load_employees(&self.data_path)
    }
}

// ── ReportSession ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct SessionState {
    /// Bumped on every selection change; stale fetches compare against it.
    generation: u64,
    selected: Option<i64>,
    report: Option<EmployeeReport>,
    last_error: Option<String>,
}

/// Selection state plus the report for the selected employee.
pub struct ReportSession<S> {
    source: Arc<S>,
    options: DisplayOptions,
    state: Mutex<SessionState>,
}

impl<S: LogSource> ReportSession<S> {
    pub fn new(source: S, options: DisplayOptions) -> Self {
        Self {
            source: Arc::new(source),
            options,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Select `employee_id`, fetch its access log and build the report.
    ///
    /// Returns `None` when the fetch failed (see [`ReportSession::last_error`])
    /// or when another selection superseded this one while it was running.
    pub async fn select(&self, employee_id: i64) -> Option<EmployeeReport> {
        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.selected = Some(employee_id);
            state.report = None;
            state.last_error = None;
            state.generation
        };

        let source = Arc::clone(&self.source);
        let options = self.options;
        let outcome =
            tokio::task::spawn_blocking(move || load_report(&*source, employee_id, &options))
                .await
                .map_err(|e| ReportError::Fetch(e.to_string()))
                .and_then(|result| result);

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::debug!(employee_id, "discarding report for superseded selection");
            return None;
        }

        match outcome {
            Ok(report) => {
                tracing::debug!(
                    employee_id,
                    records = report.rows.len(),
                    "report ready"
                );
                state.report = Some(report.clone());
                Some(report)
            }
            Err(e) => {
                tracing::warn!(employee_id, error = %e, "could not load access logs");
                state.last_error = Some(FETCH_FAILED_MESSAGE.to_string());
                None
            }
        }
    }

    /// Drop the selection and its report.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.selected = None;
        state.report = None;
        state.last_error = None;
    }

    /// Currently selected employee id.
    pub async fn selected(&self) -> Option<i64> {
        self.state.lock().await.selected
    }

    /// Report of the current selection, once loaded.
    pub async fn current_report(&self) -> Option<EmployeeReport> {
        self.state.lock().await.report.clone()
    }

    /// User-facing message for the last failed fetch of the current selection.
    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    /// The employee listing, for selection pickers.
    pub async fn employees(&self) -> Result<Vec<Employee>> {
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || source.list_employees())
            .await
            .map_err(|e| ReportError::Fetch(e.to_string()))?
    }
}

// ── Blocking helpers ──────────────────────────────────────────────────────────

fn load_report<S: LogSource + ?Sized>(
    source: &S,
    employee_id: i64,
    options: &DisplayOptions,
) -> Result<EmployeeReport> {
    let records = fetch_with_retry(source, employee_id)?;

    // The listing only decorates the title; a missing one is not an error.
    let employee = match source.list_employees() {
        Ok(list) => list.into_iter().find(|e| e.id == employee_id),
        Err(e) => {
            tracing::debug!(error = %e, "employee listing unavailable");
            None
        }
    };

    Ok(EmployeeReport::build(employee_id, employee, &records, options))
}

/// Back-off schedule: attempt 1 → 0 ms, attempt 2 → 100 ms, attempt 3 → 200 ms.
fn fetch_with_retry<S: LogSource + ?Sized>(
    source: &S,
    employee_id: i64,
) -> Result<Vec<AccessLogRecord>> {
    let mut last_err = None;

    for attempt in 0..MAX_RETRY_ATTEMPTS {
        if attempt > 0 {
            let sleep_ms = u64::from(attempt) * 100;
            tracing::debug!(attempt, sleep_ms, "retrying fetch after back-off");
            thread::sleep(Duration::from_millis(sleep_ms));
        }

        match source.fetch_logs(employee_id) {
            Ok(records) => return Ok(records),
            Err(e) => {
                tracing::warn!(attempt, error = %e, "fetch attempt failed");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| ReportError::Fetch("no fetch attempted".to_string())))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
