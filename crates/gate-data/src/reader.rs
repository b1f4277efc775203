//! Discovery and loading of backend JSON exports.
//!
//! An export directory holds `employees.json` plus one or more access-log
//! files whose names start with `logs` (`logs.json`, `logs-2024-01.jsonl`,
//! ...). JSON files carry an array of records; JSONL files carry one record
//! per line.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use gate_core::models::{AccessLogRecord, Employee};
use gate_core::{ReportError, Result};
use tracing::{debug, warn};

/// File-name prefix of access-log exports inside a data directory.
pub const LOG_FILE_PREFIX: &str = "logs";

/// Employee listing inside a data directory.
pub const EMPLOYEES_FILE: &str = "employees.json";

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `.json` / `.jsonl` files recursively under `dir`, sorted by path.
pub fn find_export_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Data path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_export_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

fn is_export_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "json" || ext == "jsonl")
        .unwrap_or(false)
}

fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(LOG_FILE_PREFIX))
        .unwrap_or(false)
}

// ── Access logs ───────────────────────────────────────────────────────────────

/// Load every access-log record under `path`.
///
/// `path` may be a single JSON / JSONL file or a data directory, in which
/// case every `logs*` export file below it is read.
pub fn load_log_records(path: &Path) -> Result<Vec<AccessLogRecord>> {
    if !path.exists() {
        return Err(ReportError::DataPathNotFound(path.to_path_buf()));
    }

    if !path.is_dir() {
        return read_records_file(path);
    }

    let files: Vec<PathBuf> = find_export_files(path)
        .into_iter()
        .filter(|p| is_log_file(p))
        .collect();
    if files.is_empty() {
        return Err(ReportError::NoDataFiles(path.to_path_buf()));
    }

    let mut records = Vec::new();
    for file in &files {
        records.extend(read_records_file(file)?);
    }

    debug!(
        "Loaded {} access-log records from {} files",
        records.len(),
        files.len()
    );
    Ok(records)
}

/// Load the records of one employee, newest first.
pub fn load_employee_logs(path: &Path, employee_id: i64) -> Result<Vec<AccessLogRecord>> {
    let mut records: Vec<AccessLogRecord> = load_log_records(path)?
        .into_iter()
        .filter(|r| r.employee_id == Some(employee_id))
        .collect();
    sort_newest_first(&mut records);
    Ok(records)
}

/// Order records by timestamp, newest first; undated records go last.
pub fn sort_newest_first(records: &mut [AccessLogRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

fn read_records_file(path: &Path) -> Result<Vec<AccessLogRecord>> {
    if path.extension().map(|ext| ext == "jsonl").unwrap_or(false) {
        return read_jsonl(path);
    }

    let content = read_file(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Parse a JSONL file, skipping blank and unparseable lines.
fn read_jsonl(path: &Path) -> Result<Vec<AccessLogRecord>> {
    let file = std::fs::File::open(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in std::io::BufReader::new(file).lines() {
        let line = line.map_err(|source| ReportError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<AccessLogRecord>(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!("Skipping unparseable line in {}: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} malformed lines in {}", skipped, path.display());
    }
    Ok(records)
}

// ── Employees ─────────────────────────────────────────────────────────────────

/// Load the employee listing from `path` (a directory or the file itself).
pub fn load_employees(path: &Path) -> Result<Vec<Employee>> {
    let file = if path.is_dir() {
        path.join(EMPLOYEES_FILE)
    } else {
        path.to_path_buf()
    };
    if !file.exists() {
        return Err(ReportError::DataPathNotFound(file));
    }

    let content = read_file(&file)?;
    Ok(serde_json::from_str(&content)?)
}

/// Look up one employee by database id.
pub fn load_employee(path: &Path, employee_id: i64) -> Result<Employee> {
    load_employees(path)?
        .into_iter()
        .find(|e| e.id == employee_id)
        .ok_or(ReportError::EmployeeNotFound(employee_id))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
