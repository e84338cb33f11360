//! Log query endpoint.
//!
//! `GET /logs?date=YYYY-MM-DD[THH:MM[:SS]]&level=<level>` reads the JSON
//! log file for that day and returns its entries sorted by timestamp.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AppState;
use crate::error::ApiError;

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Deserialize)]
pub struct LogParams {
    pub date: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub status: &'static str,
    pub date: String,
    pub level: Option<&'static str>,
    pub count: usize,
    pub logs: Vec<Value>,
}

/// Extracts the calendar date from a date or datetime string.
fn parse_log_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|at| at.date())
}

/// Unknown levels are ignored rather than rejected.
fn normalize_level(raw: Option<&str>) -> Option<&'static str> {
    let raw = raw?.trim();
    LEVELS
        .iter()
        .copied()
        .find(|level| level.eq_ignore_ascii_case(raw))
}

async fn read_lines(path: &Path) -> Result<Vec<String>, ApiError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(ApiError::Internal(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}

fn entry_timestamp(entry: &Value) -> i64 {
    entry
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|ts| ts.timestamp_micros())
        .unwrap_or(0)
}

fn parse_entries(lines: Vec<String>) -> Vec<Value> {
    lines
        .into_iter()
        .filter_map(|line| serde_json::from_str::<Value>(&line).ok())
        .filter(Value::is_object)
        .collect()
}

/// Event identity without the timestamp, which each file layer stamps on its own.
fn event_key(entry: &Value) -> String {
    let mut entry = entry.clone();
    if let Some(fields) = entry.as_object_mut() {
        fields.remove("timestamp");
    }
    entry.to_string()
}

/// Appends error-file entries that have no counterpart in the app file.
///
/// Each app entry absorbs at most one error entry, so repeated events keep
/// their multiplicity.
fn merge_error_entries(entries: &mut Vec<Value>, errors: Vec<Value>) {
    let mut unmatched: HashMap<String, usize> = HashMap::new();
    for entry in entries.iter() {
        *unmatched.entry(event_key(entry)).or_default() += 1;
    }

    for entry in errors {
        match unmatched.get_mut(&event_key(&entry)) {
            Some(count) if *count > 0 => *count -= 1,
            _ => entries.push(entry),
        }
    }
}

fn filter_entries(entries: Vec<Value>, level: Option<&str>) -> Vec<Value> {
    let mut entries: Vec<Value> = entries
        .into_iter()
        .filter(|entry| match level {
            Some(level) => entry
                .get("level")
                .and_then(Value::as_str)
                .is_some_and(|l| l.eq_ignore_ascii_case(level)),
            None => true,
        })
        .collect();

    entries.sort_by_key(entry_timestamp);
    entries
}

/// GET /logs
#[tracing::instrument(skip(state))]
pub async fn query(
    State(state): State<AppState>,
    params: Result<Query<LogParams>, QueryRejection>,
) -> Result<Json<LogsResponse>, ApiError> {
    let Query(params) = params?;

    let raw_date = params
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing required query parameter: date".into()))?;
    let date = parse_log_date(&raw_date).ok_or_else(|| {
        ApiError::BadRequest("Invalid date format. Use YYYY-MM-DD or ISO datetime.".into())
    })?;
    let level = normalize_level(params.level.as_deref());

    let app_lines = read_lines(&state.log_files.path_for(date, false)).await?;
    let mut entries = parse_entries(app_lines);
    if level == Some("error") {
        let error_lines = read_lines(&state.log_files.path_for(date, true)).await?;
        merge_error_entries(&mut entries, parse_entries(error_lines));
    }

    let logs = filter_entries(entries, level);
    Ok(Json(LogsResponse {
        status: "ok",
        date: date.format("%Y-%m-%d").to_string(),
        level,
        count: logs.len(),
        logs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_log_date_formats() {
        assert_eq!(parse_log_date("2025-08-31"), Some(ymd(2025, 8, 31)));
        assert_eq!(parse_log_date("2025-08-31T10:15"), Some(ymd(2025, 8, 31)));
        assert_eq!(parse_log_date("2025-08-31T10:15:30"), Some(ymd(2025, 8, 31)));
        assert_eq!(
            parse_log_date("2025-08-31T23:15:30+02:00"),
            Some(ymd(2025, 8, 31))
        );
        assert_eq!(parse_log_date("31/08/2025"), None);
        assert_eq!(parse_log_date("2025-02-30"), None);
    }

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level(Some("ERROR")), Some("error"));
        assert_eq!(normalize_level(Some(" warn ")), Some("warn"));
        assert_eq!(normalize_level(Some("verbose")), None);
        assert_eq!(normalize_level(None), None);
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_filter_entries_sorts_and_skips_non_json() {
        let entries = parse_entries(lines(&[
            r#"{"timestamp":"2025-08-31T10:00:02Z","level":"INFO","message":"b"}"#,
            "not json",
            r#"{"timestamp":"2025-08-31T10:00:01Z","level":"ERROR","message":"a"}"#,
            "[1, 2]",
        ]));
        assert_eq!(entries.len(), 2);

        let all = filter_entries(entries.clone(), None);
        assert_eq!(all[0]["message"], "a");
        assert_eq!(all[1]["message"], "b");

        let errors = filter_entries(entries, Some("error"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["level"], "ERROR");
    }

    #[test]
    fn test_merge_ignores_timestamp_differences() {
        let mut entries = parse_entries(lines(&[
            r#"{"timestamp":"2025-08-31T10:00:01.900789Z","level":"ERROR","message":"boom"}"#,
            r#"{"timestamp":"2025-08-31T10:00:02.100000Z","level":"INFO","message":"ok"}"#,
        ]));
        let errors = parse_entries(lines(&[
            r#"{"timestamp":"2025-08-31T10:00:01.901116Z","level":"ERROR","message":"boom"}"#,
            r#"{"timestamp":"2025-08-31T09:00:00Z","level":"ERROR","message":"rotated"}"#,
        ]));

        merge_error_entries(&mut entries, errors);
        let merged = filter_entries(entries, Some("error"));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0]["message"], "rotated");
        assert_eq!(merged[1]["message"], "boom");
    }

    #[test]
    fn test_merge_keeps_repeated_events() {
        let event = r#"{"timestamp":"2025-08-31T10:00:01Z","level":"ERROR","message":"boom"}"#;
        let mut entries = parse_entries(lines(&[event, event]));
        let errors = parse_entries(lines(&[event, event, event]));

        merge_error_entries(&mut entries, errors);
        assert_eq!(entries.len(), 3);
    }
}
