use std::fs::{self, OpenOptions};
use std::io::Write;
use std::time::Instant;

use chrono::Utc;

use crate::error::{CareError, Result};
use crate::jsonl::{jsonl_all_lines_invalid, parse_jsonl_tolerant};
use crate::models::RequestLogEntry;

use super::CareScope;

impl CareScope {
    pub(super) fn try_log_request(&self, entry: &RequestLogEntry) {
        let Some(path) = self.config.request_log.path.as_ref() else {
            return;
        };
        let Ok(serialized) = serde_json::to_string(entry) else {
            return;
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            let _ = fs::create_dir_all(parent);
        }
        let mut line = serialized;
        line.push('\n');
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = file.write_all(line.as_bytes());
        }
    }

    pub(super) fn log_request_status(
        &self,
        request_id: String,
        operation: &str,
        status: &str,
        started: Instant,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: status.to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            error_code: None,
            error_message: None,
            details,
        });
    }

    pub(super) fn log_request_error(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        err: &CareError,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: "error".to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            error_code: Some(err.code().to_string()),
            error_message: Some(err.to_string()),
            details,
        });
    }

    pub(super) fn log_request_warning(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        warning_message: &str,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: "warning".to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            error_code: None,
            error_message: Some(warning_message.to_string()),
            details,
        });
    }

    pub fn list_request_logs(&self, limit: usize) -> Result<Vec<RequestLogEntry>> {
        self.list_request_logs_filtered(limit, None, None)
    }

    /// Newest entries first. Filters compare case-insensitively.
    pub fn list_request_logs_filtered(
        &self,
        limit: usize,
        operation: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<RequestLogEntry>> {
        let Some(path) = self.config.request_log.path.as_ref() else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(path)?;
        let operation = operation.map(str::trim).filter(|x| !x.is_empty());
        let status = status.map(str::trim).filter(|x| !x.is_empty());
        let parsed = parse_jsonl_tolerant::<RequestLogEntry>(&raw);
        if parsed.items.is_empty() && parsed.skipped_lines > 0 {
            return Err(jsonl_all_lines_invalid(
                "request log",
                parsed.skipped_lines,
                parsed.first_error.as_ref(),
            ));
        }

        let mut entries = Vec::new();
        for entry in parsed.items {
            if let Some(op) = operation
                && !entry.operation.eq_ignore_ascii_case(op)
            {
                continue;
            }
            if let Some(st) = status
                && !entry.status.eq_ignore_ascii_case(st)
            {
                continue;
            }
            entries.push(entry);
        }
        entries.reverse();
        entries.truncate(limit.max(1));
        Ok(entries)
    }
}
