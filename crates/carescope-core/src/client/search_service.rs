use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;

use crate::error::Result;
use crate::models::{PatientRecord, SyncReport};

use super::CareScope;

impl CareScope {
    /// Replaces the searchable patient set with `records`.
    pub fn sync_patients(&self, records: Vec<PatientRecord>) -> Result<SyncReport> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        let duplicate_ids = count_duplicate_ids(&records);

        match self.catalog.sync(records) {
            Ok(report) => {
                let details = json!({
                    "synced": report.synced,
                    "indexed_keys": report.indexed_keys,
                    "generation": report.generation,
                    "duplicate_ids": duplicate_ids,
                });
                if duplicate_ids > 0 {
                    self.log_request_warning(
                        request_id,
                        "patients.sync",
                        started,
                        "patient ids are not unique; search keeps the first record per id",
                        Some(details),
                    );
                } else {
                    self.log_request_status(
                        request_id,
                        "patients.sync",
                        "ok",
                        started,
                        Some(details),
                    );
                }
                Ok(report)
            }
            Err(err) => {
                self.log_request_error(request_id, "patients.sync", started, &err, None);
                Err(err)
            }
        }
    }

    /// Prefix lookup over name tokens, full name, id and phone.
    pub fn search_patients(&self, query: &str) -> Result<Vec<Arc<PatientRecord>>> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        // Queries carry patient identifiers; only their shape is logged.
        let query_chars = query.chars().count();

        match self.catalog.search(query) {
            Ok(hits) => {
                self.log_request_status(
                    request_id,
                    "patients.search",
                    "ok",
                    started,
                    Some(json!({
                        "query_chars": query_chars,
                        "result_count": hits.len(),
                        "generation": self.catalog.generation(),
                    })),
                );
                Ok(hits)
            }
            Err(err) => {
                self.log_request_error(
                    request_id,
                    "patients.search",
                    started,
                    &err,
                    Some(json!({ "query_chars": query_chars })),
                );
                Err(err)
            }
        }
    }
}

fn count_duplicate_ids(records: &[PatientRecord]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    let mut duplicates = 0;
    for record in records {
        if !seen.insert(record.id.as_str()) {
            duplicates += 1;
        }
    }
    duplicates
}
