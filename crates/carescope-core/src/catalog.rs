use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{CareError, Result};
use crate::index::PrefixIndex;
use crate::models::{PatientRecord, SyncReport};

/// Patient lookup over a [`PrefixIndex`] that is rebuilt wholesale on sync.
///
/// A rebuild happens on a private tree and is published by swapping the
/// shared handle, so a concurrent search sees either the previous generation
/// or the new one in full.
#[derive(Debug, Default)]
pub struct PatientCatalog {
    current: RwLock<Arc<PrefixIndex<PatientRecord>>>,
    generation: AtomicU64,
}

impl PatientCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync<I>(&self, records: I) -> Result<SyncReport>
    where
        I: IntoIterator<Item = PatientRecord>,
    {
        let mut next = PrefixIndex::new();
        let mut synced = 0usize;
        let mut indexed_keys = 0usize;
        for record in records {
            let record = Arc::new(record);
            for key in derived_keys(&record) {
                if next.insert(key, Arc::clone(&record)) {
                    indexed_keys += 1;
                }
            }
            synced += 1;
        }

        let mut current = self
            .current
            .write()
            .map_err(|_| CareError::Internal("patient index lock poisoned".to_string()))?;
        *current = Arc::new(next);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        drop(current);

        Ok(SyncReport {
            synced,
            indexed_keys,
            generation,
        })
    }

    /// Records matching `query`, one per patient id, in first-seen order.
    pub fn search(&self, query: &str) -> Result<Vec<Arc<PatientRecord>>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let snapshot = self.snapshot()?;
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for record in snapshot.search(query) {
            if seen.insert(record.id.clone()) {
                out.push(record);
            }
        }
        Ok(out)
    }

    /// Number of completed syncs.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> Result<Arc<PrefixIndex<PatientRecord>>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| CareError::Internal("patient index lock poisoned".to_string()))
    }
}

/// Keys a patient is reachable by: each name token, the full name, the id and
/// the phone number. Empty keys are left for the index to skip.
pub(crate) fn derived_keys(record: &PatientRecord) -> Vec<&str> {
    let mut keys = record.name.split_whitespace().collect::<Vec<_>>();
    keys.push(record.name.as_str());
    keys.push(record.id.as_str());
    keys.push(record.phone.as_str());
    keys
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn patient(id: &str, name: &str, phone: &str) -> PatientRecord {
        PatientRecord::new(id, name, phone)
    }

    fn ids(records: &[Arc<PatientRecord>]) -> Vec<String> {
        records.iter().map(|record| record.id.clone()).collect()
    }

    #[test]
    fn derived_keys_cover_tokens_full_name_id_and_phone() {
        let record = patient("P1", "John  Doe", "555-0100");
        assert_eq!(
            derived_keys(&record),
            vec!["John", "Doe", "John  Doe", "P1", "555-0100"]
        );
    }

    #[test]
    fn search_returns_each_patient_once() {
        let catalog = PatientCatalog::new();
        catalog
            .sync(vec![patient("P1", "John Doe", "")])
            .expect("sync");
        assert_eq!(ids(&catalog.search("jo").expect("search")), vec!["P1"]);
        assert!(catalog.search("xyz").expect("search").is_empty());
    }

    #[test]
    fn search_matches_id_phone_and_second_token() {
        let catalog = PatientCatalog::new();
        catalog
            .sync(vec![
                patient("P1", "John Doe", "5550100"),
                patient("P2", "Jane Roe", "5559999"),
            ])
            .expect("sync");
        assert_eq!(ids(&catalog.search("p2").expect("search")), vec!["P2"]);
        assert_eq!(ids(&catalog.search("5550").expect("search")), vec!["P1"]);
        assert_eq!(ids(&catalog.search("ro").expect("search")), vec!["P2"]);

        let mut both = ids(&catalog.search("555").expect("search"));
        both.sort();
        assert_eq!(both, vec!["P1", "P2"]);
    }

    #[test]
    fn records_sharing_a_path_are_both_found() {
        let catalog = PatientCatalog::new();
        catalog
            .sync(vec![patient("P1", "Jan", ""), patient("P2", "Jane", "")])
            .expect("sync");
        let mut found = ids(&catalog.search("j").expect("search"));
        found.sort();
        assert_eq!(found, vec!["P1", "P2"]);
    }

    #[test]
    fn empty_query_returns_nothing() {
        let catalog = PatientCatalog::new();
        catalog
            .sync(vec![patient("P1", "John Doe", "555")])
            .expect("sync");
        assert!(catalog.search("").expect("search").is_empty());
    }

    #[test]
    fn sync_replaces_previous_generation() {
        let catalog = PatientCatalog::new();
        let first = catalog
            .sync(vec![patient("P1", "John Doe", "")])
            .expect("first sync");
        let second = catalog
            .sync(vec![patient("P2", "Mary Major", "")])
            .expect("second sync");

        assert_eq!(first.generation, 1);
        assert_eq!(second.generation, 2);
        assert_eq!(catalog.generation(), 2);
        assert!(catalog.search("john").expect("search").is_empty());
        assert_eq!(ids(&catalog.search("mary").expect("search")), vec!["P2"]);
    }

    #[test]
    fn sync_reports_records_and_non_empty_keys() {
        let catalog = PatientCatalog::new();
        let report = catalog
            .sync(vec![
                patient("P1", "John Doe", "555"),
                patient("", "", ""),
                patient("P3", "", ""),
            ])
            .expect("sync");
        assert_eq!(report.synced, 3);
        // John, Doe, "John Doe", P1, 555, then P3
        assert_eq!(report.indexed_keys, 6);
    }

    #[test]
    fn partially_filled_records_stay_reachable_by_remaining_keys() {
        let catalog = PatientCatalog::new();
        catalog.sync(vec![patient("P3", "", "")]).expect("sync");
        assert_eq!(ids(&catalog.search("p3").expect("search")), vec!["P3"]);
    }

    #[test]
    fn search_returns_full_record_payload() {
        let catalog = PatientCatalog::new();
        let mut record = patient("P1", "John Doe", "");
        record.extra.insert("ward".to_string(), serde_json::json!("B2"));
        catalog.sync(vec![record]).expect("sync");
        let hits = catalog.search("doe").expect("search");
        assert_eq!(hits[0].extra.get("ward"), Some(&serde_json::json!("B2")));
    }

    #[test]
    fn concurrent_searches_never_see_a_mixed_generation() {
        let catalog = Arc::new(PatientCatalog::new());
        let old = (0..200)
            .map(|i| patient(&format!("A{i}"), &format!("Alpha {i}"), ""))
            .collect::<Vec<_>>();
        let new = (0..200)
            .map(|i| patient(&format!("B{i}"), &format!("Alpha {i}"), ""))
            .collect::<Vec<_>>();
        catalog.sync(old.clone()).expect("initial sync");

        let readers = (0..4)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let hits = catalog.search("alpha").expect("search");
                        let from_old = hits.iter().filter(|r| r.id.starts_with('A')).count();
                        let from_new = hits.iter().filter(|r| r.id.starts_with('B')).count();
                        assert!(
                            (from_old == 200 && from_new == 0) || (from_old == 0 && from_new == 200),
                            "mixed generation: {from_old} old, {from_new} new"
                        );
                    }
                })
            })
            .collect::<Vec<_>>();

        for round in 0..10 {
            let batch = if round % 2 == 0 { new.clone() } else { old.clone() };
            catalog.sync(batch).expect("resync");
        }
        for reader in readers {
            reader.join().expect("reader thread");
        }
    }
}
