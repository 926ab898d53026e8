use rustc_hash::FxHashMap;

use crate::models::MediaRecord;

#[derive(Debug, Clone)]
struct DirectEntry {
    count: usize,
    latest: MediaRecord,
}

/// Per-folder bookkeeping for items sitting directly in a folder,
/// not in any of its subfolders.
#[derive(Debug, Default, Clone)]
pub struct DirectFileTracker {
    entries: FxHashMap<String, DirectEntry>,
}

impl DirectFileTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `record` as a direct item of `path`.
    ///
    /// The latest item only changes on a strictly newer capture time.
    pub fn record(&mut self, path: &str, record: &MediaRecord) {
        match self.entries.get_mut(path) {
            Some(entry) => {
                entry.count += 1;
                if record.captured_at > entry.latest.captured_at {
                    entry.latest = record.clone();
                }
            }
            None => {
                self.entries.insert(
                    path.to_string(),
                    DirectEntry {
                        count: 1,
                        latest: record.clone(),
                    },
                );
            }
        }
    }

    pub fn count_for(&self, path: &str) -> usize {
        self.entries.get(path).map(|e| e.count).unwrap_or(0)
    }

    pub fn latest_for(&self, path: &str) -> Option<&MediaRecord> {
        self.entries.get(path).map(|e| &e.latest)
    }
}
