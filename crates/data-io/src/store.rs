use crate::error::IngestError;
use crate::loader::{load_csv, LoadOptions, LoadReport};
use core_types::Dataset;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// The process-wide home of the current dataset.
///
/// Readers take a cheap [`snapshot`](DatasetStore::snapshot) and work on it
/// without holding any lock. A reload builds and validates a complete new
/// dataset first and only then swaps the pointer, so readers see either the
/// old dataset or the new one, never a partial one.
#[derive(Debug)]
pub struct DatasetStore {
    current: RwLock<Arc<Dataset>>,
    source: PathBuf,
    options: LoadOptions,
}

impl DatasetStore {
    /// Creates a store for `source`. Nothing is read until [`reload`](Self::reload).
    pub fn new(source: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            current: RwLock::new(Arc::new(Dataset::empty())),
            source: source.into(),
            options,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The dataset as of now. Later reloads don't affect the returned value.
    pub fn snapshot(&self) -> Arc<Dataset> {
        // The guarded value is only ever replaced wholesale, so a poisoned
        // lock still holds a consistent dataset.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Re-reads the source and swaps the new dataset in.
    ///
    /// On failure the previously loaded dataset stays in place.
    pub fn reload(&self) -> Result<LoadReport, IngestError> {
        let outcome = match load_csv(&self.source, &self.options) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, path = %self.source.display(), "Dataset reload failed; keeping previous data.");
                return Err(e);
            }
        };
        self.replace(outcome.dataset);
        Ok(outcome.report)
    }

    /// Swaps in an already-built dataset and returns the one it replaced.
    pub fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let next = Arc::new(dataset);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        tracing::info!(records = guard.len(), "Dataset replaced.");
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::GdpRecord;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("gdp.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn starts_empty_until_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Country Name,Year,GDP\nA,2020,1\n");
        let store = DatasetStore::new(&path, LoadOptions::default());

        assert!(store.snapshot().is_empty());
        let report = store.reload().unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.source(), path.as_path());
    }

    #[test]
    fn snapshots_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Country Name,Year,GDP\nA,2020,1\n");
        let store = DatasetStore::new(&path, LoadOptions::default());
        store.reload().unwrap();

        let before = store.snapshot();
        write_csv(&dir, "Country Name,Year,GDP\nA,2020,1\nB,2020,2\n");
        store.reload().unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn failed_reload_keeps_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Country Name,Year,GDP\nA,2020,1\n");
        let store = DatasetStore::new(&path, LoadOptions { strict: true });
        store.reload().unwrap();

        write_csv(&dir, "Country Name,Year,GDP\nA,2020,-1\n");
        assert!(store.reload().is_err());
        assert_eq!(store.snapshot().len(), 1);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(store.reload(), Err(IngestError::Io { .. })));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn replace_returns_previous() {
        let store = DatasetStore::new("unused.csv", LoadOptions::default());
        let dataset = Dataset::new(vec![GdpRecord::new("A", None, 2020, 1.0).unwrap()]).unwrap();

        let previous = store.replace(dataset);
        assert!(previous.is_empty());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn concurrent_readers_see_whole_datasets() {
        let store = Arc::new(DatasetStore::new("unused.csv", LoadOptions::default()));
        let sizes = [1usize, 3, 5];

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let len = store.snapshot().len();
                        assert!(len == 0 || sizes.contains(&len));
                    }
                })
            })
            .collect();

        for size in sizes {
            let records = (0..size)
                .map(|i| GdpRecord::new(format!("C{i}"), None, 2020, i as f64).unwrap())
                .collect();
            store.replace(Dataset::new(records).unwrap());
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
