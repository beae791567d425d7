//! Load-once handle for the immutable dataset.
//!
//! The dataset is read the first time it is requested and shared read-only
//! afterwards. A failed load is not cached, so the next request retries.

use super::loader::load_dataset;
use super::Dataset;
use crate::utils::error::LoadError;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Lazily-initialised, immutable dataset bound to one source file
#[derive(Debug)]
pub struct DatasetHandle {
    source: PathBuf,
    cell: OnceLock<Dataset>,
}

impl DatasetHandle {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the dataset, loading it on first use
    pub fn get(&self) -> Result<&Dataset, LoadError> {
        if let Some(dataset) = self.cell.get() {
            debug!("Dataset cache hit: {}", self.source.display());
            return Ok(dataset);
        }

        let loaded = load_dataset(&self.source)?;
        Ok(self.cell.get_or_init(|| loaded))
    }
}

static SHARED: OnceLock<DatasetHandle> = OnceLock::new();

/// Process-wide dataset, loaded from `source` on first call
///
/// The first call fixes the source; later calls naming another file get the
/// already-bound dataset.
pub fn shared(source: impl AsRef<Path>) -> Result<&'static Dataset, LoadError> {
    let source = source.as_ref();
    let handle = SHARED.get_or_init(|| DatasetHandle::new(source));

    if handle.source() != source {
        warn!(
            "Shared dataset is bound to {}; ignoring {}",
            handle.source().display(),
            source.display()
        );
    }

    handle.get()
}
