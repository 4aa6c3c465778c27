//! File-backed collection store.
//!
//! Each collection is one JSON array on disk. A write fully replaces the
//! prior content; there is no append path and no partial update.

use crate::errors::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// The two signal collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Signals awaiting moderation.
    Pending,
    /// Signals published for public read.
    Approved,
}

impl Collection {
    /// Stable collection name, used for the file name and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Pending => "pending",
            Collection::Approved => "approved",
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            Collection::Pending => "pending.json",
            Collection::Approved => "approved.json",
        }
    }
}

/// JSON-file store for the signal collections.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `data_dir`. The directory is created lazily
    /// on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Read a collection, returning its records in stored order.
    ///
    /// A missing file yields an empty vector. Corrupt content is logged and
    /// also yields an empty vector; readers are never failed by this store.
    pub fn read_collection<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let path = self.collection_path(collection);

        let raw = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(collection = collection.name(), "Collection file absent, treating as empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(
                    collection = collection.name(),
                    error = %e,
                    "Failed to read collection file, degrading to empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    collection = collection.name(),
                    error = %e,
                    "Collection file unparsable, degrading to empty"
                );
                Vec::new()
            }
        }
    }

    /// Replace a collection's on-disk content with `records`.
    ///
    /// The file is written as a pretty-printed JSON array so the stored
    /// state stays human-readable.
    pub fn write_collection<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::CreateDir {
            path: self.data_dir.display().to_string(),
            source,
        })?;

        let body =
            serde_json::to_vec_pretty(records).map_err(|source| StoreError::Serialize {
                collection: collection.name(),
                source,
            })?;

        let path = self.collection_path(collection);
        fs::write(&path, body).map_err(|source| StoreError::Write {
            collection: collection.name(),
            source,
        })?;

        debug!(
            collection = collection.name(),
            count = records.len(),
            "Collection written"
        );
        Ok(())
    }
}
