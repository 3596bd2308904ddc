//! Local snapshot store
//!
//! Flat CSV files holding the last fetched list and the last confirmed
//! selection for each resource kind, plus the JSON instance config. The
//! store is single-writer and unlocked: the running console owns its data
//! directory for the whole session.

mod instance;

pub use instance::InstanceConfig;

use connect_console_common::defaults::INSTANCE_CONFIG_FILE;
use connect_console_common::{Resource, ResourceKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors reading or writing local files
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to parse a CSV file (bad row, missing column)
    #[error("Failed to read '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to parse or write the instance config
    #[error("Failed to parse '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem error
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Outcome of [`SnapshotStore::clear`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClearReport {
    /// Files that existed and were removed
    pub removed: usize,
    /// Files that did not exist
    pub absent: usize,
}

/// Snapshot and subset files under one data directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self, kind: ResourceKind) -> PathBuf {
        self.dir.join(kind.snapshot_file())
    }

    pub fn subset_path(&self, kind: ResourceKind) -> PathBuf {
        self.dir.join(kind.subset_file())
    }

    pub fn instance_config_path(&self) -> PathBuf {
        self.dir.join(INSTANCE_CONFIG_FILE)
    }

    pub fn has_snapshot(&self, kind: ResourceKind) -> bool {
        self.snapshot_path(kind).exists()
    }

    pub fn has_subset(&self, kind: ResourceKind) -> bool {
        self.subset_path(kind).exists()
    }

    /// Replace the full snapshot of `kind`
    pub fn write_snapshot<R: Resource + Serialize>(
        &self,
        kind: ResourceKind,
        rows: &[R],
    ) -> Result<(), StoreError> {
        write_csv(&self.dir, &self.snapshot_path(kind), rows)
    }

    pub fn read_snapshot<R: DeserializeOwned>(
        &self,
        kind: ResourceKind,
    ) -> Result<Vec<R>, StoreError> {
        read_csv(&self.snapshot_path(kind))
    }

    /// Replace the persisted selected subset of `kind`
    pub fn write_subset<R: Resource + Serialize>(
        &self,
        kind: ResourceKind,
        rows: &[R],
    ) -> Result<(), StoreError> {
        write_csv(&self.dir, &self.subset_path(kind), rows)
    }

    pub fn read_subset<R: DeserializeOwned>(
        &self,
        kind: ResourceKind,
    ) -> Result<Vec<R>, StoreError> {
        read_csv(&self.subset_path(kind))
    }

    /// Remove all four snapshot and subset files. Missing files are not an
    /// error; the instance config is left in place.
    pub fn clear(&self) -> Result<ClearReport, StoreError> {
        let mut report = ClearReport::default();

        for kind in ResourceKind::ALL {
            for path in [self.snapshot_path(kind), self.subset_path(kind)] {
                match fs::remove_file(&path) {
                    Ok(()) => {
                        debug!(path = %path.display(), "Removed");
                        report.removed += 1;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => report.absent += 1,
                    Err(e) => return Err(StoreError::io(&path, e)),
                }
            }
        }

        Ok(report)
    }

    /// Persist the instance identity, overwriting any previous one
    pub fn save_instance_config(&self, config: &InstanceConfig) -> Result<(), StoreError> {
        instance::save(&self.dir, &self.instance_config_path(), config)
    }

    /// Read the persisted instance identity, if any
    pub fn load_instance_config(&self) -> Result<Option<InstanceConfig>, StoreError> {
        instance::load(&self.instance_config_path())
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))
}

/// Write `rows` under an explicit header, so an empty file still names its columns
fn write_csv<R: Resource + Serialize>(
    dir: &Path,
    path: &Path,
    rows: &[R],
) -> Result<(), StoreError> {
    ensure_dir(dir)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StoreError::csv(path, e))?;
    writer
        .write_record(R::COLUMNS)
        .map_err(|e| StoreError::csv(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))?;

    debug!(path = %path.display(), rows = rows.len(), "Wrote CSV");
    Ok(())
}

fn read_csv<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(|e| StoreError::csv(path, e))
}
