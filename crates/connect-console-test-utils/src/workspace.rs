//! Temporary data directories
//!
//! Each test gets its own directory so snapshot files never leak between
//! tests running in parallel.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary data directory, removed on drop
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::Builder::new()
                .prefix("connect-console-test-")
                .tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the workspace
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Whether `name` exists inside the workspace
    pub fn exists(&self, name: &str) -> bool {
        self.file(name).exists()
    }

    /// Write raw contents to `name`
    pub fn write(&self, name: &str, contents: &str) -> Result<()> {
        std::fs::write(self.file(name), contents)?;
        Ok(())
    }

    /// Read `name` as a string
    pub fn read(&self, name: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.file(name))?)
    }
}
