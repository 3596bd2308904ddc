//! Configuration types for the console

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// AWS client configuration
#[derive(Debug, Clone, Default)]
pub struct AwsConfig {
    /// AWS region (falls back to the SDK resolution chain)
    pub region: Option<String>,
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
}

/// Local snapshot store configuration
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Directory holding the CSV snapshots and `connect.json`
    pub data_dir: Option<PathBuf>,
}

/// Configuration for one console run
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    pub aws: AwsConfig,
    pub store: StoreConfig,
    /// Instance id given on the command line; otherwise read from
    /// `connect.json`
    pub instance_id: Option<String>,
}

impl ConsoleConfig {
    pub fn region(&self) -> Option<&str> {
        self.aws.region.as_deref()
    }

    pub fn aws_profile(&self) -> Option<&str> {
        self.aws.aws_profile.as_deref()
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }

    /// The configured data directory, or the platform default
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.store.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

/// Platform data directory for the console
pub fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "connect-console")
        .context("Failed to get project directories")?;
    Ok(proj_dirs.data_local_dir().to_path_buf())
}

/// Create the data directory if it does not exist yet
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory '{}'", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let config = ConsoleConfig {
            store: StoreConfig {
                data_dir: Some(PathBuf::from("/tmp/console")),
            },
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/console"));
    }

    #[test]
    fn accessors_follow_sub_configs() {
        let config = ConsoleConfig {
            aws: AwsConfig {
                region: Some("eu-west-2".to_string()),
                aws_profile: None,
            },
            instance_id: Some("inst-1".to_string()),
            ..Default::default()
        };
        assert_eq!(config.region(), Some("eu-west-2"));
        assert_eq!(config.aws_profile(), None);
        assert_eq!(config.instance_id(), Some("inst-1"));
    }

    #[test]
    fn ensure_data_dir_creates_nested_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_data_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
