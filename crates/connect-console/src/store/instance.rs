//! Persisted instance configuration (`connect.json`)

use super::{ensure_dir, StoreError};
use connect_console_common::InstanceInfo;
use std::fs;
use std::io;
use std::path::Path;

/// The persisted `{"Id": .., "Arn": ..}` record
pub type InstanceConfig = InstanceInfo;

pub(super) fn save(dir: &Path, path: &Path, config: &InstanceConfig) -> Result<(), StoreError> {
    ensure_dir(dir)?;
    let json = serde_json::to_string(config).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

pub(super) fn load(path: &Path) -> Result<Option<InstanceConfig>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("connect.json")).unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("connect.json");
        let first = InstanceConfig {
            id: "a".to_string(),
            arn: "arn:a".to_string(),
        };
        let second = InstanceConfig {
            id: "b".to_string(),
            arn: "arn:b".to_string(),
        };

        save(dir.path(), &path, &first).unwrap();
        save(dir.path(), &path, &second).unwrap();

        assert_eq!(load(&path).unwrap(), Some(second));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"Id":"b","Arn":"arn:b"}"#
        );
    }

    #[test]
    fn test_corrupt_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("connect.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load(&path), Err(StoreError::Json { .. })));
    }
}
