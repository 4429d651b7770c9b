use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Serialize};

use crate::{core::utils::ensure_dir, errors::CashflowError};

const TMP_SUFFIX: &str = "tmp";

/// Writes `value` as pretty JSON by staging to a temporary file and renaming it into place.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), CashflowError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    let tmp = path.with_extension(TMP_SUFFIX);
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a JSON document from disk, returning structured errors on failure.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CashflowError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Like [`load_json`], but a missing file yields `None`.
pub fn load_json_if_exists<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CashflowError> {
    if path.exists() {
        load_json(path).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_preserves_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("values.json");
        save_json(&vec![1, 2, 3], &path).unwrap();
        let loaded: Vec<i32> = load_json(&path).unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        let loaded: Option<Vec<i32>> =
            load_json_if_exists(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_file_reports_serde_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_json::<Vec<i32>>(&path).unwrap_err();
        assert!(matches!(err, CashflowError::Serde(_)), "unexpected: {err:?}");
    }
}
