use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::StoreError;

/// Reads a whole JSON document. A missing or unreadable file yields the
/// default value so that process start never fails on bad data.
pub fn load_or_default<T>(path: &Path, label: &str) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        info!("No {label} file at {}, starting empty", path.display());
        return T::default();
    }

    let start = std::time::Instant::now();
    let value = fs::read_to_string(path)
        .map_err(StoreError::from)
        .and_then(|contents| serde_json::from_str::<T>(&contents).map_err(StoreError::from));
    match value {
        Ok(value) => {
            debug!("Loaded {label} from {} in {:?}", path.display(), start.elapsed());
            value
        }
        Err(err) => {
            warn!(
                "Could not load {label} from {}, starting empty. Failed with error: {err}",
                path.display()
            );
            T::default()
        }
    }
}

/// Rewrites the whole document. The data goes to a sibling temporary file
/// first and is renamed over the target, so readers never see half a file.
pub fn save<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let contents = serde_json::to_string_pretty(value)?;
    let temporary = temporary_path(path);
    fs::write(&temporary, contents)?;
    fs::rename(&temporary, path)?;
    Ok(())
}

/// Like [`save`] but only logs failures; memory stays authoritative.
pub fn save_logged<T>(path: &Path, value: &T, label: &str)
where
    T: Serialize + ?Sized,
{
    if let Err(err) = save(path, value) {
        error!(
            "Attempted to save {label} to {}, failed with error: {err}",
            path.display()
        );
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
pub(crate) fn test_path(name: &str) -> PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let unique = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "giveaway-bot-{}-{unique}-{name}.json",
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let path = test_path("missing");
        let value: HashMap<String, u32> = load_or_default(&path, "test data");
        assert!(value.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_default() {
        let path = test_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let value: Vec<u32> = load_or_default(&path, "test data");
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = test_path("roundtrip");
        save(&path, &vec![1u32, 2, 3]).unwrap();
        let value: Vec<u32> = load_or_default(&path, "test data");
        assert_eq!(value, vec![1, 2, 3]);
        assert!(!temporary_path(&path).exists());
    }
}
