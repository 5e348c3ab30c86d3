//! Local cache files.
//!
//! Two small JSON files under the platform config directory let a
//! restarted client pick up where it left off: the quick-message list
//! (authoritative in the local-only deployment) and the last submitted
//! lift id (seed for the next-id suggestion until the first poll lands).
//! Every failure here degrades to in-memory behavior; nothing in the
//! client depends on these files existing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

const APP_DIR: &str = "liftlink";
const QUICK_FILE: &str = "quick_messages.json";
const LAST_LIFT_ID_FILE: &str = "last_lift_id.json";

/// Config directory for the application, created on first use.
fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join(APP_DIR);
    if !dir.exists() {
        fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read cache file");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse cache file");
            None
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to serialize cache value");
            return;
        }
    };
    if let Err(e) = fs::write(path, &json) {
        warn!(path = %path.display(), error = %e, "failed to write cache file");
    } else {
        debug!(path = %path.display(), "cache file written");
    }
}

/// Load the persisted quick-message list, if one exists and parses.
pub fn load_quick_messages() -> Option<Vec<String>> {
    read_json(&config_dir()?.join(QUICK_FILE))
}

/// Persist the quick-message list (write-through on every change).
pub fn save_quick_messages(entries: &[String]) {
    let Some(dir) = config_dir() else {
        warn!("could not determine config directory, quick messages not persisted");
        return;
    };
    write_json(&dir.join(QUICK_FILE), &entries);
}

/// Load the last submitted lift id from the previous session.
pub fn load_last_lift_id() -> Option<u32> {
    read_json(&config_dir()?.join(LAST_LIFT_ID_FILE))
}

/// Persist the last submitted lift id.
pub fn save_last_lift_id(id: u32) {
    let Some(dir) = config_dir() else {
        warn!("could not determine config directory, lift id not persisted");
        return;
    };
    write_json(&dir.join(LAST_LIFT_ID_FILE), &id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("liftlink-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn json_roundtrip() {
        let path = temp_path("roundtrip.json");
        let entries = vec!["Ready for lift".to_string(), "Refueling".to_string()];
        write_json(&path, &entries);
        let back: Vec<String> = read_json(&path).unwrap();
        assert_eq!(back, entries);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_reads_as_none() {
        let path = temp_path("does-not-exist.json");
        assert_eq!(read_json::<Vec<String>>(&path), None);
    }

    #[test]
    fn corrupt_file_reads_as_none() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "not json {").unwrap();
        assert_eq!(read_json::<Vec<String>>(&path), None);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn lift_id_roundtrip() {
        let path = temp_path("lift-id.json");
        write_json(&path, &7u32);
        assert_eq!(read_json::<u32>(&path), Some(7));
        fs::remove_file(&path).unwrap();
    }
}
