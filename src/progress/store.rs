use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::persistence::get_data_file_path;

pub const PROGRESS_FILE: &str = "grammar_progress.json";

/// The persisted learning state: which catalog ids the user has checked
/// off, and when each was checked. `learned_ids` keeps insertion order but
/// is semantically a set; `timestamps` holds exactly the ids in
/// `learned_ids`, as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarProgress {
    pub learned_ids: Vec<u32>,
    pub timestamps: HashMap<u32, i64>,
}

/// Durability boundary for one `GrammarProgress` blob. The store never
/// mutates state on its own; the tracker always hands it the full next
/// state. Failures are logged and swallowed so a broken disk never takes
/// the session down.
pub trait ProgressStore {
    /// `None` when nothing was ever saved, or when the stored data cannot
    /// be read or parsed. Callers substitute the default empty state.
    fn load(&self) -> Option<GrammarProgress>;

    fn save(&self, progress: &GrammarProgress);

    fn clear(&self);
}

/// File-backed store under the app data dir, one fixed filename.
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        Self { file_path: get_data_file_path(PROGRESS_FILE) }
    }

    pub fn with_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for FileStore {
    fn load(&self) -> Option<GrammarProgress> {
        if !self.file_path.exists() {
            return None;
        }

        let json = match fs::read_to_string(&self.file_path) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to read grammar progress: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(progress) => Some(progress),
            Err(e) => {
                eprintln!("Failed to parse grammar progress: {}", e);
                None
            }
        }
    }

    fn save(&self, progress: &GrammarProgress) {
        if let Some(parent) = self.file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let json = match serde_json::to_string_pretty(progress) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to serialize grammar progress: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.file_path, json) {
            eprintln!("Failed to save grammar progress: {}", e);
        }
    }

    fn clear(&self) {
        if self.file_path.exists() {
            if let Err(e) = fs::remove_file(&self.file_path) {
                eprintln!("Failed to delete grammar progress: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::with_path(dir.path().join(PROGRESS_FILE))
    }

    #[test]
    fn load_is_absent_before_first_save() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut progress = GrammarProgress::default();
        progress.learned_ids = vec![5, 42];
        progress.timestamps.insert(5, 1_700_000_000_000);
        progress.timestamps.insert(42, 1_700_000_100_000);

        store.save(&progress);
        assert_eq!(store.load(), Some(progress));
    }

    #[test]
    fn empty_state_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&GrammarProgress::default());
        assert_eq!(store.load(), Some(GrammarProgress::default()));
    }

    #[test]
    fn corrupted_file_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROGRESS_FILE);
        fs::write(&path, "{not json").unwrap();

        assert_eq!(FileStore::with_path(path).load(), None);
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&GrammarProgress::default());
        store.clear();
        assert_eq!(store.load(), None);

        // Clearing an absent file is a no-op.
        store.clear();
    }

    #[test]
    fn wire_format_uses_camel_case_keys() {
        let mut progress = GrammarProgress::default();
        progress.learned_ids = vec![1];
        progress.timestamps.insert(1, 1000);

        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"learnedIds\""));
        assert!(json.contains("\"timestamps\""));

        let back: GrammarProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}
