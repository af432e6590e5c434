use serde::{
    Deserialize,
    Serialize,
};

use crate::persistence::{
    load_json_or_default,
    save_json,
};

pub const SETTINGS_FILE: &str = "settings.json";

/// Presentation preferences. Search text and the learned filter are view
/// state and deliberately not persisted.
#[derive(Clone, Serialize, Deserialize)]
pub struct SettingsData {
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

impl SettingsData {
    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }

    pub fn save(&self) {
        if let Err(e) = save_json(self, SETTINGS_FILE) {
            eprintln!("Failed to save settings: {}", e);
        }
    }
}
