use serde::Deserialize;

/// One grammar structure from the catalog. The catalog is embedded at build
/// time and never changes at runtime; `id` is the frequency rank, starting
/// at 1.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrammarEntry {
    pub id: u32,
    pub structure: String,
    pub structure_translation: String,
    pub example: String,
    pub example_translation: String,
    pub notes: Option<String>,
}
