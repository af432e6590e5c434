use std::sync::OnceLock;

use super::models::GrammarEntry;

const CATALOG_JSON: &str = include_str!("../../assets/grammar_structures.json");

static CATALOG: OnceLock<Vec<GrammarEntry>> = OnceLock::new();

/// The full catalog in frequency-rank order.
pub fn entries() -> &'static [GrammarEntry] {
    CATALOG.get_or_init(|| {
        serde_json::from_str(CATALOG_JSON).expect("embedded grammar catalog must parse")
    })
}

pub fn total() -> usize {
    entries().len()
}

pub fn get(id: u32) -> Option<&'static GrammarEntry> {
    entries().iter().find(|entry| entry.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_one_hundred_entries() {
        assert_eq!(total(), 100);
    }

    #[test]
    fn ids_are_sequential_from_one() {
        for (index, entry) in entries().iter().enumerate() {
            assert_eq!(entry.id as usize, index + 1);
        }
    }

    #[test]
    fn text_fields_are_never_empty() {
        for entry in entries() {
            assert!(!entry.structure.is_empty(), "structure missing for id {}", entry.id);
            assert!(
                !entry.structure_translation.is_empty(),
                "translation missing for id {}",
                entry.id
            );
            assert!(!entry.example.is_empty(), "example missing for id {}", entry.id);
            assert!(
                !entry.example_translation.is_empty(),
                "example translation missing for id {}",
                entry.id
            );
            if let Some(notes) = &entry.notes {
                assert!(!notes.is_empty(), "empty notes for id {}", entry.id);
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        let first = get(1).unwrap();
        assert_eq!(first.structure, "〜だ / 〜です");
        assert!(get(0).is_none());
        assert!(get(101).is_none());
    }
}
