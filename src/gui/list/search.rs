use wana_kana::ConvertJapanese;

use crate::core::GrammarEntry;

/// True when the query hits any text field of the entry. Absent notes never
/// match. The caller trims the query; an empty query matches everything.
pub fn matches_search(entry: &GrammarEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    text_matches_search(&entry.structure, query)
        || text_matches_search(&entry.structure_translation, query)
        || text_matches_search(&entry.example, query)
        || text_matches_search(&entry.example_translation, query)
        || entry.notes.as_deref().map_or(false, |notes| text_matches_search(notes, query))
}

/// Case-insensitive substring match. A romaji query additionally matches
/// kana text, so "masu" finds 「ます」 without an IME.
pub fn text_matches_search(text: &str, query: &str) -> bool {
    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();

    if text_lower.contains(&query_lower) {
        return true;
    }

    let hiragana = query_lower.to_hiragana();
    if hiragana != query_lower
        && (text_lower.contains(&hiragana) || text_lower.contains(&hiragana.to_katakana()))
    {
        return true;
    }

    false
}
