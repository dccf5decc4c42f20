//! Label normalization

use crate::models::Observations;

/// Titlecase form of the Latin digraphs, whose uppercase differs from it
fn digraph_titlecase(c: char) -> Option<char> {
    match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    }
}

/// Normalize a raw cell: trim, map missing to "", capitalize.
///
/// The first character is titlecased and the rest lowercased as a whole
/// string, so a trailing sigma becomes `ς`. When the uppercase form of the
/// first character is several characters long (`ß` -> `SS`), only the first
/// of them stays uppercase (`Ss`), so normalizing an already-normalized
/// label is a no-op.
pub fn normalize_label(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    let Some(first) = trimmed.chars().next() else {
        return String::new();
    };

    let mut out = String::with_capacity(trimmed.len());
    match digraph_titlecase(first) {
        Some(title) => out.push(title),
        None => {
            let mut upper = first.to_uppercase();
            if let Some(head) = upper.next() {
                out.push(head);
            }
            out.extend(upper.flat_map(char::to_lowercase));
        }
    }

    // Lowercase with the first character still in place so final sigma
    // sees its preceding letter, then drop that character's lowercase form
    let lower = trimmed.to_lowercase();
    let head_len: usize = first.to_lowercase().map(char::len_utf8).sum();
    out.push_str(lower.get(head_len..).unwrap_or_default());
    out
}

/// Normalize every row, preserving length and order
pub fn normalize_all(observations: &Observations) -> Vec<String> {
    observations
        .values()
        .iter()
        .map(|v| normalize_label(v.as_deref()))
        .collect()
}
