//! Packed URL cell extraction.
//!
//! A tactic export stores its impression pixels as one JSON-ish cell, e.g.
//! `["https:\/\/px.a.test\/i?x=1","https:\/\/px.b.test\/i"]`. The cell is
//! split on commas; each piece is cleaned by splitting on double quotes and
//! keeping the fragments longer than one character, which drops the
//! brackets and separators. Each cleaned piece becomes one record.
//!
//! Escapes are left in place; the verification client decodes them.

use log::warn;

use crate::models::ImpressionRecord;

/// Whether a packed URL cell holds anything worth dispatching.
///
/// Rejects an empty split, a cell that starts with the empty JSON array
/// `[]`, and the literal `NULL` some exports write for missing values.
pub fn is_valid_url_cell(cell: &str, pieces: &[&str]) -> bool {
    !(pieces.is_empty() || pieces[0] == "[]" || cell == "NULL")
}

/// Cleans one comma piece of a URL cell into its candidate URLs.
pub fn clean_url_fragment(piece: &str) -> Vec<String> {
    piece
        .split('"')
        .filter(|fragment| fragment.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Expands one input row into impression records.
///
/// Invalid cells yield no records and are logged; pieces that clean down to
/// nothing are dropped so every record has at least one candidate.
pub fn extract_impression_records(tactic_id: &str, cell: &str) -> Vec<ImpressionRecord> {
    let pieces: Vec<&str> = cell.split(',').collect();
    if !is_valid_url_cell(cell, &pieces) {
        warn!("Tactic {} has no impression URLs, skipping", tactic_id);
        return Vec::new();
    }

    pieces
        .into_iter()
        .map(clean_url_fragment)
        .filter(|urls| !urls.is_empty())
        .map(|impression_url_arr| ImpressionRecord {
            tactic_id: tactic_id.to_string(),
            impression_url_arr,
        })
        .collect()
}
