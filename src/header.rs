//! Header normalization.
//!
//! Turns the raw text of a sheet's header row into unique, SQL-safe column
//! names and remembers which source column each name came from. Columns with
//! an empty header, or whose header looks like a broken reference, are
//! dropped entirely.
//!
//! ```
//! use sheetload::header::normalize_headers;
//!
//! let raw = ["ID", "ID", "#REF!", "3", ""].map(String::from);
//! let columns = normalize_headers(&raw);
//!
//! let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, ["id", "id_2", "col_3"]);
//! ```

use std::collections::{HashMap, HashSet};

/// Any header containing this (after trimming and lowercasing) is excluded.
pub const REF_ERROR_MARKER: &str = "ref";

/// Prefix for headers made only of digits.
pub const NUMERIC_PREFIX: &str = "col_";

/// Literal substitutions applied in order to every kept header.
pub const SUBSTITUTIONS: &[(&str, &str)] = &[(" ", "_"), ("№", "no"), (".", "")];

/// A header cell that survived normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedColumn {
    pub name: String,
    /// Position of the column in the original sheet row.
    pub source_index: usize,
}

/// Deduplication state for one header row: how often each cleaned name has
/// been seen, and every name handed out so far.
#[derive(Debug, Clone, Default)]
pub struct NameCounts {
    seen: HashMap<String, usize>,
    emitted: HashSet<String>,
}

impl NameCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `base` has been claimed, including bumped collisions.
    #[cfg(test)]
    fn count(&self, base: &str) -> usize {
        self.seen.get(base).copied().unwrap_or(0)
    }

    /// Claims a unique name derived from `base`.
    ///
    /// The first claim returns `base`; the Nth returns `base_N`. If that name
    /// was already produced by a different base (a literal `name_2` header,
    /// say), N keeps increasing until the name is free.
    fn claim(&mut self, base: String) -> String {
        let n = self.seen.entry(base.clone()).or_insert(0);
        *n += 1;

        let mut name = if *n > 1 {
            format!("{base}_{n}")
        } else {
            base.clone()
        };
        while self.emitted.contains(&name) {
            *n += 1;
            name = format!("{base}_{n}");
        }

        self.emitted.insert(name.clone());
        name
    }
}

/// Normalizes a whole header row.
///
/// Never fails. An empty input, or one where every cell is excluded, yields
/// an empty vector.
pub fn normalize_headers(raw: &[String]) -> Vec<NormalizedColumn> {
    let mut counts = NameCounts::new();
    let mut columns = Vec::with_capacity(raw.len());

    for (index, cell) in raw.iter().enumerate() {
        let (name, next) = normalize_cell(cell, counts);
        counts = next;
        if let Some(name) = name {
            columns.push(NormalizedColumn {
                name,
                source_index: index,
            });
        }
    }

    tracing::debug!(
        raw = raw.len(),
        kept = columns.len(),
        "Normalized header row"
    );
    columns
}

/// Normalizes a single header cell against the counts seen so far.
///
/// Returns the final name (or `None` if the cell is excluded) together with
/// the updated counts.
pub fn normalize_cell(cell: &str, mut counts: NameCounts) -> (Option<String>, NameCounts) {
    let Some(base) = clean_name(cell) else {
        return (None, counts);
    };

    let name = counts.claim(base);
    (Some(name), counts)
}

/// Trims, lowercases, applies the numeric prefix and the substitution table.
/// Returns `None` for excluded headers.
pub fn clean_name(cell: &str) -> Option<String> {
    let mut name = cell.trim().to_lowercase();

    if name.is_empty() || name.contains(REF_ERROR_MARKER) {
        return None;
    }

    if is_numeric(&name) {
        name = format!("{NUMERIC_PREFIX}{name}");
    }

    for (from, to) in SUBSTITUTIONS {
        name = name.replace(from, to);
    }

    Some(name)
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        let raw: Vec<String> = raw.iter().map(|s| (*s).to_owned()).collect();
        normalize_headers(&raw).into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_mixed_header_row() {
        let raw: Vec<String> = ["ID", "ID", "#REF!", "3", ""]
            .iter()
            .map(|s| (*s).to_owned())
            .collect();
        let columns = normalize_headers(&raw);

        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let indices: Vec<usize> = columns.iter().map(|c| c.source_index).collect();
        assert_eq!(names, ["id", "id_2", "col_3"]);
        assert_eq!(indices, [0, 1, 3]);
    }

    #[test]
    fn test_empty_and_blank_headers_are_dropped() {
        assert!(names(&[]).is_empty());
        assert!(names(&["", "   ", "\t"]).is_empty());
    }

    #[test]
    fn test_reference_marker_matches_anywhere() {
        assert_eq!(names(&["#REF!", "Reference", "Preferred", "Name"]), ["name"]);
    }

    #[test]
    fn test_numeric_header_gets_prefix() {
        assert_eq!(names(&["7"]), ["col_7"]);
        assert_eq!(names(&[" 2024 "]), ["col_2024"]);
        // Not purely numeric, so no prefix.
        assert_eq!(names(&["7a", "1.5"]), ["7a", "15"]);
    }

    #[test]
    fn test_case_and_whitespace_duplicates() {
        assert_eq!(names(&["Name", "name "]), ["name", "name_2"]);
    }

    #[test]
    fn test_duplicates_counted_across_whole_row() {
        assert_eq!(
            names(&["a", "b", "a", "c", "A", "b"]),
            ["a", "b", "a_2", "c", "a_3", "b_2"]
        );
    }

    #[test]
    fn test_numeric_collides_with_literal_prefixed_name() {
        assert_eq!(names(&["col_7", "7"]), ["col_7", "col_7_2"]);
    }

    #[test]
    fn test_substitutions() {
        assert_eq!(names(&["No."]), ["no"]);
        assert_eq!(names(&["№ Tour"]), ["no_tour"]);
        assert_eq!(names(&["Start Date"]), ["start_date"]);
        assert_eq!(names(&["Price ($)"]), ["price_($)"]);
    }

    #[test]
    fn test_dedup_uses_substituted_name() {
        assert_eq!(names(&["Tour No", "tour_no", "Tour No."]), [
            "tour_no",
            "tour_no_2",
            "tour_no_3"
        ]);
    }

    #[test]
    fn test_normalize_cell_threads_counts() {
        let (first, counts) = normalize_cell("Name", NameCounts::new());
        let (second, counts) = normalize_cell("NAME", counts);
        let (skipped, counts) = normalize_cell("", counts);

        assert_eq!(first.as_deref(), Some("name"));
        assert_eq!(second.as_deref(), Some("name_2"));
        assert!(skipped.is_none());
        assert_eq!(counts.count("name"), 2);
    }

    #[test]
    fn test_literal_suffix_does_not_collide() {
        assert_eq!(names(&["x", "X", "x_2"]), ["x", "x_2", "x_2_2"]);
        assert_eq!(names(&["x_2", "x", "x"]), ["x_2", "x", "x_3"]);
    }

    #[test]
    fn test_output_is_unique_and_never_longer() {
        let raw = ["x", "X", "x_2", "x", "", "1", "col_1", "x.", "x "];
        let out = names(&raw);
        assert!(out.len() <= raw.len());

        let mut sorted = out.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), out.len(), "names must be unique: {out:?}");
    }
}
