//! Random row selection
//!
//! Picks one row uniformly at random and exposes its first three cells as
//! the Title / Description / Source fields shown in the pick panel.

use rand::Rng;
use url::Url;

/// Title shown when the picked row has an empty first cell
pub const TITLE_FALLBACK: &str = "No title";

/// The three displayed fields of a randomly picked row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index of the picked row
    pub index: usize,
    /// Cell 0, or [`TITLE_FALLBACK`] when empty
    pub title: String,
    /// Cell 1, empty when missing
    pub description: String,
    /// Cell 2 verbatim, empty when missing
    pub source: String,
}

impl Selection {
    /// Builds the displayed fields from a row
    ///
    /// Rows shorter than three cells yield empty fields for the missing positions.
    pub fn from_row(index: usize, row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        let title = cell(0);

        Self {
            index,
            title: if title.is_empty() {
                TITLE_FALLBACK.to_string()
            } else {
                title
            },
            description: cell(1),
            source: cell(2),
        }
    }

    /// Returns the source as a navigable URL, if it is one
    pub fn link(&self) -> Option<Url> {
        validate_link(&self.source)
    }
}

/// Parses a link target, accepting only absolute http(s) URLs with a host
pub fn validate_link(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some_and(|h| !h.is_empty()) => Some(url),
        _ => None,
    }
}

/// Picks a row using the thread-local generator
///
/// Returns `None` when there are no rows.
pub fn pick_random(rows: &[Vec<String>]) -> Option<Selection> {
    pick_random_with(rows, &mut rand::rng())
}

/// Picks a row using the given generator
///
/// Each call is an independent draw over `[0, rows.len())`.
pub fn pick_random_with<R: Rng + ?Sized>(rows: &[Vec<String>], rng: &mut R) -> Option<Selection> {
    if rows.is_empty() {
        return None;
    }
    let index = rng.random_range(0..rows.len());
    Some(Selection::from_row(index, &rows[index]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn sample_rows() -> Vec<Vec<String>> {
        vec![row(&["A", "d1", "http://x"]), row(&["B", "d2", "http://y"])]
    }

    #[test]
    fn test_empty_rows_is_noop() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert!(pick_random(&rows).is_none());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_pick_surfaces_row_values_verbatim() {
        let rows = sample_rows();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let selection = pick_random_with(&rows, &mut rng).expect("Non-empty rows pick");
            let expected = &rows[selection.index];
            assert_eq!(selection.title, expected[0]);
            assert_eq!(selection.description, expected[1]);
            assert_eq!(selection.source, expected[2]);
        }
    }

    #[test]
    fn test_pick_does_not_mutate_rows() {
        let rows = sample_rows();
        let before = rows.clone();
        let _ = pick_random(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_single_row_always_picked() {
        let rows = vec![row(&["Only", "one", "https://example.com"])];
        for _ in 0..10 {
            assert_eq!(pick_random(&rows).unwrap().index, 0);
        }
    }

    #[test]
    fn test_pick_is_roughly_uniform() {
        let rows: Vec<Vec<String>> = (0..4).map(|i: usize| vec![i.to_string()]).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 4];

        for _ in 0..8000 {
            let selection = pick_random_with(&rows, &mut rng).unwrap();
            counts[selection.index] += 1;
        }

        for (i, count) in counts.iter().enumerate() {
            assert!(
                (1600..=2400).contains(count),
                "Row {} picked {} times out of 8000",
                i,
                count
            );
        }
    }

    #[test]
    fn test_empty_title_uses_fallback() {
        let selection = Selection::from_row(0, &row(&["", "desc", "http://x"]));
        assert_eq!(selection.title, TITLE_FALLBACK);
        assert_eq!(selection.description, "desc");
    }

    #[test]
    fn test_short_row_yields_empty_fields() {
        let selection = Selection::from_row(3, &row(&["Only title"]));
        assert_eq!(selection.index, 3);
        assert_eq!(selection.title, "Only title");
        assert_eq!(selection.description, "");
        assert_eq!(selection.source, "");
        assert!(selection.link().is_none());
    }

    #[test]
    fn test_validate_link_accepts_http_and_https() {
        assert!(validate_link("http://x").is_some());
        assert_eq!(
            validate_link(" https://example.com/a?b=c ").unwrap().as_str(),
            "https://example.com/a?b=c"
        );
    }

    #[test]
    fn test_validate_link_rejects_other_schemes_and_text() {
        assert!(validate_link("javascript:alert(1)").is_none());
        assert!(validate_link("data:text/html,<b>x</b>").is_none());
        assert!(validate_link("file:///etc/passwd").is_none());
        assert!(validate_link("not a link").is_none());
        assert!(validate_link("").is_none());
        assert!(validate_link("/relative/path").is_none());
    }
}
