//! In-memory dashboard state: the editable headline rows and the last results.

use thiserror::Error;

use crate::client::non_blank;
use crate::report::ScoredBatch;

/// Rows a fresh session starts with.
pub const DEFAULT_ROWS: [&str; 3] = [
    "Stocks sink on inflation jitters",
    "Company beats earnings expectations",
    "Oil prices fall amid weak demand",
];

pub const SAMPLE_ROWS: [&str; 4] = [
    "Fed hints at holding rates steady",
    "Tech shares rally after earnings beat",
    "Geopolitical tensions rattle markets",
    "Retail sales surprise to the upside",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no headline at row {row}; there are {len} rows")]
    NoSuchRow { row: usize, len: usize },
}

/// Rows are addressed by 0-based index; errors report 1-based row numbers.
#[derive(Debug, Clone)]
pub struct Session {
    rows: Vec<String>,
    results: Option<ScoredBatch>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rows(DEFAULT_ROWS.iter().map(|s| (*s).to_string()).collect())
    }

    #[must_use]
    pub fn with_rows(rows: Vec<String>) -> Self {
        Self {
            rows,
            results: None,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    #[must_use]
    pub fn results(&self) -> Option<&ScoredBatch> {
        self.results.as_ref()
    }

    /// Trimmed non-blank rows, the headlines a score request would send.
    #[must_use]
    pub fn payload(&self) -> Vec<String> {
        non_blank(&self.rows)
    }

    pub fn add(&mut self, text: impl Into<String>) {
        self.rows.push(text.into());
    }

    /// # Errors
    ///
    /// Returns [`SessionError::NoSuchRow`] if `index` is out of range.
    pub fn edit(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(SessionError::NoSuchRow { row: index + 1, len })?;
        *row = text.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SessionError::NoSuchRow`] if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<String, SessionError> {
        if index >= self.rows.len() {
            return Err(SessionError::NoSuchRow {
                row: index + 1,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }

    /// Replace every row with the non-blank lines of `pasted`, trimmed.
    pub fn replace_from_paste(&mut self, pasted: &str) {
        self.rows = pasted
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        self.results = None;
    }

    pub fn load_sample(&mut self) {
        self.rows = SAMPLE_ROWS.iter().map(|s| (*s).to_string()).collect();
        self.results = None;
    }

    /// Drop all rows and results.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.results = None;
    }

    pub fn set_results(&mut self, batch: ScoredBatch) {
        self.results = Some(batch);
    }
}

#[cfg(test)]
mod tests {
    use hsl_core::Label;

    use super::*;

    fn scored() -> ScoredBatch {
        ScoredBatch::new(vec!["x".to_string()], vec![Label::Neutral])
    }

    #[test]
    fn new_session_has_default_rows_and_no_results() {
        let session = Session::new();
        assert_eq!(session.rows(), DEFAULT_ROWS);
        assert!(session.results().is_none());
    }

    #[test]
    fn add_appends_row() {
        let mut session = Session::new();
        session.add("Retail sales surprise to the upside");
        assert_eq!(session.rows().len(), 4);
        assert_eq!(session.rows()[3], "Retail sales surprise to the upside");
    }

    #[test]
    fn edit_replaces_row_in_place() {
        let mut session = Session::new();
        session.edit(1, "Company misses estimates").unwrap();
        assert_eq!(session.rows()[1], "Company misses estimates");
        assert_eq!(session.rows().len(), 3);
    }

    #[test]
    fn edit_out_of_range_reports_row_number() {
        let mut session = Session::new();
        assert_eq!(
            session.edit(5, "x"),
            Err(SessionError::NoSuchRow { row: 6, len: 3 })
        );
    }

    #[test]
    fn remove_returns_removed_row_and_keeps_order() {
        let mut session = Session::new();
        let removed = session.remove(0).unwrap();
        assert_eq!(removed, DEFAULT_ROWS[0]);
        assert_eq!(session.rows(), &DEFAULT_ROWS[1..]);
    }

    #[test]
    fn remove_from_empty_session_fails() {
        let mut session = Session::with_rows(Vec::new());
        assert!(session.remove(0).is_err());
    }

    #[test]
    fn paste_replaces_rows_and_drops_blank_lines() {
        let mut session = Session::new();
        session.set_results(scored());
        session.replace_from_paste("  Bonds sink \n\n   \nGold climbs\n");
        assert_eq!(session.rows(), ["Bonds sink", "Gold climbs"]);
        assert!(session.results().is_none());
    }

    #[test]
    fn load_sample_resets_results() {
        let mut session = Session::new();
        session.set_results(scored());
        session.load_sample();
        assert_eq!(session.rows(), SAMPLE_ROWS);
        assert!(session.results().is_none());
    }

    #[test]
    fn clear_empties_rows_and_results() {
        let mut session = Session::new();
        session.set_results(scored());
        session.clear();
        assert!(session.rows().is_empty());
        assert!(session.results().is_none());
    }

    #[test]
    fn payload_skips_blank_rows() {
        let mut session = Session::with_rows(vec![
            "  Bonds sink ".to_string(),
            String::new(),
            "   ".to_string(),
        ]);
        session.add("Gold climbs");
        assert_eq!(session.payload(), ["Bonds sink", "Gold climbs"]);
    }

    #[test]
    fn editing_rows_keeps_previous_results() {
        let mut session = Session::new();
        session.set_results(scored());
        session.add("");
        session.edit(0, "changed").unwrap();
        assert!(session.results().is_some());
    }
}
