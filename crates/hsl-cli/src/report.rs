//! Scored results: table rendering, per-label counts, and CSV export.

use std::fmt::Write as _;
use std::path::Path;

use hsl_core::Label;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_EXPORT_FILE: &str = "headline_sentiment.csv";

/// Widest headline shown in the table before truncation.
const MAX_HEADLINE_WIDTH: usize = 72;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredHeadline {
    pub headline: String,
    pub label: Label,
}

/// The headlines that were actually submitted, paired with their labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredBatch {
    rows: Vec<ScoredHeadline>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LabelCounts {
    pub total: usize,
    pub pessimistic: usize,
    pub neutral: usize,
    pub optimistic: usize,
    pub unknown: usize,
}

impl LabelCounts {
    #[must_use]
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Pessimistic => self.pessimistic,
            Label::Neutral => self.neutral,
            Label::Optimistic => self.optimistic,
            Label::Unknown => self.unknown,
        }
    }

    /// One-line summary, e.g. `Total: 4 | Optimistic: 2 | Neutral: 1 | Pessimistic: 1`.
    ///
    /// `Unknown` is only listed when present.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Total: {} | Optimistic: {} | Neutral: {} | Pessimistic: {}",
            self.total, self.optimistic, self.neutral, self.pessimistic
        );
        if self.unknown > 0 {
            let _ = write!(out, " | Unknown: {}", self.unknown);
        }
        out
    }
}

impl ScoredBatch {
    /// Pair headlines with labels by position.
    ///
    /// Callers guarantee equal lengths; extra items on either side are dropped.
    #[must_use]
    pub fn new(headlines: Vec<String>, labels: Vec<Label>) -> Self {
        debug_assert_eq!(headlines.len(), labels.len());
        let rows = headlines
            .into_iter()
            .zip(labels)
            .map(|(headline, label)| ScoredHeadline { headline, label })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[ScoredHeadline] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> LabelCounts {
        let mut counts = LabelCounts {
            total: self.rows.len(),
            ..LabelCounts::default()
        };
        for row in &self.rows {
            match row.label {
                Label::Pessimistic => counts.pessimistic += 1,
                Label::Neutral => counts.neutral += 1,
                Label::Optimistic => counts.optimistic += 1,
                Label::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    /// Fixed-width text table with a 1-based row number column.
    #[must_use]
    pub fn render_table(&self) -> String {
        let shown: Vec<String> = self
            .rows
            .iter()
            .map(|r| truncate(&r.headline, MAX_HEADLINE_WIDTH))
            .collect();
        let num_width = self.rows.len().to_string().len().max(1);
        let head_width = shown
            .iter()
            .map(|h| h.chars().count())
            .max()
            .unwrap_or(0)
            .max("headline".len());

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>num_width$}  {:<head_width$}  label",
            "#", "headline"
        );
        let _ = writeln!(
            out,
            "{}  {}  {}",
            "-".repeat(num_width),
            "-".repeat(head_width),
            "-".repeat("Pessimistic".len())
        );
        for (idx, (row, headline)) in self.rows.iter().zip(&shown).enumerate() {
            let _ = writeln!(
                out,
                "{:>num_width$}  {:<head_width$}  {}",
                idx + 1,
                headline,
                row.label
            );
        }
        out
    }

    /// CSV with a `headline,label` header row, quoting fields only where needed.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if a row cannot be serialized.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv_writer().from_writer(Vec::new());
        self.write_rows(&mut writer)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Write [`ScoredBatch::to_csv`] output to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Csv`] if the file cannot be created or written.
    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        let mut writer = csv_writer().from_path(path)?;
        self.write_rows(&mut writer)?;
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    fn write_rows<W: std::io::Write>(
        &self,
        writer: &mut csv::Writer<W>,
    ) -> Result<(), csv::Error> {
        // Serialized rows emit the header themselves; an empty batch still gets one.
        if self.rows.is_empty() {
            writer.write_record(["headline", "label"])?;
        }
        for row in &self.rows {
            writer.serialize(row)?;
        }
        Ok(())
    }
}

fn csv_writer() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.terminator(csv::Terminator::Any(b'\n'));
    builder
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
