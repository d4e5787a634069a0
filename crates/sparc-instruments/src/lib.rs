//! sparc-instruments
//!
//! Survey instrument definitions and scoring. Pure data with no storage
//! dependency. Defines the domains, subscales, and scoring rules for each
//! supported instrument.

pub mod error;
pub mod instruments;
pub mod scoring;

use std::fmt::Write as _;

use scoring::{Domain, ScoreEntry, Subscale, ValidationError};

/// Trait implemented by each survey instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "olbi").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Oldenburg Burnout Inventory").
    fn name(&self) -> &str;

    /// The domains and subscales this instrument measures.
    fn domains(&self) -> &[Domain];

    /// Look up a subscale by id across every domain.
    fn subscale(&self, id: &str) -> Option<&Subscale> {
        self.domains()
            .iter()
            .flat_map(|d| &d.subscales)
            .find(|s| s.id == id)
    }

    /// Scores that fall outside their subscale's declared range. Entries
    /// for unknown subscale ids are ignored.
    fn validate_scores(&self, scores: &[ScoreEntry]) -> Vec<ValidationError> {
        scores
            .iter()
            .filter_map(|entry| {
                let subscale = self.subscale(&entry.subscale_id)?;
                if subscale.range.contains(entry.value) {
                    return None;
                }
                Some(ValidationError {
                    subscale_id: subscale.id.clone(),
                    value: entry.value,
                    expected_range: subscale.range,
                    score_type: subscale.score_type,
                    message: format!(
                        "{} {} = {} is outside {}..={}",
                        self.id(),
                        subscale.id,
                        entry.value,
                        subscale.range.min,
                        subscale.range.max,
                    ),
                })
            })
            .collect()
    }

    /// Plain-text report of `scores`, one line per scored subscale with its
    /// range, grouped by domain. Domains with nothing scored are skipped.
    fn summarize(&self, scores: &[ScoreEntry]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name());
        for domain in self.domains() {
            let lines: Vec<String> = domain
                .subscales
                .iter()
                .filter_map(|subscale| {
                    let entry = scores.iter().find(|e| e.subscale_id == subscale.id)?;
                    Some(format!(
                        "  {:<24}{:>6}  ({}-{})",
                        subscale.name, entry.value, subscale.range.min, subscale.range.max
                    ))
                })
                .collect();
            if lines.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{}", domain.name);
            for line in lines {
                let _ = writeln!(out, "{line}");
            }
        }
        out
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::olbi::Olbi)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
