//! The vendor-side description of a card and the facts derived from it.
//!
//! A [`QueryCard`] is what a crawler hands to the matcher. All derived
//! classifications (`is_prerelease`, `is_showcase`, ...) are pure functions
//! of the current hint text and are recomputed on every call.

mod classify;
mod wcd;

pub use classify::PromoKind;
pub use wcd::{split_wcd_number, WcdHint};

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(199[3-9]|20[0-9]{2})\b").expect("valid regex"));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s#(\-])([0-9]{1,4}[a-zA-Z★†]?)(?:$|[\s),/\-])").expect("valid regex")
});

/// One resolution request, as scraped from a vendor listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCard {
    /// Optional direct identifier (uuid or alternate id, maybe foil-suffixed).
    pub id: String,
    pub name: String,
    /// Free-text promo or treatment tag ("Prerelease", "Judge 2008", "241").
    pub variation: String,
    /// Free-text set name.
    pub edition: String,
    pub foil: bool,
}

impl QueryCard {
    pub fn new(name: &str, edition: &str, variation: &str, foil: bool) -> Self {
        Self {
            name: name.to_string(),
            edition: edition.to_string(),
            variation: variation.to_string(),
            foil,
            ..Default::default()
        }
    }

    /// A query carrying only a direct identifier.
    pub fn by_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    // -- Folded views --------------------------------------------------------

    pub(crate) fn variation_text(&self) -> String {
        normalize(&self.variation)
    }

    pub(crate) fn edition_text(&self) -> String {
        normalize(&self.edition)
    }

    /// Variation and edition folded together.
    pub(crate) fn hints_text(&self) -> String {
        normalize(&format!("{} {}", self.variation, self.edition))
    }

    /// Append `tag` to the variation hint.
    pub(crate) fn push_variation(&mut self, tag: &str) {
        if self.variation.is_empty() {
            self.variation = tag.to_string();
        } else {
            self.variation = format!("{} {}", self.variation, tag);
        }
    }

    // -- Extractors ----------------------------------------------------------

    /// First plausible year in the variation, then in the edition.
    pub fn extract_year(&self) -> Option<String> {
        [&self.variation, &self.edition].into_iter().find_map(|text| {
            YEAR_RE
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
    }

    /// First collector-number-shaped token of the variation, lowercased.
    ///
    /// Years are skipped so "Judge 2008 #12" yields "12".
    pub fn extract_number(&self) -> Option<String> {
        extract_number(&self.variation)
    }
}

/// Collector-number-shaped token in arbitrary hint text.
pub fn extract_number(text: &str) -> Option<String> {
    // Padding lets adjacent tokens share a separator.
    let padded = text.replace(' ', "  ");
    NUMBER_RE
        .captures_iter(&padded)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .find(|token| !is_year(token))
        .map(|token| token.trim_start_matches('0').to_lowercase())
        .map(|token| {
            if token.is_empty() || token.starts_with(|c: char| !c.is_ascii_digit()) {
                format!("0{token}")
            } else {
                token
            }
        })
}

fn is_year(token: &str) -> bool {
    token.len() == 4
        && token
            .parse::<u32>()
            .is_ok_and(|year| (1993..2100).contains(&year))
}
