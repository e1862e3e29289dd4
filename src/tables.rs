//! Swappable lookup tables consulted by the resolution stages.
//!
//! Everything here is plain data: vendor edition aliases, per-card variant
//! numbers, historical corrections. The bundled defaults live in
//! `data/tables.json`; callers can replace or overlay them without touching
//! the resolution code. Map keys are folded with [`normalize`] on load.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LoadError;
use crate::normalize::normalize;

fn normalized_keys<'de, D, V>(deserializer: D) -> Result<HashMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let raw = HashMap::<String, V>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (normalize(&k), v)).collect())
}

type VariantNumbers = HashMap<String, HashMap<String, HashMap<String, String>>>;

fn normalized_variants<'de, D>(deserializer: D) -> Result<VariantNumbers, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = VariantNumbers::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(set, cards)| {
            let cards = cards
                .into_iter()
                .map(|(card, vars)| {
                    let vars = vars.into_iter().map(|(k, v)| (normalize(&k), v)).collect();
                    (normalize(&card), vars)
                })
                .collect();
            (normalize(&set), cards)
        })
        .collect())
}

/// A family of set names that vendors collapse under one label
/// ("Masterpiece Series: Kaladesh Inventions", "Masterpiece Series", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditionFamily {
    pub prefix: String,
    pub members: Vec<String>,
}

/// A card whose vendor tag points at the wrong program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardEditionFix {
    pub name: String,
    /// Phrase looked up in the folded variation and edition hints.
    pub keyword: String,
    pub edition: String,
}

/// A card whose identity cannot be derived from text at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdOverride {
    pub name: String,
    pub edition: Option<String>,
    pub variation: Option<String>,
    pub id: String,
}

/// A printing that only counts when the hints carry `keyword`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardOverride {
    pub name: String,
    pub set: String,
    pub number: String,
    pub keyword: String,
}

/// Ravnica Weekend decks A-E live in one set and F-J in another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RavnicaWeekend {
    pub first: String,
    pub second: String,
    /// Last deck letter that belongs to `first`.
    pub split: char,
}

impl Default for RavnicaWeekend {
    fn default() -> Self {
        Self {
            first: "GRN Ravnica Weekend".into(),
            second: "RNA Ravnica Weekend".into(),
            split: 'e',
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tables {
    #[serde(deserialize_with = "normalized_keys")]
    pub edition_aliases: HashMap<String, String>,
    pub edition_suffixes: Vec<String>,
    pub edition_families: Vec<EditionFamily>,
    pub card_edition_fixes: Vec<CardEditionFix>,
    #[serde(deserialize_with = "normalized_keys")]
    pub junior_series: HashMap<String, String>,
    pub ravnica_weekend: RavnicaWeekend,
    #[serde(deserialize_with = "normalized_variants")]
    pub variants: VariantNumbers,
    pub id_overrides: Vec<IdOverride>,
    pub card_overrides: Vec<CardOverride>,
    #[serde(deserialize_with = "normalized_keys")]
    pub wcd_players: HashMap<String, String>,
    #[serde(deserialize_with = "normalized_keys")]
    pub arena_land_artists: HashMap<String, String>,
    pub arena_land_default_year: String,
    pub funny_sets: Vec<String>,
    pub flavor_text_sets: Vec<String>,
    pub watermark_sets: Vec<String>,
    pub foil_special_sets: Vec<String>,
    pub letter_suffix_sets: Vec<String>,
}

impl Tables {
    /// The tables bundled with the crate.
    pub fn embedded() -> Result<Self, LoadError> {
        const EMBEDDED_TABLES: &str = include_str!("../data/tables.json");
        Self::from_json(EMBEDDED_TABLES)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Overlay `other` on top of `self`: map entries are replaced key by key,
    /// lists are appended.
    pub fn merge(mut self, other: Tables) -> Self {
        self.edition_aliases.extend(other.edition_aliases);
        self.edition_suffixes.extend(other.edition_suffixes);
        self.edition_families.extend(other.edition_families);
        self.card_edition_fixes.extend(other.card_edition_fixes);
        self.junior_series.extend(other.junior_series);
        for (set, cards) in other.variants {
            let entry = self.variants.entry(set).or_default();
            for (card, vars) in cards {
                entry.entry(card).or_default().extend(vars);
            }
        }
        self.id_overrides.extend(other.id_overrides);
        self.card_overrides.extend(other.card_overrides);
        self.wcd_players.extend(other.wcd_players);
        self.arena_land_artists.extend(other.arena_land_artists);
        if !other.arena_land_default_year.is_empty() {
            self.arena_land_default_year = other.arena_land_default_year;
        }
        self.funny_sets.extend(other.funny_sets);
        self.flavor_text_sets.extend(other.flavor_text_sets);
        self.watermark_sets.extend(other.watermark_sets);
        self.foil_special_sets.extend(other.foil_special_sets);
        self.letter_suffix_sets.extend(other.letter_suffix_sets);
        self
    }

    // -- Lookups -------------------------------------------------------------

    pub fn edition_alias(&self, hint: &str) -> Option<&str> {
        self.edition_aliases.get(&normalize(hint)).map(String::as_str)
    }

    /// Expected collector number for a named variant of `card` in `set`.
    ///
    /// The outer `Option` tells whether the card has a variant table at all.
    pub fn variant_number(&self, set: &str, card: &str, variation: &str) -> Option<Option<&str>> {
        let vars = self.variants.get(&normalize(set))?.get(&normalize(card))?;
        Some(vars.get(&normalize(variation)).map(String::as_str))
    }

    pub fn is_funny_set(&self, code: &str) -> bool {
        self.funny_sets.iter().any(|c| c.eq_ignore_ascii_case(code))
    }

    pub fn in_list(list: &[String], set_name: &str) -> bool {
        list.iter().any(|s| s == set_name)
    }
}
