use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::card::Card;
use super::sub::Meta;
use crate::config;

// ---------------------------------------------------------------------------
// MtgSet: A release grouping and the printings it owns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MtgSet {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub release_date: String,
    /// Parent set of companion sets ("Promos", "Extras", ...).
    pub parent_code: Option<String>,

    #[serde(default)]
    pub cards: Vec<Card>,
}

impl MtgSet {
    /// Parsed release date; sets with an unparsable date sort before every cutover.
    pub fn release_date(&self) -> NaiveDate {
        config::parse_release_date(&self.release_date).unwrap_or(NaiveDate::MIN)
    }

    /// Whether the set was released on or after `cutover`.
    pub fn released_since(&self, cutover: NaiveDate) -> bool {
        self.release_date() >= cutover
    }

    pub fn is_promo(&self) -> bool {
        self.type_field == "promo"
    }

    /// Whether any printing in the set carries an alternate display name.
    pub fn has_reskins(&self) -> bool {
        self.cards.iter().any(Card::is_reskin)
    }
}

// ---------------------------------------------------------------------------
// AllPrintingsFile: The sets/printings bootstrap document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllPrintingsFile {
    #[serde(default)]
    pub meta: Meta,
    pub data: HashMap<String, MtgSet>,
}

// ---------------------------------------------------------------------------
// AtomicCardsFile: The name -> printings bootstrap document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomicCard {
    pub name: Option<String>,
    pub face_name: Option<String>,
    #[serde(default)]
    pub printings: Vec<String>,
}

/// One name can map to several faces; older documents store a single object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AtomicEntry {
    Faces(Vec<AtomicCard>),
    Single(AtomicCard),
}

impl AtomicEntry {
    /// Union of the printings of every face, in first-seen order.
    pub fn printings(&self) -> Vec<String> {
        let faces: &[AtomicCard] = match self {
            AtomicEntry::Faces(faces) => faces,
            AtomicEntry::Single(card) => std::slice::from_ref(card),
        };
        let mut out: Vec<String> = Vec::new();
        for code in faces.iter().flat_map(|f| f.printings.iter()) {
            if !out.contains(code) {
                out.push(code.clone());
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AtomicCardsFile {
    Wrapped {
        #[serde(default)]
        meta: Meta,
        data: HashMap<String, AtomicEntry>,
    },
    Bare(HashMap<String, AtomicEntry>),
}

impl AtomicCardsFile {
    pub fn meta(&self) -> Option<&Meta> {
        match self {
            AtomicCardsFile::Wrapped { meta, .. } => Some(meta),
            AtomicCardsFile::Bare(_) => None,
        }
    }

    pub fn into_entries(self) -> HashMap<String, AtomicEntry> {
        match self {
            AtomicCardsFile::Wrapped { data, .. } => data,
            AtomicCardsFile::Bare(data) => data,
        }
    }
}
