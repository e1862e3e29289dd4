//! The immutable reference snapshot every match runs against.
//!
//! Built once from the sets/printings document and the name index document.
//! Loading is all-or-nothing: a document that fails to parse, or a name
//! index that points at a set the printings document does not contain,
//! rejects the whole snapshot.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::cache;
use crate::error::LoadError;
use crate::models::{AllPrintingsFile, AtomicCardsFile, Card, MtgSet};
use crate::normalize::normalize;

/// Canonical name of a card and the codes of every set that prints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub name: String,
    pub printings: Vec<String>,
}

/// A card together with the set that owns it.
#[derive(Debug, Clone, Copy)]
pub struct Printing<'a> {
    pub set: &'a MtgSet,
    pub card: &'a Card,
}

/// Strip the " (a)" style disambiguator some funny sets append to names.
pub fn strip_funny_suffix(name: &str) -> &str {
    match name.rfind(" (") {
        Some(idx) if name.ends_with(')') && name.len() - idx <= 5 => &name[..idx],
        _ => name,
    }
}

#[derive(Debug, Default)]
pub struct Database {
    sets: HashMap<String, MtgSet>,
    set_names: HashMap<String, String>,
    names: HashMap<String, NameEntry>,
    /// Folded keys of `names`, sorted for prefix scans.
    sorted_names: Vec<String>,
    /// uuid or alternate id -> (set code, card index)
    ids: HashMap<String, (String, usize)>,
    /// set code -> normalized card name -> card indices
    set_cards: HashMap<String, HashMap<String, Vec<usize>>>,
    flavor_names: HashMap<String, String>,
    multipart_names: Vec<String>,
    version: Option<String>,
}

impl Database {
    /// Build a snapshot from both parsed documents.
    pub fn from_documents(
        printings: AllPrintingsFile,
        atomic: AtomicCardsFile,
    ) -> Result<Self, LoadError> {
        if printings.data.is_empty() {
            return Err(LoadError::Malformed("sets document contains no sets".into()));
        }

        let version = atomic
            .meta()
            .map(|m| m.version.clone())
            .filter(|v| !v.is_empty())
            .or_else(|| Some(printings.meta.version.clone()).filter(|v| !v.is_empty()));

        let mut db = Database {
            version,
            ..Default::default()
        };

        for (code, mut set) in printings.data {
            let code = code.to_uppercase();
            if set.code.is_empty() {
                set.code = code.clone();
            }

            let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
            for (idx, card) in set.cards.iter_mut().enumerate() {
                if card.set_code.is_empty() {
                    card.set_code = code.clone();
                }
                db.ids.insert(card.uuid.clone(), (code.clone(), idx));
                if card.is_secondary_face() {
                    continue;
                }
                by_name
                    .entry(normalize(strip_funny_suffix(&card.name)))
                    .or_default()
                    .push(idx);
                if let Some(flavor) = card.flavor_name.as_deref().filter(|f| !f.is_empty()) {
                    db.flavor_names
                        .insert(normalize(flavor), card.name.clone());
                }
            }
            // Alternate ids never shadow a uuid.
            for (idx, card) in set.cards.iter().enumerate() {
                if let Some(alt) = card.scryfall_id() {
                    db.ids
                        .entry(alt.to_string())
                        .or_insert_with(|| (code.clone(), idx));
                }
            }

            db.set_names.insert(normalize(&set.name), code.clone());
            db.set_cards.insert(code.clone(), by_name);
            db.sets.insert(code, set);
        }

        for (name, entry) in atomic.into_entries() {
            let printings: Vec<String> =
                entry.printings().into_iter().map(|c| c.to_uppercase()).collect();
            if let Some(missing) = printings.iter().find(|c| !db.sets.contains_key(*c)) {
                return Err(LoadError::Malformed(format!(
                    "'{name}' lists printing {missing} which is not in the sets document"
                )));
            }
            if name.contains(" // ") {
                db.multipart_names.push(name.clone());
            }
            db.names.insert(normalize(&name), NameEntry { name, printings });
        }
        if db.names.is_empty() {
            return Err(LoadError::Malformed("name index contains no cards".into()));
        }
        db.multipart_names.sort();
        db.sorted_names = db.names.keys().cloned().collect();
        db.sorted_names.sort_unstable();

        info!(
            sets = db.sets.len(),
            names = db.names.len(),
            version = db.version.as_deref().unwrap_or("unknown"),
            "card database loaded"
        );
        Ok(db)
    }

    /// Parse both documents from readers.
    pub fn from_readers<P: Read, A: Read>(printings: P, atomic: A) -> Result<Self, LoadError> {
        let printings: AllPrintingsFile = serde_json::from_reader(printings)?;
        let atomic: AtomicCardsFile = serde_json::from_reader(atomic)?;
        Self::from_documents(printings, atomic)
    }

    /// Load both documents from disk; `.gz` files are decompressed transparently.
    pub fn from_paths(printings: &Path, atomic: &Path) -> Result<Self, LoadError> {
        for path in [printings, atomic] {
            if !path.exists() {
                return Err(LoadError::Missing(path.display().to_string()));
            }
        }
        Self::from_readers(cache::open_document(printings)?, cache::open_document(atomic)?)
    }

    // -- Lookups -------------------------------------------------------------

    /// MTGJSON version of the snapshot, when the documents carried one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_by_code(&self, code: &str) -> Option<&MtgSet> {
        self.sets.get(&code.to_uppercase())
    }

    pub fn set_by_name(&self, name: &str) -> Option<&MtgSet> {
        self.set_names
            .get(&normalize(name))
            .and_then(|code| self.sets.get(code))
    }

    /// Canonical name and printings of `name`, compared in folded form.
    pub fn printings_of(&self, name: &str) -> Option<&NameEntry> {
        self.names.get(&normalize(name))
    }

    /// Entries whose folded name starts with the folded `prefix`, in folded
    /// name order.
    pub fn names_with_prefix(&self, prefix: &str) -> impl Iterator<Item = &NameEntry> + '_ {
        let prefix = normalize(prefix);
        let start = self
            .sorted_names
            .partition_point(|name| name.as_str() < prefix.as_str());
        self.sorted_names[start..]
            .iter()
            .take_while(move |name| name.starts_with(prefix.as_str()))
            .filter_map(move |name| self.names.get(name))
    }

    /// Canonical names of every multi-part card, sorted.
    pub fn multipart_names(&self) -> &[String] {
        &self.multipart_names
    }

    /// Canonical name of the card printed with the alternate name `flavor`.
    pub fn canonical_flavor_name(&self, flavor: &str) -> Option<&str> {
        self.flavor_names.get(&normalize(flavor)).map(String::as_str)
    }

    /// Look up a printing by uuid or alternate id.
    pub fn card_by_id(&self, id: &str) -> Option<Printing<'_>> {
        let (code, idx) = self.ids.get(id)?;
        let set = self.sets.get(code)?;
        let card = set.cards.get(*idx)?;
        Some(Printing { set, card })
    }

    /// Cards of `set_code` whose folded name equals the folded `name`.
    pub fn cards_named(&self, set_code: &str, name: &str) -> Vec<Printing<'_>> {
        let code = set_code.to_uppercase();
        let (Some(set), Some(index)) = (self.sets.get(&code), self.set_cards.get(&code)) else {
            return Vec::new();
        };
        index
            .get(&normalize(name))
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| Printing {
                        set,
                        card: &set.cards[i],
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
