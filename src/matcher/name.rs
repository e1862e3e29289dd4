//! Name resolution: vendor name -> canonical name and candidate printings.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::database::{Database, NameEntry};
use crate::error::{MatcherError, Result};
use crate::normalize::{has_phrase, normalize};
use crate::query::QueryCard;
use crate::tables::Tables;

static TRAILING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+[(\[]?#?([0-9]+[a-zA-Z★]?)[)\]]?$").expect("valid regex")
});

static LAND_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((?:snow-covered )?(?:plains|island|swamp|mountain|forest|wastes))\s+\(?([a-z])\)?$")
        .expect("valid regex")
});

const MULTIPART_SEPARATORS: [&str; 5] = [" | ", " // ", " / ", " and ", " to "];

type Adjustment<'a> = fn(&NameResolver<'a>, &mut QueryCard) -> Option<&'a NameEntry>;

/// Maps a vendor name to the canonical name and every set printing it.
pub struct NameResolver<'a> {
    db: &'a Database,
    tables: &'a Tables,
}

impl<'a> NameResolver<'a> {
    pub fn new(db: &'a Database, tables: &'a Tables) -> Self {
        Self { db, tables }
    }

    /// Resolve the query name, rewriting `query` to the canonical spelling.
    ///
    /// When the literal name is unknown, each name-shape adjustment is tried
    /// in turn on a scratch copy; the first one that lands on a known name is
    /// committed.
    pub fn resolve(&self, query: &mut QueryCard) -> Result<&'a NameEntry> {
        if let Some(entry) = self.db.printings_of(&query.name) {
            query.name = entry.name.clone();
            return Ok(entry);
        }

        let adjustments: [(&str, Adjustment<'a>); 5] = [
            ("trailing number", Self::split_trailing_number),
            ("land letter", Self::split_land_letter),
            ("reskin", Self::reskin_name),
            ("multipart", Self::multipart_name),
            ("funny prefix", Self::funny_prefix),
        ];
        for (label, adjust) in adjustments {
            let mut attempt = query.clone();
            if let Some(entry) = adjust(self, &mut attempt) {
                debug!(from = %query.name, to = %entry.name, adjustment = label, "name adjusted");
                attempt.name = entry.name.clone();
                *query = attempt;
                return Ok(entry);
            }
        }

        Err(MatcherError::CardNotFound(query.name.clone()))
    }

    /// "Swamp 241" -> name "Swamp", variation "241".
    fn split_trailing_number(&self, query: &mut QueryCard) -> Option<&'a NameEntry> {
        let caps = TRAILING_NUMBER_RE.captures(&query.name)?;
        let name = caps.get(1)?.as_str().trim().to_string();
        let number = caps.get(2)?.as_str().to_string();
        let entry = self.db.printings_of(&name)?;
        query.name = name;
        query.push_variation(&number);
        Some(entry)
    }

    /// "Forest A" -> name "Forest", variation "A".
    fn split_land_letter(&self, query: &mut QueryCard) -> Option<&'a NameEntry> {
        let caps = LAND_LETTER_RE.captures(&query.name)?;
        let name = caps.get(1)?.as_str().to_string();
        let letter = caps.get(2)?.as_str().to_string();
        let entry = self.db.printings_of(&name)?;
        query.name = name;
        query.push_variation(&letter);
        Some(entry)
    }

    /// Alternate display names are only trusted when the edition hint points
    /// at a set that prints them.
    fn reskin_name(&self, query: &mut QueryCard) -> Option<&'a NameEntry> {
        let edition = &query.edition;
        let set = self
            .db
            .set_by_name(edition)
            .or_else(|| self.db.set_by_code(edition))
            .or_else(|| {
                self.tables
                    .edition_alias(edition)
                    .and_then(|alias| self.db.set_by_name(alias))
            });
        let reskin_set = set.is_some_and(|s| s.has_reskins());
        if !reskin_set && !query.is_reskin() {
            return None;
        }

        let canonical = self.db.canonical_flavor_name(&query.name)?;
        let entry = self.db.printings_of(canonical)?;
        query.name = canonical.to_string();
        if !query.is_reskin() {
            query.push_variation("Reskin");
        }
        Some(entry)
    }

    /// "Fire and Ice" -> "Fire // Ice" when at least two faces appear in the name.
    fn multipart_name(&self, query: &mut QueryCard) -> Option<&'a NameEntry> {
        if !MULTIPART_SEPARATORS.iter().any(|sep| query.name.contains(sep)) {
            return None;
        }
        let input = normalize(&query.name);
        let full = self.db.multipart_names().iter().find(|full| {
            full.split(" // ")
                .filter(|part| has_phrase(&input, &normalize(part)))
                .count()
                >= 2
        })?;
        let entry = self.db.printings_of(full)?;
        query.name = full.clone();
        Some(entry)
    }

    /// Vendors truncate the longest funny-set names; accept a literal prefix
    /// of a card that is only printed in funny sets.
    fn funny_prefix(&self, query: &mut QueryCard) -> Option<&'a NameEntry> {
        let prefix = normalize(&query.name);
        if prefix.len() < 4 {
            return None;
        }
        let entry = self.db.names_with_prefix(&prefix).find(|entry| {
            entry
                .printings
                .iter()
                .all(|code| self.tables.is_funny_set(code))
        })?;
        query.name = entry.name.clone();
        Some(entry)
    }
}
