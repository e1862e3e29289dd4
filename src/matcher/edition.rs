//! Edition resolution: vendor set label -> canonical set name(s).

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::database::Database;
use crate::models::MtgSet;
use crate::normalize::{has_phrase, normalize, starts_with_phrase};
use crate::query::QueryCard;
use crate::tables::Tables;

static DECK_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b([a-j])\s?0?[0-9]{1,2}\b").expect("valid regex"));

const LAND_PROGRAM_WORDS: [&str; 9] = [
    "apac", "asia", "pacific", "euro", "european", "europe", "land", "lands", "program",
];

/// Which sets the edition hint accepts outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditionTarget {
    /// The hint names nothing the matcher recognizes.
    Unknown,
    Exact(String),
    /// A set family; any member is acceptable.
    AnyOf(Vec<String>),
}

impl EditionTarget {
    pub fn accepts(&self, set: &MtgSet) -> bool {
        match self {
            EditionTarget::Unknown => false,
            EditionTarget::Exact(name) => set.name == *name,
            EditionTarget::AnyOf(names) => names.iter().any(|n| *n == set.name),
        }
    }
}

pub struct EditionResolver<'a> {
    db: &'a Database,
    tables: &'a Tables,
}

impl<'a> EditionResolver<'a> {
    pub fn new(db: &'a Database, tables: &'a Tables) -> Self {
        Self { db, tables }
    }

    /// Resolve the edition hint, rewriting it to the canonical set name when
    /// a single set is identified.
    ///
    /// `printings` are the set codes the card is known to appear in; family
    /// resolution only considers members the card is actually printed in.
    pub fn resolve(&self, query: &mut QueryCard, printings: &[String]) -> EditionTarget {
        let target = self
            .ravnica_weekend(query, printings)
            .or_else(|| self.land_program(query))
            .or_else(|| self.junior_series(query, printings))
            .unwrap_or_else(|| self.generic(query, printings));
        let target = self.card_fix(query).unwrap_or(target);

        if let EditionTarget::Exact(name) = &target {
            if *name != query.edition {
                debug!(card = %query.name, from = %query.edition, to = %name, "edition resolved");
                query.edition = name.clone();
            }
        }
        target
    }

    fn printed_in(&self, printings: &[String], set_name: &str) -> bool {
        self.db
            .set_by_name(set_name)
            .is_some_and(|set| printings.iter().any(|code| *code == set.code))
    }

    /// Alias table, set names and codes, core-set years and decorated names.
    ///
    /// Words an alias drops past the canonical name ("Arabian Nights Light")
    /// move into the variation so later stages still see them.
    fn generic(&self, query: &mut QueryCard, printings: &[String]) -> EditionTarget {
        let edition = query.edition.trim().to_string();
        let hint = edition.as_str();
        if hint.is_empty() {
            return EditionTarget::Unknown;
        }
        if let Some(set) = self.db.set_by_name(hint) {
            return EditionTarget::Exact(set.name.clone());
        }
        if let Some(alias) = self.tables.edition_alias(hint) {
            if let Some(rest) = trailing_words(hint, alias) {
                debug!(card = %query.name, words = %rest, "edition words moved to variation");
                query.push_variation(&rest);
            }
            return EditionTarget::Exact(alias.to_string());
        }
        if !hint.contains(' ') {
            if let Some(set) = self.db.set_by_code(hint) {
                return EditionTarget::Exact(set.name.clone());
            }
        }
        if let Some(year) = query.core_set_year() {
            for name in [format!("Core Set {year}"), format!("Magic {year}")] {
                if let Some(set) = self.db.set_by_name(&name) {
                    return EditionTarget::Exact(set.name.clone());
                }
            }
        }
        for suffix in &self.tables.edition_suffixes {
            let Some(cut) = hint.len().checked_sub(suffix.len()) else {
                continue;
            };
            if !hint.is_char_boundary(cut) || !hint[cut..].eq_ignore_ascii_case(suffix) {
                continue;
            }
            let stripped = hint[..cut].trim();
            if let Some(set) = self.db.set_by_name(stripped) {
                return EditionTarget::Exact(set.name.clone());
            }
            if let Some(alias) = self.tables.edition_alias(stripped) {
                return EditionTarget::Exact(alias.to_string());
            }
        }
        if let Some(target) = self.family(hint, printings) {
            return target;
        }
        if let Some(target) = self.duel_deck(query, printings) {
            return target;
        }
        EditionTarget::Unknown
    }

    /// "Masterpiece Series: Kaladesh Inventions" and friends.
    fn family(&self, hint: &str, printings: &[String]) -> Option<EditionTarget> {
        let text = normalize(hint);
        let family = self
            .tables
            .edition_families
            .iter()
            .find(|f| starts_with_phrase(&text, &normalize(&f.prefix)))?;

        let members: Vec<String> = family
            .members
            .iter()
            .filter(|m| self.printed_in(printings, m))
            .cloned()
            .collect();

        let rest = text[normalize(&family.prefix).len()..].trim().to_string();
        if !rest.is_empty() {
            if let Some(named) = members.iter().find(|m| {
                let member = normalize(m);
                has_phrase(&rest, &member)
                    || rest.split(' ').any(|w| w.len() > 3 && has_phrase(&member, w))
            }) {
                return Some(EditionTarget::Exact(named.clone()));
            }
        }
        match members.len() {
            0 => None,
            1 => Some(EditionTarget::Exact(members[0].clone())),
            _ => Some(EditionTarget::AnyOf(members)),
        }
    }

    fn duel_deck(&self, query: &QueryCard, printings: &[String]) -> Option<EditionTarget> {
        if !query.is_duel_decks() {
            return None;
        }
        let deck = query.duel_deck_name()?;
        printings
            .iter()
            .filter_map(|code| self.db.set_by_code(code))
            .find(|set| has_phrase(&normalize(&set.name), &deck))
            .map(|set| EditionTarget::Exact(set.name.clone()))
    }

    /// Decks A-E and F-J of Ravnica Weekend live in different sets.
    fn ravnica_weekend(&self, query: &QueryCard, printings: &[String]) -> Option<EditionTarget> {
        if !has_phrase(&query.hints_text(), "ravnica weekend") {
            return None;
        }
        let rw = &self.tables.ravnica_weekend;
        let letter = DECK_LETTER_RE
            .captures(&query.variation)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next())
            .map(|c| c.to_ascii_lowercase());

        match letter {
            Some(l) if l <= rw.split => Some(EditionTarget::Exact(rw.first.clone())),
            Some(_) => Some(EditionTarget::Exact(rw.second.clone())),
            None => {
                let members: Vec<String> = [&rw.first, &rw.second]
                    .into_iter()
                    .filter(|m| self.printed_in(printings, m))
                    .cloned()
                    .collect();
                match members.len() {
                    1 => Some(EditionTarget::Exact(members[0].clone())),
                    _ => Some(EditionTarget::AnyOf(members)),
                }
            }
        }
    }

    /// APAC/EURO lands: fix the set and drop the program words from the
    /// variation so only the positional tag remains.
    fn land_program(&self, query: &mut QueryCard) -> Option<EditionTarget> {
        if !query.is_land_program() {
            return None;
        }
        let edition = if query.is_apac() {
            "Asia Pacific Land Program"
        } else {
            "European Land Program"
        };
        let remaining: Vec<&str> = query
            .variation
            .split_whitespace()
            .skip_while(|w| LAND_PROGRAM_WORDS.contains(&normalize(w).as_str()))
            .collect();
        query.variation = remaining.join(" ");
        Some(EditionTarget::Exact(edition.to_string()))
    }

    fn junior_series(&self, query: &QueryCard, printings: &[String]) -> Option<EditionTarget> {
        let text = query.hints_text();
        let junior = has_phrase(&text, "junior")
            || ["jss", "jse", "mss"].iter().any(|k| has_phrase(&text, k));
        if !junior {
            return None;
        }

        let mut keys: Vec<(&String, &String)> = self.tables.junior_series.iter().collect();
        keys.sort();
        if let Some((_, set)) = keys.iter().find(|(key, _)| has_phrase(&text, key)) {
            return Some(EditionTarget::Exact((*set).clone()));
        }

        let mut members: Vec<String> = keys
            .iter()
            .map(|(_, set)| (*set).clone())
            .filter(|set| self.printed_in(printings, set))
            .collect();
        members.sort();
        members.dedup();
        match members.len() {
            0 => None,
            1 => Some(EditionTarget::Exact(members[0].clone())),
            _ => Some(EditionTarget::AnyOf(members)),
        }
    }

    /// Single-card corrections win over every generic rule.
    fn card_fix(&self, query: &QueryCard) -> Option<EditionTarget> {
        let name = normalize(&query.name);
        let hints = query.hints_text();
        self.tables
            .card_edition_fixes
            .iter()
            .find(|fix| {
                normalize(&fix.name) == name
                    && (fix.keyword.is_empty() || has_phrase(&hints, &normalize(&fix.keyword)))
            })
            .map(|fix| EditionTarget::Exact(fix.edition.clone()))
    }
}

/// Folded words of `hint` that follow the set name `canonical`.
fn trailing_words(hint: &str, canonical: &str) -> Option<String> {
    let hint = normalize(hint);
    let canonical = normalize(canonical);
    if hint == canonical || !starts_with_phrase(&hint, &canonical) {
        return None;
    }
    Some(hint[canonical.len()..].trim().to_string())
}
