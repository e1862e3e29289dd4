//! The match orchestrator.
//!
//! [`Matcher`] runs a [`QueryCard`] through the resolution stages in order:
//! hardcoded id overrides, the direct-id fast path, [`name::NameResolver`],
//! [`edition::EditionResolver`], [`filter::PrintingFilter`] and finally
//! [`disambiguate::Disambiguator`]. Every stage reads the shared, immutable
//! [`Database`]; a `Matcher` can be used from any number of threads at once.

pub mod disambiguate;
pub mod edition;
pub mod filter;
pub mod name;

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::config::{FOIL_ID_SUFFIX, PRERELEASE_STAMP_DATE};
use crate::database::{Database, Printing};
use crate::error::{AliasingError, Candidate, MatcherError, Result};
use crate::models::ResolvedCard;
use crate::normalize::normalize;
use crate::query::QueryCard;
use crate::tables::Tables;

use disambiguate::Disambiguator;
use edition::EditionResolver;
use filter::PrintingFilter;
use name::NameResolver;

/// Printings still standing after the resolution stages.
struct Lookup<'d> {
    /// The query as rewritten by the resolvers.
    query: QueryCard,
    printings: Vec<Printing<'d>>,
    /// Found through an explicit id rather than by name.
    by_id: bool,
}

/// Resolves vendor listings against one reference snapshot.
#[derive(Debug)]
pub struct Matcher {
    db: OnceLock<Arc<Database>>,
    tables: Arc<Tables>,
}

impl Matcher {
    /// A matcher with no database yet; see [`install`](Self::install).
    pub fn new(tables: Tables) -> Self {
        Self {
            db: OnceLock::new(),
            tables: Arc::new(tables),
        }
    }

    pub fn with_database(db: Arc<Database>, tables: Tables) -> Self {
        let matcher = Self::new(tables);
        // A fresh lock is always empty.
        let _ = matcher.db.set(db);
        matcher
    }

    /// Install the reference snapshot. Only the first call succeeds.
    pub fn install(&self, db: Arc<Database>) -> Result<()> {
        self.db.set(db).map_err(|_| {
            MatcherError::InvalidArgument("a card database is already installed".into())
        })
    }

    pub fn is_ready(&self) -> bool {
        self.db.get().is_some()
    }

    /// The installed snapshot.
    pub fn database(&self) -> Result<&Arc<Database>> {
        self.db.get().ok_or(MatcherError::DatabaseNotInitialized)
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Resolve `query` to exactly one printing.
    ///
    /// # Errors
    ///
    /// - [`MatcherError::DatabaseNotInitialized`] before [`install`](Self::install).
    /// - [`MatcherError::CardNotFound`] when no name adjustment finds the card.
    /// - [`MatcherError::EditionMismatch`] when no printing fits the hints.
    /// - [`MatcherError::Aliasing`] when several printings fit equally well.
    pub fn match_card(&self, query: &QueryCard) -> Result<ResolvedCard> {
        let db = self.database()?;
        let lookup = self.lookup(db, query)?;

        let printing = match lookup.printings.as_slice() {
            [] => return Err(mismatch(&lookup.query, query)),
            [only] => *only,
            // Deck reprints only differ by owner; any of them will do.
            [first, ..] if lookup.query.is_world_championship() => *first,
            all => {
                return Err(AliasingError {
                    name: lookup.query.name.clone(),
                    candidates: all.iter().map(|p| candidate(*p)).collect(),
                }
                .into())
            }
        };

        let resolved = compose(db, printing, lookup.query.foil, !lookup.by_id);
        debug!(card = %query.name, id = %resolved.id, set = %resolved.set_code, "card matched");
        Ok(resolved)
    }

    /// Every printing that survives the resolution stages, without
    /// arbitration.
    ///
    /// On an ambiguous query this is the list an [`AliasingError`] reports,
    /// with full card metadata for out-of-band inspection.
    pub fn probe(&self, query: &QueryCard) -> Result<Vec<ResolvedCard>> {
        let db = self.database()?;
        let lookup = self.lookup(db, query)?;
        if lookup.printings.is_empty() {
            return Err(mismatch(&lookup.query, query));
        }
        Ok(lookup
            .printings
            .iter()
            .map(|p| compose(db, *p, lookup.query.foil, false))
            .collect())
    }

    /// Resolve a card id, foil-suffixed or not.
    pub fn card(&self, id: &str) -> Result<ResolvedCard> {
        let db = self.database()?;
        let (printing, foil) =
            find_by_id(db, id).ok_or_else(|| MatcherError::CardNotFound(id.to_string()))?;
        Ok(compose(db, printing, foil, false))
    }

    fn lookup<'d>(&self, db: &'d Database, query: &QueryCard) -> Result<Lookup<'d>> {
        let mut query = query.clone();

        if let Some(id) = self.id_override(&query) {
            if find_by_id(db, id).is_some() {
                debug!(card = %query.name, id, "id override");
            } else {
                warn!(
                    card = %query.name,
                    id,
                    "id override points at a card missing from the database"
                );
            }
            query.id = id.to_string();
        }

        if !query.id.is_empty() {
            if let Some((printing, foil)) = find_by_id(db, &query.id) {
                query.foil |= foil;
                return Ok(Lookup {
                    query,
                    printings: vec![printing],
                    by_id: true,
                });
            }
            debug!(id = %query.id, "id not in database, matching by name");
            if query.name.trim().is_empty() {
                return Err(MatcherError::CardNotFound(query.id));
            }
        }

        let entry = NameResolver::new(db, &self.tables).resolve(&mut query)?;
        let target = EditionResolver::new(db, &self.tables).resolve(&mut query, &entry.printings);

        let sets = if entry.printings.len() > 1 {
            PrintingFilter::new(db, &self.tables).filter(&entry.printings, &query, &target)
        } else {
            entry.printings.clone()
        };

        let gathered: Vec<Printing<'d>> = sets
            .iter()
            .flat_map(|code| db.cards_named(code, &query.name))
            .collect();

        let printings = if gathered.len() > 1 {
            Disambiguator::new(&self.tables).disambiguate(&query, &gathered)
        } else {
            gathered
        };

        Ok(Lookup {
            query,
            printings,
            by_id: false,
        })
    }

    /// Cards whose identity only a hardcoded id can settle.
    fn id_override(&self, query: &QueryCard) -> Option<&str> {
        let name = normalize(&query.name);
        if name.is_empty() {
            return None;
        }
        let matches = |field: &Option<String>, hint: &str| {
            field
                .as_deref()
                .map_or(true, |value| normalize(value) == normalize(hint))
        };
        self.tables
            .id_overrides
            .iter()
            .find(|o| {
                normalize(&o.name) == name
                    && matches(&o.edition, &query.edition)
                    && matches(&o.variation, &query.variation)
            })
            .map(|o| o.id.as_str())
    }
}

fn mismatch(resolved: &QueryCard, original: &QueryCard) -> MatcherError {
    MatcherError::EditionMismatch {
        name: resolved.name.clone(),
        edition: original.edition.clone(),
    }
}

fn candidate(p: Printing<'_>) -> Candidate {
    Candidate {
        id: p.card.uuid.clone(),
        set_code: p.set.code.clone(),
        set_name: p.set.name.clone(),
        name: p.card.name.clone(),
        number: p.card.number.clone(),
    }
}

/// Look up `id`, reporting whether it carried the foil suffix.
fn find_by_id<'d>(db: &'d Database, id: &str) -> Option<(Printing<'d>, bool)> {
    let id = id.trim();
    if let Some(printing) = db.card_by_id(id) {
        return Some((printing, false));
    }
    let base = id.strip_suffix(FOIL_ID_SUFFIX)?;
    db.card_by_id(base).map(|printing| (printing, true))
}

/// Build the output record, correcting `foil` against the finishes the
/// printing actually comes in.
///
/// With `follow_siblings`, a finish the printing lacks is looked up in its
/// separately numbered foil or non-foil twin first.
fn compose(
    db: &Database,
    printing: Printing<'_>,
    foil: bool,
    follow_siblings: bool,
) -> ResolvedCard {
    let mut printing = printing;
    let mut foil = foil;
    let requested = printing.card;
    let ids = &requested.identifiers;

    if foil && !printing.card.has_foil() {
        match twin(db, ids.mtgjson_foil_version_id.as_deref(), follow_siblings) {
            Some(other) if other.card.has_foil() => printing = other,
            _ => foil = false,
        }
    } else if !foil && !printing.card.has_non_foil() {
        match twin(db, ids.mtgjson_non_foil_version_id.as_deref(), follow_siblings) {
            Some(other) if other.card.has_non_foil() => printing = other,
            _ => foil = true,
        }
    }

    let card = printing.card;
    let id = if foil && card.has_non_foil() {
        format!("{}{}", card.uuid, FOIL_ID_SUFFIX)
    } else {
        card.uuid.clone()
    };

    ResolvedCard {
        id,
        scryfall_id: card.scryfall_id().map(str::to_string),
        name: card.name.clone(),
        set_code: printing.set.code.clone(),
        edition: printing.set.name.clone(),
        foil,
        number: card.number.clone(),
        variation: variation_tag(db, printing),
    }
}

fn twin<'d>(db: &'d Database, id: Option<&str>, follow: bool) -> Option<Printing<'d>> {
    if !follow {
        return None;
    }
    db.card_by_id(id?)
}

/// Treatment tag of the chosen printing, most distinctive first.
fn variation_tag(db: &Database, printing: Printing<'_>) -> String {
    let card = printing.card;
    let set = printing.set;
    let stamped = card.number_suffix() == "s"
        && set.is_promo()
        && set.released_since(PRERELEASE_STAMP_DATE);

    let tag = if card.is_showcase() {
        "Showcase"
    } else if card.is_borderless() {
        "Borderless"
    } else if card.is_extended_art() {
        "Extended Art"
    } else if card.has_promo_type("bundle") {
        "Bundle"
    } else if card.has_promo_type("release") {
        "Release"
    } else if card.has_promo_type("prerelease") || stamped {
        "Prerelease"
    } else if card.has_promo_type("buyabox") {
        "Buy-a-Box"
    } else if let Some(mana) = arabian_nights_mana(db, printing) {
        mana
    } else if card.is_basic_land() && card.is_full_art() {
        "Full Art"
    } else {
        ""
    };

    match (tag.is_empty(), card.is_japanese()) {
        (_, false) => tag.to_string(),
        (true, true) => "Japanese".to_string(),
        (false, true) => format!("{tag} Japanese"),
    }
}

/// "Light" or "Dark" when the Arabian Nights card exists with both mana symbols.
fn arabian_nights_mana(db: &Database, printing: Printing<'_>) -> Option<&'static str> {
    if printing.set.code != "ARN" {
        return None;
    }
    let dagger = printing.card.number.contains('†');
    let paired = db
        .cards_named(&printing.set.code, &printing.card.name)
        .iter()
        .any(|other| other.card.number.contains('†') != dagger);
    paired.then_some(if dagger { "Light" } else { "Dark" })
}
