//! Printing filter: which of a card's sets may host the queried printing.
//!
//! A set whose name equals the resolved edition is always kept. Every other
//! set is judged by the rule of the query's [`PromoKind`]; when the query
//! names no promotional channel the set is dropped. Rules are looked up
//! through [`rule_for`] so each channel's host list stays in one place.

use tracing::debug;

use super::edition::EditionTarget;
use crate::config::{
    BUY_A_BOX_IN_EXPANSION_DATE, PROMOS_FOR_EVERYBODY_DATE, PROMO_PACK_DATE,
    PROMO_PACK_IN_EXPANSION_DATE,
};
use crate::database::Database;
use crate::models::MtgSet;
use crate::normalize::{has_phrase, normalize};
use crate::query::{PromoKind, QueryCard};
use crate::tables::Tables;

/// Promo sets that look like prerelease hosts but never are.
const PRERELEASE_REJECTS: [&str; 3] = [
    "Duels of the Planeswalkers 2010 Promos",
    "Resale Promos",
    "Judge Gift Cards 2014",
];

const MAGAZINE_SETS: [&str; 6] = [
    "HarperPrism Book Promos",
    "Media Inserts",
    "Magazine Inserts",
    "DCI Promos",
    "Duelist Inserts",
    "Dengeki Maoh Promos",
];

const LAND_PROGRAM_SETS: [&str; 2] = ["Asia Pacific Land Program", "European Land Program"];

/// Everything a rule may consult besides the candidate set.
pub(crate) struct RuleContext<'a> {
    tables: &'a Tables,
    query: &'a QueryCard,
    year: Option<String>,
}

pub(crate) type Rule = fn(&RuleContext<'_>, &MtgSet) -> bool;

fn is_promos_set(set: &MtgSet) -> bool {
    set.name.ends_with(" Promos")
}

fn is_base_expansion(set: &MtgSet) -> bool {
    matches!(set.type_field.as_str(), "expansion" | "core")
}

/// `set` is named `base`, narrowed to `year` when the hints carry one.
fn year_prefixed(set: &MtgSet, base: &str, year: Option<&str>) -> bool {
    let Some(rest) = set.name.strip_prefix(base) else {
        return false;
    };
    match year {
        Some(year) => has_phrase(&normalize(rest), year),
        None => true,
    }
}

pub(crate) fn rule_for(kind: PromoKind) -> Rule {
    match kind {
        PromoKind::Prerelease => prerelease,
        PromoKind::PromoPack => promo_pack,
        PromoKind::Release => release,
        PromoKind::BuyABox => buy_a_box,
        PromoKind::Bundle => |_, set| is_promos_set(set),
        PromoKind::FridayNightMagic => fnm,
        PromoKind::WorldChampionship => world_championship,
        PromoKind::Judge => |cx, set| year_prefixed(set, "Judge Gift Cards", cx.year.as_deref()),
        PromoKind::ArenaLeague => arena_league,
        PromoKind::PlayerRewards => {
            |cx, set| year_prefixed(set, "Magic Player Rewards", cx.year.as_deref())
        }
        PromoKind::WpnGateway => |cx, set| {
            year_prefixed(set, "Wizards Play Network", cx.year.as_deref())
                || year_prefixed(set, "Gateway", cx.year.as_deref())
        },
        PromoKind::Sdcc => |cx, set| year_prefixed(set, "San Diego Comic-Con", cx.year.as_deref()),
        PromoKind::MagazineInsert => {
            |_, set| MAGAZINE_SETS.contains(&set.name.as_str()) || set.name.starts_with("IDW")
        }
        PromoKind::ClashPack => |_, set| set.name.contains("Clash Pack"),
        PromoKind::HerosPath => |_, set| set.name.contains("Hero's Path"),
        PromoKind::Convention => {
            |_, set| set.name.contains("Convention") || set.name == "Dragon Con"
        }
        PromoKind::MagicFest => |cx, set| year_prefixed(set, "MagicFest", cx.year.as_deref()),
        PromoKind::DuelsOfThePlaneswalkers => {
            |_, set| set.name.starts_with("Duels of the Planeswalkers")
        }
        PromoKind::DuelDecks => duel_decks,
        PromoKind::ChampsAndStates => |_, set| set.name.starts_with("Champs and States"),
        PromoKind::PremiereShop => {
            |cx, set| year_prefixed(set, "Magic Premiere Shop", cx.year.as_deref())
        }
        PromoKind::LandProgram => land_program,
    }
}

fn prerelease(_: &RuleContext<'_>, set: &MtgSet) -> bool {
    if PRERELEASE_REJECTS.contains(&set.name.as_str()) {
        return false;
    }
    set.name == "Prerelease Events" || set.name.ends_with("Prerelease") || is_promos_set(set)
}

/// Promo Pack cards moved from the companion promo set into the expansion
/// itself with Dominaria United.
fn promo_pack(_: &RuleContext<'_>, set: &MtgSet) -> bool {
    if set.name.ends_with("Promo Pack") || set.name.ends_with("Promo Packs") {
        return true;
    }
    if set.released_since(PROMO_PACK_IN_EXPANSION_DATE) {
        return is_base_expansion(set);
    }
    is_promos_set(set) && set.released_since(PROMO_PACK_DATE)
}

fn release(_: &RuleContext<'_>, set: &MtgSet) -> bool {
    is_promos_set(set) || set.name.contains("Release Events") || set.name.contains("Launch Parties")
}

fn buy_a_box(_: &RuleContext<'_>, set: &MtgSet) -> bool {
    if set.released_since(BUY_A_BOX_IN_EXPANSION_DATE) {
        is_base_expansion(set)
    } else {
        is_promos_set(set)
    }
}

fn fnm(cx: &RuleContext<'_>, set: &MtgSet) -> bool {
    year_prefixed(set, "Friday Night Magic", cx.year.as_deref())
        || (is_promos_set(set) && set.released_since(PROMOS_FOR_EVERYBODY_DATE))
}

fn world_championship(cx: &RuleContext<'_>, set: &MtgSet) -> bool {
    set.name == "World Championship Promos"
        || set.name == "Pro Tour Collector Set"
        || year_prefixed(set, "World Championship Decks", cx.year.as_deref())
}

/// Unlabeled Arena League basic lands are dated by their artist, each
/// artist having illustrated a single year of the program.
fn arena_league(cx: &RuleContext<'_>, set: &MtgSet) -> bool {
    if let Some(year) = cx.year.as_deref() {
        return year_prefixed(set, "Arena League", Some(year));
    }
    if !cx.query.is_basic_land() {
        return year_prefixed(set, "Arena League", None);
    }

    let variation = cx.query.variation_text();
    let mut artists: Vec<(&String, &String)> = cx.tables.arena_land_artists.iter().collect();
    artists.sort();
    let year = artists
        .into_iter()
        .find(|(artist, _)| has_phrase(&variation, artist))
        .map(|(_, year)| year.as_str())
        .unwrap_or(cx.tables.arena_land_default_year.as_str());
    year_prefixed(set, "Arena League", Some(year))
}

/// The program the hints name; the other one never hosts the printing.
fn land_program(cx: &RuleContext<'_>, set: &MtgSet) -> bool {
    let [apac, euro] = LAND_PROGRAM_SETS;
    set.name == if cx.query.is_apac() { apac } else { euro }
}

fn duel_decks(cx: &RuleContext<'_>, set: &MtgSet) -> bool {
    if !set.name.starts_with("Duel Decks") {
        return false;
    }
    match cx.query.duel_deck_name() {
        Some(deck) => has_phrase(&normalize(&set.name), &deck),
        None => true,
    }
}

/// Drops the candidate sets that cannot host the queried printing.
pub struct PrintingFilter<'a> {
    db: &'a Database,
    tables: &'a Tables,
}

impl<'a> PrintingFilter<'a> {
    pub fn new(db: &'a Database, tables: &'a Tables) -> Self {
        Self { db, tables }
    }

    /// Keep the set codes of `printings` that survive the query's rule.
    ///
    /// A query with neither an edition hint nor a promotional channel keeps
    /// every printing.
    pub fn filter(
        &self,
        printings: &[String],
        query: &QueryCard,
        target: &EditionTarget,
    ) -> Vec<String> {
        let kind = query.promo_kind();
        let open = kind.is_none() && query.edition.trim().is_empty();
        let rule = kind.map(rule_for);
        let cx = RuleContext {
            tables: self.tables,
            query,
            year: query.extract_year(),
        };

        let survivors: Vec<String> = printings
            .iter()
            .filter(|code| {
                let Some(set) = self.db.set_by_code(code) else {
                    return false;
                };
                target.accepts(set) || open || rule.is_some_and(|rule| rule(&cx, set))
            })
            .cloned()
            .collect();

        debug!(
            card = %query.name,
            kind = ?kind,
            before = printings.len(),
            after = survivors.len(),
            "printings filtered"
        );
        survivors
    }
}
