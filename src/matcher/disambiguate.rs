//! Card disambiguation: narrow same-named printings down to the one the
//! vendor meant.
//!
//! Each printing runs through an ordered cascade of checks. A check either
//! decides the printing's fate or passes it on; a printing nobody rejects
//! survives.

use tracing::trace;

use crate::config::{PRERELEASE_STAMP_DATE, PROMOS_FOR_EVERYBODY_DATE, PROMO_PACK_DATE};
use crate::database::Printing;
use crate::models::MtgSet;
use crate::normalize::{has_phrase, normalize};
use crate::query::{split_wcd_number, QueryCard, WcdHint};
use crate::tables::Tables;

/// What a query says, folded once per disambiguation.
struct Hints<'q> {
    query: &'q QueryCard,
    variation: String,
    hints: String,
    number: Option<String>,
    suffixes: Vec<String>,
    wcd: Option<WcdHint>,
    prerelease: bool,
    promo_pack: bool,
    japanese: bool,
    misprint: bool,
}

impl<'q> Hints<'q> {
    fn new(query: &'q QueryCard, tables: &Tables) -> Self {
        let variation = query.variation_text();
        let number = query.extract_number();
        let prerelease = query.is_prerelease();
        let promo_pack = query.is_promo_pack();
        let japanese = query.is_japanese();

        let mut suffixes = vec![String::new()];
        if query.foil || japanese {
            suffixes.push("★".to_string());
        }
        for word in variation.split(' ') {
            if !word.is_empty() && number.as_deref() != Some(word) {
                suffixes.push(word.to_string());
            }
        }
        if promo_pack {
            suffixes.push("p".to_string());
        }
        if prerelease {
            suffixes.push("s".to_string());
        }
        if query.is_non_full_art() {
            suffixes.push("a".to_string());
        }

        let wcd = query
            .is_world_championship()
            .then(|| query.wcd_hint(&tables.wcd_players));

        Self {
            query,
            hints: query.hints_text(),
            variation,
            number,
            suffixes,
            wcd,
            prerelease,
            promo_pack,
            japanese,
            misprint: query.is_misprint(),
        }
    }
}

/// `Some(true)` accepts, `Some(false)` rejects, `None` defers to the next check.
type Check = fn(&Tables, &Hints<'_>, Printing<'_>, &[Printing<'_>]) -> Option<bool>;

/// Runs the per-printing cascade.
pub struct Disambiguator<'a> {
    tables: &'a Tables,
}

impl<'a> Disambiguator<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    /// The printings of `candidates` that survive the cascade, in input order.
    pub fn disambiguate<'d>(
        &self,
        query: &QueryCard,
        candidates: &[Printing<'d>],
    ) -> Vec<Printing<'d>> {
        let hints = Hints::new(query, self.tables);
        candidates
            .iter()
            .copied()
            .filter(|p| {
                let siblings: Vec<Printing<'d>> = candidates
                    .iter()
                    .copied()
                    .filter(|s| s.set.code == p.set.code && s.card.uuid != p.card.uuid)
                    .collect();
                self.accepts(&hints, *p, &siblings)
            })
            .collect()
    }

    fn accepts(
        &self,
        hints: &Hints<'_>,
        printing: Printing<'_>,
        siblings: &[Printing<'_>],
    ) -> bool {
        const CASCADE: [(&str, Check); 8] = [
            ("variant table", variant_table),
            ("full art", full_art),
            ("embedded number", embedded_number),
            ("language", language),
            ("promo stamp", promo_stamp),
            ("frame attributes", frame_attributes),
            ("set rules", set_rules),
            ("misprint policy", misprint_policy),
        ];
        for (label, check) in CASCADE {
            if let Some(verdict) = check(self.tables, hints, printing, siblings) {
                trace!(
                    card = %printing.card.name,
                    set = %printing.set.code,
                    number = %printing.card.number,
                    check = label,
                    verdict,
                    "printing decided"
                );
                return verdict;
            }
        }
        true
    }
}

fn variant_table(
    tables: &Tables,
    hints: &Hints<'_>,
    p: Printing<'_>,
    _: &[Printing<'_>],
) -> Option<bool> {
    let expected = tables
        .variant_number(&p.set.name, &p.card.name, &hints.query.variation)??;
    Some(p.card.number.eq_ignore_ascii_case(expected))
}

fn full_art(
    _: &Tables,
    hints: &Hints<'_>,
    p: Printing<'_>,
    _: &[Printing<'_>],
) -> Option<bool> {
    if !p.card.is_basic_land() {
        return None;
    }
    let query = hints.query;
    if (query.is_full_art() && !p.card.is_full_art())
        || (query.is_non_full_art() && p.card.is_full_art())
    {
        return Some(false);
    }
    None
}

fn embedded_number(
    _: &Tables,
    hints: &Hints<'_>,
    p: Printing<'_>,
    _: &[Printing<'_>],
) -> Option<bool> {
    let number = hints.number.as_deref()?;
    let card_number = p.card.number.to_lowercase();

    if let Some(wcd) = &hints.wcd {
        if let Some((prefix, residual, sideboard)) = split_wcd_number(&card_number) {
            return Some(
                wcd.initials.iter().any(|i| i == prefix)
                    && residual == number
                    && sideboard == wcd.sideboard,
            );
        }
    }

    Some(
        hints
            .suffixes
            .iter()
            .any(|suffix| format!("{number}{suffix}") == card_number),
    )
}

fn language(
    _: &Tables,
    hints: &Hints<'_>,
    p: Printing<'_>,
    _: &[Printing<'_>],
) -> Option<bool> {
    let japanese_card = p.card.is_japanese();
    if hints.japanese {
        if !japanese_card && !p.card.number.ends_with('★') {
            return Some(false);
        }
    } else if japanese_card {
        return Some(false);
    }
    None
}

/// Stamped promos carry an "s" or "p" suffix once their program starts
/// numbering them; the stamp and the hint must agree either way.
///
/// When the edition names the promo set itself and every printing there is
/// stamped, an unstamped hint cannot tell them apart and the choice is left
/// to arbitration.
fn promo_stamp(
    _: &Tables,
    hints: &Hints<'_>,
    p: Printing<'_>,
    siblings: &[Printing<'_>],
) -> Option<bool> {
    let unstamped_hint = !hints.prerelease && !hints.promo_pack;
    if unstamped_hint
        && p.set.name == hints.query.edition
        && carries_stamp(p)
        && siblings.iter().all(|s| carries_stamp(*s))
    {
        return None;
    }

    let suffix = p.card.number_suffix();
    let stamped = suffix == "s" || p.card.has_promo_type("prerelease");
    if p.set.released_since(PRERELEASE_STAMP_DATE) && stamped != hints.prerelease {
        return Some(false);
    }
    let packed = suffix == "p" || p.card.has_promo_type("promopack");
    if p.set.released_since(PROMO_PACK_DATE) && packed != hints.promo_pack {
        return Some(false);
    }
    None
}

/// Whether the printing carries a prerelease or promo pack stamp its set
/// era recognizes.
fn carries_stamp(p: Printing<'_>) -> bool {
    let suffix = p.card.number_suffix();
    let prerelease = (suffix == "s" || p.card.has_promo_type("prerelease"))
        && p.set.released_since(PRERELEASE_STAMP_DATE);
    let promo_pack = (suffix == "p" || p.card.has_promo_type("promopack"))
        && p.set.released_since(PROMO_PACK_DATE);
    prerelease || promo_pack
}

fn frame_attributes(
    _: &Tables,
    hints: &Hints<'_>,
    p: Printing<'_>,
    _: &[Printing<'_>],
) -> Option<bool> {
    if !p.set.released_since(PROMOS_FOR_EVERYBODY_DATE) {
        return None;
    }
    let query = hints.query;
    let card = p.card;
    let consistent = query.is_borderless() == card.is_borderless()
        && query.is_extended_art() == card.is_extended_art()
        && query.is_showcase() == card.is_showcase()
        && query.is_reskin() == card.is_reskin();
    (!consistent).then_some(false)
}

fn set_rules(
    tables: &Tables,
    hints: &Hints<'_>,
    p: Printing<'_>,
    _: &[Printing<'_>],
) -> Option<bool> {
    let query = hints.query;
    let card = p.card;
    let set_name = p.set.name.as_str();

    if p.set.code == "ARN" {
        let dagger = card.number.contains('†');
        if (query.is_ark_light() && !dagger) || (query.is_ark_dark() && dagger) {
            return Some(false);
        }
    }

    if Tables::in_list(&tables.flavor_text_sets, set_name) {
        let words: Vec<&str> = hints.variation.split(' ').filter(|w| w.len() >= 4).collect();
        if !words.is_empty() {
            let flavor = normalize(card.flavor_text.as_deref().unwrap_or_default());
            let artist = normalize(card.artist.as_deref().unwrap_or_default());
            let hit = words
                .iter()
                .any(|w| has_phrase(&flavor, w) || has_phrase(&artist, w));
            if !hit {
                return Some(false);
            }
        }
    }

    if Tables::in_list(&tables.watermark_sets, set_name) && !hints.variation.is_empty() {
        if let Some(mark) = card.watermark.as_deref() {
            if !has_phrase(&hints.variation, &normalize(mark)) {
                return Some(false);
            }
        }
    }

    if Tables::in_list(&tables.foil_special_sets, set_name) {
        let available = if query.foil {
            card.has_foil()
        } else {
            card.has_non_foil()
        };
        if !available {
            return Some(false);
        }
    }

    if Tables::in_list(&tables.letter_suffix_sets, set_name) {
        let letter = hints
            .variation
            .split(' ')
            .find(|w| w.len() == 1 && w.chars().all(|c| c.is_ascii_alphabetic()));
        if let Some(letter) = letter {
            if !card.number_suffix().eq_ignore_ascii_case(letter) {
                return Some(false);
            }
        }
    }

    let card_name = normalize(&card.name);
    let overridden = tables.card_overrides.iter().find(|o| {
        normalize(&o.name) == card_name && o.set == set_name && o.number == card.number
    });
    if let Some(o) = overridden {
        if !has_phrase(&hints.hints, &normalize(&o.keyword)) {
            return Some(false);
        }
    }
    None
}

/// Letter-suffixed printings are variants of the plain-numbered card and
/// only match when the hints ask for a variant.
fn misprint_policy(
    _: &Tables,
    hints: &Hints<'_>,
    p: Printing<'_>,
    siblings: &[Printing<'_>],
) -> Option<bool> {
    let digits = p.card.number_digits();
    let suffix = p.card.number_suffix();

    if suffix.is_empty() {
        let has_variant = siblings.iter().any(|s| {
            s.card.number_digits() == digits && is_variant_suffix(s.set, s.card.number_suffix())
        });
        return (hints.misprint && has_variant).then_some(false);
    }
    if !is_variant_suffix(p.set, suffix) || digits.is_empty() {
        return None;
    }
    let has_plain = siblings.iter().any(|s| s.card.number == digits);
    (has_plain && !hints.misprint).then_some(false)
}

/// Letter suffixes that mark an alternate printing rather than a promo stamp.
fn is_variant_suffix(set: &MtgSet, suffix: &str) -> bool {
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    let stamp = (suffix == "s" && set.released_since(PRERELEASE_STAMP_DATE))
        || (suffix == "p" && set.released_since(PROMO_PACK_DATE));
    !stamp
}
