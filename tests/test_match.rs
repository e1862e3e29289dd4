//! End-to-end resolution scenarios against the fixture snapshot.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use mtgmatcher::{Matcher, MatcherError, QueryCard, Tables};

fn q(name: &str, edition: &str, variation: &str) -> QueryCard {
    QueryCard::new(name, edition, variation, false)
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn full_art_swamp_by_number() {
    let m = common::matcher();
    let card = m.match_card(&q("Swamp", "Zendikar", "241")).unwrap();
    assert_eq!(card.id, "zen-swamp-241");
    assert_eq!(card.number, "241");
    assert_eq!(card.edition, "Zendikar");
    assert_eq!(card.variation, "Full Art");
}

#[test]
fn non_full_art_swamp_takes_the_letter_suffix() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Swamp", "Zendikar", "241 Non-Full Art"))
        .unwrap();
    assert_eq!(card.id, "zen-swamp-241a");
    assert_eq!(card.variation, "");
}

#[test]
fn card_without_promo_pack_printing_is_a_mismatch() {
    let m = common::matcher();
    let err = m.match_card(&q("Demonic Tutor", "Promo Pack", "")).unwrap_err();
    assert_matches!(err, MatcherError::EditionMismatch { ref name, .. } if name == "Demonic Tutor");
    assert!(err.is_not_found());
}

#[test]
fn hidden_mechanic_variants_alias() {
    let m = common::matcher();
    let err = m
        .match_card(&q("Tamiyo's Journal", "Shadows over Innistrad", ""))
        .unwrap_err();
    assert!(err.is_aliasing());
    let aliasing = err.aliasing().unwrap();
    assert_eq!(aliasing.candidates.len(), 6);
    assert!(aliasing
        .candidates
        .iter()
        .all(|c| c.set_code == "SOI" && c.number.starts_with("265")));
    // The plain number and its dagger variants all stay in play.
    assert!(aliasing.candidates.iter().any(|c| c.number == "265"));
    assert!(aliasing.candidates.iter().any(|c| c.number == "265†e"));
}

#[test]
fn borderless_oko_differs_from_the_plain_one() {
    let m = common::matcher();
    let borderless = m
        .match_card(&q("Oko, Thief of Crowns", "Throne of Eldraine", "Borderless"))
        .unwrap();
    assert_eq!(borderless.id, "eld-oko-302");
    assert_eq!(borderless.variation, "Borderless");

    let plain = m
        .match_card(&q("Oko, Thief of Crowns", "Throne of Eldraine", ""))
        .unwrap();
    assert_eq!(plain.id, "eld-oko-197");
    assert_ne!(plain.id, borderless.id);
}

#[test]
fn negate_promo_pack_lives_in_the_promos_set() {
    let m = common::matcher();
    let card = m.match_card(&q("Negate", "Promo Pack", "")).unwrap();
    assert_eq!(card.set_code, "PM21");
    assert_eq!(card.number, "59p");
    assert_eq!(card.id, "pm21-negate-59p");
}

#[test]
fn world_championship_deck_card() {
    let m = common::matcher();
    let card = m
        .match_card(&q(
            "Plains",
            "World Championship",
            "8th Edition 332 Julien Nuijten 2004",
        ))
        .unwrap();
    assert_eq!(card.id, "wc04-plains-jn332");
    assert_eq!(card.edition, "World Championship Decks 2004");
}

#[test]
fn world_championship_concession_picks_one() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Plains", "World Championship Decks 2004", ""))
        .unwrap();
    assert_eq!(card.set_code, "WC04");
}

// ---------------------------------------------------------------------------
// Promotional channels
// ---------------------------------------------------------------------------

#[test]
fn prerelease_oko_comes_from_the_promos_set() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Oko, Thief of Crowns", "Throne of Eldraine", "Prerelease"))
        .unwrap();
    assert_eq!(card.id, "peld-oko-197s");
    assert_eq!(card.variation, "Prerelease");
    // Prerelease promos are foil only.
    assert!(card.foil);
}

#[test]
fn promo_pack_oko_without_edition() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Oko, Thief of Crowns", "", "Promo Pack"))
        .unwrap();
    assert_eq!(card.id, "peld-oko-197p");
}

#[test]
fn judge_promo_by_year() {
    let m = common::matcher();
    let card = m.match_card(&q("Demonic Tutor", "", "Judge 2008")).unwrap();
    assert_eq!(card.set_code, "G08");
    assert!(card.foil);
}

#[test]
fn unknown_edition_without_promo_is_a_mismatch() {
    let m = common::matcher();
    let err = m
        .match_card(&q("Demonic Tutor", "Totally Made Up Set", ""))
        .unwrap_err();
    assert_matches!(err, MatcherError::EditionMismatch { .. });
}

#[test]
fn missing_edition_leaves_every_printing_open() {
    let m = common::matcher();
    let err = m.match_card(&q("Demonic Tutor", "", "")).unwrap_err();
    assert_eq!(err.aliasing().unwrap().candidates.len(), 3);
}

#[test]
fn exact_promo_set_without_stamp_hint_aliases() {
    let m = common::matcher();
    let err = m
        .match_card(&q("Oko, Thief of Crowns", "Throne of Eldraine Promos", ""))
        .unwrap_err();
    let mut ids = err.aliasing().unwrap().candidate_ids();
    ids.sort_unstable();
    assert_eq!(ids, ["peld-oko-197p", "peld-oko-197s"]);

    let err = m
        .match_card(&q("Negate", "Core Set 2021 Promos", ""))
        .unwrap_err();
    assert_eq!(err.aliasing().unwrap().candidates.len(), 2);
}

#[test]
fn stamp_hint_still_narrows_an_exact_promo_set() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Negate", "Core Set 2021 Promos", "Prerelease"))
        .unwrap();
    assert_eq!(card.id, "pm21-negate-59s");
    assert_eq!(card.variation, "Prerelease");
}

#[test]
fn card_specific_edition_fix() {
    let m = common::matcher();
    let judge = m.match_card(&q("Balduvian Horde", "", "Judge")).unwrap();
    assert_eq!(judge.id, "pwor-horde-1");
    assert_eq!(judge.edition, "World Championship Promos");

    let plain = m.match_card(&q("Balduvian Horde", "Alliances", "")).unwrap();
    assert_eq!(plain.id, "all-horde-63");
}

#[test]
fn judge_only_printing_needs_the_keyword() {
    let m = common::matcher();
    let plain = m.match_card(&q("Lightning Bolt", "", "")).unwrap();
    assert_eq!(plain.id, "lea-bolt-161");

    let judge = m.match_card(&q("Lightning Bolt", "", "Judge")).unwrap();
    assert_eq!(judge.id, "jgp-bolt-1");
    assert!(judge.foil);
}

#[test]
fn ravnica_weekend_deck_letter_picks_the_set() {
    let m = common::matcher();
    let guilds = m.match_card(&q("Island", "Ravnica Weekend", "A02")).unwrap();
    assert_eq!(guilds.id, "prwk-island-a02");
    assert_eq!(guilds.edition, "GRN Ravnica Weekend");

    let allegiance = m.match_card(&q("Island", "Ravnica Weekend", "F02")).unwrap();
    assert_eq!(allegiance.id, "prw2-island-f02");
}

#[test]
fn land_program_words_leave_the_number() {
    let m = common::matcher();
    let apac = m.match_card(&q("Mountain", "", "APAC 3")).unwrap();
    assert_eq!(apac.id, "palp-mountain-3");
    assert_eq!(apac.edition, "Asia Pacific Land Program");

    let euro = m.match_card(&q("Mountain", "Land Program", "Euro 3")).unwrap();
    assert_eq!(euro.id, "pelp-mountain-3");
}

#[test]
fn junior_series_by_name_and_abbreviation() {
    let m = common::matcher();
    let us = m
        .match_card(&q("Elvish Champion", "", "Junior Super Series"))
        .unwrap();
    assert_eq!(us.id, "psus-champion-2");

    let europe = m.match_card(&q("Elvish Champion", "", "JSE")).unwrap();
    assert_eq!(europe.id, "pjse-champion-2");
}

// ---------------------------------------------------------------------------
// Edition hints
// ---------------------------------------------------------------------------

#[test]
fn edition_alias_and_set_code() {
    let m = common::matcher();
    let by_alias = m.match_card(&q("Demonic Tutor", "Alpha", "")).unwrap();
    assert_eq!(by_alias.id, "lea-tutor");

    let by_code = m.match_card(&q("Demonic Tutor", "uma", "")).unwrap();
    assert_eq!(by_code.id, "uma-tutor");
}

#[test]
fn edition_suffix_is_unwrapped() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Oko, Thief of Crowns", "Throne of Eldraine Variants", "Borderless"))
        .unwrap();
    assert_eq!(card.id, "eld-oko-302");
}

#[test]
fn masterpiece_family_member() {
    let m = common::matcher();
    let named = m
        .match_card(&q("Sol Ring", "Masterpiece Series: Kaladesh Inventions", ""))
        .unwrap();
    assert_eq!(named.id, "mps-sol-ring-30");
    assert_eq!(named.edition, "Kaladesh Inventions");

    // The only member printing the card stands in for the whole family.
    let family = m
        .match_card(&q("Sol Ring", "Masterpiece Series", ""))
        .unwrap();
    assert_eq!(family.id, "mps-sol-ring-30");
}

#[test]
fn duel_deck_named_in_the_variation() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Llanowar Elves", "Duel Decks", "Elves vs. Goblins"))
        .unwrap();
    assert_eq!(card.id, "evg-llanowar-2");
    assert_eq!(card.edition, "Duel Decks: Elves vs. Goblins");
}

#[test]
fn mana_symbol_in_the_edition_hint() {
    let m = common::matcher();
    let light = m
        .match_card(&q("Army of Allah", "Arabian Nights Light", ""))
        .unwrap();
    assert_eq!(light.id, "arn-army-2-light");
    assert_eq!(light.variation, "Light");

    let dark = m
        .match_card(&q("Army of Allah", "Arabian Nights Dark", ""))
        .unwrap();
    assert_eq!(dark.id, "arn-army-2");
}

// ---------------------------------------------------------------------------
// Name shapes
// ---------------------------------------------------------------------------

#[test]
fn trailing_number_moves_into_the_variation() {
    let m = common::matcher();
    let card = m.match_card(&q("Swamp 242", "Zendikar", "")).unwrap();
    assert_eq!(card.id, "zen-swamp-242");
}

#[test]
fn multipart_name_from_loose_separator() {
    let m = common::matcher();
    let card = m.match_card(&q("Fire and Ice", "Apocalypse", "")).unwrap();
    assert_eq!(card.name, "Fire // Ice");
    assert_eq!(card.id, "apc-fire-ice-a");
}

#[test]
fn reskin_name_resolves_to_the_flavor_printing() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Godzilla, Doom Inevitable", "Ikoria: Lair of Behemoths", ""))
        .unwrap();
    assert_eq!(card.name, "Yidaro, Wandering Monster");
    assert_eq!(card.id, "iko-yidaro-372");

    let plain = m
        .match_card(&q("Yidaro, Wandering Monster", "Ikoria: Lair of Behemoths", ""))
        .unwrap();
    assert_eq!(plain.id, "iko-yidaro-131");
}

#[test]
fn truncated_funny_name() {
    let m = common::matcher();
    let card = m
        .match_card(&q(
            "Our Market Research Shows That Players Like Really Long Card Names",
            "Unhinged",
            "",
        ))
        .unwrap();
    assert_eq!(card.id, "unh-long");
}

#[test]
fn diacritics_and_case_are_folded() {
    let m = common::matcher();
    let card = m
        .match_card(&q("DEMONIC TUTÖR", "limited edition alpha", ""))
        .unwrap();
    assert_eq!(card.id, "lea-tutor");
}

#[test]
fn unknown_card_is_not_found() {
    let m = common::matcher();
    let err = m.match_card(&q("Black Lotus", "Alpha", "")).unwrap_err();
    assert_matches!(err, MatcherError::CardNotFound(ref name) if name == "Black Lotus");
}

// ---------------------------------------------------------------------------
// Per-set rules
// ---------------------------------------------------------------------------

#[test]
fn variant_table_picks_the_numbered_art() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Hymn to Tourach", "Fallen Empires", "Circle"))
        .unwrap();
    assert_eq!(card.number, "38a");

    let err = m
        .match_card(&q("Hymn to Tourach", "Fallen Empires", ""))
        .unwrap_err();
    assert_eq!(err.aliasing().unwrap().candidates.len(), 4);
}

#[test]
fn arabian_nights_mana_symbols() {
    let m = common::matcher();
    let light = m
        .match_card(&q("Army of Allah", "Arabian Nights", "Light"))
        .unwrap();
    assert_eq!(light.id, "arn-army-2-light");
    assert_eq!(light.variation, "Light");

    let dark = m
        .match_card(&q("Army of Allah", "Arabian Nights", "Dark"))
        .unwrap();
    assert_eq!(dark.id, "arn-army-2");
    assert_eq!(dark.variation, "Dark");
}

#[test]
fn letter_suffix_set() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Very Cryptic Command", "Unstable", "b"))
        .unwrap();
    assert_eq!(card.id, "ust-vcc-49b");
}

#[test]
fn japanese_printing() {
    let m = common::matcher();
    let ja = m
        .match_card(&q("Liliana, Dreadhorde General", "War of the Spark", "JP Alternate Art"))
        .unwrap();
    assert_eq!(ja.id, "war-liliana-97-ja");
    assert_eq!(ja.variation, "Japanese");

    let en = m
        .match_card(&q("Liliana, Dreadhorde General", "War of the Spark", ""))
        .unwrap();
    assert_eq!(en.id, "war-liliana-97");
}

#[test]
fn foil_special_set_picks_the_star_printing() {
    let m = common::matcher();
    let foil = m
        .match_card(&QueryCard::new("Plains", "8th Edition", "", true))
        .unwrap();
    assert_eq!(foil.number, "332★");
    assert!(foil.foil);
    assert_eq!(foil.id, "8ed-plains-332-foil");

    let plain = m
        .match_card(&QueryCard::new("Plains", "8th Edition", "", false))
        .unwrap();
    assert_eq!(plain.id, "8ed-plains-332");
    assert!(!plain.foil);
}

#[test]
fn artist_or_flavor_word_picks_the_art() {
    let m = common::matcher();
    let by_artist = m
        .match_card(&q("Goblin Grenade", "Fallen Empires", "Rush"))
        .unwrap();
    assert_eq!(by_artist.id, "fem-grenade-63b");

    let by_flavor = m
        .match_card(&q("Goblin Grenade", "Fallen Empires", "grudge"))
        .unwrap();
    assert_eq!(by_flavor.id, "fem-grenade-63a");

    // Words shorter than four letters are ignored.
    let err = m
        .match_card(&q("Goblin Grenade", "Fallen Empires", "Ron"))
        .unwrap_err();
    assert_eq!(err.aliasing().unwrap().candidates.len(), 3);
}

#[test]
fn guild_watermark() {
    let m = common::matcher();
    let card = m
        .match_card(&q("Forest", "GRN Guild Kit", "Golgari"))
        .unwrap();
    assert_eq!(card.id, "gk1-forest-2");

    let err = m.match_card(&q("Forest", "GRN Guild Kit", "")).unwrap_err();
    assert!(err.is_aliasing());
}

#[test]
fn letter_variant_only_on_request() {
    let m = common::matcher();
    let plain = m
        .match_card(&q("Goblin Matron", "Portal Second Age", ""))
        .unwrap();
    assert_eq!(plain.id, "p02-matron-102");

    let variant = m
        .match_card(&q("Goblin Matron", "Portal Second Age", "Misprint"))
        .unwrap();
    assert_eq!(variant.id, "p02-matron-102a");
}

// ---------------------------------------------------------------------------
// Probing and direct ids
// ---------------------------------------------------------------------------

#[test]
fn probe_lists_every_candidate() {
    let m = common::matcher();
    let query = q("Tamiyo's Journal", "Shadows over Innistrad", "");
    let probed = m.probe(&query).unwrap();
    let err = m.match_card(&query).unwrap_err();
    let ids: Vec<&str> = probed.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, err.aliasing().unwrap().candidate_ids());

    let single = m.probe(&q("Swamp", "Zendikar", "241")).unwrap();
    assert_eq!(single.len(), 1);
}

#[test]
fn direct_id_and_alternate_id() {
    let m = common::matcher();
    let card = m.match_card(&QueryCard::by_id("uma-tutor")).unwrap();
    assert_eq!(card.name, "Demonic Tutor");

    let card = m.match_card(&QueryCard::by_id("sf-oko-302")).unwrap();
    assert_eq!(card.id, "eld-oko-302");

    let card = m.card("eld-oko-197_f").unwrap();
    assert!(card.foil);
    assert_eq!(card.id, "eld-oko-197_f");
}

#[test]
fn unknown_id_falls_back_to_the_name() {
    let m = common::matcher();
    let mut query = q("Swamp", "Zendikar", "241");
    query.id = "no-such-id".into();
    assert_eq!(m.match_card(&query).unwrap().id, "zen-swamp-241");

    let err = m.match_card(&QueryCard::by_id("no-such-id")).unwrap_err();
    assert_matches!(err, MatcherError::CardNotFound(_));
}

#[test]
fn id_override_settles_the_card() {
    let overrides = Tables::from_json(
        r#"{"idOverrides": [
            {"name": "Demonic Tutor", "variation": "Gift Box", "id": "uma-tutor"},
            {"name": "Negate", "edition": "Core Set 2021", "id": "no-such-uuid"}
        ]}"#,
    )
    .unwrap();
    let tables = Tables::embedded().unwrap().merge(overrides);
    let m = Matcher::with_database(Arc::new(common::database()), tables);

    let card = m.match_card(&q("Demonic Tutor", "", "Gift Box")).unwrap();
    assert_eq!(card.id, "uma-tutor");
    // Without the override the same listing is ambiguous.
    assert!(common::matcher()
        .match_card(&q("Demonic Tutor", "", "Gift Box"))
        .unwrap_err()
        .is_aliasing());

    // An override naming an unknown card falls back to the name.
    let card = m.match_card(&q("Negate", "Core Set 2021", "")).unwrap();
    assert_eq!(card.id, "m21-negate-59");
}
