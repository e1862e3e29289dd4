//! Shared test fixtures for the matcher integration tests.
//!
//! Provides a small but realistic reference snapshot built from
//! `serde_json::json!` documents shaped like MTGJSON's `AllPrintings` and
//! `AtomicCards`, plus helpers to write them to disk.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::write::GzEncoder;
use flate2::Compression;
use mtgmatcher::models::{AllPrintingsFile, AtomicCardsFile};
use mtgmatcher::{Database, Matcher, Tables};
use serde_json::{json, Value};

pub const VERSION: &str = "5.2.2+20240101";

/// A printing with both finishes, overlaid with `extra`.
fn card(uuid: &str, name: &str, number: &str, extra: Value) -> Value {
    let mut card = json!({
        "uuid": uuid,
        "name": name,
        "number": number,
        "layout": "normal",
        "finishes": ["nonfoil", "foil"],
        "language": "English",
    });
    if let (Some(obj), Value::Object(extra)) = (card.as_object_mut(), extra) {
        obj.extend(extra);
    }
    card
}

fn set(code: &str, name: &str, type_field: &str, release_date: &str, cards: Vec<Value>) -> Value {
    json!({
        "code": code,
        "name": name,
        "type": type_field,
        "releaseDate": release_date,
        "cards": cards,
    })
}

pub fn printings_document() -> Value {
    let long_name = "Our Market Research Shows That Players Like Really Long Card Names So We Made this Card to Have the Absolute Longest Card Name Ever Elemental";
    json!({
        "meta": {"date": "2024-01-01", "version": VERSION},
        "data": {
            "ZEN": set("ZEN", "Zendikar", "expansion", "2009-10-02", vec![
                card("zen-swamp-241", "Swamp", "241", json!({"isFullArt": true, "supertypes": ["Basic"]})),
                card("zen-swamp-241a", "Swamp", "241a", json!({"isFullArt": false, "supertypes": ["Basic"]})),
                card("zen-swamp-242", "Swamp", "242", json!({"isFullArt": true, "supertypes": ["Basic"]})),
                card("zen-swamp-242a", "Swamp", "242a", json!({"isFullArt": false, "supertypes": ["Basic"]})),
            ]),
            "LEA": set("LEA", "Limited Edition Alpha", "core", "1993-08-05", vec![
                card("lea-tutor", "Demonic Tutor", "102", json!({"finishes": ["nonfoil"]})),
                card("lea-bolt-161", "Lightning Bolt", "161", json!({"finishes": ["nonfoil"]})),
            ]),
            "UMA": set("UMA", "Ultimate Masters", "masters", "2018-12-07", vec![
                card("uma-tutor", "Demonic Tutor", "93", json!({})),
            ]),
            "G08": set("G08", "Judge Gift Cards 2008", "promo", "2008-01-01", vec![
                card("g08-tutor", "Demonic Tutor", "3", json!({"finishes": ["foil"]})),
            ]),
            "SOI": set("SOI", "Shadows over Innistrad", "expansion", "2016-04-08",
                ["", "†a", "†b", "†c", "†d", "†e"].iter().map(|suffix| {
                    let id = format!("soi-journal-265{}", suffix.trim_start_matches('†'));
                    card(&id, "Tamiyo's Journal", &format!("265{suffix}"), json!({}))
                }).collect()),
            "ELD": set("ELD", "Throne of Eldraine", "expansion", "2019-10-04", vec![
                card("eld-oko-197", "Oko, Thief of Crowns", "197", json!({
                    "borderColor": "black",
                    "identifiers": {"scryfallId": "sf-oko-197"},
                })),
                card("eld-oko-302", "Oko, Thief of Crowns", "302", json!({
                    "borderColor": "borderless",
                    "identifiers": {"scryfallId": "sf-oko-302"},
                })),
            ]),
            "PELD": set("PELD", "Throne of Eldraine Promos", "promo", "2019-10-04", vec![
                card("peld-oko-197s", "Oko, Thief of Crowns", "197s", json!({
                    "borderColor": "black",
                    "finishes": ["foil"],
                    "promoTypes": ["prerelease"],
                })),
                card("peld-oko-197p", "Oko, Thief of Crowns", "197p", json!({
                    "borderColor": "black",
                    "promoTypes": ["promopack"],
                })),
            ]),
            "M21": set("M21", "Core Set 2021", "core", "2020-07-03", vec![
                card("m21-negate-59", "Negate", "59", json!({"borderColor": "black"})),
            ]),
            "PM21": set("PM21", "Core Set 2021 Promos", "promo", "2020-06-25", vec![
                card("pm21-negate-59p", "Negate", "59p", json!({
                    "borderColor": "black",
                    "frameEffects": ["inverted"],
                    "promoTypes": ["promopack"],
                })),
                card("pm21-negate-59s", "Negate", "59s", json!({
                    "borderColor": "black",
                    "finishes": ["foil"],
                    "promoTypes": ["prerelease"],
                })),
            ]),
            "8ED": set("8ED", "Eighth Edition", "core", "2003-07-28", vec![
                card("8ed-plains-332", "Plains", "332", json!({
                    "finishes": ["nonfoil"],
                    "supertypes": ["Basic"],
                    "identifiers": {"mtgjsonFoilVersionId": "8ed-plains-332-foil"},
                })),
                card("8ed-plains-332-foil", "Plains", "332★", json!({
                    "finishes": ["foil"],
                    "supertypes": ["Basic"],
                    "identifiers": {"mtgjsonNonFoilVersionId": "8ed-plains-332"},
                })),
            ]),
            "WC04": set("WC04", "World Championship Decks 2004", "memorabilia", "2004-09-01", vec![
                card("wc04-plains-jn331", "Plains", "jn331", json!({"finishes": ["nonfoil"]})),
                card("wc04-plains-jn332", "Plains", "jn332", json!({"finishes": ["nonfoil"]})),
                card("wc04-plains-ap332", "Plains", "ap332", json!({"finishes": ["nonfoil"]})),
            ]),
            "APC": set("APC", "Apocalypse", "expansion", "2001-06-04", vec![
                card("apc-fire-ice-a", "Fire // Ice", "128", json!({
                    "layout": "split", "faceName": "Fire", "side": "a",
                })),
                card("apc-fire-ice-b", "Fire // Ice", "128", json!({
                    "layout": "split", "faceName": "Ice", "side": "b",
                })),
            ]),
            "IKO": set("IKO", "Ikoria: Lair of Behemoths", "expansion", "2020-04-24", vec![
                card("iko-yidaro-131", "Yidaro, Wandering Monster", "131", json!({"borderColor": "black"})),
                card("iko-yidaro-372", "Yidaro, Wandering Monster", "372", json!({
                    "borderColor": "black",
                    "flavorName": "Godzilla, Doom Inevitable",
                })),
            ]),
            "UNH": set("UNH", "Unhinged", "funny", "2004-11-19", vec![
                card("unh-long", long_name, "136", json!({})),
            ]),
            "UST": set("UST", "Unstable", "funny", "2017-12-08", vec![
                card("ust-vcc-49a", "Very Cryptic Command", "49a", json!({})),
                card("ust-vcc-49b", "Very Cryptic Command", "49b", json!({})),
            ]),
            "ARN": set("ARN", "Arabian Nights", "expansion", "1993-12-17", vec![
                card("arn-army-2", "Army of Allah", "2", json!({"finishes": ["nonfoil"]})),
                card("arn-army-2-light", "Army of Allah", "2†", json!({"finishes": ["nonfoil"]})),
            ]),
            "FEM": set("FEM", "Fallen Empires", "expansion", "1994-11-01", vec![
                card("fem-hymn-38a", "Hymn to Tourach", "38a", json!({"artist": "Liz Danforth", "finishes": ["nonfoil"]})),
                card("fem-hymn-38b", "Hymn to Tourach", "38b", json!({"artist": "Liz Danforth", "finishes": ["nonfoil"]})),
                card("fem-hymn-38c", "Hymn to Tourach", "38c", json!({"artist": "Liz Danforth", "finishes": ["nonfoil"]})),
                card("fem-hymn-38d", "Hymn to Tourach", "38d", json!({"artist": "Liz Danforth", "finishes": ["nonfoil"]})),
                card("fem-grenade-63a", "Goblin Grenade", "63a", json!({
                    "artist": "Dan Frazier",
                    "flavorText": "Don't underestimate the power of a goblin with a grudge.",
                    "finishes": ["nonfoil"],
                })),
                card("fem-grenade-63b", "Goblin Grenade", "63b", json!({"artist": "Christopher Rush", "finishes": ["nonfoil"]})),
                card("fem-grenade-63c", "Goblin Grenade", "63c", json!({"artist": "Ron Spencer", "finishes": ["nonfoil"]})),
            ]),
            "PRWK": set("PRWK", "GRN Ravnica Weekend", "promo", "2018-10-06", vec![
                card("prwk-island-a02", "Island", "A02", json!({"supertypes": ["Basic"]})),
            ]),
            "PRW2": set("PRW2", "RNA Ravnica Weekend", "promo", "2019-01-26", vec![
                card("prw2-island-f02", "Island", "F02", json!({"supertypes": ["Basic"]})),
            ]),
            "PALP": set("PALP", "Asia Pacific Land Program", "promo", "1998-09-01", vec![
                card("palp-mountain-3", "Mountain", "3", json!({"finishes": ["nonfoil"], "supertypes": ["Basic"]})),
                card("palp-mountain-8", "Mountain", "8", json!({"finishes": ["nonfoil"], "supertypes": ["Basic"]})),
            ]),
            "PELP": set("PELP", "European Land Program", "promo", "2000-02-05", vec![
                card("pelp-mountain-3", "Mountain", "3", json!({"finishes": ["nonfoil"], "supertypes": ["Basic"]})),
            ]),
            "PSUS": set("PSUS", "Junior Super Series", "promo", "1999-12-01", vec![
                card("psus-champion-2", "Elvish Champion", "2", json!({"finishes": ["foil"]})),
            ]),
            "PJSE": set("PJSE", "Junior Series Europe", "promo", "2000-01-01", vec![
                card("pjse-champion-2", "Elvish Champion", "2", json!({"finishes": ["foil"]})),
            ]),
            "ALL": set("ALL", "Alliances", "expansion", "1996-06-10", vec![
                card("all-horde-63", "Balduvian Horde", "63", json!({"finishes": ["nonfoil"]})),
            ]),
            "PWOR": set("PWOR", "World Championship Promos", "promo", "1999-08-04", vec![
                card("pwor-horde-1", "Balduvian Horde", "1", json!({"finishes": ["nonfoil"]})),
            ]),
            "MPS": set("MPS", "Kaladesh Inventions", "masterpiece", "2016-09-30", vec![
                card("mps-sol-ring-30", "Sol Ring", "30", json!({"finishes": ["foil"]})),
            ]),
            "C11": set("C11", "Commander 2011", "commander", "2011-06-17", vec![
                card("c11-sol-ring-259", "Sol Ring", "259", json!({"finishes": ["nonfoil"]})),
            ]),
            "EVG": set("EVG", "Duel Decks: Elves vs. Goblins", "duel_deck", "2007-11-16", vec![
                card("evg-llanowar-2", "Llanowar Elves", "2", json!({})),
            ]),
            "DDU": set("DDU", "Duel Decks: Elves vs. Inventors", "duel_deck", "2018-04-06", vec![
                card("ddu-llanowar-9", "Llanowar Elves", "9", json!({})),
            ]),
            "M19": set("M19", "Core Set 2019", "core", "2018-07-13", vec![
                card("m19-llanowar-314", "Llanowar Elves", "314", json!({})),
            ]),
            "GK1": set("GK1", "GRN Guild Kit", "box", "2018-11-02", vec![
                card("gk1-forest-1", "Forest", "1", json!({"supertypes": ["Basic"], "watermark": "selesnya"})),
                card("gk1-forest-2", "Forest", "2", json!({"supertypes": ["Basic"], "watermark": "golgari"})),
            ]),
            "JGP": set("JGP", "Judge Gift Cards 1998", "promo", "1998-01-01", vec![
                card("jgp-bolt-1", "Lightning Bolt", "1", json!({"finishes": ["foil"]})),
            ]),
            "P02": set("P02", "Portal Second Age", "expansion", "1998-06-24", vec![
                card("p02-matron-102", "Goblin Matron", "102", json!({"finishes": ["nonfoil"]})),
                card("p02-matron-102a", "Goblin Matron", "102a", json!({"finishes": ["nonfoil"]})),
            ]),
            "WAR": set("WAR", "War of the Spark", "expansion", "2019-05-03", vec![
                card("war-liliana-97", "Liliana, Dreadhorde General", "97", json!({})),
                card("war-liliana-97-ja", "Liliana, Dreadhorde General", "97★", json!({
                    "language": "Japanese",
                    "finishes": ["foil"],
                })),
            ]),
        }
    })
}

pub fn names_document() -> Value {
    let long_name = "Our Market Research Shows That Players Like Really Long Card Names So We Made this Card to Have the Absolute Longest Card Name Ever Elemental";
    let mut data = serde_json::Map::new();
    for (name, printings) in [
        ("Swamp", vec!["ZEN"]),
        ("Demonic Tutor", vec!["LEA", "UMA", "G08"]),
        ("Tamiyo's Journal", vec!["SOI"]),
        ("Oko, Thief of Crowns", vec!["ELD", "PELD"]),
        ("Negate", vec!["M21", "PM21"]),
        ("Plains", vec!["8ED", "WC04"]),
        ("Yidaro, Wandering Monster", vec!["IKO"]),
        (long_name, vec!["UNH"]),
        ("Very Cryptic Command", vec!["UST"]),
        ("Army of Allah", vec!["ARN"]),
        ("Hymn to Tourach", vec!["FEM"]),
        ("Liliana, Dreadhorde General", vec!["WAR"]),
        ("Island", vec!["PRWK", "PRW2"]),
        ("Mountain", vec!["PALP", "PELP"]),
        ("Elvish Champion", vec!["PSUS", "PJSE"]),
        ("Balduvian Horde", vec!["ALL", "PWOR"]),
        ("Sol Ring", vec!["C11", "MPS"]),
        ("Llanowar Elves", vec!["DDU", "EVG", "M19"]),
        ("Forest", vec!["GK1"]),
        ("Lightning Bolt", vec!["JGP", "LEA"]),
        ("Goblin Grenade", vec!["FEM"]),
        ("Goblin Matron", vec!["P02"]),
    ] {
        data.insert(
            name.to_string(),
            json!([{"name": name, "printings": printings}]),
        );
    }
    data.insert(
        "Fire // Ice".to_string(),
        json!([
            {"name": "Fire // Ice", "faceName": "Fire", "printings": ["APC"]},
            {"name": "Fire // Ice", "faceName": "Ice", "printings": ["APC"]},
        ]),
    );
    json!({
        "meta": {"date": "2024-01-01", "version": VERSION},
        "data": data,
    })
}

pub fn database() -> Database {
    let printings: AllPrintingsFile = serde_json::from_value(printings_document()).unwrap();
    let names: AtomicCardsFile = serde_json::from_value(names_document()).unwrap();
    Database::from_documents(printings, names).unwrap()
}

/// A ready matcher over the fixture snapshot and the bundled tables.
pub fn matcher() -> Matcher {
    Matcher::with_database(Arc::new(database()), Tables::embedded().unwrap())
}

/// Write the sets document gzipped and the name index as plain JSON.
///
/// Returns `(sets_path, names_path)`.
pub fn write_documents(dir: &Path) -> (PathBuf, PathBuf) {
    let sets_path = dir.join("AllPrintings.json.gz");
    let mut encoder = GzEncoder::new(File::create(&sets_path).unwrap(), Compression::default());
    encoder
        .write_all(printings_document().to_string().as_bytes())
        .unwrap();
    encoder.finish().unwrap();

    let names_path = dir.join("AtomicCards.json");
    std::fs::write(&names_path, names_document().to_string()).unwrap();

    (sets_path, names_path)
}
