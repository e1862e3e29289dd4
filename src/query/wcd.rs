use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::QueryCard;
use crate::normalize::has_phrase;

static WCD_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]{2,4})([0-9]+[a-z]?)(sb)?$").expect("valid regex")
});

const STOP_WORDS: [&str; 12] = [
    "edition", "sb", "sideboard", "world", "championship", "championships", "deck", "decks",
    "wcd", "worlds", "the", "of",
];

/// What a World Championship Decks query says about the deck card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WcdHint {
    /// Candidate player-initial prefixes, most specific first.
    pub initials: Vec<String>,
    pub sideboard: bool,
    pub number: Option<String>,
}

/// Split a deck collector number like "jn332sb" into
/// `("jn", "332", true)`.
pub fn split_wcd_number(number: &str) -> Option<(&str, &str, bool)> {
    let caps = WCD_NUMBER_RE.captures(number)?;
    Some((
        caps.get(1)?.as_str(),
        caps.get(2)?.as_str(),
        caps.get(3).is_some(),
    ))
}

impl QueryCard {
    /// Player initials, sideboard flag and base number from the variation.
    ///
    /// `players` maps folded full player names to their initials and takes
    /// precedence over initials guessed from consecutive name words.
    pub fn wcd_hint(&self, players: &HashMap<String, String>) -> WcdHint {
        let text = self.variation_text();
        let mut initials: Vec<String> = Vec::new();
        let mut push = |value: String| {
            if !initials.contains(&value) {
                initials.push(value);
            }
        };

        let mut known: Vec<(&String, &String)> = players.iter().collect();
        known.sort();
        for (player, prefix) in known {
            if has_phrase(&text, player) {
                push(prefix.clone());
            }
        }

        let words: Vec<&str> = text
            .split(' ')
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()))
            .filter(|w| !STOP_WORDS.contains(w))
            .collect();
        for pair in words.windows(2) {
            let prefix: String = pair.iter().filter_map(|w| w.chars().next()).collect();
            push(prefix);
        }
        for word in &words {
            if (2..=4).contains(&word.len()) {
                push(word.to_string());
            }
        }

        WcdHint {
            initials,
            sideboard: has_phrase(&text, "sb") || has_phrase(&text, "sideboard"),
            number: self.extract_number(),
        }
    }
}
