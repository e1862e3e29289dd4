use serde::{Deserialize, Serialize};

use super::sub::Identifiers;

// ---------------------------------------------------------------------------
// Card: One physical printing inside a set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub uuid: String,
    pub name: String,
    pub face_name: Option<String>,
    /// Face letter of multi-face cards ("a", "b", ...).
    pub side: Option<String>,
    #[serde(default)]
    pub set_code: String,
    pub number: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
    pub artist: Option<String>,
    pub border_color: Option<String>,
    #[serde(default)]
    pub frame_effects: Vec<String>,
    pub is_full_art: Option<bool>,
    pub flavor_name: Option<String>,
    pub flavor_text: Option<String>,
    pub watermark: Option<String>,
    #[serde(default)]
    pub finishes: Vec<String>,
    /// Pre-v5 documents carry explicit foil flags instead of `finishes`.
    pub has_foil: Option<bool>,
    pub has_non_foil: Option<bool>,
    pub language: Option<String>,
    #[serde(default)]
    pub promo_types: Vec<String>,
    /// Uuids of the other variations of this card in the same set.
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub identifiers: Identifiers,
}

const BASIC_LANDS: [&str; 6] = ["Plains", "Island", "Swamp", "Mountain", "Forest", "Wastes"];

/// Whether `name` is one of the basic land names.
pub fn is_basic_land_name(name: &str) -> bool {
    let name = name.strip_prefix("Snow-Covered ").unwrap_or(name);
    BASIC_LANDS.iter().any(|land| land.eq_ignore_ascii_case(name))
}

impl Card {
    pub fn has_foil(&self) -> bool {
        if self.finishes.is_empty() {
            return self.has_foil.unwrap_or(false);
        }
        self.finishes.iter().any(|f| f == "foil" || f == "etched")
    }

    pub fn has_non_foil(&self) -> bool {
        if self.finishes.is_empty() {
            return self.has_non_foil.unwrap_or(true);
        }
        self.finishes.iter().any(|f| f == "nonfoil")
    }

    pub fn is_basic_land(&self) -> bool {
        is_basic_land_name(&self.name)
    }

    /// Later faces of a multi-face card repeat the front face's name.
    pub fn is_secondary_face(&self) -> bool {
        self.side.as_deref().is_some_and(|s| s != "a")
    }

    pub fn is_full_art(&self) -> bool {
        self.is_full_art.unwrap_or(false)
    }

    pub fn has_frame_effect(&self, effect: &str) -> bool {
        self.frame_effects.iter().any(|f| f == effect)
    }

    pub fn has_promo_type(&self, promo_type: &str) -> bool {
        self.promo_types.iter().any(|p| p == promo_type)
    }

    pub fn is_borderless(&self) -> bool {
        self.border_color.as_deref() == Some("borderless")
    }

    pub fn is_extended_art(&self) -> bool {
        self.has_frame_effect("extendedart")
    }

    pub fn is_showcase(&self) -> bool {
        self.has_frame_effect("showcase")
    }

    /// Crossover printings that carry an alternate in-game name.
    pub fn is_reskin(&self) -> bool {
        self.flavor_name.as_deref().is_some_and(|n| !n.is_empty())
    }

    pub fn is_japanese(&self) -> bool {
        self.language.as_deref() == Some("Japanese")
    }

    /// Leading digits of the collector number ("241a" -> "241").
    pub fn number_digits(&self) -> &str {
        let end = self
            .number
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.number.len());
        &self.number[..end]
    }

    /// Whatever follows the leading digits ("241a" -> "a").
    pub fn number_suffix(&self) -> &str {
        &self.number[self.number_digits().len()..]
    }

    pub fn scryfall_id(&self) -> Option<&str> {
        self.identifiers.scryfall_id.as_deref()
    }
}
