use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Meta {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub version: String,
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Third-party identifiers of a printing. Only the ones the matcher can use
/// as a direct id, or as the alternate image id, are kept.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Identifiers {
    pub scryfall_id: Option<String>,
    pub mtgjson_foil_version_id: Option<String>,
    pub mtgjson_non_foil_version_id: Option<String>,
}
