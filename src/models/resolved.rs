use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ResolvedCard: The outcome of a successful match
// ---------------------------------------------------------------------------

/// A printing that a vendor listing was resolved to.
///
/// `id` is the printing uuid, suffixed with
/// [`FOIL_ID_SUFFIX`](crate::config::FOIL_ID_SUFFIX) when the foil finish of a
/// printing that also exists as non-foil was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCard {
    pub id: String,
    pub scryfall_id: Option<String>,
    pub name: String,
    pub set_code: String,
    pub edition: String,
    pub foil: bool,
    pub number: String,
    /// Normalized treatment tag ("Showcase", "Prerelease", "Japanese", ...).
    pub variation: String,
}
