use std::path::PathBuf;

use chrono::NaiveDate;

pub const CDN_BASE: &str = "https://mtgjson.com/api/v5";
pub const META_URL: &str = "https://mtgjson.com/api/v5/Meta.json";

/// Suffix appended to a card id when the foil finish has no id of its own.
pub const FOIL_ID_SUFFIX: &str = "_f";

pub const ALL_PRINTINGS_FILE: &str = "AllPrintings.json.gz";
pub const ATOMIC_CARDS_FILE: &str = "AtomicCards.json.gz";

/// Records the MTGJSON version of the cached documents.
pub const VERSION_FILE: &str = "version.txt";

/// `<platform cache dir>/mtgmatcher`, or a local directory when the
/// platform has none.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("mtgmatcher"))
        .unwrap_or_else(|| PathBuf::from(".mtgmatcher-cache"))
}

// ---------------------------------------------------------------------------
// Era cutovers
// ---------------------------------------------------------------------------

const fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(d) => d,
        None => panic!("invalid cutover date"),
    }
}

/// Prerelease promos carry an "s" number suffix from Amonkhet onwards.
pub const PRERELEASE_STAMP_DATE: NaiveDate = date(2017, 4, 28);

/// First Promo Pack distribution (Core Set 2020).
pub const PROMO_PACK_DATE: NaiveDate = date(2019, 7, 12);

/// Throne of Eldraine: promos are numbered after the parent set and every
/// alternate treatment is encoded in frame/border attributes.
pub const PROMOS_FOR_EVERYBODY_DATE: NaiveDate = date(2019, 10, 4);

/// Zendikar Rising: Buy-a-Box cards are printed inside the expansion.
pub const BUY_A_BOX_IN_EXPANSION_DATE: NaiveDate = date(2020, 9, 25);

/// Dominaria United: Promo Pack cards are printed inside the expansion.
pub const PROMO_PACK_IN_EXPANSION_DATE: NaiveDate = date(2022, 9, 9);

/// Parse an MTGJSON `YYYY-MM-DD` release date.
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
