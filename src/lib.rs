//! Card matching for Magic: The Gathering vendor listings.
//!
//! Resolves the free-text name, edition and variation a store prints on a
//! listing to exactly one printing of the MTGJSON reference data, or reports
//! precisely why it cannot. The reference data (`AllPrintings` and
//! `AtomicCards`) is downloaded from the MTGJSON CDN and cached locally, or
//! read from files supplied by the caller.
//!
//! # Quick start
//!
//! ```no_run
//! use mtgmatcher::{Matcher, QueryCard};
//!
//! let matcher = Matcher::builder().build().unwrap();
//!
//! let query = QueryCard::new("Swamp", "Zendikar", "241", false);
//! let card = matcher.match_card(&query).unwrap();
//! println!("{} #{} ({})", card.name, card.number, card.id);
//!
//! // Ambiguous listings can be inspected instead of guessed.
//! let query = QueryCard::new("Tamiyo's Journal", "Shadows over Innistrad", "", false);
//! for candidate in matcher.probe(&query).unwrap() {
//!     println!("{} {}", candidate.set_code, candidate.number);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod query;
pub mod tables;

#[cfg(feature = "async")]
pub use async_client::AsyncMatcher;
pub use cache::{CacheManager, Document};
pub use database::Database;
pub use error::{AliasingError, Candidate, LoadError, MatcherError, Result};
pub use matcher::Matcher;
pub use models::ResolvedCard;
pub use query::{PromoKind, QueryCard};
pub use tables::Tables;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

// ---------------------------------------------------------------------------
// MatcherBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Matcher`].
///
/// Use [`Matcher::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](MatcherBuilder::build) to load the
/// reference data.
#[derive(Debug, Clone)]
pub struct MatcherBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    tables: Option<Tables>,
    tables_path: Option<PathBuf>,
    sets_path: Option<PathBuf>,
    names_path: Option<PathBuf>,
}

impl Default for MatcherBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(120),
            tables: None,
            tables_path: None,
            sets_path: None,
            names_path: None,
        }
    }
}

impl MatcherBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/mtgmatcher` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the documents are never downloaded; previously cached
    /// copies must exist. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for CDN downloads.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the bundled lookup tables.
    pub fn tables(mut self, tables: Tables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Overlay a JSON table file on top of the base tables.
    pub fn tables_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.tables_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read the sets/printings document from a local file instead of the cache.
    ///
    /// Must be paired with [`names_path`](Self::names_path).
    pub fn sets_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sets_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read the name index document from a local file instead of the cache.
    pub fn names_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.names_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the tables and both documents and return a ready matcher.
    ///
    /// Loading is all-or-nothing: any unreadable or inconsistent document
    /// fails the build.
    pub fn build(self) -> Result<Matcher> {
        let base = match self.tables {
            Some(tables) => tables,
            None => Tables::embedded()?,
        };
        let tables = match &self.tables_path {
            Some(path) => base.merge(Tables::from_path(path)?),
            None => base,
        };

        let db = match (&self.sets_path, &self.names_path) {
            (Some(sets), Some(names)) => Database::from_paths(sets, names)?,
            (None, None) => {
                CacheManager::new(self.cache_dir, self.offline, self.timeout)?.load_database()?
            }
            _ => {
                return Err(MatcherError::InvalidArgument(
                    "sets_path and names_path must be given together".into(),
                ))
            }
        };
        info!(version = db.version().unwrap_or("unknown"), "matcher ready");

        Ok(Matcher::with_database(Arc::new(db), tables))
    }
}

impl Matcher {
    /// Create a new builder for configuring the matcher.
    pub fn builder() -> MatcherBuilder {
        MatcherBuilder::default()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.database() {
            Ok(db) => write!(
                f,
                "Matcher(version={}, aliases={})",
                db.version().unwrap_or("unknown"),
                self.tables().edition_aliases.len()
            ),
            Err(_) => write!(f, "Matcher(uninitialized)"),
        }
    }
}
