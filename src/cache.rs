//! Local copies of the MTGJSON bootstrap documents.
//!
//! Both documents are fetched from the CDN on first use and fetched again
//! once the version published in `Meta.json` differs from the one recorded
//! next to the local copies. In offline mode only what is already on disk
//! is used.

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config;
use crate::database::Database;
use crate::error::{LoadError, MatcherError, Result};
use crate::models::Meta;

/// Open a document for reading, decompressing `.gz` files on the fly.
pub fn open_document(path: &Path) -> std::result::Result<Box<dyn Read>, LoadError> {
    let file = BufReader::new(fs::File::open(path)?);
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(file)),
    }
}

/// The two documents a [`Database`] is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// Every set with its printings.
    AllPrintings,
    /// Card name -> codes of the sets printing it.
    AtomicCards,
}

impl Document {
    pub fn file_name(self) -> &'static str {
        match self {
            Document::AllPrintings => config::ALL_PRINTINGS_FILE,
            Document::AtomicCards => config::ATOMIC_CARDS_FILE,
        }
    }
}

/// `Meta.json` as published on the CDN; older mirrors use a `meta` key.
#[derive(Deserialize)]
struct MetaFile {
    data: Option<Meta>,
    meta: Option<Meta>,
}

/// Keeps the bootstrap documents fresh in a local directory.
pub struct CacheManager {
    dir: PathBuf,
    offline: bool,
    timeout: Duration,
    client: Option<Client>,
    /// Version published on the CDN, fetched at most once.
    published: Option<String>,
}

impl CacheManager {
    /// Open (and create) the cache directory.
    ///
    /// Without `cache_dir` the platform cache directory is used.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            offline,
            timeout,
            client: None,
            published: None,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    fn http(&mut self) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Version of the documents on disk, if any were ever fetched.
    pub fn cached_version(&self) -> Option<String> {
        let recorded = fs::read_to_string(self.dir.join(config::VERSION_FILE)).ok()?;
        Some(recorded.trim().to_string()).filter(|v| !v.is_empty())
    }

    /// Version currently published on the CDN.
    ///
    /// `None` when offline or when the CDN cannot be reached; an unreachable
    /// CDN never invalidates a usable cache.
    pub fn published_version(&mut self) -> Result<Option<String>> {
        if self.offline {
            return Ok(None);
        }
        if self.published.is_some() {
            return Ok(self.published.clone());
        }
        let client = self.http()?;
        let response = match client.get(config::META_URL).send() {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "MTGJSON CDN unreachable");
                return Ok(None);
            }
        };
        let meta: MetaFile = response.error_for_status()?.json()?;
        self.published = meta
            .data
            .or(meta.meta)
            .map(|m| m.version)
            .filter(|v| !v.is_empty());
        Ok(self.published.clone())
    }

    /// Whether the local documents are missing or older than the published ones.
    pub fn needs_refresh(&mut self) -> Result<bool> {
        let Some(cached) = self.cached_version() else {
            return Ok(true);
        };
        Ok(self
            .published_version()?
            .is_some_and(|published| published != cached))
    }

    /// Stream `doc` from the CDN into place through a temporary file, so an
    /// interrupted transfer never leaves a truncated document behind.
    fn fetch(&mut self, doc: Document, dest: &Path) -> Result<()> {
        let url = format!("{}/{}", config::CDN_BASE, doc.file_name());
        info!(%url, "downloading");

        let client = self.http()?;
        let mut response = client.get(&url).send()?.error_for_status()?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        response.copy_to(&mut tmp)?;
        tmp.persist(dest).map_err(|e| MatcherError::from(e.error))?;
        Ok(())
    }

    /// Local path of `doc`, fetching it first when missing or stale.
    pub fn document(&mut self, doc: Document) -> Result<PathBuf> {
        let path = self.dir.join(doc.file_name());

        if self.offline {
            if path.exists() {
                return Ok(path);
            }
            return Err(LoadError::Missing(format!(
                "{} is not cached and offline mode is enabled",
                doc.file_name()
            ))
            .into());
        }

        if path.exists() && !self.needs_refresh()? {
            debug!(path = %path.display(), "using cached document");
            return Ok(path);
        }
        self.fetch(doc, &path)?;
        if let Some(version) = self.published_version()? {
            if let Err(e) = fs::write(self.dir.join(config::VERSION_FILE), &version) {
                warn!(error = %e, "failed to record cached MTGJSON version");
            }
        }
        Ok(path)
    }

    /// Build a [`Database`] from the cached documents, fetching them if needed.
    ///
    /// Documents that fail to parse are deleted so the next call fetches
    /// fresh copies.
    pub fn load_database(&mut self) -> Result<Database> {
        let printings = self.document(Document::AllPrintings)?;
        let atomic = self.document(Document::AtomicCards)?;

        Database::from_paths(&printings, &atomic).map_err(|e| {
            if matches!(e, LoadError::Json(_) | LoadError::Io(_)) {
                warn!(error = %e, "discarding unreadable cached documents");
                for path in [&printings, &atomic] {
                    let _ = fs::remove_file(path);
                }
            }
            e.into()
        })
    }

    /// Delete every cached document, keeping the directory itself.
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}
