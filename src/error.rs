use std::fmt;

use serde::Serialize;

/// A single surviving printing reported by an [`AliasingError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: String,
    pub set_code: String,
    pub set_name: String,
    pub name: String,
    pub number: String,
}

/// More than one printing survived every filter and there is nothing left
/// in the query to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasingError {
    pub name: String,
    pub candidates: Vec<Candidate>,
}

impl AliasingError {
    /// Identifiers of every conflicting printing, in database order.
    pub fn candidate_ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.id.as_str()).collect()
    }
}

impl fmt::Display for AliasingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "aliasing detected for '{}' ({} candidates: {})",
            self.name,
            self.candidates.len(),
            self.candidates
                .iter()
                .map(|c| format!("{}#{}", c.set_code, c.number))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for AliasingError {}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Missing document: {0}")]
    Missing(String),

    #[error("Malformed document: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("card database is not initialized")]
    DatabaseNotInitialized,

    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error("no printing of '{name}' matches edition '{edition}'")]
    EditionMismatch { name: String, edition: String },

    #[error(transparent)]
    Aliasing(#[from] AliasingError),

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MatcherError {
    /// True for the only error kind meant for programmatic follow-up.
    pub fn is_aliasing(&self) -> bool {
        matches!(self, MatcherError::Aliasing(_))
    }

    /// True when the name or the edition could not be resolved at all.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MatcherError::CardNotFound(_) | MatcherError::EditionMismatch { .. }
        )
    }

    /// The aliasing payload, if any.
    pub fn aliasing(&self) -> Option<&AliasingError> {
        match self {
            MatcherError::Aliasing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MatcherError {
    fn from(err: std::io::Error) -> Self {
        MatcherError::Load(LoadError::Io(err))
    }
}

impl From<serde_json::Error> for MatcherError {
    fn from(err: serde_json::Error) -> Self {
        MatcherError::Load(LoadError::Json(err))
    }
}

impl From<reqwest::Error> for MatcherError {
    fn from(err: reqwest::Error) -> Self {
        MatcherError::Load(LoadError::Http(err))
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;
