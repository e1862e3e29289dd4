//! Async wrapper around [`Matcher`] for crawler tasks running on Tokio.
//!
//! Matching is CPU-bound and never blocks on I/O, but loading the reference
//! data does. Both run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use mtgmatcher::{AsyncMatcher, Matcher, QueryCard};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let matcher = AsyncMatcher::build(Matcher::builder()).await.unwrap();
//!
//!     let card = matcher
//!         .match_card(QueryCard::new("Negate", "Promo Pack", "", false))
//!         .await
//!         .unwrap();
//!     println!("{}", card.id);
//! }
//! ```

use std::sync::Arc;

use crate::error::{MatcherError, Result};
use crate::models::ResolvedCard;
use crate::query::QueryCard;
use crate::{Matcher, MatcherBuilder};

fn join_error(e: tokio::task::JoinError) -> MatcherError {
    MatcherError::InvalidArgument(format!("Task join error: {e}"))
}

/// Async handle on a shared [`Matcher`].
///
/// The matcher is immutable once built, so handles are cheap to clone and
/// need no lock.
#[derive(Clone)]
pub struct AsyncMatcher {
    inner: Arc<Matcher>,
}

impl AsyncMatcher {
    /// Build the matcher on the blocking thread pool.
    pub async fn build(builder: MatcherBuilder) -> Result<Self> {
        let matcher = tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(join_error)??;
        Ok(Self::from_matcher(Arc::new(matcher)))
    }

    /// Wrap an already built matcher.
    pub fn from_matcher(matcher: Arc<Matcher>) -> Self {
        Self { inner: matcher }
    }

    /// The shared blocking matcher.
    pub fn matcher(&self) -> &Arc<Matcher> {
        &self.inner
    }

    /// Run a sync matcher operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Matcher) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let matcher = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&matcher))
            .await
            .map_err(join_error)?
    }

    pub async fn match_card(&self, query: QueryCard) -> Result<ResolvedCard> {
        self.run(move |m| m.match_card(&query)).await
    }

    pub async fn probe(&self, query: QueryCard) -> Result<Vec<ResolvedCard>> {
        self.run(move |m| m.probe(&query)).await
    }

    /// Match every query concurrently; results come back in input order.
    pub async fn match_many(&self, queries: Vec<QueryCard>) -> Vec<Result<ResolvedCard>> {
        let handles: Vec<_> = queries
            .into_iter()
            .map(|query| {
                let matcher = self.inner.clone();
                tokio::task::spawn_blocking(move || matcher.match_card(&query))
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.unwrap_or_else(|e| Err(join_error(e))));
        }
        results
    }
}
