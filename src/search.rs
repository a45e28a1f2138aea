//! Client-side search: where characters come from, and how typed queries are coalesced.
//!
//! Players search as they type. [`SearchDebouncer`] bounds the number of queries this produces
//! and makes sure a slow answer to an old query never overwrites the answer to a newer one:
//!
//! - every submission takes a ticket from a monotonically increasing counter;
//! - it then waits for the debounce delay, and only sends the query if no newer submission
//!   arrived in the meantime;
//! - the answer is only committed if the ticket is still the latest when it arrives.
//!
//! Rapid keystrokes therefore produce at most one query per quiet period.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tracing::trace;

use crate::{dataset::Dataset, entity::Entity};

/// Anything able to answer character queries.
///
/// Implementations never fail: an unreachable source answers with an empty list.
pub trait CharacterSource {
    /// Characters whose name contains `query`, see [`Dataset::search`].
    fn search(&self, query: &str) -> impl Future<Output = Vec<Entity>> + Send;

    /// Every valid character.
    fn all_characters(&self) -> impl Future<Output = Vec<Entity>> + Send;
}

impl CharacterSource for Dataset {
    fn search(&self, query: &str) -> impl Future<Output = Vec<Entity>> + Send {
        std::future::ready(Dataset::search(self, query, None))
    }

    fn all_characters(&self) -> impl Future<Output = Vec<Entity>> + Send {
        std::future::ready(self.all().to_vec())
    }
}

impl<S: CharacterSource + Send + Sync> CharacterSource for Arc<S> {
    fn search(&self, query: &str) -> impl Future<Output = Vec<Entity>> + Send {
        self.as_ref().search(query)
    }

    fn all_characters(&self) -> impl Future<Output = Vec<Entity>> + Send {
        self.as_ref().all_characters()
    }
}

/// Debounced, latest-only search over a [`CharacterSource`].
pub struct SearchDebouncer<S> {
    source: S,
    delay: Duration,
    latest: AtomicU64,
}

impl<S: CharacterSource + Send + Sync> SearchDebouncer<S> {
    /// Waits `delay` of quiet input before querying `source`.
    pub fn new(source: S, delay: Duration) -> Self {
        Self {
            source,
            delay,
            latest: AtomicU64::new(0),
        }
    }

    /// The wrapped source, for queries that need no debouncing.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Submits the current input.
    ///
    /// The ticket is taken right away, so a later call supersedes this one even if this future
    /// has not been polled yet. Resolves to `None` when superseded, `Some(results)` otherwise.
    /// Blank input resolves to an empty list without querying the source.
    pub fn submit(&self, input: &str) -> impl Future<Output = Option<Vec<Entity>>> + Send + '_ {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = input.trim().to_owned();

        async move {
            if query.is_empty() {
                return self.is_latest(ticket).then(Vec::new);
            }

            tokio::time::sleep(self.delay).await;
            if !self.is_latest(ticket) {
                trace!(ticket, "superseded before sending");
                return None;
            }

            let results = self.source.search(&query).await;
            if !self.is_latest(ticket) {
                trace!(ticket, "stale response dropped");
                return None;
            }
            Some(results)
        }
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
