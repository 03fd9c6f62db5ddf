use std::collections::HashSet;

use crate::storage::Storage;

use super::{display_order, AcquireError, AcquireOutcome, AcquireRequest, JokeId, JokeRecord};

/// The storage key the joke list snapshot lives under
pub const SNAPSHOT_KEY: &str = "jokes";

pub const DEFAULT_JOKES_TO_GET: usize = 5;

/// Owns the list of jokes being shown, along with the bookkeeping needed
/// to fetch fresh ones. Every change to the list is mirrored to `storage`.
pub struct JokeStore {
    jokes: Vec<JokeRecord>,
    seen: HashSet<JokeId>,
    loading: bool,
    target: usize,
    max_fetches: usize,
    storage: Box<dyn Storage>,
}

impl JokeStore {
    pub fn new(storage: Box<dyn Storage>, target: usize, max_fetches: usize) -> Self {
        Self {
            jokes: Vec::new(),
            seen: HashSet::new(),
            loading: true,
            target,
            max_fetches,
            storage,
        }
    }

    #[cfg(test)]
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self::new(
            storage,
            DEFAULT_JOKES_TO_GET,
            DEFAULT_JOKES_TO_GET * super::acquire::DEFAULT_FETCHES_PER_JOKE,
        )
    }

    #[cfg(test)]
    pub fn jokes(&self) -> &[JokeRecord] {
        &self.jokes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn by_id(&self, id: &str) -> Option<&JokeRecord> {
        self.jokes.iter().find(|j| j.id == id)
    }

    #[cfg(test)]
    pub fn has_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn display_order(&self) -> Vec<&JokeRecord> {
        display_order(&self.jokes)
    }

    // ======= lifecycle ======================================

    /// Restore the jokes from the last session, if any. If there's nothing
    /// to restore, returns the request for a fresh acquisition, which the
    /// caller is expected to run and hand back to [`finish_acquire`].
    pub fn initialize(&mut self) -> Option<AcquireRequest> {
        match self.read_snapshot() {
            Some(jokes) if !jokes.is_empty() => {
                crate::info!("Restored {} jokes", jokes.len());
                self.jokes = jokes;
                self.loading = false;
                None
            }
            _ => Some(self.begin_acquire()),
        }
    }

    fn read_snapshot(&self) -> Option<Vec<JokeRecord>> {
        let raw = self.storage.get(SNAPSHOT_KEY)?;
        match serde_json::from_str::<Vec<JokeRecord>>(&raw) {
            Ok(mut jokes) => {
                let mut ids = HashSet::new();
                jokes.retain(|j| ids.insert(j.id.clone()));
                Some(jokes)
            }
            Err(e) => {
                crate::warn!("Ignoring unreadable joke snapshot: {}", e);
                None
            }
        }
    }

    // ======= acquisition ====================================

    /// Enter the Loading state and capture what the fetch loop needs
    pub fn begin_acquire(&mut self) -> AcquireRequest {
        self.loading = true;

        let locked = self
            .jokes
            .iter()
            .filter(|j| j.locked)
            .map(|j| j.id.clone())
            .collect();

        AcquireRequest::new(self.target, self.max_fetches, self.seen.clone(), locked)
    }

    /// Apply the result of an acquisition. Locked jokes always survive;
    /// everything else is replaced by the newly-accepted jokes, unless the
    /// fetch failed outright, in which case the list is left alone.
    pub fn finish_acquire(&mut self, outcome: AcquireOutcome) -> Option<AcquireError> {
        self.loading = false;

        let AcquireOutcome { accepted, error } = outcome;
        if let Some(AcquireError::IO(_)) = error {
            return error;
        }

        self.seen.extend(accepted.iter().map(|j| j.id.clone()));

        let mut jokes: Vec<JokeRecord> = self.jokes.drain(..).filter(|j| j.locked).collect();
        jokes.extend(accepted);
        self.jokes = jokes;
        self.persist();

        error
    }

    /// Run a full acquisition in place. An [`AcquireError::Exhausted`]
    /// result has still been applied.
    #[cfg(test)]
    pub async fn acquire(&mut self, source: &dyn super::JokeSource) -> Result<(), AcquireError> {
        let request = self.begin_acquire();
        let outcome = request.run(source, |_, _| {}).await;
        match self.finish_acquire(outcome) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Forget every joke we've seen, then start a fresh acquisition
    pub fn regenerate(&mut self) -> AcquireRequest {
        self.seen.clear();
        self.begin_acquire()
    }

    // ======= mutations ======================================

    pub fn vote(&mut self, id: &str, delta: i32) {
        if let Some(joke) = self.jokes.iter_mut().find(|j| j.id == id) {
            joke.votes = joke.votes.saturating_add(delta);
            self.persist();
        }
    }

    pub fn toggle_lock(&mut self, id: &str) {
        if let Some(joke) = self.jokes.iter_mut().find(|j| j.id == id) {
            joke.locked = !joke.locked;
            self.persist();
        }
    }

    /// Zero out every vote. NOTE: the snapshot is *removed* rather than
    /// rewritten, so the next session starts over with fresh jokes.
    pub fn reset_votes(&mut self) {
        for joke in self.jokes.iter_mut() {
            joke.votes = 0;
        }
        self.storage.remove(SNAPSHOT_KEY);
    }

    pub fn persist(&mut self) {
        match serde_json::to_string(&self.jokes) {
            Ok(json) => self.storage.set(SNAPSHOT_KEY, json),
            Err(e) => crate::error!("Unable to serialize jokes: {}", e),
        }
    }
}
