use std::{collections::HashSet, fmt, io};

use super::{JokeId, JokeRecord, JokeSource};

/// How many source calls we're willing to make per joke wanted, if the
/// caller doesn't say otherwise
pub const DEFAULT_FETCHES_PER_JOKE: usize = 10;

#[derive(Debug)]
pub enum AcquireError {
    IO(io::Error),

    /// The source stopped producing jokes we could accept before we had
    /// enough of them
    Exhausted { accepted: usize, attempts: usize },
}

impl From<io::Error> for AcquireError {
    fn from(error: io::Error) -> Self {
        AcquireError::IO(error)
    }
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireError::IO(e) => write!(f, "Unable to fetch jokes: {}", e),
            AcquireError::Exhausted { accepted, attempts } => write!(
                f,
                "Only found {} new joke(s) after {} attempts",
                accepted, attempts
            ),
        }
    }
}

impl std::error::Error for AcquireError {}

/// The result of running an [`AcquireRequest`]: the newly-accepted jokes
/// (in fetch order) and what went wrong, if anything. On
/// [`AcquireError::Exhausted`] the `accepted` jokes are still valid.
#[derive(Debug)]
pub struct AcquireOutcome {
    pub accepted: Vec<JokeRecord>,
    pub error: Option<AcquireError>,
}

/// Everything the fetch loop needs to know about the store, captured when
/// the acquisition begins so the loop itself can run off the main thread
#[derive(Clone, Debug)]
pub struct AcquireRequest {
    pub target: usize,
    pub max_fetches: usize,
    seen: HashSet<JokeId>,
    locked: HashSet<JokeId>,
}

impl AcquireRequest {
    pub fn new(
        target: usize,
        max_fetches: usize,
        seen: HashSet<JokeId>,
        locked: HashSet<JokeId>,
    ) -> Self {
        Self {
            target,
            max_fetches,
            seen,
            locked,
        }
    }

    fn accepts(&self, id: &str) -> bool {
        !self.seen.contains(id) && !self.locked.contains(id)
    }

    /// Fetch from `source` until `target` jokes have been accepted, or
    /// `max_fetches` calls have been made. `on_progress` is notified with
    /// (accepted, target) after each accepted joke.
    pub async fn run<F>(mut self, source: &dyn JokeSource, mut on_progress: F) -> AcquireOutcome
    where
        F: FnMut(usize, usize),
    {
        let mut accepted: Vec<JokeRecord> = Vec::with_capacity(self.target);
        let mut attempts = 0;

        while accepted.len() < self.target {
            if attempts >= self.max_fetches {
                let error = AcquireError::Exhausted {
                    accepted: accepted.len(),
                    attempts,
                };
                return AcquireOutcome {
                    accepted,
                    error: Some(error),
                };
            }

            attempts += 1;
            let fetched = match source.fetch_random_joke().await {
                Ok(fetched) => fetched,
                Err(e) => {
                    return AcquireOutcome {
                        accepted,
                        error: Some(e.into()),
                    }
                }
            };

            if self.accepts(&fetched.id) {
                self.seen.insert(fetched.id.clone());
                accepted.push(fetched.into());
                on_progress(accepted.len(), self.target);
            }
        }

        AcquireOutcome {
            accepted,
            error: None,
        }
    }
}
