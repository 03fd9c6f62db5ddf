use std::{collections::VecDeque, io, sync::Mutex};

use async_trait::async_trait;

use super::{FetchedJoke, JokeSource};

/// A MemoryJokeSource yields a fixed sequence of fetch results from memory,
/// then fails once it runs dry
pub struct MemoryJokeSource {
    results: Mutex<VecDeque<io::Result<FetchedJoke>>>,
}

impl MemoryJokeSource {
    pub fn from_results(results: Vec<io::Result<FetchedJoke>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }

    /// Convenience for a sequence of successful fetches, given as ids; each
    /// joke's text is derived from its id
    pub fn from_ids(ids: &[&str]) -> Self {
        Self::from_results(
            ids.iter()
                .map(|id| Ok(FetchedJoke::new(*id, format!("joke {}", id))))
                .collect(),
        )
    }

    pub fn remaining(&self) -> usize {
        match self.results.lock() {
            Ok(results) => results.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

#[async_trait]
impl JokeSource for MemoryJokeSource {
    async fn fetch_random_joke(&self) -> io::Result<FetchedJoke> {
        let next = match self.results.lock() {
            Ok(mut results) => results.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };

        match next {
            Some(result) => result,
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "No more jokes in memory",
            )),
        }
    }
}
