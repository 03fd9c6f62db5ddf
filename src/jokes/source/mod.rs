mod demo;
mod http;
#[cfg(test)]
mod memory;

use std::io;

use async_trait::async_trait;

pub use demo::DemoJokeSource;
pub use http::{HttpJokeSource, DEFAULT_ENDPOINT};
#[cfg(test)]
pub use memory::MemoryJokeSource;

use super::JokeId;

#[derive(Clone, Debug, PartialEq)]
pub struct FetchedJoke {
    pub id: JokeId,
    pub text: String,
}

impl FetchedJoke {
    pub fn new<I: Into<JokeId>, T: Into<String>>(id: I, text: T) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Somewhere random jokes come from. Each call yields a single joke, and
/// may well yield one we've seen before.
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn fetch_random_joke(&self) -> io::Result<FetchedJoke>;
}
