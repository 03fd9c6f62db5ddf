pub mod acquire;
pub mod source;
pub mod store;

use serde::{Deserialize, Serialize};

pub use acquire::{AcquireError, AcquireOutcome, AcquireRequest};
pub use source::{FetchedJoke, JokeSource};
pub use store::JokeStore;

pub type JokeId = String;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeRecord {
    pub id: JokeId,

    #[serde(rename = "joke", alias = "text")]
    pub text: String,

    #[serde(default)]
    pub votes: i32,

    #[serde(default)]
    pub locked: bool,
}

impl JokeRecord {
    pub fn new<I: Into<JokeId>, T: Into<String>>(id: I, text: T) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            votes: 0,
            locked: false,
        }
    }
}

impl From<FetchedJoke> for JokeRecord {
    fn from(fetched: FetchedJoke) -> Self {
        JokeRecord::new(fetched.id, fetched.text)
    }
}

/// The order jokes are displayed in: most votes first. Ties keep their
/// relative order from `jokes`.
pub fn display_order(jokes: &[JokeRecord]) -> Vec<&JokeRecord> {
    let mut sorted: Vec<&JokeRecord> = jokes.iter().collect();
    sorted.sort_by(|a, b| b.votes.cmp(&a.votes));
    sorted
}
