use std::io;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::{FetchedJoke, JokeSource};

const DEMO_JOKES: &[(&str, &str)] = &[
    ("demo-01", "I'm reading a book about anti-gravity. It's impossible to put down."),
    ("demo-02", "Why don't skeletons fight each other? They don't have the guts."),
    ("demo-03", "I used to hate facial hair, but then it grew on me."),
    ("demo-04", "What do you call a fake noodle? An impasta."),
    ("demo-05", "I only know 25 letters of the alphabet. I don't know y."),
    ("demo-06", "Why did the scarecrow win an award? He was outstanding in his field."),
    ("demo-07", "How does a penguin build its house? Igloos it together."),
    ("demo-08", "I would tell you a construction joke, but I'm still working on it."),
    ("demo-09", "Why couldn't the bicycle stand up by itself? It was two tired."),
    ("demo-10", "What do you call cheese that isn't yours? Nacho cheese."),
    ("demo-11", "Did you hear about the restaurant on the moon? Great food, no atmosphere."),
    ("demo-12", "I told my wife she was drawing her eyebrows too high. She looked surprised."),
];

/// Offline joke source that picks randomly (with repeats!) from a small
/// built-in collection
pub struct DemoJokeSource;

impl DemoJokeSource {
    pub fn capacity() -> usize {
        DEMO_JOKES.len()
    }
}

#[async_trait]
impl JokeSource for DemoJokeSource {
    async fn fetch_random_joke(&self) -> io::Result<FetchedJoke> {
        match DEMO_JOKES.choose(&mut rand::thread_rng()) {
            Some((id, text)) => Ok(FetchedJoke::new(*id, *text)),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "No demo jokes")),
        }
    }
}
