use std::{io, time::Duration};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::Deserialize;
use url::Url;

use super::{FetchedJoke, JokeSource};

pub const DEFAULT_ENDPOINT: &str = "https://icanhazdadjoke.com";

/// How long a single fetch may take, start to finish
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
struct JokeResponse {
    id: String,
    joke: String,
}

pub struct HttpJokeSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpJokeSource {
    pub fn new(endpoint: Url) -> io::Result<Self> {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(endpoint: Url, timeout: Duration) -> io::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("jokester/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .map_err(to_io_error)?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl JokeSource for HttpJokeSource {
    async fn fetch_random_joke(&self) -> io::Result<FetchedJoke> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(to_io_error)?
            .error_for_status()
            .map_err(to_io_error)?;

        let body = response.text().await.map_err(to_io_error)?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> io::Result<FetchedJoke> {
    let JokeResponse { id, joke } = serde_json::from_str(body)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(FetchedJoke::new(id, joke))
}

fn to_io_error(e: reqwest::Error) -> io::Error {
    let kind = if e.is_timeout() {
        io::ErrorKind::TimedOut
    } else if e.is_decode() {
        io::ErrorKind::InvalidData
    } else {
        io::ErrorKind::Other
    };
    io::Error::new(kind, e)
}
