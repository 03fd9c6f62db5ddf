use std::path::PathBuf;

use clap::{self, crate_version, Arg};
use indoc::indoc;
use url::Url;

use crate::jokes::{
    acquire::DEFAULT_FETCHES_PER_JOKE, source::DEFAULT_ENDPOINT, store::DEFAULT_JOKES_TO_GET,
};

pub struct Args {
    pub count: usize,
    pub endpoint: Url,
    pub max_fetches: usize,
    pub data_dir: Option<PathBuf>,
    pub persist: bool,
    pub demo: bool,
}

pub fn args() -> Args {
    let default_count = DEFAULT_JOKES_TO_GET.to_string();
    let matches = clap::App::new("jokester")
        .version(crate_version!())
        .about("vote on dad jokes from your terminal")
        .long_about(indoc! {"
            vote on dad jokes from your terminal

            jokester fetches a handful of jokes you haven't seen yet and
            lets you vote them up or down, locking the ones you'd like to
            keep around when you ask for new ones
        "})
        .arg(
            Arg::with_name("count")
                .long("count")
                .short("c")
                .takes_value(true)
                .default_value(&default_count)
                .validator(validate_count)
                .help("How many jokes to show at once"),
        )
        .arg(
            Arg::with_name("endpoint")
                .long("endpoint")
                .takes_value(true)
                .default_value(DEFAULT_ENDPOINT)
                .validator(validate_endpoint)
                .help("The joke service to fetch from"),
        )
        .arg(
            Arg::with_name("max-fetches")
                .long("max-fetches")
                .takes_value(true)
                .validator(validate_count)
                .help("Give up after this many fetches in one go [default: 10 per joke]"),
        )
        .arg(
            Arg::with_name("data-dir")
                .long("data-dir")
                .takes_value(true)
                .conflicts_with("no-persist")
                .help("Where to save jokes and votes between runs"),
        )
        .arg(
            Arg::with_name("no-persist")
                .long("no-persist")
                .help("Don't load or save anything"),
        )
        .arg(
            Arg::with_name("demo")
                .long("demo")
                .hidden(true)
                .help("Serves jokes from a built-in list instead of the network"),
        )
        .get_matches();

    let count = parse_count(matches.value_of("count").unwrap_or_default())
        .map_err(clap::Error::value_validation_auto)
        .unwrap_or_else(|e| e.exit());
    let max_fetches = match matches.value_of("max-fetches") {
        Some(value) => parse_count(value)
            .map_err(clap::Error::value_validation_auto)
            .unwrap_or_else(|e| e.exit()),
        None => default_max_fetches(count),
    };
    let endpoint = parse_endpoint(matches.value_of("endpoint").unwrap_or(DEFAULT_ENDPOINT))
        .map_err(clap::Error::value_validation_auto)
        .unwrap_or_else(|e| e.exit());

    Args {
        count,
        endpoint,
        max_fetches,
        data_dir: matches.value_of("data-dir").map(PathBuf::from),
        persist: !matches.is_present("no-persist"),
        demo: matches.is_present("demo"),
    }
}

fn default_max_fetches(count: usize) -> usize {
    count.saturating_mul(DEFAULT_FETCHES_PER_JOKE)
}

fn parse_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(format!("Expected a positive integer; got `{}`", value)),
    }
}

fn parse_endpoint(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("Invalid endpoint `{}`: {}", value, e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!("Unsupported endpoint scheme `{}`", scheme)),
    }
}

fn validate_count(value: String) -> Result<(), String> {
    parse_count(&value).map(|_| ())
}

fn validate_endpoint(value: String) -> Result<(), String> {
    parse_endpoint(&value).map(|_| ())
}
