#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use movie_mashup_api::{
    cache::QueryParams,
    config::Config,
    error::{AppError, AppResult},
    services::transport::Transport,
};
use serde_json::{json, Value};

pub const TASTEDIVE_URL: &str = "http://tastedive.test/api/similar";
pub const OMDB_URL: &str = "http://omdb.test/";

pub fn test_config() -> Config {
    Config {
        tastedive_api_url: TASTEDIVE_URL.to_string(),
        omdb_api_url: OMDB_URL.to_string(),
        ..Config::default()
    }
}

/// Canned TasteDive and OMDb answers that records every request it serves
#[derive(Default)]
pub struct FixtureTransport {
    related: HashMap<String, Vec<String>>,
    movies: HashMap<String, Value>,
    failing: Vec<String>,
    calls: Mutex<Vec<(String, QueryParams)>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_related(mut self, seed: &str, titles: &[&str]) -> Self {
        self.related
            .insert(seed.to_string(), titles.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_rating(mut self, title: &str, value: &str) -> Self {
        self.movies.insert(
            title.to_string(),
            json!({
                "Title": title,
                "Ratings": [
                    {"Source": "Internet Movie Database", "Value": "6.8/10"},
                    {"Source": "Rotten Tomatoes", "Value": value}
                ],
                "Response": "True"
            }),
        );
        self
    }

    pub fn with_unrated(mut self, title: &str) -> Self {
        self.movies.insert(
            title.to_string(),
            json!({
                "Title": title,
                "Ratings": [{"Source": "Internet Movie Database", "Value": "6.1/10"}],
                "Response": "True"
            }),
        );
        self
    }

    /// Requests for `title` on either API fail with a 503
    pub fn with_failure(mut self, title: &str) -> Self {
        self.failing.push(title.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| e == endpoint)
            .count()
    }

    /// Requests to `endpoint` whose `q` or `t` parameter is `title`
    pub fn calls_for(&self, endpoint: &str, title: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, params)| {
                e == endpoint
                    && ["q", "t"]
                        .iter()
                        .any(|name| params.get(name).map(|v| v.to_string()).as_deref() == Some(title))
            })
            .count()
    }
}

#[async_trait::async_trait]
impl Transport for FixtureTransport {
    async fn get(&self, endpoint: &str, params: &QueryParams) -> AppResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), params.clone()));

        let lookup = |name: &str| params.get(name).map(|v| v.to_string()).unwrap_or_default();

        match endpoint {
            TASTEDIVE_URL => {
                let seed = lookup("q");
                if self.failing.contains(&seed) {
                    return Err(AppError::ExternalApi("status 503".to_string()));
                }
                match self.related.get(&seed) {
                    Some(titles) => {
                        let results: Vec<Value> = titles
                            .iter()
                            .map(|t| json!({"Name": t, "Type": "movie"}))
                            .collect();
                        Ok(json!({"Similar": {"Info": [{"Name": seed}], "Results": results}}))
                    }
                    None => Ok(json!({"error": "Unknown seed"})),
                }
            }
            OMDB_URL => {
                let title = lookup("t");
                if self.failing.contains(&title) {
                    return Err(AppError::ExternalApi("status 503".to_string()));
                }
                Ok(self
                    .movies
                    .get(&title)
                    .cloned()
                    .unwrap_or_else(|| json!({"Response": "False", "Error": "Movie not found!"})))
            }
            other => Err(AppError::ExternalApi(format!("unexpected endpoint {}", other))),
        }
    }
}

/// Bridesmaids and Sherlock Holmes with five non-overlapping related titles each
pub fn bridesmaids_and_sherlock() -> FixtureTransport {
    FixtureTransport::new()
        .with_related(
            "Bridesmaids",
            &["Baby Mama", "Bad Teacher", "Date Night", "Pitch Perfect", "The Heat"],
        )
        .with_related(
            "Sherlock Holmes",
            &[
                "Sherlock Holmes: A Game of Shadows",
                "The Sorcerer's Apprentice",
                "National Treasure",
                "Iron Man",
                "The Prestige",
            ],
        )
        .with_rating("Iron Man", "94%")
        .with_rating("Pitch Perfect", "81%")
        .with_rating("The Prestige", "76%")
        .with_rating("Baby Mama", "64%")
        .with_rating("Sherlock Holmes: A Game of Shadows", "59%")
        .with_rating("National Treasure", "46%")
        .with_rating("The Sorcerer's Apprentice", "44%")
        .with_rating("Bad Teacher", "44%")
        .with_unrated("The Heat")
}

pub const BRIDESMAIDS_AND_SHERLOCK_RANKED: [&str; 10] = [
    "Iron Man",
    "Pitch Perfect",
    "The Prestige",
    "Baby Mama",
    "Sherlock Holmes: A Game of Shadows",
    "National Treasure",
    "The Sorcerer's Apprentice",
    "Bad Teacher",
    "The Heat",
    "Date Night",
];
