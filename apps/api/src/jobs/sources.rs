//! External job boards. Every source is fallible; the pipeline treats a failure
//! as zero results from that source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::jobs::models::RawPosting;

pub const REMOTIVE_URL: &str = "https://remotive.com/api/remote-jobs";
pub const ARBEITNOW_URL: &str = "https://www.arbeitnow.com/api/job-board-api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Sources over-fetch so dedup and ranking have room to work.
const OVERFETCH_FACTOR: usize = 3;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{name} unavailable (status {status})")]
    Unavailable { name: &'static str, status: u16 },
}

/// A job board that can be searched by free-text query.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawPosting>, SourceError>;
}

/// How one board lays out its JSON: the array key plus our field → their field.
struct BoardLayout {
    name: &'static str,
    jobs_key: &'static str,
    fields: [(&'static str, &'static str); 5],
}

static REMOTIVE_LAYOUT: BoardLayout = BoardLayout {
    name: "remotive",
    jobs_key: "jobs",
    fields: [
        ("title", "title"),
        ("company", "company_name"),
        ("location", "candidate_required_location"),
        ("url", "url"),
        ("description", "description"),
    ],
};

static ARBEITNOW_LAYOUT: BoardLayout = BoardLayout {
    name: "arbeitnow",
    jobs_key: "data",
    fields: [
        ("title", "title"),
        ("company", "company_name"),
        ("location", "location"),
        ("url", "url"),
        ("description", "description"),
    ],
};

/// JSON job board searched with `GET <endpoint>?search=<query>`.
#[derive(Clone)]
pub struct HttpJobBoard {
    client: Client,
    endpoint: String,
    layout: &'static BoardLayout,
}

impl HttpJobBoard {
    pub fn remotive(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            layout: &REMOTIVE_LAYOUT,
        }
    }

    pub fn arbeitnow(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            layout: &ARBEITNOW_LAYOUT,
        }
    }
}

#[async_trait]
impl JobSource for HttpJobBoard {
    fn name(&self) -> &'static str {
        self.layout.name
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawPosting>, SourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("search", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Unavailable {
                name: self.layout.name,
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await?;
        let postings = parse_postings(&payload, self.layout, limit * OVERFETCH_FACTOR);
        debug!(source = self.layout.name, count = postings.len(), "fetched postings");
        Ok(postings)
    }
}

/// Builds the shared HTTP client for all boards.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().timeout(REQUEST_TIMEOUT).build()
}

/// Maps up to `max` entries of the board's job array to raw postings.
/// Null or missing fields become empty strings; non-string scalars are stringified.
fn parse_postings(payload: &Value, layout: &BoardLayout, max: usize) -> Vec<RawPosting> {
    let Some(jobs) = payload.get(layout.jobs_key).and_then(Value::as_array) else {
        return vec![];
    };

    jobs.iter()
        .take(max)
        .map(|job| {
            let mut posting: RawPosting = layout
                .fields
                .iter()
                .map(|(ours, theirs)| (ours.to_string(), text_field(job.get(*theirs))))
                .collect();
            posting.insert("source".to_string(), layout.name.to_string());
            posting
        })
        .collect()
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
