use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A posting as a job source returned it: field name → value. Any field may be missing.
pub type RawPosting = HashMap<String, String>;

/// Fields a gathered posting must carry to count as a valid candidate.
pub const REQUIRED_FIELDS: [&str; 3] = ["title", "url", "description"];

const DEFAULT_TITLE: &str = "Data Scientist Position";
const DEFAULT_COMPANY: &str = "Tech Company";
const DEFAULT_LOCATION: &str = "Remote";
const DEFAULT_URL: &str = "#";
const DEFAULT_DESCRIPTION: &str = "Exciting opportunity in data science and machine learning.";
const DEFAULT_SOURCE: &str = "job_board";

/// A normalized posting. Every field is non-empty. Dedup identity is `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: String,
    pub description: String,
}

impl JobPosting {
    /// Fills missing or blank fields with placeholders so ranking never trips on them.
    pub fn from_raw(raw: &RawPosting) -> Self {
        let field = |key: &str, default: &str| {
            raw.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Self {
            title: field("title", DEFAULT_TITLE),
            company: field("company", DEFAULT_COMPANY),
            location: field("location", DEFAULT_LOCATION),
            url: field("url", DEFAULT_URL),
            source: field("source", DEFAULT_SOURCE),
            description: field("description", DEFAULT_DESCRIPTION),
        }
    }

    /// Text the ranker embeds: title, newline, description.
    pub fn comparison_text(&self) -> String {
        format!("{}\n{}", self.title, self.description)
    }
}

/// A posting with its similarity to the résumé, 0 – 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedJob {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub score: f64,
}

pub fn is_valid(raw: &RawPosting) -> bool {
    REQUIRED_FIELDS.iter().all(|key| raw.contains_key(*key))
}
