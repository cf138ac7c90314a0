//! Job search pipeline, in two stages:
//!
//! 1. `gather`: ask every source, swallow failures, keep valid records.
//! 2. `decide`: fewer than `MIN_EXTERNAL_JOBS` valid records → use the backup list.
//!
//! The decided records are then normalized and ranked.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::jobs::backup::backup_jobs;
use crate::jobs::models::{is_valid, JobPosting, RankedJob, RawPosting};
use crate::jobs::ranker::{build_query, rank};
use crate::jobs::sources::JobSource;
use crate::matching::featurizer::Featurizer;

pub const MIN_EXTERNAL_JOBS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct JobSearch {
    pub query: String,
    pub results: Vec<RankedJob>,
}

/// Queries each source in turn and appends its valid records to `gathered` as
/// soon as it answers. A failing source contributes nothing.
pub async fn gather(
    sources: &[Arc<dyn JobSource>],
    query: &str,
    limit: usize,
    gathered: &mut Vec<RawPosting>,
) {
    for source in sources {
        match source.fetch(query, limit).await {
            Ok(postings) => {
                let total = postings.len();
                gathered.extend(postings.into_iter().filter(is_valid));
                info!(source = source.name(), total, "job source returned postings");
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "job source failed; skipping");
            }
        }
    }
}

/// Runs `gather`, but stops waiting after `timeout`. Records from sources that
/// answered in time are kept; the source still pending counts as empty.
pub async fn gather_within(
    sources: &[Arc<dyn JobSource>],
    query: &str,
    limit: usize,
    timeout: Duration,
) -> Vec<RawPosting> {
    let mut gathered = Vec::new();
    let timed_out = tokio::time::timeout(timeout, gather(sources, query, limit, &mut gathered))
        .await
        .is_err();

    if timed_out {
        warn!(
            timeout_secs = timeout.as_secs(),
            kept = gathered.len(),
            "job sources timed out; keeping results gathered so far"
        );
    }
    gathered
}

/// Keeps the gathered records, or swaps in the backup list when there are too few.
pub fn decide(gathered: Vec<RawPosting>, top_k: usize) -> Vec<RawPosting> {
    if gathered.len() < MIN_EXTERNAL_JOBS {
        info!(
            gathered = gathered.len(),
            top_k, "insufficient external job data; using backup postings"
        );
        return backup_jobs(top_k);
    }
    gathered
}

pub fn normalize(records: &[RawPosting]) -> Vec<JobPosting> {
    records.iter().map(JobPosting::from_raw).collect()
}

/// Full search: derive query → gather → decide → normalize → rank.
pub async fn find_jobs(
    featurizer: &dyn Featurizer,
    sources: &[Arc<dyn JobSource>],
    resume_text: &str,
    query: Option<&str>,
    top_k: usize,
    fetch_timeout: Duration,
) -> JobSearch {
    let query = build_query(resume_text, query);

    let gathered = gather_within(sources, &query, top_k, fetch_timeout).await;
    let candidates = normalize(&decide(gathered, top_k));
    let results = rank(featurizer, resume_text, candidates, top_k);

    JobSearch { query, results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::sources::SourceError;
    use crate::matching::featurizer::KeywordFeaturizer;
    use async_trait::async_trait;

    struct StaticSource(Vec<RawPosting>);

    #[async_trait]
    impl JobSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch(&self, _query: &str, _limit: usize) -> Result<Vec<RawPosting>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl JobSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch(&self, _query: &str, _limit: usize) -> Result<Vec<RawPosting>, SourceError> {
            Err(SourceError::Unavailable {
                name: "failing",
                status: 503,
            })
        }
    }

    struct SlowSource;

    #[async_trait]
    impl JobSource for SlowSource {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawPosting>, SourceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(postings(limit, query))
        }
    }

    fn posting(i: usize, topic: &str) -> RawPosting {
        [
            ("title", format!("{topic} role {i}")),
            ("url", format!("https://jobs.example/{i}")),
            ("description", format!("{topic} work")),
            ("source", "static".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    fn postings(n: usize, topic: &str) -> Vec<RawPosting> {
        (0..n).map(|i| posting(i, topic)).collect()
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_gather_skips_failing_sources_and_invalid_records() {
        let mut incomplete = posting(99, "python");
        incomplete.remove("description");
        let mut records = postings(2, "python");
        records.push(incomplete);

        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(FailingSource),
            Arc::new(StaticSource(records)),
            Arc::new(StaticSource(postings(1, "aws"))),
        ];
        let mut gathered = Vec::new();
        gather(&sources, "python", 10, &mut gathered).await;
        assert_eq!(gathered.len(), 3);
    }

    #[test]
    fn test_decide_uses_backup_below_threshold() {
        let decided = decide(postings(2, "python"), 5);
        assert_eq!(decided.len(), 5);
        assert!(decided.iter().all(|p| p["url"].starts_with("https://")));
        assert!(decided.iter().all(|p| p["source"] != "static"));
    }

    #[test]
    fn test_decide_keeps_enough_external_jobs() {
        let decided = decide(postings(3, "python"), 10);
        assert_eq!(decided, postings(3, "python"));
    }

    #[tokio::test]
    async fn test_all_sources_failing_falls_back_to_backup() {
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(FailingSource), Arc::new(FailingSource)];
        let search = find_jobs(
            &KeywordFeaturizer::default(),
            &sources,
            "Data science, machine learning, python",
            None,
            4,
            TIMEOUT,
        )
        .await;
        assert_eq!(search.query, "python machine learning data science");
        assert_eq!(search.results.len(), 4);
        assert!(search.results.iter().all(|j| j.posting.company != "Tech Company"));
    }

    #[tokio::test]
    async fn test_external_jobs_are_ranked_and_deduplicated() {
        let mut records = postings(4, "python");
        records.push(posting(0, "python"));
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(StaticSource(records))];

        let search = find_jobs(
            &KeywordFeaturizer::default(),
            &sources,
            "python developer",
            Some("backend"),
            10,
            TIMEOUT,
        )
        .await;
        assert_eq!(search.query, "backend");
        assert_eq!(search.results.len(), 4);
        assert!(search.results.iter().all(|j| j.posting.source == "static"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_keeps_results_from_sources_that_answered() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(StaticSource(postings(5, "python"))),
            Arc::new(SlowSource),
        ];
        let gathered = gather_within(&sources, "python", 5, Duration::from_secs(10)).await;
        assert_eq!(gathered, postings(5, "python"));

        let search = find_jobs(
            &KeywordFeaturizer::default(),
            &sources,
            "python developer",
            None,
            10,
            Duration::from_secs(10),
        )
        .await;
        assert_eq!(search.results.len(), 5);
        assert!(search.results.iter().all(|j| j.posting.source == "static"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_no_results() {
        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(SlowSource)];
        let gathered = gather_within(&sources, "python", 5, Duration::from_secs(1)).await;
        assert!(gathered.is_empty());
    }
}
