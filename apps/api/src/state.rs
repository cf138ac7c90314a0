use std::sync::Arc;

use crate::config::Config;
use crate::jobs::sources::JobSource;
use crate::matching::featurizer::Featurizer;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable featurizer. Default: KeywordFeaturizer. The scorer shares the same instance.
    pub featurizer: Arc<dyn Featurizer>,
    pub scorer: MatchScorer,
    /// Queried in order by the job search pipeline. Empty → backup postings only.
    pub job_sources: Arc<[Arc<dyn JobSource>]>,
}

impl AppState {
    pub fn new(
        config: Config,
        featurizer: Arc<dyn Featurizer>,
        job_sources: Vec<Arc<dyn JobSource>>,
    ) -> Self {
        Self {
            config,
            scorer: MatchScorer::new(featurizer.clone()),
            featurizer,
            job_sources: job_sources.into(),
        }
    }
}
