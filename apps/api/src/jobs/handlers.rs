//! Axum route handler for job search.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::models::RankedJob;
use crate::jobs::pipeline::find_jobs;
use crate::routes::form::FormFields;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobsResponseItem {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: String,
    pub score: f64,
}

impl From<RankedJob> for JobsResponseItem {
    fn from(job: RankedJob) -> Self {
        let posting = job.posting;
        Self {
            title: posting.title,
            company: posting.company,
            location: posting.location,
            url: posting.url,
            source: posting.source,
            score: job.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub query: String,
    pub results: Vec<JobsResponseItem>,
}

/// POST /api/jobs
///
/// Multipart fields: optional `query`, and `resume_text` or `resume_file`.
/// Always answers with postings: when the job boards fail or return too little,
/// the backup list is ranked instead.
pub async fn handle_jobs(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<JobsResponse>, AppError> {
    let form = FormFields::read(multipart).await?;
    let resume = form.resume()?;

    let search = find_jobs(
        state.featurizer.as_ref(),
        &state.job_sources,
        &resume.text,
        form.get("query"),
        state.config.jobs_top_k,
        state.config.job_fetch_timeout,
    )
    .await;

    tracing::info!(query = %search.query, results = search.results.len(), "job search complete");

    Ok(Json(JobsResponse {
        query: search.query,
        results: search.results.into_iter().map(Into::into).collect(),
    }))
}
