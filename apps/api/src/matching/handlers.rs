//! Axum route handler for résumé analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::bias::{self, BiasReport};
use crate::matching::country::Country;
use crate::matching::scorer::{CountryBreakdown, EvidenceItem};
use crate::routes::form::FormFields;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub match_score: f64,
    pub confidence: f64,
    pub top_matches: Vec<String>,
    pub missing_skills: Vec<String>,
    pub evidence: Vec<EvidenceItem>,
    pub bias_report: BiasReport,
    pub country_breakdown: CountryBreakdown,
}

/// POST /api/analyze
///
/// Multipart fields: `job_description`, `country`, and `resume_text` or `resume_file`.
/// The bias report returned here covers résumé + JD together; the scorer's own
/// résumé-only pass is logged but not surfaced.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = FormFields::read(multipart).await?;

    let job_description = form.require("job_description")?.to_string();
    let country = form
        .require("country")?
        .parse::<Country>()
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
    let resume = form.resume()?;

    let analysis = state.scorer.analyze(
        &resume.text,
        &job_description,
        country,
        resume.source.as_str(),
    );
    let bias_report = bias::scan(&format!("{}\n{}", resume.text, job_description));

    tracing::info!(
        %country,
        match_score = analysis.score.match_score,
        resume_risk = analysis.resume_bias.risk_score,
        combined_risk = bias_report.risk_score,
        "analysis complete"
    );

    let score = analysis.score;
    Ok(Json(AnalyzeResponse {
        match_score: score.match_score,
        confidence: score.confidence,
        top_matches: score.top_matches,
        missing_skills: score.missing_skills,
        evidence: score.evidence,
        bias_report,
        country_breakdown: analysis.country_breakdown,
    }))
}
