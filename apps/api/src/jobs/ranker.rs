//! Job ranker: scores candidate postings against a résumé and keeps the top K
//! distinct URLs.

use std::collections::HashSet;

use crate::jobs::models::{JobPosting, RankedJob};
use crate::matching::featurizer::Featurizer;
use crate::matching::similarity::cosine;
use crate::matching::skills::extract_skills;

pub const DEFAULT_QUERY: &str = "machine learning";
const QUERY_SKILLS: usize = 5;
const MAX_COMPARISON_CHARS: usize = 4000;

/// Caller query if non-blank, else the first five résumé skills, else "machine learning".
pub fn build_query(resume_text: &str, query: Option<&str>) -> String {
    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        return q.to_string();
    }

    let skills = extract_skills(resume_text);
    if skills.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        skills
            .into_iter()
            .take(QUERY_SKILLS)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Ranks `candidates` by similarity to the résumé (stable on ties), then walks
/// the sorted list keeping the first posting per non-empty URL until `top_k`.
pub fn rank(
    featurizer: &dyn Featurizer,
    resume_text: &str,
    candidates: Vec<JobPosting>,
    top_k: usize,
) -> Vec<RankedJob> {
    if candidates.is_empty() || top_k == 0 {
        return vec![];
    }

    let resume_emb = featurizer.embed(resume_text);

    let texts: Vec<String> = candidates
        .iter()
        .map(|job| truncate_chars(&job.comparison_text(), MAX_COMPARISON_CHARS))
        .collect();
    let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let job_embs = featurizer.embed_many(&text_refs);

    let mut scored: Vec<RankedJob> = candidates
        .into_iter()
        .zip(&job_embs)
        .map(|(posting, emb)| RankedJob {
            posting,
            score: cosine(&resume_emb, emb).clamp(0.0, 1.0),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen_urls = HashSet::new();
    let mut ranked = Vec::with_capacity(top_k.min(scored.len()));
    for job in scored {
        if job.posting.url.is_empty() || !seen_urls.insert(job.posting.url.clone()) {
            continue;
        }
        ranked.push(job);
        if ranked.len() >= top_k {
            break;
        }
    }

    ranked
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
