//! Match scorer: blends embedding similarity, skill overlap and an experience
//! heuristic into a 0–100 score, weighted per country.
//!
//! Algorithm:
//! 1. similarity = cosine(embed(resume), embed(jd))
//! 2. skill_match = |resume_skills ∩ jd_skills| / |jd_skills| (0 when the JD has none)
//! 3. exp_match = min(1, occurrences of "experience" in the résumé / 10)
//! 4. match_score = 100 × (similarity·w.similarity + skill_match·w.skills + exp_match·w.experience),
//!    clamped to [0, 100]
//! 5. evidence = positional sentence pairs (first 5 of each) with similarity > 0.30

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::matching::bias::{self, BiasReport};
use crate::matching::country::{weights_for, Country, CountryWeights};
use crate::matching::featurizer::Featurizer;
use crate::matching::similarity::cosine;
use crate::matching::skills::extract_skills;

const EVIDENCE_SENTENCES: usize = 5;
const EVIDENCE_THRESHOLD: f64 = 0.30;
const MAX_SKILL_LIST: usize = 5;

/// Sentence break: terminal punctuation followed by whitespace, or a newline run.
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]\s+|\n+").expect("sentence break pattern is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceItem {
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    /// 0 – 100
    pub match_score: f64,
    /// Raw résumé/JD cosine similarity, 0 – 1.
    pub confidence: f64,
    pub evidence: Vec<EvidenceItem>,
    pub top_matches: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skill_match: f64,
    pub experience_match: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryBreakdown {
    pub country: Country,
    pub weights: CountryWeights,
    pub similarity: f64,
    pub resume_source: String,
}

/// Scorer output plus the scorer's own résumé-only bias pass.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub score: ScoreResult,
    pub resume_bias: BiasReport,
    pub country_breakdown: CountryBreakdown,
}

// ────────────────────────────────────────────────────────────────────────────
// MatchScorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MatchScorer {
    featurizer: Arc<dyn Featurizer>,
}

impl MatchScorer {
    pub fn new(featurizer: Arc<dyn Featurizer>) -> Self {
        Self { featurizer }
    }

    /// Scores with the weights for `country_code`; unknown codes fall back to US.
    pub fn score(&self, resume_text: &str, job_description: &str, country_code: &str) -> ScoreResult {
        let embeddings = self.featurizer.embed_many(&[resume_text, job_description]);
        let similarity = cosine(&embeddings[0], &embeddings[1]);

        let resume_skills = extract_skills(resume_text);
        let job_skills = extract_skills(job_description);
        let resume_set: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();

        let (matched, missing): (Vec<&String>, Vec<&String>) = job_skills
            .iter()
            .partition(|skill| resume_set.contains(skill.as_str()));

        let skill_match = if job_skills.is_empty() {
            0.0
        } else {
            matched.len() as f64 / job_skills.len() as f64
        };

        let experience_match = experience_match(resume_text);
        let weights = weights_for(country_code);

        let match_score = blend(similarity, skill_match, experience_match, &weights);
        let evidence = self.evidence(resume_text, job_description);

        ScoreResult {
            match_score,
            confidence: similarity.clamp(0.0, 1.0),
            evidence,
            top_matches: matched.into_iter().take(MAX_SKILL_LIST).cloned().collect(),
            missing_skills: missing.into_iter().take(MAX_SKILL_LIST).cloned().collect(),
            skill_match,
            experience_match,
        }
    }

    /// Full analysis for one résumé. The bias pass here covers the résumé only;
    /// the analyze handler surfaces a separate pass over résumé + JD.
    pub fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
        country: Country,
        resume_source: &str,
    ) -> Analysis {
        let score = self.score(resume_text, job_description, country.code());
        let resume_bias = bias::scan(resume_text);

        tracing::debug!(
            featurizer = self.featurizer.name(),
            match_score = score.match_score,
            similarity = score.confidence,
            resume_risk = resume_bias.risk_score,
            %country,
            "scored resume"
        );

        let country_breakdown = CountryBreakdown {
            country,
            weights: country.weights(),
            similarity: score.confidence,
            resume_source: resume_source.to_string(),
        };

        Analysis {
            score,
            resume_bias,
            country_breakdown,
        }
    }

    /// Compares sentence i of the résumé with sentence i of the JD only.
    fn evidence(&self, resume_text: &str, job_description: &str) -> Vec<EvidenceItem> {
        let resume_sentences: Vec<&str> = split_sentences(resume_text)
            .into_iter()
            .take(EVIDENCE_SENTENCES)
            .collect();
        let job_sentences: Vec<&str> = split_sentences(job_description)
            .into_iter()
            .take(EVIDENCE_SENTENCES)
            .collect();

        let pairs = resume_sentences.len().min(job_sentences.len());
        if pairs == 0 {
            return vec![];
        }

        let resume_embs = self.featurizer.embed_many(&resume_sentences[..pairs]);
        let job_embs = self.featurizer.embed_many(&job_sentences[..pairs]);

        resume_sentences
            .iter()
            .zip(resume_embs.iter().zip(&job_embs))
            .filter_map(|(sentence, (r, j))| {
                let score = cosine(r, j);
                (score > EVIDENCE_THRESHOLD).then(|| EvidenceItem {
                    text: sentence.to_string(),
                    score: score.min(1.0),
                })
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

fn experience_match(resume_text: &str) -> f64 {
    let mentions = resume_text.to_lowercase().matches("experience").count();
    (mentions as f64 / 10.0).min(1.0)
}

/// `education` is not part of the blend.
fn blend(similarity: f64, skill_match: f64, experience_match: f64, w: &CountryWeights) -> f64 {
    let raw = similarity * w.similarity + skill_match * w.skills + experience_match * w.experience;
    (raw * 100.0).clamp(0.0, 100.0)
}

/// Splits on `.`/`!`/`?` followed by whitespace, or on newline runs.
/// Terminal punctuation stays with its sentence; empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        let end = if text[m.start()..].starts_with(['.', '!', '?']) {
            m.start() + 1
        } else {
            m.start()
        };
        sentences.push(&text[start..end]);
        start = m.end();
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::featurizer::KeywordFeaturizer;

    fn scorer() -> MatchScorer {
        MatchScorer::new(Arc::new(KeywordFeaturizer::default()))
    }

    const RESUME: &str = "python, aws, docker, 5 years experience";
    const JD: &str = "We need python, aws, kubernetes";

    #[test]
    fn test_skill_overlap_end_to_end() {
        let result = scorer().score(RESUME, JD, "US");
        assert!((result.skill_match - 2.0 / 3.0).abs() < 1e-9);
        assert!(result.top_matches.contains(&"python".to_string()));
        assert!(result.top_matches.contains(&"aws".to_string()));
        assert_eq!(result.missing_skills, vec!["kubernetes".to_string()]);
    }

    #[test]
    fn test_score_matches_weighted_formula() {
        let result = scorer().score(RESUME, JD, "FR");
        let w = Country::FR.weights();
        let expected = 100.0
            * (result.confidence * w.similarity
                + result.skill_match * w.skills
                + result.experience_match * w.experience);
        assert!((result.match_score - expected).abs() < 1e-9);
        assert!((result.experience_match - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_country_changes_score() {
        let us = scorer().score(RESUME, JD, "US");
        let de = scorer().score(RESUME, JD, "DE");
        assert!((us.match_score - de.match_score).abs() > 1e-6);
        assert_eq!(us.confidence, de.confidence);
    }

    #[test]
    fn test_unknown_country_code_scores_with_us_weights() {
        let us = scorer().score(RESUME, JD, "US");
        let unknown = scorer().score(RESUME, JD, "BR");
        assert_eq!(unknown.match_score, us.match_score);
        let fr = scorer().score(RESUME, JD, "FR");
        assert_eq!(scorer().score(RESUME, JD, " fr ").match_score, fr.match_score);
    }

    #[test]
    fn test_empty_inputs_degrade_to_zero() {
        let result = scorer().score("", "", "US");
        assert_eq!(result.match_score, 0.0);
        assert_eq!(result.confidence, 0.0);
        assert!(result.evidence.is_empty());
        assert!(result.top_matches.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_no_job_skills_means_zero_skill_match() {
        let result = scorer().score(RESUME, "Friendly team, great snacks.", "US");
        assert_eq!(result.skill_match, 0.0);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_experience_match_caps_at_one() {
        let resume = "experience ".repeat(25);
        let result = scorer().score(&resume, JD, "US");
        assert_eq!(result.experience_match, 1.0);
        assert!(result.match_score <= 100.0);
    }

    #[test]
    fn test_evidence_pairs_sentences_positionally() {
        let resume = "I build python services on aws.\nI enjoy hiking.";
        let jd = "Python and AWS required.\nKubernetes is a plus.";
        let result = scorer().score(resume, jd, "US");
        assert_eq!(result.evidence.len(), 1);
        assert_eq!(result.evidence[0].text, "I build python services on aws.");
        assert!(result.evidence[0].score > EVIDENCE_THRESHOLD);
        assert!(result.evidence[0].score <= 1.0);
    }

    #[test]
    fn test_evidence_uses_at_most_five_pairs() {
        let resume = "python. ".repeat(8);
        let jd = "python! ".repeat(3);
        let result = scorer().score(&resume, &jd, "US");
        assert_eq!(result.evidence.len(), 3);
        let long_jd = "python? ".repeat(9);
        let result = scorer().score(&resume, &long_jd, "US");
        assert_eq!(result.evidence.len(), EVIDENCE_SENTENCES);
    }

    #[test]
    fn test_top_lists_capped_at_five() {
        let jd = "python java sql aws azure gcp docker kubernetes";
        let result = scorer().score(jd, jd, "US");
        assert_eq!(result.top_matches.len(), MAX_SKILL_LIST);
        let result = scorer().score("", jd, "US");
        assert_eq!(result.missing_skills.len(), MAX_SKILL_LIST);
    }

    #[test]
    fn test_analyze_scans_resume_only() {
        let analysis = scorer().analyze(RESUME, "Rockstar ninja wanted. python", Country::UK, "text");
        assert!(analysis.resume_bias.flags.is_empty());
        assert_eq!(analysis.resume_bias.risk_score, 0.05);
        assert_eq!(analysis.country_breakdown.country, Country::UK);
        assert_eq!(analysis.country_breakdown.weights, Country::UK.weights());
        assert_eq!(analysis.country_breakdown.resume_source, "text");
        assert_eq!(analysis.country_breakdown.similarity, analysis.score.confidence);
    }

    #[test]
    fn test_split_sentences_on_punctuation_and_newlines() {
        let text = "First one. Second one!  Third?\n\nFourth line\nFifth.";
        assert_eq!(
            split_sentences(text),
            vec!["First one.", "Second one!", "Third?", "Fourth line", "Fifth."]
        );
    }

    #[test]
    fn test_split_sentences_keeps_inline_punctuation() {
        assert_eq!(
            split_sentences("Node.js and v2.0 work... fine"),
            vec!["Node.js and v2.0 work...", "fine"]
        );
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" \n\n ").is_empty());
    }
}
