//! Bias scanner: flags risky wording from four fixed lexicons and rolls the
//! flags up into a single risk score.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const BASELINE_RISK: f64 = 0.05;
const BASE_RISK: f64 = 0.10;
const RISK_PER_FLAG: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasCategory {
    GenderedWording,
    AgeWording,
    NationalityWording,
    EducationPrestige,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasFlag {
    pub category: BiasCategory,
    pub term: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub risk_score: f64,
    pub flags: Vec<BiasFlag>,
}

struct Lexicon {
    category: BiasCategory,
    message: &'static str,
    terms: &'static [&'static str],
}

/// Scanned in this order; flags keep it.
static LEXICONS: [Lexicon; 4] = [
    Lexicon {
        category: BiasCategory::GenderedWording,
        message: "Consider more neutral wording.",
        terms: &["aggressive", "ninja", "rockstar", "dominant"],
    },
    Lexicon {
        category: BiasCategory::AgeWording,
        message: "Avoid age-related wording.",
        terms: &["young", "energetic", "digital native"],
    },
    Lexicon {
        category: BiasCategory::NationalityWording,
        message: "Be careful with nationality/citizenship implications.",
        terms: &["native", "citizenship"],
    },
    Lexicon {
        category: BiasCategory::EducationPrestige,
        message: "Education prestige may introduce bias.",
        terms: &["ivy league", "oxford", "cambridge"],
    },
];

struct CompiledTerm {
    category: BiasCategory,
    message: &'static str,
    term: &'static str,
    pattern: Regex,
}

static PATTERNS: LazyLock<Vec<CompiledTerm>> = LazyLock::new(|| {
    LEXICONS
        .iter()
        .flat_map(|lexicon| {
            lexicon.terms.iter().map(move |&term| CompiledTerm {
                category: lexicon.category,
                message: lexicon.message,
                term,
                // Escaped literal between word boundaries always compiles.
                pattern: Regex::new(&format!(r"\b{}\b", regex::escape(term)))
                    .expect("escaped lexicon term is a valid regex"),
            })
        })
        .collect()
});

/// Scans `text` for lexicon terms on word boundaries (case-insensitive).
pub fn scan(text: &str) -> BiasReport {
    let lower = text.to_lowercase();

    let flags: Vec<BiasFlag> = PATTERNS
        .iter()
        .filter(|compiled| compiled.pattern.is_match(&lower))
        .map(|compiled| BiasFlag {
            category: compiled.category,
            term: compiled.term.to_string(),
            message: compiled.message.to_string(),
        })
        .collect();

    BiasReport {
        risk_score: risk_score(flags.len()),
        flags,
    }
}

/// 0.05 with no flags, else 0.10 + 0.08 per flag, capped at 1.0.
pub fn risk_score(flag_count: usize) -> f64 {
    if flag_count == 0 {
        BASELINE_RISK
    } else {
        (BASE_RISK + RISK_PER_FLAG * flag_count as f64).min(1.0)
    }
}
