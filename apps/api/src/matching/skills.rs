//! Skill extraction: plain substring containment against a fixed vocabulary.
//!
//! Unlike the bias scanner there is no word-boundary check, so "java" is found
//! inside "javascript". Scoring outputs depend on this, keep it as is.

use crate::matching::featurizer::FEATURE_KEYWORDS;

pub const MAX_SKILLS: usize = 10;

/// Tools that count as skills but carry no featurizer dimension.
const EXTRA_SKILLS: [&str; 6] = ["excel", "tableau", "power bi", "git", "linux", "ci/cd"];

/// Skill vocabulary in match order: featurizer keywords first, then the extras.
pub fn skill_vocabulary() -> impl Iterator<Item = &'static str> {
    FEATURE_KEYWORDS.into_iter().chain(EXTRA_SKILLS)
}

/// Returns up to 10 vocabulary skills contained in `text`, in vocabulary order.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    skill_vocabulary()
        .filter(|skill| lower.contains(skill))
        .take(MAX_SKILLS)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_vocabulary_order() {
        let skills = extract_skills("Docker, AWS and Python on Linux");
        assert_eq!(skills, vec!["python", "aws", "docker", "linux"]);
    }

    #[test]
    fn test_substring_match_has_no_word_boundary() {
        let skills = extract_skills("JavaScript developer");
        assert!(skills.contains(&"java".to_string()));
        assert!(skills.contains(&"javascript".to_string()));
    }

    #[test]
    fn test_caps_at_ten() {
        let text = "python java sql aws azure gcp docker kubernetes tensorflow pytorch sklearn nlp";
        let skills = extract_skills(text);
        assert_eq!(skills.len(), MAX_SKILLS);
        assert_eq!(skills[0], "python");
    }

    #[test]
    fn test_every_skill_is_a_substring_of_lowercased_input() {
        let text = "Built CI/CD pipelines in Git; Power BI dashboards; PostgreSQL + MySQL.";
        let lower = text.to_lowercase();
        let skills = extract_skills(text);
        assert!(!skills.is_empty());
        assert!(skills.iter().all(|s| lower.contains(s.as_str())));
    }

    #[test]
    fn test_no_skills_in_empty_text() {
        assert!(extract_skills("").is_empty());
    }

    #[test]
    fn test_vocabulary_size() {
        assert_eq!(skill_vocabulary().count(), 31);
    }
}
