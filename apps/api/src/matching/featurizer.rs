//! Text featurizer: pluggable, trait-based embedding of free text into a fixed-length vector.
//!
//! Default: `KeywordFeaturizer` (keyword presence + a few length/count features).
//! A real embedding model can implement `Featurizer` and be swapped in at startup;
//! `AppState` holds an `Arc<dyn Featurizer>` and no caller depends on the concrete type.

// ────────────────────────────────────────────────────────────────────────────
// Vector space
// ────────────────────────────────────────────────────────────────────────────

/// Dimension of every vector produced by the keyword featurizer.
pub const FEATURE_DIM: usize = 64;

const NORM_EPSILON: f64 = 1e-8;

/// Domain keywords, one presence feature each, in this order.
pub const FEATURE_KEYWORDS: [&str; 25] = [
    "python",
    "java",
    "javascript",
    "sql",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "tensorflow",
    "pytorch",
    "sklearn",
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "data science",
    "analytics",
    "statistics",
    "algorithms",
    "react",
    "nodejs",
    "mongodb",
    "postgresql",
    "mysql",
];

/// An embedding of one text. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Divides every component by `norm + 1e-8`. A zero vector stays zero.
    pub fn normalized(self) -> Self {
        let denom = self.norm() + NORM_EPSILON;
        Self(self.0.into_iter().map(|x| x / denom).collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The featurizer trait. Implement this to swap the embedding backend without
/// touching the scorer, the ranker, or the handlers.
pub trait Featurizer: Send + Sync {
    /// Backend label, surfaced in logs.
    fn name(&self) -> &'static str;

    fn embed(&self, text: &str) -> FeatureVector;

    /// Batch form. Must return exactly what `embed` returns for each text.
    fn embed_many(&self, texts: &[&str]) -> Vec<FeatureVector> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordFeaturizer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic keyword/length featurizer. No model download, no state.
#[derive(Debug, Clone, Copy)]
pub struct KeywordFeaturizer {
    pub normalize: bool,
}

impl Default for KeywordFeaturizer {
    fn default() -> Self {
        Self { normalize: true }
    }
}

impl KeywordFeaturizer {
    /// Raw features before normalization.
    fn raw_features(text: &str) -> Vec<f64> {
        let lower = text.to_lowercase();
        let mut features = Vec::with_capacity(FEATURE_DIM);

        for keyword in FEATURE_KEYWORDS {
            features.push(if lower.contains(keyword) { 1.0 } else { 0.0 });
        }

        features.push(text.chars().count() as f64 / 1000.0);
        features.push(lower.matches("experience").count() as f64 / 10.0);
        features.push(lower.matches("project").count() as f64 / 10.0);
        features.push(lower.matches("skill").count() as f64 / 10.0);

        features.resize(FEATURE_DIM, 0.0);
        features
    }
}

impl Featurizer for KeywordFeaturizer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn embed(&self, text: &str) -> FeatureVector {
        let vector = FeatureVector::new(Self::raw_features(text));
        if self.normalize {
            vector.normalized()
        } else {
            vector
        }
    }
}
