use crate::matching::featurizer::FeatureVector;

/// Cosine similarity of two feature vectors, conceptually in [-1, 1].
///
/// Returns 0.0 when either vector has zero norm or when the dimensions differ.
pub fn cosine(a: &FeatureVector, b: &FeatureVector) -> f64 {
    cosine_similarity(a.as_slice(), b.as_slice())
}

pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "feature dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
