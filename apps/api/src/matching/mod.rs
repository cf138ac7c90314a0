// Matching engine: featurization, similarity, skill and bias extraction,
// country weighting, and the scorer that blends them.
// Everything here is pure and synchronous; only `handlers` touches HTTP.

pub mod bias;
pub mod country;
pub mod featurizer;
pub mod handlers;
pub mod scorer;
pub mod similarity;
pub mod skills;
