// Job search: external boards, the gather/decide pipeline with backup fallback,
// and similarity ranking against the résumé.

pub mod backup;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod ranker;
pub mod sources;
