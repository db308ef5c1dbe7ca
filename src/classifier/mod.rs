pub mod heuristic;
pub mod label;
pub mod prediction;
pub mod scores;

pub use heuristic::{classify, normalize, score};
pub use label::ClassLabel;
pub use prediction::Prediction;
pub use scores::{ProbabilityDistribution, ScoreMap};
