pub mod error;
pub mod features;
pub mod classifier;
pub mod pipeline;

// Convenience re-exports
pub use error::{LeafHealthError, Result};
pub use features::{extract, extract_with, ExtractorConfig, FeatureVector, ResizeFilter};
pub use classifier::{classify, ClassLabel, Prediction, ProbabilityDistribution, ScoreMap};
pub use pipeline::{decode_image, diagnose, diagnose_with, load_image, Diagnosis};
