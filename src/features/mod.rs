pub mod config;
pub mod extractor;
pub mod feature_vector;

pub use config::{ExtractorConfig, ResizeFilter, CANONICAL_SIZE, MAX_SIZE};
pub use extractor::{extract, extract_with};
pub use feature_vector::FeatureVector;
