use thiserror::Error;

/// Errors raised by the feature extractor and the heuristic classifier.
///
/// Neither variant is retried: an `InvalidImage` means the caller should
/// reject the input before classification, an `InvalidFeatures` means a
/// `FeatureVector` was constructed by hand with non-finite or out-of-range values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeafHealthError {
    /// The input cannot be coerced into a non-empty 3-channel raster.
    #[error("invalid image: {0}")]
    InvalidImage(String),
    /// A feature value is NaN, infinite, or outside its documented range.
    #[error("invalid features: `{field}` is non-finite or out of range ({value})")]
    InvalidFeatures { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, LeafHealthError>;
