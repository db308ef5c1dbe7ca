use serde::Serialize;

use crate::classifier::label::ClassLabel;

/// Arg-max of a `ProbabilityDistribution`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: ClassLabel,
    /// Probability of `label`, in [0, 1].
    pub confidence: f64,
}

impl Prediction {
    /// Confidence as a percentage, e.g. `63.2`.
    pub fn confidence_pct(&self) -> f64 {
        self.confidence * 100.0
    }
}
