use image::DynamicImage;
use serde::Serialize;

use crate::classifier::{classify, Prediction, ProbabilityDistribution, ScoreMap};
use crate::error::Result;
use crate::features::{extract_with, ExtractorConfig, FeatureVector};

/// Everything a presentation layer needs for one leaf image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub prediction: Prediction,
    pub probabilities: ProbabilityDistribution,
    pub scores: ScoreMap,
    pub features: FeatureVector,
    pub care_tip: &'static str,
}

/// Runs extraction and classification with the default config.
pub fn diagnose(image: &DynamicImage) -> Result<Diagnosis> {
    diagnose_with(image, &ExtractorConfig::default())
}

/// Extract → score → normalize → arg-max.  Either a complete `Diagnosis` is
/// returned or the first error; nothing partial.
pub fn diagnose_with(image: &DynamicImage, config: &ExtractorConfig) -> Result<Diagnosis> {
    let features = extract_with(image, config)?;
    let (scores, probabilities) = classify(&features)?;
    let prediction = probabilities.predict();
    log::debug!(
        "predicted {} ({:.1}%)",
        prediction.label,
        prediction.confidence_pct()
    );

    Ok(Diagnosis {
        prediction,
        probabilities,
        scores,
        features,
        care_tip: prediction.label.care_tip(),
    })
}
