use crate::classifier::scores::{ProbabilityDistribution, ScoreMap};
use crate::error::Result;
use crate::features::FeatureVector;

/// Added to the standard deviation so equal scores do not divide by zero.
const STD_EPS: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Scores and normalizes a feature vector.
///
/// # Errors
/// `InvalidFeatures` if any feature is NaN, infinite, or outside the range
/// extraction can produce; nothing is computed in that case.
pub fn classify(features: &FeatureVector) -> Result<(ScoreMap, ProbabilityDistribution)> {
    features.validate()?;
    let scores = score(features);
    let probs = normalize(&scores);
    log::debug!("raw scores: {:?}, probabilities: {:?}", scores.0, probs.as_array());
    Ok((scores, probs))
}

/// Fixed linear scores, one per class, in canonical order:
///
///   Healthy          = 0.6·greenness − 0.3·yellow − 0.2·edge
///   Bacterial_Blight = 0.5·edge + 0.2·(1 − greenness) − 0.1·yellow
///   Leaf_Spot        = 0.8·edge + 0.1·(std_r + std_g + std_b)
///   Yellow_Virus     = 1.0·yellow − 0.5·greenness
pub fn score(f: &FeatureVector) -> ScoreMap {
    let healthy = 0.6 * f.greenness - 0.3 * f.yellow_score - 0.2 * f.edge_energy;
    let bacterial_blight =
        0.5 * f.edge_energy + 0.2 * (1.0 - f.greenness) - 0.1 * f.yellow_score;
    let leaf_spot = 0.8 * f.edge_energy + 0.1 * (f.std_r + f.std_g + f.std_b);
    let yellow_virus = 1.0 * f.yellow_score - 0.5 * f.greenness;

    ScoreMap([healthy, bacterial_blight, leaf_spot, yellow_virus])
}

/// Standardizes the four scores (population standard deviation plus
/// `STD_EPS`), exponentiates, and divides by the sum.
///
/// Standardized values of four numbers never exceed √3 in magnitude, so the
/// exponentials cannot overflow and no max-shift is needed.
pub fn normalize(scores: &ScoreMap) -> ProbabilityDistribution {
    let xs = scores.0;
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let std = (xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n).sqrt();

    let exps = xs.map(|x| ((x - mean) / (std + STD_EPS)).exp());
    let sum: f64 = exps.iter().sum();
    ProbabilityDistribution(exps.map(|e| e / sum))
}
