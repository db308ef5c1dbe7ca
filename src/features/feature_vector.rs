use serde::{Serialize, Deserialize};

use crate::error::{LeafHealthError, Result};

/// Inclusive bounds per field, in canonical order.  `edge_energy` is a mean
/// of luma differences with luma in [0, 1], so it cannot exceed 1.
const FIELD_RANGES: [(f64, f64); 9] = [
    (0.0, 1.0), (0.0, 1.0), (0.0, 1.0),
    (0.0, 1.0), (0.0, 1.0), (0.0, 1.0),
    (-1.0, 1.0), (-1.0, 1.0), (0.0, 1.0),
];

/// Slack for rounding at the range edges.
const RANGE_TOL: f64 = 1e-9;

/// Color and texture descriptors of one leaf image.
///
/// Channel statistics are computed on intensities normalized to [0, 1], so
/// `mean_*` and `std_*` lie in [0, 1], `greenness` and `yellow_score` in
/// [-1, 1], and `edge_energy` in [0, 1].  Serializes as a flat object
/// with exactly these nine keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub mean_r: f64,
    pub mean_g: f64,
    pub mean_b: f64,
    pub std_r: f64,
    pub std_g: f64,
    pub std_b: f64,
    /// `mean_g - (mean_r + mean_b) / 2`
    pub greenness: f64,
    /// `(mean_r + mean_g) / 2 - mean_b`
    pub yellow_score: f64,
    /// Mean absolute luma difference between neighbouring pixels.
    pub edge_energy: f64,
}

impl FeatureVector {
    /// Field names in canonical order.
    pub const NAMES: [&'static str; 9] = [
        "mean_r", "mean_g", "mean_b",
        "std_r", "std_g", "std_b",
        "greenness", "yellow_score", "edge_energy",
    ];

    /// `(name, value)` pairs in canonical order.
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("mean_r", self.mean_r),
            ("mean_g", self.mean_g),
            ("mean_b", self.mean_b),
            ("std_r", self.std_r),
            ("std_g", self.std_g),
            ("std_b", self.std_b),
            ("greenness", self.greenness),
            ("yellow_score", self.yellow_score),
            ("edge_energy", self.edge_energy),
        ]
    }

    /// Fails with `InvalidFeatures` naming the first field that is not finite
    /// or lies outside the range extraction can produce.  In range, every raw
    /// score stays within a few units, so normalization cannot overflow.
    pub fn validate(&self) -> Result<()> {
        let bad = self.fields().into_iter().zip(FIELD_RANGES).find(|((_, v), (lo, hi))| {
            !v.is_finite() || *v < lo - RANGE_TOL || *v > hi + RANGE_TOL
        });
        match bad {
            Some(((field, value), _)) => Err(LeafHealthError::InvalidFeatures { field, value }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureVector {
        FeatureVector {
            mean_r: 0.1, mean_g: 0.2, mean_b: 0.3,
            std_r: 0.4, std_g: 0.5, std_b: 0.6,
            greenness: 0.0, yellow_score: -0.15, edge_energy: 0.05,
        }
    }

    #[test]
    fn fields_follow_canonical_order() {
        let fields = sample().fields();
        assert_eq!(fields[0], ("mean_r", 0.1));
        assert_eq!(fields[5], ("std_b", 0.6));
        assert_eq!(fields[8], ("edge_energy", 0.05));
    }

    #[test]
    fn serializes_as_flat_nine_key_object() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 9);
        for name in FeatureVector::NAMES {
            assert!(obj.contains_key(name), "missing key {name}");
        }
    }

    #[test]
    fn validate_reports_first_non_finite_field() {
        let mut f = sample();
        f.std_g = f64::NAN;
        f.edge_energy = f64::INFINITY;
        match f.validate() {
            Err(LeafHealthError::InvalidFeatures { field, .. }) => assert_eq!(field, "std_g"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let json = r#"{"mean_r": 0.1, "mean_g": 0.2, "mean_b": 0.3,
                       "std_r": 0.0, "std_g": 0.0, "std_b": 0.0,
                       "greenness": 1.7e308, "yellow_score": -1.7e308,
                       "edge_energy": 0.0}"#;
        let f: FeatureVector = serde_json::from_str(json).unwrap();
        match f.validate() {
            Err(LeafHealthError::InvalidFeatures { field, value }) => {
                assert_eq!(field, "greenness");
                assert_eq!(value, 1.7e308);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let mut f = sample();
        f.edge_energy = -0.01;
        assert!(f.validate().is_err());
        f.edge_energy = 1.5;
        assert!(f.validate().is_err());
        f.edge_energy = 1.0;
        assert!(f.validate().is_ok());
    }
}
