use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::classifier::label::ClassLabel;
use crate::classifier::prediction::Prediction;

/// Raw, unnormalized per-class scores.
///
/// Backed by an array indexed by `ClassLabel::index()`, so every class is
/// always present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreMap(pub [f64; 4]);

/// Per-class probabilities; each value in [0, 1], summing to 1.
///
/// Only `normalize()` constructs one, which is what upholds the invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityDistribution(pub(crate) [f64; 4]);

impl ScoreMap {
    pub fn get(&self, label: ClassLabel) -> f64 {
        self.0[label.index()]
    }

    /// `(label, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassLabel, f64)> + '_ {
        ClassLabel::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl ProbabilityDistribution {
    pub fn get(&self, label: ClassLabel) -> f64 {
        self.0[label.index()]
    }

    /// `(label, probability)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassLabel, f64)> + '_ {
        ClassLabel::ALL.into_iter().zip(self.0.iter().copied())
    }

    pub fn as_array(&self) -> [f64; 4] {
        self.0
    }

    /// The most probable class and its probability.  Ties go to the label
    /// that comes first in canonical order.
    pub fn predict(&self) -> Prediction {
        let mut best = ClassLabel::ALL[0];
        for label in ClassLabel::ALL.into_iter().skip(1) {
            if self.get(label) > self.get(best) {
                best = label;
            }
        }
        Prediction { label: best, confidence: self.get(best) }
    }
}

/// Writes the four values as a `{"Healthy": .., "Bacterial_Blight": .., ..}`
/// object in canonical order.
fn serialize_by_label<S: Serializer>(values: &[f64; 4], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(values.len()))?;
    for (label, value) in ClassLabel::ALL.iter().zip(values) {
        map.serialize_entry(label, value)?;
    }
    map.end()
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_by_label(&self.0, serializer)
    }
}

impl Serialize for ProbabilityDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_by_label(&self.0, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_picks_maximum() {
        let dist = ProbabilityDistribution([0.1, 0.2, 0.6, 0.1]);
        let p = dist.predict();
        assert_eq!(p.label, ClassLabel::LeafSpot);
        assert_eq!(p.confidence, 0.6);
    }

    #[test]
    fn ties_resolve_to_canonical_order() {
        let dist = ProbabilityDistribution([0.25; 4]);
        assert_eq!(dist.predict().label, ClassLabel::Healthy);

        let dist = ProbabilityDistribution([0.1, 0.4, 0.1, 0.4]);
        assert_eq!(dist.predict().label, ClassLabel::BacterialBlight);
    }

    #[test]
    fn serializes_keyed_by_label_string() {
        let scores = ScoreMap([1.0, 2.0, 3.0, 4.0]);
        let value = serde_json::to_value(scores).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["Healthy"], 1.0);
        assert_eq!(obj["Bacterial_Blight"], 2.0);
        assert_eq!(obj["Leaf_Spot"], 3.0);
        assert_eq!(obj["Yellow_Virus"], 4.0);
    }

    #[test]
    fn iter_yields_every_label_once() {
        let scores = ScoreMap([0.0, -1.0, 2.5, 0.3]);
        let labels: Vec<ClassLabel> = scores.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ClassLabel::ALL.to_vec());
        assert_eq!(scores.get(ClassLabel::LeafSpot), 2.5);
    }
}
