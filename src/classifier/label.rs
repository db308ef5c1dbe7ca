use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

/// The closed set of plant-health classes the heuristics score.
///
/// Declaration order is the canonical order: it drives iteration, display,
/// and tie-breaking in `ProbabilityDistribution::predict()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassLabel {
    Healthy,
    #[serde(rename = "Bacterial_Blight")]
    BacterialBlight,
    #[serde(rename = "Leaf_Spot")]
    LeafSpot,
    #[serde(rename = "Yellow_Virus")]
    YellowVirus,
}

impl ClassLabel {
    /// All labels in canonical order.
    pub const ALL: [ClassLabel; 4] = [
        ClassLabel::Healthy,
        ClassLabel::BacterialBlight,
        ClassLabel::LeafSpot,
        ClassLabel::YellowVirus,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The external string form, e.g. `"Leaf_Spot"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassLabel::Healthy         => "Healthy",
            ClassLabel::BacterialBlight => "Bacterial_Blight",
            ClassLabel::LeafSpot        => "Leaf_Spot",
            ClassLabel::YellowVirus     => "Yellow_Virus",
        }
    }

    /// Short care advice shown next to a prediction.
    pub fn care_tip(self) -> &'static str {
        match self {
            ClassLabel::Healthy =>
                "Looks fine. Maintain balanced watering and sunlight.",
            ClassLabel::BacterialBlight =>
                "Prune infected areas. Consider copper-based bactericide.",
            ClassLabel::LeafSpot =>
                "Improve airflow; avoid overhead watering; fungicide if needed.",
            ClassLabel::YellowVirus =>
                "Isolate plant; control aphids/whiteflies; consult an agronomist.",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassLabel::ALL.into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown class label '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_canonical_order() {
        for (i, label) in ClassLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
        }
    }

    #[test]
    fn serde_and_display_agree() {
        for label in ClassLabel::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label));
            assert_eq!(label.to_string().parse::<ClassLabel>().unwrap(), label);
        }
    }

    #[test]
    fn unknown_label_does_not_parse() {
        assert!("Rust_Fungus".parse::<ClassLabel>().is_err());
        assert!("leaf_spot".parse::<ClassLabel>().is_err());
    }

    #[test]
    fn every_label_has_a_tip() {
        for label in ClassLabel::ALL {
            assert!(!label.care_tip().is_empty());
        }
    }
}
