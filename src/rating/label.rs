use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Star rating attached to a review
///
/// Serialized as the backend's label strings (`ONE_STAR` .. `FIVE_STAR`), so
/// a partial or out-of-range rating cannot be represented.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingLabel {
    OneStar = 1,
    TwoStar = 2,
    ThreeStar = 3,
    FourStar = 4,
    #[default]
    FiveStar = 5,
}

impl RatingLabel {
    /// Number of stars, 1 through 5
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        RatingLabel::iter().find(|label| label.value() == value)
    }

    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

impl std::fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Star count for a raw label string; unknown labels map to 0
pub fn label_to_value(label: &str) -> u8 {
    label
        .parse::<RatingLabel>()
        .map(RatingLabel::value)
        .unwrap_or(0)
}

/// Label for a star count, defined for 1 through 5
pub fn value_to_label(value: u8) -> Option<RatingLabel> {
    RatingLabel::from_value(value)
}
