use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Strategy,
    Capacity,
    Discipline,
    Performance,
}

impl Pillar {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Strategy,
            Self::Capacity,
            Self::Discipline,
            Self::Performance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strategy => "Strategy",
            Self::Capacity => "Capacity",
            Self::Discipline => "Discipline",
            Self::Performance => "Performance",
        }
    }

    /// Row of this pillar in fixed-size per-pillar tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Strategy => 0,
            Self::Capacity => 1,
            Self::Discipline => 2,
            Self::Performance => 3,
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|pillar| pillar.label().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which of the two states a rating describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTag {
    Current,
    Desired,
}

impl RatingTag {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Current => "Current State",
            Self::Desired => "Desired State",
        }
    }
}

/// Whether the survey captures the desired state next to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMode {
    #[default]
    GapAnalysis,
    SingleState,
}

impl AssessmentMode {
    pub const fn required_tags(self) -> &'static [RatingTag] {
        match self {
            Self::GapAnalysis => &[RatingTag::Current, RatingTag::Desired],
            Self::SingleState => &[RatingTag::Current],
        }
    }

    pub fn tracks(self, tag: RatingTag) -> bool {
        self.required_tags().contains(&tag)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GapAnalysis => "Gap Analysis",
            Self::SingleState => "Single State",
        }
    }
}

/// Identity of one stored answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnswerKey {
    pub pillar: Pillar,
    pub question: usize,
    pub tag: RatingTag,
}

impl AnswerKey {
    pub const fn new(pillar: Pillar, question: usize, tag: RatingTag) -> Self {
        Self {
            pillar,
            question,
            tag,
        }
    }
}

/// A value accepted by the active [`RatingScale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleOption {
    pub value: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ScaleOption {
    pub fn labelled(value: u8, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }

    pub const fn unlabelled(value: u8) -> Self {
        Self { value, label: None }
    }
}

/// The two scales shipped with the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingScaleKind {
    #[default]
    FourPoint,
    SixPoint,
}

impl RatingScaleKind {
    pub fn scale(self) -> RatingScale {
        match self {
            Self::FourPoint => RatingScale::four_point(),
            Self::SixPoint => RatingScale::six_point(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FourPoint => "Four-point",
            Self::SixPoint => "Six-point",
        }
    }
}

/// Ordered set of legal rating values, optionally labelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingScale {
    options: Vec<ScaleOption>,
}

/// Highest value the fixed maturity thresholds are calibrated for.
pub const MAX_RATING_VALUE: u8 = 10;

impl RatingScale {
    pub fn new(options: Vec<ScaleOption>) -> Result<Self, RatingScaleError> {
        if options.is_empty() {
            return Err(RatingScaleError::Empty);
        }

        for pair in options.windows(2) {
            if pair[1].value <= pair[0].value {
                return Err(RatingScaleError::NotIncreasing {
                    previous: pair[0].value,
                    next: pair[1].value,
                });
            }
        }

        if let Some(option) = options.iter().find(|option| option.value > MAX_RATING_VALUE) {
            return Err(RatingScaleError::OutOfRange(option.value));
        }

        Ok(Self { options })
    }

    pub fn four_point() -> Self {
        Self {
            options: vec![
                ScaleOption::labelled(2, "Not at all"),
                ScaleOption::labelled(5, "To some extent"),
                ScaleOption::labelled(7, "To a moderate extent"),
                ScaleOption::labelled(9, "To a great extent"),
            ],
        }
    }

    pub fn six_point() -> Self {
        Self {
            options: [0, 2, 4, 6, 8, 10]
                .into_iter()
                .map(ScaleOption::unlabelled)
                .collect(),
        }
    }

    pub fn options(&self) -> &[ScaleOption] {
        &self.options
    }

    pub fn contains(&self, value: u8) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub fn min(&self) -> u8 {
        self.options.first().map_or(0, |option| option.value)
    }

    pub fn max(&self) -> u8 {
        self.options.last().map_or(0, |option| option.value)
    }

    pub fn label_for(&self, value: u8) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .and_then(|option| option.label.as_deref())
    }

    /// Accepts any integer so out-of-range input is reported the same way as
    /// an off-scale value.
    pub fn rating(&self, value: impl Into<i64>) -> Result<Rating, InvalidRatingError> {
        let value = value.into();
        match u8::try_from(value) {
            Ok(raw) if self.contains(raw) => Ok(Rating(raw)),
            _ => Err(InvalidRatingError {
                value,
                allowed: self.describe_values(),
            }),
        }
    }

    fn describe_values(&self) -> String {
        self.options
            .iter()
            .map(|option| option.value.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingScaleError {
    #[error("rating scale must define at least one value")]
    Empty,
    #[error("rating scale values must be strictly increasing ({previous} followed by {next})")]
    NotIncreasing { previous: u8, next: u8 },
    #[error("rating value {0} exceeds the maximum of {max}", max = MAX_RATING_VALUE)]
    OutOfRange(u8),
}

/// A write with a value the active scale does not define.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rating {value} is not on the active scale (allowed: {allowed})")]
pub struct InvalidRatingError {
    pub value: i64,
    pub allowed: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pillar_labels_parse_case_insensitively() {
        assert_eq!(Pillar::from_label(" strategy "), Some(Pillar::Strategy));
        assert_eq!(Pillar::from_label("PERFORMANCE"), Some(Pillar::Performance));
        assert_eq!(Pillar::from_label("Culture"), None);
    }

    #[test]
    fn pillar_indexes_follow_declared_order() {
        for (position, pillar) in Pillar::ordered().into_iter().enumerate() {
            assert_eq!(pillar.index(), position);
        }
    }

    #[test]
    fn four_point_scale_carries_labels() {
        let scale = RatingScale::four_point();
        assert_eq!(scale.min(), 2);
        assert_eq!(scale.max(), 9);
        assert_eq!(scale.label_for(7), Some("To a moderate extent"));
        assert!(scale.rating(5).is_ok());
        assert!(scale.rating(4).is_err());
    }

    #[test]
    fn six_point_scale_is_unlabelled() {
        let scale = RatingScale::six_point();
        assert_eq!(scale.min(), 0);
        assert_eq!(scale.max(), 10);
        assert_eq!(scale.label_for(4), None);
        assert!(scale.contains(10));
        assert!(!scale.contains(5));
    }

    #[test]
    fn invalid_rating_lists_allowed_values() {
        let error = RatingScale::four_point()
            .rating(3)
            .expect_err("3 is not on the four point scale");
        assert_eq!(error.value, 3);
        assert_eq!(error.allowed, "2, 5, 7, 9");
    }

    #[test]
    fn ratings_outside_the_byte_range_are_rejected() {
        let scale = RatingScale::six_point();
        assert_eq!(scale.rating(300).expect_err("too large").value, 300);
        assert_eq!(scale.rating(-1).expect_err("negative").value, -1);
        assert_eq!(scale.rating(266).map(Rating::value).ok(), None);
    }

    #[test]
    fn custom_scales_must_increase_within_range() {
        assert_eq!(RatingScale::new(Vec::new()), Err(RatingScaleError::Empty));
        assert_eq!(
            RatingScale::new(vec![ScaleOption::unlabelled(3), ScaleOption::unlabelled(3)]),
            Err(RatingScaleError::NotIncreasing {
                previous: 3,
                next: 3
            })
        );
        assert_eq!(
            RatingScale::new(vec![ScaleOption::unlabelled(12)]),
            Err(RatingScaleError::OutOfRange(12))
        );

        let scale = RatingScale::new(vec![ScaleOption::unlabelled(1), ScaleOption::unlabelled(4)])
            .expect("valid custom scale");
        assert_eq!(scale.max(), 4);
    }

    #[test]
    fn single_state_mode_only_tracks_current() {
        assert!(AssessmentMode::SingleState.tracks(RatingTag::Current));
        assert!(!AssessmentMode::SingleState.tracks(RatingTag::Desired));
        assert_eq!(AssessmentMode::GapAnalysis.required_tags().len(), 2);
    }
}
