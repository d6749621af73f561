//! Maturity tiers and the per-pillar recommendation table.
//!
//! Tier thresholds are absolute values on the 0-10 rating range and do not
//! adapt to the active scale: a 4-point survey (2..=9) is classified with the
//! same cut-offs as a 6-point one (0..=10).

use super::domain::Pillar;
use serde::{Deserialize, Serialize};

pub const EARLY_STAGE_CEILING: f32 = 3.0;
pub const DEVELOPING_CEILING: f32 = 6.0;
pub const ADVANCED_CEILING: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityTier {
    EarlyStage,
    Developing,
    Advanced,
    Leading,
}

impl MaturityTier {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::EarlyStage,
            Self::Developing,
            Self::Advanced,
            Self::Leading,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EarlyStage => "Early Stage",
            Self::Developing => "Developing",
            Self::Advanced => "Advanced",
            Self::Leading => "Leading",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::EarlyStage => 0,
            Self::Developing => 1,
            Self::Advanced => 2,
            Self::Leading => 3,
        }
    }

    /// Classify a pillar score. Boundary values fall into the lower tier and
    /// NaN is treated as the lowest tier.
    pub fn classify(score: f32) -> Self {
        if score.is_nan() || score <= EARLY_STAGE_CEILING {
            Self::EarlyStage
        } else if score <= DEVELOPING_CEILING {
            Self::Developing
        } else if score <= ADVANCED_CEILING {
            Self::Advanced
        } else {
            Self::Leading
        }
    }

    /// Display colour used by result cards and charts.
    pub const fn color(self) -> &'static str {
        match self {
            Self::EarlyStage => "#dc2626",
            Self::Developing => "#f59e0b",
            Self::Advanced => "#10b981",
            Self::Leading => "#2563eb",
        }
    }
}

pub fn maturity_tier(score: f32) -> MaturityTier {
    MaturityTier::classify(score)
}

/// Recommendation text for every (pillar, tier) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationTable {
    entries: [[String; 4]; 4],
}

impl RecommendationTable {
    pub fn standard() -> Self {
        let rows = [
            [
                "Your innovation strategy is unclear.",
                "Your innovation strategy is developing.",
                "Your innovation strategy is strong.",
                "Excellent innovation strategy.",
            ],
            [
                "Your innovation capacity is limited.",
                "Your innovation capacity is moderate.",
                "You have good innovation capacity.",
                "Excellent innovation capacity.",
            ],
            [
                "Innovation discipline is weak.",
                "Innovation discipline exists.",
                "Your innovation discipline is solid.",
                "Excellent innovation discipline.",
            ],
            [
                "Innovation performance is low.",
                "Innovation performance is moderate.",
                "Your innovation performance is strong.",
                "Excellent innovation performance.",
            ],
        ];

        Self {
            entries: rows.map(|row| row.map(str::to_string)),
        }
    }

    /// Assemble a table from individual entries. Every combination must be
    /// present with non-blank text; later entries replace earlier ones.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, MissingRecommendationError>
    where
        I: IntoIterator<Item = (Pillar, MaturityTier, S)>,
        S: Into<String>,
    {
        let mut slots: [[Option<String>; 4]; 4] = Default::default();
        for (pillar, tier, text) in entries {
            let text = text.into();
            slots[pillar.index()][tier.index()] = if text.trim().is_empty() {
                None
            } else {
                Some(text)
            };
        }

        let mut entries: [[String; 4]; 4] = Default::default();
        for pillar in Pillar::ordered() {
            for tier in MaturityTier::ordered() {
                entries[pillar.index()][tier.index()] = slots[pillar.index()][tier.index()]
                    .take()
                    .ok_or(MissingRecommendationError { pillar, tier })?;
            }
        }

        Ok(Self { entries })
    }

    pub fn recommendation(&self, pillar: Pillar, tier: MaturityTier) -> &str {
        &self.entries[pillar.index()][tier.index()]
    }

    pub fn for_score(&self, pillar: Pillar, score: f32) -> &str {
        self.recommendation(pillar, MaturityTier::classify(score))
    }
}

impl Default for RecommendationTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// A recommendation table was assembled without text for a combination.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no recommendation configured for {pillar} at tier {}", .tier.label())]
pub struct MissingRecommendationError {
    pub pillar: Pillar,
    pub tier: MaturityTier,
}
