use super::super::classifier::{MaturityTier, RecommendationTable};
use super::super::domain::Pillar;
use super::super::scoring::{AssessmentScores, PillarScore};
use super::chart::{ChartSeries, GapChart};
use super::views::{AssessmentReportSummary, FocusPillarView, FocusReason, PillarResultView};
use serde::Serialize;

/// One scored pillar with its maturity tier and recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarResult {
    pub score: PillarScore,
    pub tier: MaturityTier,
    pub recommendation: String,
}

impl PillarResult {
    pub fn to_view(&self) -> PillarResultView {
        PillarResultView {
            pillar: self.score.pillar,
            pillar_label: self.score.pillar.label(),
            current: round2(self.score.current),
            desired: self.score.desired.map(round2),
            gap: self.score.gap().map(round2),
            answered_current: self.score.answered_current,
            answered_desired: self.score.answered_desired,
            question_count: self.score.question_count,
            maturity: self.tier,
            maturity_label: self.tier.label(),
            color: self.tier.color(),
            recommendation: self.recommendation.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssessmentReport {
    pillars: Vec<PillarResult>,
}

impl AssessmentReport {
    /// Classify each pillar's current score and look up its recommendation.
    pub fn build(scores: &AssessmentScores, table: &RecommendationTable) -> Self {
        let pillars = scores
            .iter()
            .map(|score| {
                let tier = MaturityTier::classify(score.current);
                PillarResult {
                    score: score.clone(),
                    tier,
                    recommendation: table.recommendation(score.pillar, tier).to_string(),
                }
            })
            .collect();

        Self { pillars }
    }

    pub fn pillars(&self) -> &[PillarResult] {
        &self.pillars
    }

    pub fn get(&self, pillar: Pillar) -> Option<&PillarResult> {
        self.pillars
            .iter()
            .find(|result| result.score.pillar == pillar)
    }

    pub fn overall_current(&self) -> f32 {
        mean(self.pillars.iter().map(|result| result.score.current))
    }

    pub fn overall_desired(&self) -> Option<f32> {
        let desired: Option<Vec<f32>> = self
            .pillars
            .iter()
            .map(|result| result.score.desired)
            .collect();
        desired.map(|values| mean(values.into_iter()))
    }

    /// Pillar to work on first: the widest positive gap, falling back to
    /// the lowest current score. Ties keep bank order.
    pub fn focus(&self) -> Option<(&PillarResult, FocusReason)> {
        let widest_gap = self
            .pillars
            .iter()
            .filter_map(|result| result.score.gap().map(|gap| (result, gap)))
            .filter(|(_, gap)| *gap > 0.0)
            .fold(None::<(&PillarResult, f32)>, |best, (result, gap)| match best {
                Some((_, best_gap)) if best_gap >= gap => best,
                _ => Some((result, gap)),
            });

        if let Some((result, _)) = widest_gap {
            return Some((result, FocusReason::LargestGap));
        }

        self.pillars
            .iter()
            .fold(None::<&PillarResult>, |lowest, result| match lowest {
                Some(best) if best.score.current <= result.score.current => Some(best),
                _ => Some(result),
            })
            .map(|result| (result, FocusReason::LowestCurrent))
    }

    pub fn summary(&self) -> AssessmentReportSummary {
        let overall_current = self.overall_current();
        let overall_maturity = MaturityTier::classify(overall_current);

        let focus = self.focus().map(|(result, reason)| FocusPillarView {
            pillar: result.score.pillar,
            pillar_label: result.score.pillar.label(),
            reason,
            reason_label: reason.label(),
            recommendation: result.recommendation.clone(),
        });

        AssessmentReportSummary {
            pillars: self.pillars.iter().map(PillarResult::to_view).collect(),
            overall_current: round2(overall_current),
            overall_desired: self.overall_desired().map(round2),
            overall_maturity,
            overall_maturity_label: overall_maturity.label(),
            focus,
        }
    }

    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries::from_results(&self.pillars)
    }

    pub fn gap_chart(&self) -> GapChart {
        GapChart::from_results(&self.pillars)
    }
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0f32, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
