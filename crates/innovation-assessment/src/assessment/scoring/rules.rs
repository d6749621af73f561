use super::super::domain::{Pillar, RatingTag};
use super::super::question_bank::QuestionBank;
use super::super::responses::ResponseStore;
use super::MissingAnswerPolicy;

pub(crate) struct PillarMean {
    pub mean: f32,
    pub answered: usize,
}

/// Mean rating for one pillar and tag.
///
/// With [`MissingAnswerPolicy::ExcludeUnanswered`] the denominator is the
/// number of answered questions; with [`MissingAnswerPolicy::ZeroFill`] it is
/// the pillar's question count. An empty denominator yields 0.
pub(crate) fn pillar_mean(
    bank: &QuestionBank,
    responses: &ResponseStore,
    pillar: Pillar,
    tag: RatingTag,
    policy: MissingAnswerPolicy,
) -> PillarMean {
    let question_count = bank.questions_for(pillar).len();
    let (sum, answered) = (0..question_count)
        .filter_map(|question| responses.rating(pillar, question, tag))
        .fold((0u32, 0usize), |(sum, answered), rating| {
            (sum + u32::from(rating.value()), answered + 1)
        });

    let denominator = match policy {
        MissingAnswerPolicy::ExcludeUnanswered => answered,
        MissingAnswerPolicy::ZeroFill => question_count,
    };

    let mean = if denominator == 0 {
        0.0
    } else {
        sum as f32 / denominator as f32
    };

    PillarMean { mean, answered }
}
