use super::common::*;

use crate::assessment::{
    maturity_tier, AssessmentReport, MaturityTier, Pillar, QuestionBank, RatingTag,
    RecommendationTable, ScoringConfig, ScoringEngine,
};

fn engine_for(settings: &crate::assessment::AssessmentSettings) -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::from(settings))
}

#[test]
fn strategy_pillar_with_five_and_nine_is_advanced() {
    let settings = settings();
    let bank = strategy_bank();
    let mut responses = store(&settings);
    responses
        .set_rating(Pillar::Strategy, 0, RatingTag::Current, 5)
        .expect("on scale");
    responses
        .set_rating(Pillar::Strategy, 1, RatingTag::Current, 9)
        .expect("on scale");

    let scores = engine_for(&settings).score(&bank, &responses);
    let strategy = scores.get(Pillar::Strategy).expect("strategy scored");
    assert_eq!(strategy.current, 7.0);
    assert_eq!(maturity_tier(strategy.current), MaturityTier::Advanced);

    let report = AssessmentReport::build(&scores, &RecommendationTable::standard());
    let result = report.get(Pillar::Strategy).expect("strategy result");
    assert_eq!(result.tier, MaturityTier::Advanced);
    assert_eq!(result.recommendation, "Your innovation strategy is strong.");
}

#[test]
fn mean_uses_answered_questions_only_by_default() {
    let settings = settings();
    let bank = strategy_bank();
    let mut responses = store(&settings);
    responses
        .set_rating(Pillar::Strategy, 0, RatingTag::Current, 5)
        .expect("on scale");

    let scores = engine_for(&settings).score(&bank, &responses);
    let strategy = scores.get(Pillar::Strategy).expect("strategy scored");
    assert_eq!(strategy.current, 5.0);
    assert_eq!(strategy.answered_current, 1);
    assert_eq!(strategy.question_count, 2);
}

#[test]
fn zero_fill_counts_unanswered_questions_as_zero() {
    let settings = zero_fill_settings();
    let bank = strategy_bank();
    let mut responses = store(&settings);
    responses
        .set_rating(Pillar::Strategy, 0, RatingTag::Current, 5)
        .expect("on scale");

    let scores = engine_for(&settings).score(&bank, &responses);
    assert_eq!(scores.get(Pillar::Strategy).map(|s| s.current), Some(2.5));
}

#[test]
fn pillar_without_answers_scores_zero() {
    let settings = settings();
    let bank = QuestionBank::standard();
    let responses = store(&settings);

    let scores = engine_for(&settings).score(&bank, &responses);
    assert_eq!(scores.len(), 4);
    for score in scores.iter() {
        assert_eq!(score.current, 0.0);
        assert_eq!(score.desired, Some(0.0));
        assert_eq!(maturity_tier(score.current), MaturityTier::EarlyStage);
    }
}

#[test]
fn desired_scores_and_gap_in_gap_mode() {
    let settings = settings();
    let bank = two_pillar_bank();
    let mut responses = store(&settings);
    for (question, current, desired) in [(0, 2, 9), (1, 5, 7)] {
        responses
            .set_rating(Pillar::Strategy, question, RatingTag::Current, current)
            .expect("on scale");
        responses
            .set_rating(Pillar::Strategy, question, RatingTag::Desired, desired)
            .expect("on scale");
    }

    let scores = engine_for(&settings).score(&bank, &responses);
    let strategy = scores.get(Pillar::Strategy).expect("strategy scored");
    assert_eq!(strategy.current, 3.5);
    assert_eq!(strategy.desired, Some(8.0));
    assert_eq!(strategy.gap(), Some(4.5));
    assert_eq!(strategy.answered_desired, 2);
}

#[test]
fn single_state_mode_ignores_desired_ratings() {
    let settings = single_state_settings();
    let bank = strategy_bank();
    let mut responses = store(&settings);
    responses
        .set_rating(Pillar::Strategy, 0, RatingTag::Current, 7)
        .expect("on scale");
    responses
        .set_rating(Pillar::Strategy, 0, RatingTag::Desired, 9)
        .expect("on scale");

    let scores = engine_for(&settings).score(&bank, &responses);
    let strategy = scores.get(Pillar::Strategy).expect("strategy scored");
    assert_eq!(strategy.current, 7.0);
    assert_eq!(strategy.desired, None);
    assert_eq!(strategy.gap(), None);
}

#[test]
fn rewriting_a_rating_is_idempotent() {
    let settings = settings();
    let bank = strategy_bank();
    let mut responses = store(&settings);
    for _ in 0..3 {
        responses
            .set_rating(Pillar::Strategy, 0, RatingTag::Current, 7)
            .expect("on scale");
    }

    assert_eq!(responses.count_answered(), 1);
    let scores = engine_for(&settings).score(&bank, &responses);
    assert_eq!(scores.get(Pillar::Strategy).map(|s| s.current), Some(7.0));
}

#[test]
fn ratings_off_the_active_scale_are_not_stored() {
    let settings = settings();
    let mut responses = store(&settings);
    let error = responses
        .set_rating(Pillar::Capacity, 0, RatingTag::Current, 3)
        .expect_err("3 is not a four-point value");
    assert_eq!(error.value, 3);
    assert_eq!(error.allowed, "2, 5, 7, 9");
    assert!(responses.is_empty());

    let six_point = six_point_settings();
    let mut responses = store(&six_point);
    assert!(responses
        .set_rating(Pillar::Capacity, 0, RatingTag::Current, 10)
        .is_ok());
    assert!(responses
        .set_rating(Pillar::Capacity, 0, RatingTag::Current, 9)
        .is_err());
    assert_eq!(
        responses.rating(Pillar::Capacity, 0, RatingTag::Current).map(|r| r.value()),
        Some(10)
    );
}
