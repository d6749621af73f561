use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::{
    assessment_router, AssessmentMode, AssessmentSession, AssessmentSettings, IntakeSchema,
    MissingAnswerPolicy, Pillar, PillarSection, QuestionBank, RatingScaleKind, RatingTag,
    ResponseStore, WizardController,
};

pub(super) fn settings() -> AssessmentSettings {
    AssessmentSettings::default()
}

pub(super) fn single_state_settings() -> AssessmentSettings {
    AssessmentSettings {
        mode: AssessmentMode::SingleState,
        ..AssessmentSettings::default()
    }
}

pub(super) fn zero_fill_settings() -> AssessmentSettings {
    AssessmentSettings {
        missing_answers: MissingAnswerPolicy::ZeroFill,
        ..AssessmentSettings::default()
    }
}

pub(super) fn six_point_settings() -> AssessmentSettings {
    AssessmentSettings {
        scale: RatingScaleKind::SixPoint,
        ..AssessmentSettings::default()
    }
}

/// One "Strategy" pillar with two questions.
pub(super) fn strategy_bank() -> QuestionBank {
    QuestionBank::new(vec![PillarSection::new(
        Pillar::Strategy,
        ["Is the vision clear", "Is the roadmap funded"],
    )])
    .expect("valid bank")
}

pub(super) fn two_pillar_bank() -> QuestionBank {
    QuestionBank::new(vec![
        PillarSection::new(Pillar::Strategy, ["S1", "S2"]),
        PillarSection::new(Pillar::Capacity, ["C1"]),
    ])
    .expect("valid bank")
}

pub(super) fn store(settings: &AssessmentSettings) -> ResponseStore {
    ResponseStore::new(settings.scale.scale())
}

pub(super) fn fill_intake(wizard: &mut WizardController) {
    for (field, value) in [
        ("Organisation", "Acme Labs"),
        ("Email", "a@b.com"),
        ("Experience Years", "12"),
        ("Number of Employees", "40"),
        ("Location", "Leeds"),
    ] {
        wizard.update_field(field, value).expect("intake field");
    }
}

pub(super) fn wizard_in_answering(bank: QuestionBank, settings: AssessmentSettings) -> WizardController {
    let mut wizard = WizardController::new(bank, IntakeSchema::organisation(), settings);
    fill_intake(&mut wizard);
    wizard.submit_intake().expect("intake accepted");
    wizard
}

/// Answer every question of `pillar` with the same ratings.
pub(super) fn answer_pillar(
    wizard: &mut WizardController,
    pillar: Pillar,
    current: u8,
    desired: Option<u8>,
) {
    let count = wizard.question_bank().questions_for(pillar).len();
    for question in 0..count {
        wizard
            .answer(pillar, question, RatingTag::Current, current)
            .expect("current rating");
        if let Some(desired) = desired {
            wizard
                .answer(pillar, question, RatingTag::Desired, desired)
                .expect("desired rating");
        }
    }
}

pub(super) fn session_router(wizard: WizardController) -> (Arc<AssessmentSession>, axum::Router) {
    let session = Arc::new(AssessmentSession::new(wizard));
    let router = assessment_router(session.clone());
    (session, router)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
