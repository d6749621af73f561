use innovation_assessment::assessment::{
    AssessmentMode, AssessmentSettings, IntakeSchema, MaturityTier, MissingAnswerPolicy, Pillar,
    PillarSection, QuestionBank, RatingScaleKind, RatingTag, RecommendationTable, ValidationError,
    WizardController, WizardError, WizardPhase,
};

fn complete_intake(wizard: &mut WizardController) {
    wizard
        .update_field("Organisation", "Northwind Studio")
        .expect("field");
    wizard
        .update_field("Email", "lead@northwind.io")
        .expect("field");
    wizard.update_field("Experience Years", "8").expect("field");
    wizard
        .update_field("Number of Employees", "25")
        .expect("field");
    wizard.update_field("Location", "Bristol").expect("field");
}

fn answer_all(wizard: &mut WizardController, pillar: Pillar, current: u8, desired: u8) {
    let count = wizard.question_bank().questions_for(pillar).len();
    for question in 0..count {
        wizard
            .answer(pillar, question, RatingTag::Current, current)
            .expect("current");
        wizard
            .answer(pillar, question, RatingTag::Desired, desired)
            .expect("desired");
    }
}

#[test]
fn standard_wizard_walks_every_pillar_to_results() {
    let mut wizard = WizardController::standard(AssessmentSettings::default());

    assert!(matches!(
        wizard.submit_intake(),
        Err(WizardError::Validation(
            ValidationError::MissingRequiredFields { .. }
        ))
    ));
    complete_intake(&mut wizard);
    wizard.submit_intake().expect("intake accepted");

    let plan = [
        (Pillar::Strategy, 2, 9),
        (Pillar::Capacity, 5, 7),
        (Pillar::Discipline, 7, 9),
        (Pillar::Performance, 9, 9),
    ];
    for (index, (pillar, current, desired)) in plan.into_iter().enumerate() {
        assert_eq!(wizard.current_pillar_index(), index);
        assert_eq!(wizard.current_pillar(), Some(pillar));
        assert!(wizard.next_pillar().is_err());
        answer_all(&mut wizard, pillar, current, desired);
        wizard.next_pillar().expect("pillar complete");
    }

    assert_eq!(wizard.phase(), WizardPhase::Results);
    let summary = wizard.results().expect("results").summary();
    let tiers: Vec<MaturityTier> = summary.pillars.iter().map(|view| view.maturity).collect();
    assert_eq!(
        tiers,
        vec![
            MaturityTier::EarlyStage,
            MaturityTier::Developing,
            MaturityTier::Advanced,
            MaturityTier::Leading,
        ]
    );
    assert_eq!(
        summary.focus.map(|focus| focus.pillar),
        Some(Pillar::Strategy)
    );

    wizard.restart();
    assert_eq!(wizard.phase(), WizardPhase::Intake);
    assert!(wizard.responses().is_empty());
    wizard.submit_intake().expect("organisation fields survive restart");
}

#[test]
fn custom_bank_schema_and_recommendations() {
    let bank = QuestionBank::new(vec![
        PillarSection::new(Pillar::Performance, ["Revenue from new offers", "Time to market"]),
        PillarSection::new(Pillar::Strategy, ["Innovation thesis"]),
    ])
    .expect("valid bank");
    let schema = IntakeSchema::from_names(["Team", "Email", "Notes"]).expect("valid schema");
    let table = RecommendationTable::from_entries(Pillar::ordered().into_iter().flat_map(|pillar| {
        MaturityTier::ordered()
            .into_iter()
            .map(move |tier| (pillar, tier, format!("{} at {}", pillar, tier.label())))
    }))
    .expect("complete table");

    let settings = AssessmentSettings {
        scale: RatingScaleKind::SixPoint,
        mode: AssessmentMode::SingleState,
        missing_answers: MissingAnswerPolicy::ExcludeUnanswered,
        allow_back_navigation: true,
    };
    let mut wizard = WizardController::new(bank, schema, settings).with_recommendations(table);

    wizard.update_field("team", "Platform").expect("field");
    wizard.update_field("EMAIL", "ops@example.com").expect("field");
    wizard.submit_intake().expect("notes optional");
    assert_eq!(wizard.current_pillar(), Some(Pillar::Performance));

    wizard
        .answer(Pillar::Performance, 0, RatingTag::Current, 10)
        .expect("rating");
    wizard
        .answer(Pillar::Performance, 1, RatingTag::Current, 8)
        .expect("rating");
    wizard.next_pillar().expect("performance complete");
    wizard
        .answer(Pillar::Strategy, 0, RatingTag::Current, 2)
        .expect("rating");
    wizard.view_results().expect("final pillar");

    let report = wizard.results().expect("results");
    let performance = report.get(Pillar::Performance).expect("performance");
    assert_eq!(performance.score.current, 9.0);
    assert_eq!(performance.recommendation, "Performance at Leading");
    assert_eq!(
        report.get(Pillar::Strategy).map(|result| result.recommendation.as_str()),
        Some("Strategy at Early Stage")
    );
    assert!(report.get(Pillar::Capacity).is_none());
}
