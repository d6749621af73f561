use crate::infra::score_responses;
use chrono::{Local, NaiveDate};
use clap::Args;
use innovation_assessment::assessment::{
    AssessmentMode, AssessmentReport, AssessmentSettings, MissingAnswerPolicy, Pillar,
    RatingScaleKind, RatingTag, WizardController,
};
use innovation_assessment::config::AppConfig;
use innovation_assessment::error::AppError;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Response CSV with pillar, question, current and desired columns
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Rating scale the responses were captured on (overrides APP_RATING_SCALE)
    #[arg(long, value_parser = crate::infra::parse_scale)]
    pub(crate) scale: Option<RatingScaleKind>,
    /// Assessment mode (overrides APP_ASSESSMENT_MODE)
    #[arg(long, value_parser = crate::infra::parse_mode)]
    pub(crate) mode: Option<AssessmentMode>,
    /// How unanswered questions count toward averages (overrides APP_MISSING_ANSWERS)
    #[arg(long, value_parser = crate::infra::parse_missing_answers)]
    pub(crate) missing_answers: Option<MissingAnswerPolicy>,
    /// Assessment date printed on the report (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) assessed_on: Option<NaiveDate>,
    /// Write the current-vs-desired gap chart to this SVG file
    #[arg(long)]
    pub(crate) svg: Option<PathBuf>,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the gap chart produced at the end of the walkthrough to this SVG file
    #[arg(long)]
    pub(crate) svg: Option<PathBuf>,
    /// Only capture the current state of each pillar
    #[arg(long)]
    pub(crate) single_state: bool,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        responses,
        scale,
        mode,
        missing_answers,
        assessed_on,
        svg,
        json,
    } = args;

    let mut settings = AppConfig::load()?.assessment;
    if let Some(scale) = scale {
        settings.scale = scale;
    }
    if let Some(mode) = mode {
        settings.mode = mode;
    }
    if let Some(policy) = missing_answers {
        settings.missing_answers = policy;
    }

    let assessed_on = assessed_on.unwrap_or_else(|| Local::now().date_naive());
    let scored = score_responses(File::open(&responses)?, &settings)?;

    if json {
        let response = crate::routes::build_score_response(
            scored.report.clone(),
            scored.answered,
            settings,
            assessed_on,
            false,
        );
        let rendered = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        println!("Innovation assessment report ({assessed_on})");
        println!("- Source: {}", responses.display());
        println!(
            "- {} scale | {} | {} | {} ratings imported",
            settings.scale.label(),
            settings.mode.label(),
            settings.missing_answers.label(),
            scored.answered
        );
        render_report(&scored.report);
    }

    if let Some(path) = svg {
        write_gap_chart(&scored.report, &path)?;
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { svg, single_state } = args;

    let settings = AssessmentSettings {
        mode: if single_state {
            AssessmentMode::SingleState
        } else {
            AssessmentMode::GapAnalysis
        },
        ..AssessmentSettings::default()
    };
    let mut wizard = WizardController::standard(settings);

    println!("Innovation self-assessment walkthrough");
    println!(
        "- {} scale | {} | {} pillars",
        settings.scale.label(),
        settings.mode.label(),
        wizard.question_bank().pillar_count()
    );

    println!("\nStep: {}", wizard.snapshot().step_label);
    if let Err(err) = wizard.submit_intake() {
        println!("  Empty form rejected: {err}");
    }

    for (field, value) in [
        ("Organisation", "Northwind Robotics"),
        ("Email", "ops.northwind.example"),
        ("Experience Years", "6"),
        ("Number of Employees", "140"),
        ("Location", "Leeds"),
    ] {
        wizard.update_field(field, value)?;
    }
    if let Err(err) = wizard.submit_intake() {
        println!("  Malformed email rejected: {err}");
    }
    wizard.update_field("Email", "ops@northwind.example")?;
    wizard.submit_intake()?;
    println!(
        "  Intake accepted for {}",
        wizard.intake().display_name().unwrap_or("-")
    );

    let options: Vec<u8> = settings
        .scale
        .scale()
        .options()
        .iter()
        .map(|option| option.value)
        .collect();

    let pillars: Vec<Pillar> = wizard.question_bank().pillars().collect();
    for (pillar_offset, pillar) in pillars.into_iter().enumerate() {
        let snapshot = wizard.snapshot();
        println!(
            "\nStep: {} ({:.0}% complete)",
            snapshot.step_label, snapshot.progress_percent
        );

        if pillar_offset == 0 {
            if let Err(err) = wizard.next_pillar() {
                println!("  Advance blocked: {err}");
            }
        }

        let question_count = wizard.question_bank().questions_for(pillar).len();
        for question in 0..question_count {
            let current = options[(pillar_offset + question) % options.len()];
            wizard.answer(pillar, question, RatingTag::Current, current)?;
            if settings.mode.tracks(RatingTag::Desired) {
                let desired = options[options.len() - 1 - question % 2];
                wizard.answer(pillar, question, RatingTag::Desired, desired.max(current))?;
            }
        }
        println!("  Answered {question_count} questions");

        if pillar_offset == 1 {
            wizard.previous_pillar()?;
            println!("  Went back to {}", wizard.snapshot().step_label);
            wizard.next_pillar()?;
        }

        if pillar_offset + 1 == wizard.question_bank().pillar_count() {
            wizard.view_results()?;
        } else {
            wizard.next_pillar()?;
        }
    }

    println!("\nStep: {}", wizard.snapshot().step_label);
    let report = wizard.results()?;
    render_report(&report);

    if let Some(path) = svg {
        write_gap_chart(&report, &path)?;
    }

    let cleared = wizard.responses().count_answered();
    wizard.restart();
    println!(
        "\nRestarted: back on {} for {} ({} ratings cleared)",
        wizard.snapshot().step_label,
        wizard.intake().display_name().unwrap_or("-"),
        cleared
    );

    Ok(())
}

fn render_report(report: &AssessmentReport) {
    let summary = report.summary();

    println!("Pillar scores:");
    for pillar in &summary.pillars {
        let desired = pillar
            .desired
            .map(|value| format!(" | desired {value:.2} (gap {:.2})", pillar.gap.unwrap_or(0.0)))
            .unwrap_or_default();
        println!(
            "- {}: current {:.2}{} -> {} ({}/{} answered)",
            pillar.pillar_label,
            pillar.current,
            desired,
            pillar.maturity_label,
            pillar.answered_current,
            pillar.question_count
        );
        println!("    {}", pillar.recommendation);
    }

    match summary.overall_desired {
        Some(desired) => println!(
            "Overall: current {:.2} | desired {:.2} -> {}",
            summary.overall_current, desired, summary.overall_maturity_label
        ),
        None => println!(
            "Overall: current {:.2} -> {}",
            summary.overall_current, summary.overall_maturity_label
        ),
    }

    if let Some(focus) = summary.focus {
        println!("Focus area: {} ({})", focus.pillar_label, focus.reason_label);
    }
}

fn write_gap_chart(report: &AssessmentReport, path: &Path) -> Result<(), AppError> {
    std::fs::write(path, report.gap_chart().render_svg())?;
    println!("Gap chart written to {}", path.display());
    Ok(())
}
