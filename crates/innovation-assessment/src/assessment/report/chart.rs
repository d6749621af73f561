//! Chart data for results: plain series for bar/radar charts and the
//! current-vs-desired gap plot with its SVG rendering.

use super::super::domain::Pillar;
use super::summary::PillarResult;
use serde::Serialize;

pub const CHART_VALUE_MAX: f32 = 10.0;
pub const CHART_TICK_STEP: f32 = 2.0;
/// The gap plot labels every integer on its axis.
pub const GAP_AXIS_TICK_STEP: usize = 1;

const VIEW_WIDTH: f32 = 600.0;
const VIEW_HEIGHT: f32 = 320.0;
const PLOT_TOP: f32 = 50.0;
const PLOT_BOTTOM: f32 = 250.0;
const PLOT_LEFT: f32 = 60.0;
const PLOT_RIGHT: f32 = 560.0;
const FIRST_PILLAR_X: f32 = 120.0;
const PILLAR_SPACING: f32 = 120.0;
const POINT_RADIUS: f32 = 6.0;

const CURRENT_COLOR: &str = "#4f46e5";
const DESIRED_COLOR: &str = "#22c55e";
const GAP_LINE_COLOR: &str = "#9ca3af";
const GRID_COLOR: &str = "#e5e7eb";
const AXIS_COLOR: &str = "#374151";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<&'static str>,
    pub current: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired: Option<Vec<f32>>,
    pub axis_min: f32,
    pub axis_max: f32,
    pub tick_step: f32,
}

impl ChartSeries {
    pub(crate) fn from_results(results: &[PillarResult]) -> Self {
        Self {
            labels: results
                .iter()
                .map(|result| result.score.pillar.label())
                .collect(),
            current: results.iter().map(|result| result.score.current).collect(),
            desired: results.iter().map(|result| result.score.desired).collect(),
            axis_min: 0.0,
            axis_max: CHART_VALUE_MAX,
            tick_step: CHART_TICK_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapChartPoint {
    pub pillar: Pillar,
    pub label: &'static str,
    pub x: f32,
    pub current: f32,
    pub current_y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_y: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapChart {
    pub width: f32,
    pub height: f32,
    pub points: Vec<GapChartPoint>,
}

impl GapChart {
    pub(crate) fn from_results(results: &[PillarResult]) -> Self {
        let points = results
            .iter()
            .enumerate()
            .map(|(index, result)| GapChartPoint {
                pillar: result.score.pillar,
                label: result.score.pillar.label(),
                x: pillar_x(index),
                current: result.score.current,
                current_y: value_y(result.score.current),
                desired: result.score.desired,
                desired_y: result.score.desired.map(value_y),
            })
            .collect();

        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
            points,
        }
    }

    pub fn render_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" font-family="sans-serif" font-size="12">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');

        for tick in (0..=CHART_VALUE_MAX as u8).step_by(GAP_AXIS_TICK_STEP) {
            let y = value_y(f32::from(tick));
            svg.push_str(&format!(
                r#"  <line x1="{PLOT_LEFT}" y1="{y}" x2="{PLOT_RIGHT}" y2="{y}" stroke="{GRID_COLOR}" stroke-width="1" />"#
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"  <text x="{}" y="{}" text-anchor="end">{tick}</text>"#,
                PLOT_LEFT - 8.0,
                y + 4.0
            ));
            svg.push('\n');
        }

        svg.push_str(&format!(
            r#"  <line x1="{PLOT_LEFT}" y1="{PLOT_TOP}" x2="{PLOT_LEFT}" y2="{PLOT_BOTTOM}" stroke="{AXIS_COLOR}" stroke-width="2" />"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <line x1="{PLOT_LEFT}" y1="{PLOT_BOTTOM}" x2="{PLOT_RIGHT}" y2="{PLOT_BOTTOM}" stroke="{AXIS_COLOR}" stroke-width="2" />"#
        ));
        svg.push('\n');

        for point in &self.points {
            let x = point.x;
            if let Some(desired_y) = point.desired_y {
                svg.push_str(&format!(
                    r#"  <line x1="{x}" y1="{}" x2="{x}" y2="{desired_y}" stroke="{GAP_LINE_COLOR}" stroke-width="2" stroke-dasharray="4 4" />"#,
                    point.current_y
                ));
                svg.push('\n');
            }

            svg.push_str(&format!(
                r#"  <circle cx="{x}" cy="{}" r="{POINT_RADIUS}" fill="{CURRENT_COLOR}" />"#,
                point.current_y
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"  <text x="{}" y="{}" fill="{CURRENT_COLOR}">{:.1}</text>"#,
                x + 10.0,
                point.current_y + 4.0,
                point.current
            ));
            svg.push('\n');

            if let (Some(desired), Some(desired_y)) = (point.desired, point.desired_y) {
                svg.push_str(&format!(
                    r#"  <circle cx="{x}" cy="{desired_y}" r="{POINT_RADIUS}" fill="{DESIRED_COLOR}" />"#
                ));
                svg.push('\n');
                svg.push_str(&format!(
                    r#"  <text x="{}" y="{}" fill="{DESIRED_COLOR}">{desired:.1}</text>"#,
                    x + 10.0,
                    desired_y + 4.0
                ));
                svg.push('\n');
            }

            svg.push_str(&format!(
                r#"  <text x="{x}" y="{}" text-anchor="middle">{}</text>"#,
                PLOT_BOTTOM + 20.0,
                point.label
            ));
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn pillar_x(index: usize) -> f32 {
    FIRST_PILLAR_X + PILLAR_SPACING * index as f32
}

/// Map a 0-10 value onto the plot, clamping anything outside the axis.
fn value_y(value: f32) -> f32 {
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, CHART_VALUE_MAX)
    };
    PLOT_BOTTOM - clamped * (PLOT_BOTTOM - PLOT_TOP) / CHART_VALUE_MAX
}
