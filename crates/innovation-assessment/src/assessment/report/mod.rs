mod chart;
mod summary;
pub mod views;

pub use chart::{ChartSeries, GapChart, GapChartPoint};
pub use summary::{AssessmentReport, PillarResult};
