use serde::{Deserialize, Serialize};

use crate::{
    nutrients::MacroKey,
    stats::reconcile::{MacroSeries, MacroTimePoint, SeriesPoint},
};

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Chart lines for one macro. Only calories are charted against their goal.
#[derive(Debug, Serialize)]
pub struct MacroChart {
    pub intake: Vec<SeriesPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Vec<SeriesPoint>>,
}

impl From<&MacroSeries> for MacroChart {
    fn from(series: &MacroSeries) -> Self {
        let goal = (series.macro_key == MacroKey::Calories).then(|| series.goal_series());
        Self {
            intake: series.intake_series(),
            goal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub days: usize,
    pub skipped_records: usize,
    pub skipped_items: usize,
    pub calories: MacroChart,
    pub protein: MacroChart,
    pub carbs: MacroChart,
    pub fat: MacroChart,
}

#[derive(Debug, Serialize)]
pub struct MacroStatsResponse {
    pub macro_key: MacroKey,
    pub points: Vec<MacroTimePoint>,
    pub intake: Vec<SeriesPoint>,
    pub goal: Vec<SeriesPoint>,
    pub skipped_records: usize,
    pub skipped_items: usize,
}
