use serde::Serialize;

use crate::{
    entries::repo_types::DailyEntry,
    goals::repo_types::GoalSet,
    nutrients::MacroKey,
    stats::reconcile::day_intake,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroProgress {
    pub intake: f64,
    pub goal: f64,
    /// Negative once the goal is exceeded.
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
}

/// Totals for one day against `goals`, which should be the goals in effect
/// on that day.
pub fn daily_summary(entry: &DailyEntry, goals: &GoalSet) -> DailySummary {
    let progress = |key: MacroKey| {
        let (intake, _) = day_intake(entry, key);
        let goal = goals.get(key);
        MacroProgress {
            intake,
            goal,
            remaining: goal - intake,
        }
    };
    DailySummary {
        calories: progress(MacroKey::Calories),
        protein: progress(MacroKey::Protein),
        carbs: progress(MacroKey::Carbs),
        fat: progress(MacroKey::Fat),
    }
}
