//! Historical intake vs. the goals that were in effect on each day.

use serde::Serialize;
use time::Date;
use tracing::warn;

use crate::{
    dates::to_timestamp,
    entries::repo_types::DailyEntry,
    goals::repo_types::{GoalSet, GoalSnapshot},
    nutrients::MacroKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroTimePoint {
    pub timestamp: i64,
    pub intake: f64,
    pub goal: f64,
}

/// `(timestamp, value)` pair of a single chart line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: i64,
    pub value: f64,
}

/// Goal history ordered by effective date, for "latest snapshot on or
/// before a day" lookups.
pub struct GoalTimeline<'a> {
    sorted: Vec<&'a GoalSnapshot>,
}

impl<'a> GoalTimeline<'a> {
    pub fn new(history: &'a [GoalSnapshot]) -> Self {
        let mut sorted: Vec<&GoalSnapshot> = history.iter().collect();
        // stable: same-day snapshots stay in append order
        sorted.sort_by_key(|s| s.effective_date);
        Self { sorted }
    }

    /// Goals of the last snapshot with `effective_date <= day`. On ties the
    /// snapshot appended last wins.
    pub fn goals_on(&self, day: Date) -> Option<&'a GoalSet> {
        let after = self.sorted.partition_point(|s| s.effective_date <= day);
        after.checked_sub(1).map(|i| &self.sorted[i].goals)
    }

    /// Like [`goals_on`](Self::goals_on) but falls back to `current` when the
    /// day predates the whole history.
    pub fn goals_or<'b>(&self, day: Date, current: &'b GoalSet) -> &'b GoalSet
    where
        'a: 'b,
    {
        self.goals_on(day).unwrap_or(current)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacroSeries {
    pub macro_key: MacroKey,
    pub points: Vec<MacroTimePoint>,
    /// Items whose contribution was not a finite number.
    pub skipped_items: usize,
}

impl MacroSeries {
    pub fn intake_series(&self) -> Vec<SeriesPoint> {
        self.points
            .iter()
            .map(|p| SeriesPoint {
                timestamp: p.timestamp,
                value: p.intake,
            })
            .collect()
    }

    pub fn goal_series(&self) -> Vec<SeriesPoint> {
        self.points
            .iter()
            .map(|p| SeriesPoint {
                timestamp: p.timestamp,
                value: p.goal,
            })
            .collect()
    }
}

/// Sum of `macro / 100 * grams` over the day's items. Non-finite
/// contributions are dropped and counted.
pub fn day_intake(entry: &DailyEntry, key: MacroKey) -> (f64, usize) {
    let mut total = 0.0;
    let mut skipped = 0;
    for (index, item) in entry.items.iter().enumerate() {
        let contribution = (item.food.macro_value(key) / 100.0) * item.grams;
        if contribution.is_finite() {
            total += contribution;
        } else {
            warn!(
                date = %entry.date,
                index,
                food = %item.food.name,
                macro_key = %key,
                "non-finite item contribution; counting as zero"
            );
            skipped += 1;
        }
    }
    (total, skipped)
}

pub fn reconcile(
    entries: &[DailyEntry],
    goal_history: &[GoalSnapshot],
    current_goals: &GoalSet,
    key: MacroKey,
) -> MacroSeries {
    reconcile_with(&GoalTimeline::new(goal_history), entries, current_goals, key)
}

fn reconcile_with(
    timeline: &GoalTimeline<'_>,
    entries: &[DailyEntry],
    current_goals: &GoalSet,
    key: MacroKey,
) -> MacroSeries {
    let mut skipped_items = 0;
    let mut points: Vec<MacroTimePoint> = entries
        .iter()
        .map(|entry| {
            let (intake, skipped) = day_intake(entry, key);
            skipped_items += skipped;
            MacroTimePoint {
                timestamp: to_timestamp(entry.date),
                intake,
                goal: timeline.goals_or(entry.date, current_goals).get(key),
            }
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);
    MacroSeries {
        macro_key: key,
        points,
        skipped_items,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalStats {
    pub calories: MacroSeries,
    pub protein: MacroSeries,
    pub carbs: MacroSeries,
    pub fat: MacroSeries,
}

impl HistoricalStats {
    pub fn get(&self, key: MacroKey) -> &MacroSeries {
        match key {
            MacroKey::Calories => &self.calories,
            MacroKey::Protein => &self.protein,
            MacroKey::Carbs => &self.carbs,
            MacroKey::Fat => &self.fat,
        }
    }
}

/// All four series off a single timeline build.
pub fn reconcile_all(
    entries: &[DailyEntry],
    goal_history: &[GoalSnapshot],
    current_goals: &GoalSet,
) -> HistoricalStats {
    let timeline = GoalTimeline::new(goal_history);
    HistoricalStats {
        calories: reconcile_with(&timeline, entries, current_goals, MacroKey::Calories),
        protein: reconcile_with(&timeline, entries, current_goals, MacroKey::Protein),
        carbs: reconcile_with(&timeline, entries, current_goals, MacroKey::Carbs),
        fat: reconcile_with(&timeline, entries, current_goals, MacroKey::Fat),
    }
}

/// Sub-slice of date-sorted `entries` within `[from, to]`.
pub fn date_range(entries: &[DailyEntry], from: Option<Date>, to: Option<Date>) -> &[DailyEntry] {
    let start = from.map_or(0, |f| entries.partition_point(|e| e.date < f));
    let end = to.map_or(entries.len(), |t| entries.partition_point(|e| e.date <= t));
    if start >= end {
        return &[];
    }
    &entries[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entries::repo_types::EntryItem, foods::repo_types::Food};
    use time::macros::date;
    use uuid::Uuid;

    fn food(calories: f64, protein: f64) -> Food {
        Food {
            id: Uuid::new_v4(),
            name: "food".into(),
            calories,
            protein,
            carbs: 0.0,
            fat: 0.0,
            icon: None,
        }
    }

    fn entry(date: Date, items: &[(f64, f64)]) -> DailyEntry {
        DailyEntry {
            date,
            items: items
                .iter()
                .map(|&(calories, grams)| EntryItem {
                    food: food(calories, 10.0),
                    grams,
                })
                .collect(),
        }
    }

    fn snapshot(effective_date: Date, calories: f64) -> GoalSnapshot {
        GoalSnapshot {
            effective_date,
            goals: GoalSet {
                calories,
                ..GoalSet::default()
            },
        }
    }

    fn current() -> GoalSet {
        GoalSet {
            calories: 2500.0,
            protein: 120.0,
            carbs: 300.0,
            fat: 80.0,
        }
    }

    #[test]
    fn picks_goal_in_effect_on_the_day() {
        let entries = vec![entry(date!(2024 - 01 - 01), &[(200.0, 100.0)])];
        let history = vec![
            snapshot(date!(2023 - 12 - 01), 1800.0),
            snapshot(date!(2024 - 01 - 01), 2000.0),
        ];
        let series = reconcile(&entries, &history, &current(), MacroKey::Calories);
        assert_eq!(
            series.points,
            vec![MacroTimePoint {
                timestamp: to_timestamp(date!(2024 - 01 - 01)),
                intake: 200.0,
                goal: 2000.0,
            }]
        );
    }

    #[test]
    fn older_goal_applies_before_change() {
        let entries = vec![
            entry(date!(2024 - 01 - 10), &[(100.0, 100.0)]),
            entry(date!(2024 - 02 - 10), &[(100.0, 100.0)]),
        ];
        let history = vec![
            snapshot(date!(2024 - 01 - 01), 1800.0),
            snapshot(date!(2024 - 02 - 01), 2200.0),
        ];
        let goals: Vec<f64> = reconcile(&entries, &history, &current(), MacroKey::Calories)
            .points
            .iter()
            .map(|p| p.goal)
            .collect();
        assert_eq!(goals, vec![1800.0, 2200.0]);
    }

    #[test]
    fn empty_history_uses_current_goals() {
        let entries = vec![
            entry(date!(2024 - 01 - 01), &[(100.0, 50.0)]),
            entry(date!(2024 - 01 - 02), &[(100.0, 50.0)]),
        ];
        for key in MacroKey::ALL {
            let series = reconcile(&entries, &[], &current(), key);
            assert!(series.points.iter().all(|p| p.goal == current().get(key)));
        }
    }

    #[test]
    fn entries_before_any_snapshot_fall_back() {
        let entries = vec![entry(date!(2023 - 06 - 01), &[(100.0, 50.0)])];
        let history = vec![snapshot(date!(2024 - 01 - 01), 1800.0)];
        let series = reconcile(&entries, &history, &current(), MacroKey::Calories);
        assert_eq!(series.points[0].goal, 2500.0);
    }

    #[test]
    fn same_day_snapshots_last_appended_wins() {
        let entries = vec![
            entry(date!(2024 - 03 - 01), &[(100.0, 100.0)]),
            entry(date!(2024 - 03 - 05), &[(100.0, 100.0)]),
        ];
        let history = vec![
            snapshot(date!(2024 - 03 - 01), 1500.0),
            snapshot(date!(2024 - 01 - 01), 1000.0),
            snapshot(date!(2024 - 03 - 01), 1700.0),
        ];
        let series = reconcile(&entries, &history, &current(), MacroKey::Calories);
        assert!(series.points.iter().all(|p| p.goal == 1700.0));
    }

    #[test]
    fn explicit_zero_goal_is_not_a_fallback() {
        let entries = vec![entry(date!(2024 - 01 - 05), &[(100.0, 100.0)])];
        let history = vec![snapshot(date!(2024 - 01 - 01), 1800.0)];
        // the snapshot carries no protein goal, i.e. zero
        let series = reconcile(&entries, &history, &current(), MacroKey::Protein);
        assert_eq!(series.points[0].goal, 0.0);
        assert_eq!(series.points[0].intake, 10.0);
    }

    #[test]
    fn sums_items_without_rounding() {
        let entries = vec![entry(date!(2024 - 01 - 01), &[(52.0, 182.0), (89.0, 118.0)])];
        let series = reconcile(&entries, &[], &current(), MacroKey::Calories);
        let expected = (52.0 / 100.0) * 182.0 + (89.0 / 100.0) * 118.0;
        assert_eq!(series.points[0].intake, expected);
    }

    #[test]
    fn output_is_sorted_and_length_preserving() {
        let entries = vec![
            entry(date!(2024 - 01 - 03), &[(100.0, 100.0)]),
            entry(date!(2023 - 12 - 31), &[(100.0, 100.0)]),
            entry(date!(2024 - 01 - 01), &[(100.0, 100.0)]),
        ];
        let series = reconcile(&entries, &[], &current(), MacroKey::Fat);
        assert_eq!(series.points.len(), entries.len());
        assert!(series
            .points
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn empty_entries_yield_empty_series() {
        let stats = reconcile_all(&[], &[snapshot(date!(2024 - 01 - 01), 1.0)], &current());
        for key in MacroKey::ALL {
            assert!(stats.get(key).points.is_empty());
        }
    }

    #[test]
    fn reconcile_is_idempotent() {
        let entries = vec![
            entry(date!(2024 - 01 - 02), &[(120.0, 80.0)]),
            entry(date!(2024 - 01 - 01), &[(300.0, 40.0)]),
        ];
        let history = vec![snapshot(date!(2024 - 01 - 02), 1900.0)];
        let a = reconcile_all(&entries, &history, &current());
        let b = reconcile_all(&entries, &history, &current());
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_items_count_as_zero() {
        let mut day = entry(date!(2024 - 01 - 01), &[(100.0, 100.0), (100.0, 50.0)]);
        day.items[1].grams = f64::INFINITY;
        let series = reconcile(&[day], &[], &current(), MacroKey::Calories);
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].intake, 100.0);
        assert_eq!(series.skipped_items, 1);
    }

    #[test]
    fn projections_share_timestamps() {
        let entries = vec![
            entry(date!(2024 - 01 - 01), &[(100.0, 100.0)]),
            entry(date!(2024 - 01 - 02), &[(200.0, 100.0)]),
        ];
        let series = reconcile(&entries, &[], &current(), MacroKey::Calories);
        let intake = series.intake_series();
        let goal = series.goal_series();
        assert_eq!(intake.len(), goal.len());
        assert_eq!(intake[1].value, 200.0);
        assert_eq!(goal[1].value, 2500.0);
        assert_eq!(intake[0].timestamp, goal[0].timestamp);
    }

    #[test]
    fn date_range_is_inclusive() {
        let entries = vec![
            entry(date!(2024 - 01 - 01), &[(1.0, 1.0)]),
            entry(date!(2024 - 01 - 02), &[(1.0, 1.0)]),
            entry(date!(2024 - 01 - 03), &[(1.0, 1.0)]),
        ];
        let range = date_range(&entries, Some(date!(2024 - 01 - 02)), Some(date!(2024 - 01 - 03)));
        assert_eq!(range.len(), 2);
        assert_eq!(date_range(&entries, None, None).len(), 3);
        assert!(date_range(&entries, Some(date!(2024 - 02 - 01)), None).is_empty());
        assert!(date_range(&entries, Some(date!(2024 - 01 - 03)), Some(date!(2024 - 01 - 01))).is_empty());
    }
}
