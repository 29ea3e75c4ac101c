use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    dates::{format_day, parse_day},
    nutrients::MacroKey,
};

/// Daily targets. A missing or zero value means "no goal set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSet {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

impl GoalSet {
    pub fn get(&self, key: MacroKey) -> f64 {
        match key {
            MacroKey::Calories => self.calories,
            MacroKey::Protein => self.protein,
            MacroKey::Carbs => self.carbs,
            MacroKey::Fat => self.fat,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for key in MacroKey::ALL {
            let v = self.get(key);
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{key} goal must be a non-negative number"));
            }
        }
        Ok(())
    }
}

/// Goals that apply from `effective_date` onwards, until a later snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalSnapshot {
    pub effective_date: Date,
    pub goals: GoalSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSnapshotRecord {
    #[serde(alias = "effectiveDate")]
    pub effective_date: String,
    pub goals: GoalSet,
}

impl GoalSnapshotRecord {
    pub fn into_snapshot(self) -> Option<GoalSnapshot> {
        let effective_date = parse_day(&self.effective_date)?;
        self.goals.validate().ok()?;
        Some(GoalSnapshot {
            effective_date,
            goals: self.goals,
        })
    }
}

impl From<&GoalSnapshot> for GoalSnapshotRecord {
    fn from(s: &GoalSnapshot) -> Self {
        Self {
            effective_date: format_day(s.effective_date),
            goals: s.goals,
        }
    }
}
