use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nutrients::MacroKey;

/// A library food. Macro values are per 100 g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    /// Explicit icon tag; when absent it is resolved from the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Food {
    pub fn macro_value(&self, key: MacroKey) -> f64 {
        match key {
            MacroKey::Calories => self.calories,
            MacroKey::Protein => self.protein,
            MacroKey::Carbs => self.carbs,
            MacroKey::Fat => self.fat,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("food name must not be empty".into());
        }
        for key in MacroKey::ALL {
            let v = self.macro_value(key);
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{key} must be a non-negative number"));
            }
        }
        Ok(())
    }
}
