use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroKey {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl MacroKey {
    pub const ALL: [MacroKey; 4] = [
        MacroKey::Calories,
        MacroKey::Protein,
        MacroKey::Carbs,
        MacroKey::Fat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MacroKey::Calories => "calories",
            MacroKey::Protein => "protein",
            MacroKey::Carbs => "carbs",
            MacroKey::Fat => "fat",
        }
    }
}

impl fmt::Display for MacroKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MacroKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calories" | "kcal" => Ok(MacroKey::Calories),
            "protein" => Ok(MacroKey::Protein),
            "carbs" | "carbohydrates" => Ok(MacroKey::Carbs),
            "fat" => Ok(MacroKey::Fat),
            other => Err(format!("unknown macro '{other}'")),
        }
    }
}
