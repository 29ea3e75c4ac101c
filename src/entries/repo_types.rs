use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    dates::{format_day, parse_day},
    foods::repo_types::Food,
};

/// A food logged on a day. The food is copied in, so later edits to the
/// library do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryItem {
    pub food: Food,
    pub grams: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyEntry {
    pub date: Date,
    pub items: Vec<EntryItem>,
}

/// Stored shape of a [`DailyEntry`]; the date may carry a time of day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    pub date: String,
    #[serde(default)]
    pub items: Vec<EntryItem>,
}

impl EntryRecord {
    pub fn into_entry(self) -> Option<DailyEntry> {
        let date = parse_day(&self.date)?;
        Some(DailyEntry {
            date,
            items: self.items,
        })
    }
}

impl From<&DailyEntry> for EntryRecord {
    fn from(e: &DailyEntry) -> Self {
        Self {
            date: format_day(e.date),
            items: e.items.clone(),
        }
    }
}
