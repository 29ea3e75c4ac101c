use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::foods::repo_types::Food;

#[derive(Debug, Deserialize)]
pub struct FoodRequest {
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    pub icon: Option<String>,
}

impl FoodRequest {
    pub fn into_food(self, id: Uuid) -> Food {
        Food {
            id,
            name: self.name.trim().to_string(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            icon: self
                .icon
                .map(|i| i.trim().to_lowercase())
                .filter(|i| !i.is_empty()),
        }
    }
}

/// A food plus the icon it resolves to in the requested locale.
#[derive(Debug, Serialize)]
pub struct FoodListItem {
    #[serde(flatten)]
    pub food: Food,
    pub resolved_icon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FoodListResponse {
    pub items: Vec<FoodListItem>,
    pub total: usize,
    pub skipped_records: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub locale: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub locale: String,
    pub items: Vec<FoodListItem>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    pub locale: Option<String>,
}

fn default_limit() -> usize {
    20
}
