use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::foods::{repo_types::Food, tags::TagIndex};

pub const MIN_QUERY_CHARS: usize = 2;

pub(crate) fn normalize_query(query: &str) -> String {
    lazy_static! {
        static ref SPACES_RE: Regex = Regex::new(r"\s+").unwrap();
    }
    SPACES_RE
        .replace_all(query.trim(), " ")
        .to_lowercase()
}

/// Name matches first, then foods whose icon the query resolves to through
/// the locale's tag tables. Both groups keep library order; a food appears
/// at most once.
pub fn search_by_tag(query: &str, foods: &[Food], index: &TagIndex) -> Vec<Food> {
    let query = normalize_query(query);
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut results = Vec::new();

    for food in foods {
        if food.name.to_lowercase().contains(&query) && seen.insert(food.id) {
            results.push(food.clone());
        }
    }

    let icons = index.resolve_query(&query);
    if icons.is_empty() {
        return results;
    }
    for food in foods {
        if seen.contains(&food.id) {
            continue;
        }
        let icon = match food.icon.as_deref() {
            Some(explicit) => Some(explicit.trim().to_lowercase()),
            None => index.resolve_icon_tag(&food.name).map(str::to_string),
        };
        if icon.is_some_and(|i| icons.contains(i.as_str())) && seen.insert(food.id) {
            results.push(food.clone());
        }
    }
    results
}
