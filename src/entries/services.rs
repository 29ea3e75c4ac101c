use time::Date;
use tracing::info;

use crate::{
    entries::repo_types::{DailyEntry, EntryItem},
    error::AppError,
};

fn validate_grams(grams: f64) -> Result<(), AppError> {
    if !grams.is_finite() || grams <= 0.0 {
        return Err(AppError::Validation("grams must be a positive number".into()));
    }
    Ok(())
}

/// Appends an item to the day, creating the day on first use. `entries`
/// stays sorted by date.
pub fn add_item(entries: &mut Vec<DailyEntry>, date: Date, item: EntryItem) -> Result<(), AppError> {
    validate_grams(item.grams)?;
    match entries.binary_search_by_key(&date, |e| e.date) {
        Ok(pos) => entries[pos].items.push(item),
        Err(pos) => {
            info!(%date, "new day entry");
            entries.insert(
                pos,
                DailyEntry {
                    date,
                    items: vec![item],
                },
            );
        }
    }
    Ok(())
}

pub fn update_item_grams(
    entries: &mut [DailyEntry],
    date: Date,
    index: usize,
    grams: f64,
) -> Result<(), AppError> {
    validate_grams(grams)?;
    let item = entries
        .iter_mut()
        .find(|e| e.date == date)
        .and_then(|e| e.items.get_mut(index))
        .ok_or_else(|| AppError::NotFound(format!("item {index} on {date}")))?;
    item.grams = grams;
    Ok(())
}

/// Removes one item; the day itself goes away with its last item.
pub fn remove_item(entries: &mut Vec<DailyEntry>, date: Date, index: usize) -> Result<EntryItem, AppError> {
    let pos = entries
        .iter()
        .position(|e| e.date == date)
        .ok_or_else(|| AppError::NotFound(format!("entry for {date}")))?;
    if index >= entries[pos].items.len() {
        return Err(AppError::NotFound(format!("item {index} on {date}")));
    }
    let removed = entries[pos].items.remove(index);
    if entries[pos].items.is_empty() {
        entries.remove(pos);
        info!(%date, "day entry removed");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::repo_types::Food;
    use time::macros::date;
    use uuid::Uuid;

    fn item(name: &str, grams: f64) -> EntryItem {
        EntryItem {
            food: Food {
                id: Uuid::new_v4(),
                name: name.into(),
                calories: 100.0,
                protein: 0.0,
                carbs: 0.0,
                fat: 0.0,
                icon: None,
            },
            grams,
        }
    }

    #[test]
    fn first_item_creates_day_in_order() {
        let mut entries = Vec::new();
        add_item(&mut entries, date!(2024 - 01 - 03), item("a", 10.0)).unwrap();
        add_item(&mut entries, date!(2024 - 01 - 01), item("b", 10.0)).unwrap();
        add_item(&mut entries, date!(2024 - 01 - 03), item("c", 10.0)).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, date!(2024 - 01 - 01));
        assert_eq!(entries[1].items.len(), 2);
    }

    #[test]
    fn rejects_non_positive_grams() {
        let mut entries = Vec::new();
        assert!(add_item(&mut entries, date!(2024 - 01 - 01), item("a", 0.0)).is_err());
        assert!(add_item(&mut entries, date!(2024 - 01 - 01), item("a", f64::NAN)).is_err());
        assert!(entries.is_empty());
    }

    #[test]
    fn removing_last_item_removes_day() {
        let mut entries = Vec::new();
        let day = date!(2024 - 01 - 01);
        add_item(&mut entries, day, item("a", 10.0)).unwrap();
        add_item(&mut entries, day, item("b", 20.0)).unwrap();

        let removed = remove_item(&mut entries, day, 0).unwrap();
        assert_eq!(removed.food.name, "a");
        assert_eq!(entries.len(), 1);

        remove_item(&mut entries, day, 0).unwrap();
        assert!(entries.is_empty());
        assert!(matches!(
            remove_item(&mut entries, day, 0),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn edits_grams_in_place() {
        let mut entries = Vec::new();
        let day = date!(2024 - 01 - 01);
        add_item(&mut entries, day, item("a", 10.0)).unwrap();
        update_item_grams(&mut entries, day, 0, 55.0).unwrap();
        assert_eq!(entries[0].items[0].grams, 55.0);
        assert!(update_item_grams(&mut entries, day, 3, 55.0).is_err());
        assert!(update_item_grams(&mut entries, day, 0, -1.0).is_err());
    }
}
