use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    foods::repo_types::Food,
    records::{load_records, save_records, Decoded},
    storage::{KvStore, FOODS_KEY},
};

pub async fn load_foods(store: &dyn KvStore) -> Result<Decoded<Food>, AppError> {
    load_records(store, FOODS_KEY, |food: Food| food.validate().is_ok().then_some(food)).await
}

/// Saves the library; foods rejected at load are written back unchanged.
pub async fn save_foods(store: &dyn KvStore, foods: &Decoded<Food>) -> Result<(), AppError> {
    save_records(store, FOODS_KEY, &foods.records, &foods.rejected).await
}

pub async fn find_food(store: &dyn KvStore, id: Uuid) -> Result<Food, AppError> {
    load_foods(store)
        .await?
        .records
        .into_iter()
        .find(|f| f.id == id)
        .ok_or_else(|| AppError::NotFound(format!("food {id}")))
}

pub async fn insert_food(store: &dyn KvStore, food: Food) -> Result<Food, AppError> {
    food.validate().map_err(AppError::Validation)?;
    let mut foods = load_foods(store).await?;
    if foods.records.iter().any(|f| f.id == food.id) {
        return Err(AppError::Validation(format!("food {} already exists", food.id)));
    }
    foods.records.push(food.clone());
    save_foods(store, &foods).await?;
    info!(food_id = %food.id, name = %food.name, "food added");
    Ok(food)
}

pub async fn replace_food(store: &dyn KvStore, food: Food) -> Result<Food, AppError> {
    food.validate().map_err(AppError::Validation)?;
    let mut foods = load_foods(store).await?;
    let slot = foods
        .records
        .iter_mut()
        .find(|f| f.id == food.id)
        .ok_or_else(|| AppError::NotFound(format!("food {}", food.id)))?;
    *slot = food.clone();
    save_foods(store, &foods).await?;
    info!(food_id = %food.id, "food updated");
    Ok(food)
}

pub async fn delete_food(store: &dyn KvStore, id: Uuid) -> Result<(), AppError> {
    let mut foods = load_foods(store).await?;
    let before = foods.records.len();
    foods.records.retain(|f| f.id != id);
    if foods.records.len() == before {
        return Err(AppError::NotFound(format!("food {id}")));
    }
    save_foods(store, &foods).await?;
    info!(food_id = %id, "food deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn food(name: &str) -> Food {
        Food {
            id: Uuid::new_v4(),
            name: name.into(),
            calories: 52.0,
            protein: 0.3,
            carbs: 14.0,
            fat: 0.2,
            icon: None,
        }
    }

    #[tokio::test]
    async fn crud_cycle() {
        let store = MemoryStore::default();
        let apple = insert_food(&store, food("Apple")).await.unwrap();
        assert_eq!(find_food(&store, apple.id).await.unwrap().name, "Apple");

        let mut renamed = apple.clone();
        renamed.name = "Green Apple".into();
        replace_food(&store, renamed).await.unwrap();
        assert_eq!(find_food(&store, apple.id).await.unwrap().name, "Green Apple");

        delete_food(&store, apple.id).await.unwrap();
        assert!(matches!(
            find_food(&store, apple.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rejects_invalid_food() {
        let store = MemoryStore::default();
        let mut bad = food("  ");
        assert!(matches!(
            insert_food(&store, bad.clone()).await,
            Err(AppError::Validation(_))
        ));
        bad.name = "Oil".into();
        bad.fat = -1.0;
        assert!(matches!(
            insert_food(&store, bad).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn invalid_stored_foods_survive_writes() {
        let store = MemoryStore::default();
        store
            .put(
                FOODS_KEY,
                r#"[{"id": "7d7f8f6e-3f0e-4c59-9b1a-1f6d7e0b7a09", "name": "Olive oil", "fat": "12,5"}]"#
                    .into(),
            )
            .await
            .unwrap();

        let apple = insert_food(&store, food("Apple")).await.unwrap();
        delete_food(&store, apple.id).await.unwrap();

        let raw = store.get(FOODS_KEY).await.unwrap().unwrap();
        let values: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["name"], "Olive oil");
        assert_eq!(load_foods(&store).await.unwrap().skipped(), 1);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let store = MemoryStore::default();
        assert!(matches!(
            delete_food(&store, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
