//! validate → derive → persist for each food operation.
//!
//! These functions are synchronous and meant to run on the blocking pool.
//! Validation always happens before the store is touched.

use crate::error::ApiError;
use crate::models::{Food, FoodPayload};
use crate::nutrition::derive_calories;
use crate::store::{FoodStore, StoreError};
use crate::validate::{validate_create, validate_id, validate_update};

fn internal(context: String, e: StoreError) -> ApiError {
    log::error!("{}: {}", context, e);
    ApiError::internal(context)
}

pub fn list_foods(store: &dyn FoodStore) -> Result<Vec<Food>, ApiError> {
    store
        .list()
        .map_err(|e| internal("An error occurred trying to fetch the foods".to_string(), e))
}

pub fn get_food(store: &dyn FoodStore, raw_id: &str) -> Result<Food, ApiError> {
    let id = validate_id(raw_id)?;
    store
        .find(id)
        .map_err(|e| {
            internal(
                format!("An error occurred trying to fetch the food item with id: {}", id),
                e,
            )
        })?
        .ok_or_else(|| ApiError::NotFound("Food not found with the given ID.".to_string()))
}

pub fn create_food(store: &dyn FoodStore, payload: &FoodPayload) -> Result<Food, ApiError> {
    let new_food = derive_calories(validate_create(payload)?);
    match store.insert(&new_food) {
        Ok(Some(food)) => {
            log::info!("created food {} ({})", food.id, food.name);
            Ok(food)
        }
        Ok(None) => {
            log::error!("insert of {:?} affected no rows", new_food.name);
            Err(ApiError::NotCreated)
        }
        Err(e) => Err(internal(
            "An error occurred while creating the new food item".to_string(),
            e,
        )),
    }
}

pub fn update_food(
    store: &dyn FoodStore,
    raw_id: &str,
    payload: &FoodPayload,
) -> Result<Food, ApiError> {
    let id = validate_id(raw_id)?;
    let changes = validate_update(payload)?;
    store
        .update(id, &changes)
        .map_err(|e| {
            internal(
                format!("An error occurred trying to update the food item with id: {}", id),
                e,
            )
        })?
        .ok_or_else(|| ApiError::NotFound(format!("The food with id: {} wasn't found.", id)))
}

/// A row that vanishes between the lookup and the delete is reported as not
/// found, same as one that never existed.
pub fn delete_food(store: &dyn FoodStore, raw_id: &str) -> Result<Food, ApiError> {
    let id = validate_id(raw_id)?;
    store
        .delete(id)
        .map_err(|e| {
            internal(
                format!("An error occurred trying to delete the food item with id: {}", id),
                e,
            )
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Food not found with the given ID: {}", id)))
}

pub fn ping(store: &dyn FoodStore) -> Result<String, ApiError> {
    store
        .ping()
        .map_err(|e| internal("The database did not answer the ping".to_string(), e))
}
