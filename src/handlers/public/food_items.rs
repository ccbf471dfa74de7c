// handlers/public/food_items.rs - /allFoodItems and /allFoodItemsCount

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::food_item::{by_id_filter, detail_options};
use crate::database::models::{FoodItemListQuery, FoodItemUpdate, NewFoodItem};
use crate::database::{parse_object_id, CountAck, DatabaseError, DeleteAck, InsertAck, UpdateAck};
use crate::error::ApiResult;
use crate::handlers::extract::{ValidJson, ValidQuery};
use crate::state::AppState;

/// GET /allFoodItems?page=&size=&sort=&email=&min=&max=
///
/// Sorted by price (`sort=asc`, otherwise descending) and paged with
/// skip/limit, so deep pages get slower as the offset grows.
pub async fn food_items_get(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<FoodItemListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let options = query.find_options(state.config.api.max_page_size);
    let items = state
        .store
        .food_items()
        .select_any(query.filter(), options)
        .await?;
    Ok(Json(items))
}

/// GET /allFoodItemsCount - approximate, read from collection metadata
pub async fn food_items_count(State(state): State<AppState>) -> ApiResult<Json<CountAck>> {
    let count = state.store.food_items().estimated_count().await?;
    Ok(Json(CountAck { count }))
}

/// GET /allFoodItems/:id - projected detail view, 404 when absent
pub async fn food_item_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_object_id(&id)?;
    let item = state
        .store
        .food_items()
        .select_404(by_id_filter(id), detail_options())
        .await?;
    Ok(Json(item))
}

/// POST /allFoodItems - `purchaseCount` always starts at 0
pub async fn food_item_post(
    State(state): State<AppState>,
    ValidJson(item): ValidJson<NewFoodItem>,
) -> ApiResult<Json<InsertAck>> {
    let doc = item.to_document().map_err(DatabaseError::from)?;
    let ack = state.store.food_items().insert(&doc).await?;
    tracing::info!("Created food item {} for {}", ack.inserted_id, item.email);
    Ok(Json(ack))
}

/// PUT /allFoodItems/:id - upsert; an unknown id creates a document holding
/// only the fields in the payload
pub async fn food_item_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(update): ValidJson<FoodItemUpdate>,
) -> ApiResult<Json<UpdateAck>> {
    let id = parse_object_id(&id)?;
    let set = update.set_document().map_err(DatabaseError::from)?;
    let ack = state
        .store
        .food_items()
        .update(by_id_filter(id), set, true)
        .await?;

    if ack.upserted_id.is_some() {
        tracing::info!("PUT /allFoodItems/{} created a new document", id);
    }
    Ok(Json(ack))
}

/// DELETE /allFoodItems/:id - `deletedCount: 0` when nothing matched
pub async fn food_item_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    let id = parse_object_id(&id)?;
    let ack = state.store.food_items().delete(by_id_filter(id)).await?;
    Ok(Json(ack))
}
