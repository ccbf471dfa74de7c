// handlers/public/purchases.rs - POST/PATCH/DELETE /purchasedFood
//
// Listing purchases needs a session; see handlers/protected/purchases.rs.

use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::doc;

use crate::database::models::purchase::increment_purchase_count;
use crate::database::models::{NewPurchase, StatusUpdate};
use crate::database::{parse_object_id, DeleteAck, InsertAck, Store, UpdateAck};
use crate::error::ApiResult;
use crate::handlers::extract::ValidJson;
use crate::state::AppState;

/// POST /purchasedFood - record the purchase, then bump the item's counter.
///
/// The two writes are independent: a failed or unmatched increment leaves
/// the purchase in place and is only logged.
pub async fn purchase_post(
    State(state): State<AppState>,
    ValidJson(purchase): ValidJson<NewPurchase>,
) -> ApiResult<Json<InsertAck>> {
    let ack = state.store.purchases().insert(&purchase).await?;
    bump_purchase_count(&state.store, &purchase).await;
    Ok(Json(ack))
}

async fn bump_purchase_count(store: &Store, purchase: &NewPurchase) {
    let Some(filter) = purchase.food_item_filter() else {
        tracing::warn!(
            "Purchase recorded with non-ObjectId foodId '{}'; purchaseCount not updated",
            purchase.food_id
        );
        return;
    };

    match store
        .food_items()
        .update(filter, increment_purchase_count(), false)
        .await
    {
        Ok(ack) if ack.matched_count == 0 => {
            tracing::warn!(
                "Purchase recorded for missing food item {}; purchaseCount not updated",
                purchase.food_id
            );
        }
        Ok(_) => tracing::debug!("purchaseCount incremented for {}", purchase.food_id),
        Err(e) => {
            tracing::warn!("purchaseCount increment failed for {}: {}", purchase.food_id, e);
        }
    }
}

/// PATCH /purchasedFood/:id - set `status` (any non-empty string)
pub async fn purchase_patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(update): ValidJson<StatusUpdate>,
) -> ApiResult<Json<UpdateAck>> {
    let id = parse_object_id(&id)?;
    let ack = state
        .store
        .purchases()
        .update(doc! { "_id": id }, update.set_document(), false)
        .await?;
    Ok(Json(ack))
}

/// DELETE /purchasedFood/:id - `deletedCount: 0` when nothing matched
pub async fn purchase_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    let id = parse_object_id(&id)?;
    let ack = state.store.purchases().delete(doc! { "_id": id }).await?;
    Ok(Json(ack))
}
