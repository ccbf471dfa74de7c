// handlers/public/feedback.rs - /usersFeedback/:foodItemId, /addToGallery

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::{FeedbackQuery, NewFeedback};
use crate::database::InsertAck;
use crate::error::ApiResult;
use crate::handlers::extract::ValidJson;
use crate::state::AppState;

/// GET /usersFeedback/:foodItemId - newest first
pub async fn feedback_get(
    State(state): State<AppState>,
    Path(food_item_id): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let feedback = state
        .store
        .feedback()
        .select_any(FeedbackQuery::filter(&food_item_id), FeedbackQuery::find_options())
        .await?;
    Ok(Json(feedback))
}

/// POST /addToGallery
pub async fn feedback_post(
    State(state): State<AppState>,
    ValidJson(feedback): ValidJson<NewFeedback>,
) -> ApiResult<Json<InsertAck>> {
    let feedback = feedback.stamped(chrono::Utc::now());
    let ack = state.store.feedback().insert(&feedback).await?;
    Ok(Json(ack))
}
