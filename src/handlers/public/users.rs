// handlers/public/users.rs - POST /users

use axum::{extract::State, Json};

use crate::database::{models::NewUser, InsertAck};
use crate::error::ApiResult;
use crate::handlers::extract::ValidJson;
use crate::state::AppState;

/// POST /users - store a user profile. Duplicate emails are not checked.
pub async fn user_post(
    State(state): State<AppState>,
    ValidJson(user): ValidJson<NewUser>,
) -> ApiResult<Json<InsertAck>> {
    let ack = state.store.users().insert(&user).await?;
    Ok(Json(ack))
}
