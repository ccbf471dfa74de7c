// handlers/protected/purchases.rs - GET /purchasedFood?email=

use axum::{
    extract::{Extension, State},
    Json,
};
use mongodb::options::FindOptions;
use serde_json::Value;

use crate::database::models::PurchaseListQuery;
use crate::error::{ApiError, ApiResult};
use crate::handlers::extract::ValidQuery;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /purchasedFood?email= - the caller's own purchase history.
///
/// The queried email must be the one in the session token; a missing
/// `email` never matches and is refused too.
pub async fn purchases_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidQuery(query): ValidQuery<PurchaseListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    if query.email() != Some(user.email.as_str()) {
        tracing::warn!(
            "Purchase listing for {:?} refused to token owner {}",
            query.email(),
            user.email
        );
        return Err(ApiError::forbidden("Forbidden access"));
    }

    let purchases = state
        .store
        .purchases()
        .select_any(query.filter(), FindOptions::default())
        .await?;
    Ok(Json(purchases))
}
