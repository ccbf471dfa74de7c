// handlers/public/session.rs - POST /jwt, POST /logOut
//
// Issue and clear the `token` session cookie. Signing in trusts the email the
// client sends; the web client calls this right after its own identity
// provider has authenticated the user.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{cleared_session_cookie, generate_jwt, session_cookie, Claims};
use crate::database::{FieldErrors, Validate};
use crate::error::ApiResult;
use crate::handlers::extract::ValidJson;
use crate::state::AppState;

/// Body of `POST /jwt`. Extra fields sent by the client are ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

impl Validate for TokenRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.require_email("email", &self.email);
        errors.into_result()
    }
}

/// POST /jwt - sign a one-hour token for the email and set it as a cookie
pub async fn jwt_post(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(request): ValidJson<TokenRequest>,
) -> ApiResult<(CookieJar, Json<Value>)> {
    let security = &state.config.security;
    let claims = Claims::new(request.email.trim(), security.jwt_expiry_hours)?;
    let token = generate_jwt(&claims, &security.jwt_secret)?;

    tracing::info!("Issued session token for {}", claims.email);

    Ok((
        jar.add(session_cookie(token, security)),
        Json(json!({ "success": true })),
    ))
}

/// POST /logOut - expire the session cookie, whoever is asking
pub async fn logout_post(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<Value>>,
) -> (CookieJar, Json<Value>) {
    if let Some(Json(user)) = body {
        tracing::info!("Logging out: {}", user);
    }

    (
        jar.add(cleared_session_cookie(&state.config.security)),
        Json(json!({ "success": true })),
    )
}
