use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::auth::{validate_jwt, Claims, TOKEN_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the session cookie
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
        }
    }
}

/// Cookie JWT middleware: rejects requests without a valid `token` cookie
/// and injects the decoded `AuthUser` for downstream handlers.
pub async fn jwt_cookie_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Rejected {}: no session cookie", request.uri().path());
            ApiError::unauthorized("Invalid Credentials")
        })?;

    let claims = validate_jwt(&token, &state.config.security.jwt_secret).map_err(|e| {
        tracing::warn!("Rejected {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    tracing::debug!("Session token accepted for {}", claims.email);
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
