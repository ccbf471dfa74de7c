use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::{jwt_cookie_middleware, request_logger};
use crate::state::AppState;

/// Build the full application router over the given state
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(session_routes())
        .merge(user_routes())
        .merge(food_item_routes())
        .merge(feedback_routes())
        // Mixed: listing is protected
        .merge(purchase_routes(&state));

    if state.config.api.enable_request_logging {
        router = router.layer(middleware::from_fn(request_logger));
    }

    // Global middleware
    router
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn session_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/jwt", post(public::jwt_post))
        .route("/logOut", post(public::logout_post))
}

fn user_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new().route("/users", post(public::user_post))
}

fn food_item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/allFoodItems",
            get(public::food_items_get).post(public::food_item_post),
        )
        .route("/allFoodItemsCount", get(public::food_items_count))
        .route(
            "/allFoodItems/:id",
            get(public::food_item_get)
                .put(public::food_item_put)
                .delete(public::food_item_delete),
        )
}

fn feedback_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/usersFeedback/:foodItemId", get(public::feedback_get))
        .route("/addToGallery", post(public::feedback_post))
}

fn purchase_routes(state: &AppState) -> Router<AppState> {
    use axum::routing::patch;

    let session = middleware::from_fn_with_state(state.clone(), jwt_cookie_middleware);

    Router::new()
        .route(
            "/purchasedFood",
            // route_layer only wraps methods registered before it: GET is
            // gated, POST stays public
            get(protected::purchases_get)
                .route_layer(session)
                .post(public::purchase_post),
        )
        .route(
            "/purchasedFood/:id",
            patch(public::purchase_patch).delete(public::purchase_delete),
        )
}

/// Credentialed CORS for the configured client origins
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}
