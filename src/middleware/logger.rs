use axum::{
    extract::Request,
    http::header::HOST,
    middleware::Next,
    response::Response,
};

/// Logs host, path and method of each call before it is handled
pub async fn request_logger(request: Request, next: Next) -> Response {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info!(
        host = %host,
        uri = %request.uri(),
        method = %request.method(),
        "called"
    );

    next.run(request).await
}
