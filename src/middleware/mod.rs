pub mod auth;
pub mod logger;

pub use auth::{jwt_cookie_middleware, AuthUser};
pub use logger::request_logger;
