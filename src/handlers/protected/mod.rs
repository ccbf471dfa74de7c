// handlers/protected/mod.rs - Protected handlers (session cookie required)
//
// Middleware: jwt_cookie_middleware, which injects `AuthUser` into request
// extensions before these handlers run.

pub mod purchases;

pub use purchases::purchases_get;
