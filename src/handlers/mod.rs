// handlers/mod.rs - Two-tier handler layout
//
// Public (no session) and Protected (valid `token` cookie required).
// Every handler performs one store call (purchase creation performs two) and
// returns the store's result as JSON.
pub mod extract;   // Validating JSON/query extractors
pub mod public;    // No authentication required
pub mod protected; // Session cookie required (jwt_cookie_middleware)
