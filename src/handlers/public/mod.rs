// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Route Prefix: none; paths match what the ChefLink web client calls.
// Middleware: CORS, tracing, request logger.

pub mod feedback;
pub mod food_items;
pub mod purchases;
pub mod session;
pub mod system;
pub mod users;

pub use feedback::{feedback_get, feedback_post};
pub use food_items::{
    food_item_delete, food_item_get, food_item_post, food_item_put, food_items_count,
    food_items_get,
};
pub use purchases::{purchase_delete, purchase_patch, purchase_post};
pub use session::{jwt_post, logout_post};
pub use system::{health, root};
pub use users::user_post;
