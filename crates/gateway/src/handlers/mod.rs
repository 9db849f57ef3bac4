//! HTTP handlers.

mod health_handler;
mod order_handler;
mod user_handler;

pub use health_handler::health_routes;
pub use order_handler::order_routes;
pub use user_handler::user_routes;
