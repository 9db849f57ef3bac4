//! Service layer - business logic.

mod gate;
mod order_ledger;
mod token_service;
mod user_directory;

pub use gate::{AuthorizationGate, Identity};
pub use order_ledger::{OrderBook, OrderLedger};
pub use token_service::{
    Claims, Clock, FixedClock, IssuedToken, SystemClock, TokenResponse, TokenService,
};
pub use user_directory::{UserDirectory, UserRegistry};
