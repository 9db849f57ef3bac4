//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user and order entities, the error taxonomy, raw input handling and
//! validation, and password hashing.

pub mod constants;
pub mod error;
pub mod input;
pub mod order;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult, ErrorKind};
pub use input::Input;
pub use order::{NewOrder, Order};
pub use password::Password;
pub use user::{Confirmation, NewUser, Role, User, UserPatch, UserResponse};
