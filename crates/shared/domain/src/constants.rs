//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Role name for regular customers
pub const ROLE_CUSTOMER: &str = "customer";

/// Role name for users holding the `superUser` flag
pub const ROLE_SUPER_USER: &str = "superUser";

// =============================================================================
// Validation
// =============================================================================

/// Shape accepted for e-mail addresses: local part, `@`, and a domain ending
/// in one or more labels of 2-3 alphanumerics.
pub const EMAIL_PATTERN: &str = r"^\w+([.-]?\w+)+@\w+([.:]?\w+)+(\.[a-zA-Z0-9]{2,3})+$";

/// Field names used in validation messages
pub const FIELD_NAME: &str = "name";
pub const FIELD_SURNAME: &str = "surname";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_TOKEN: &str = "token";
pub const FIELD_DATA: &str = "data";
pub const FIELD_ID: &str = "id";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_SIZE: &str = "size";
pub const FIELD_FLAVORS: &str = "flavors";
pub const FIELD_TOTAL_PRICE: &str = "totalPrice";

/// Patch keys a user may change on their own record
pub const PATCHABLE_USER_FIELDS: &[&str] = &[FIELD_NAME, FIELD_SURNAME];

// =============================================================================
// Messages
// =============================================================================

/// Returned for unknown e-mail and bad password alike
pub const MSG_WRONG_CREDENTIALS: &str = "wrong credentials";

/// Returned when ownership or elevation checks fail
pub const MSG_NO_PERMISSION: &str = "You do not have permission to do this";

pub const MSG_USER_REGISTERED: &str = "User registered.";
pub const MSG_USER_UPDATED: &str = "User updated.";
pub const MSG_USER_DELETED: &str = "User deleted.";
pub const MSG_ORDER_DELETED: &str = "Order deleted.";

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
