//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_CUSTOMER, ROLE_SUPER_USER};

/// Role derived from the user's `superUser` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Customer,
    SuperUser,
}

impl Role {
    /// Check if this role grants cross-user visibility
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::SuperUser)
    }
}

impl From<bool> for Role {
    fn from(super_user: bool) -> Self {
        if super_user {
            Role::SuperUser
        } else {
            Role::Customer
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::SuperUser => write!(f, "{}", ROLE_SUPER_USER),
            Role::Customer => write!(f, "{}", ROLE_CUSTOMER),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub super_user: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, non-elevated user
    pub fn new(id: Uuid, new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: new_user.name,
            surname: new_user.surname,
            email: new_user.email,
            password_hash: new_user.password_hash,
            super_user: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn role(&self) -> Role {
        Role::from(self.super_user)
    }

    /// Apply a patch in place
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(surname) = patch.surname {
            self.surname = surname;
        }
        self.updated_at = Utc::now();
    }
}

/// Validated registration data, password already hashed
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields a user may change on their own record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub super_user: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            super_user: user.super_user,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            super_user: user.super_user,
        }
    }
}

/// Acknowledgement returned by operations with no other payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            Uuid::new_v4(),
            NewUser {
                name: "Ann".to_string(),
                surname: "Lee".to_string(),
                email: "ann@test.com".to_string(),
                password_hash: "$argon2id$hash".to_string(),
            },
        )
    }

    #[test]
    fn test_new_user_is_customer() {
        let user = sample_user();
        assert!(!user.super_user);
        assert_eq!(user.role(), Role::Customer);
        assert!(!user.role().is_elevated());
    }

    #[test]
    fn test_serialized_user_omits_password() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["superUser"], false);
    }

    #[test]
    fn test_apply_patch() {
        let mut user = sample_user();
        user.apply(UserPatch {
            name: Some("Test".to_string()),
            surname: None,
        });
        assert_eq!(user.name, "Test");
        assert_eq!(user.surname, "Lee");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Customer.to_string(), "customer");
        assert_eq!(Role::SuperUser.to_string(), "superUser");
    }
}
