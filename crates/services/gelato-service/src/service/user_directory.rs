//! User directory - registration, login and self-service account management.
//!
//! Every operation validates its raw inputs in parameter order before any
//! repository call.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::validation::{require_email, require_non_empty_string, require_object};
use domain::{
    Confirmation, DomainError, Input, NewUser, Password, UserPatch, UserResponse, FIELD_DATA,
    FIELD_EMAIL, FIELD_NAME, FIELD_PASSWORD, FIELD_SURNAME, MSG_USER_DELETED,
    MSG_USER_REGISTERED, MSG_USER_UPDATED, PATCHABLE_USER_FIELDS,
};

use super::gate::AuthorizationGate;
use super::token_service::{TokenResponse, TokenService};
use crate::repository::Repository;

/// User directory trait for dependency injection.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create an account; the email must not be taken
    async fn register(
        &self,
        name: &Input,
        surname: &Input,
        email: &Input,
        password: &Input,
    ) -> AppResult<Confirmation>;

    /// Exchange credentials for a session token
    async fn authenticate(&self, email: &Input, password: &Input) -> AppResult<TokenResponse>;

    /// The caller's own record, without the password hash
    async fn retrieve(&self, token: &Input) -> AppResult<UserResponse>;

    /// Change the caller's name and/or surname
    async fn update(&self, token: &Input, data: &Input) -> AppResult<Confirmation>;

    /// Remove the caller and every order they own
    async fn delete(&self, token: &Input) -> AppResult<Confirmation>;
}

/// Concrete implementation of UserDirectory using repository.
pub struct UserRegistry {
    repo: Arc<dyn Repository>,
    tokens: Arc<TokenService>,
    gate: Arc<AuthorizationGate>,
}

impl UserRegistry {
    pub fn new(
        repo: Arc<dyn Repository>,
        tokens: Arc<TokenService>,
        gate: Arc<AuthorizationGate>,
    ) -> Self {
        Self { repo, tokens, gate }
    }
}

/// Build a patch from the allow-listed keys of `data`.
fn parse_patch(data: &Input) -> AppResult<UserPatch> {
    let fields = require_object(FIELD_DATA, data)?;

    for key in fields.keys() {
        if !PATCHABLE_USER_FIELDS.contains(&key.as_str()) {
            tracing::warn!(field = %key, "Ignoring non-patchable user field");
        }
    }

    let optional = |field: &str| -> AppResult<Option<String>> {
        match fields.get(field) {
            None => Ok(None),
            Some(value) => Ok(Some(require_non_empty_string(field, value)?.to_string())),
        }
    };

    Ok(UserPatch {
        name: optional(FIELD_NAME)?,
        surname: optional(FIELD_SURNAME)?,
    })
}

#[async_trait]
impl UserDirectory for UserRegistry {
    async fn register(
        &self,
        name: &Input,
        surname: &Input,
        email: &Input,
        password: &Input,
    ) -> AppResult<Confirmation> {
        let name = require_non_empty_string(FIELD_NAME, name)?;
        let surname = require_non_empty_string(FIELD_SURNAME, surname)?;
        let email = require_email(email)?;
        let password = require_non_empty_string(FIELD_PASSWORD, password)?;

        if self.repo.find_user_by_email(email).await?.is_some() {
            return Err(DomainError::DuplicateEmail(email.to_string()).into());
        }

        let password_hash = Password::new(password)?.into_string();

        let user = self
            .repo
            .insert_user(NewUser {
                name: name.to_string(),
                surname: surname.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(Confirmation::new(MSG_USER_REGISTERED))
    }

    async fn authenticate(&self, email: &Input, password: &Input) -> AppResult<TokenResponse> {
        let email = require_non_empty_string(FIELD_EMAIL, email)?;
        let password = require_non_empty_string(FIELD_PASSWORD, password)?;

        let user = self.repo.find_user_by_email(email).await?;

        // Verify against a dummy hash for unknown emails so both failure
        // paths cost the same.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(password);

        match user {
            Some(user) if password_valid => {
                let issued = self.tokens.issue(user.id)?;
                tracing::info!(user_id = %user.id, "User authenticated");
                Ok(TokenResponse::from(issued))
            }
            _ => {
                tracing::warn!("Rejected login attempt");
                Err(DomainError::wrong_credentials().into())
            }
        }
    }

    async fn retrieve(&self, token: &Input) -> AppResult<UserResponse> {
        let token = AuthorizationGate::token_shape(token)?;
        let user = self.gate.authenticate(token).await?;

        tracing::debug!(user_id = %user.id, "User retrieved");
        Ok(UserResponse::from(user))
    }

    async fn update(&self, token: &Input, data: &Input) -> AppResult<Confirmation> {
        let token = AuthorizationGate::token_shape(token)?;
        let patch = parse_patch(data)?;

        let user = self.gate.authenticate(token).await?;
        if !patch.is_empty() {
            self.repo.update_user(user.id, patch).await?;
        }

        tracing::info!(user_id = %user.id, "User updated");
        Ok(Confirmation::new(MSG_USER_UPDATED))
    }

    async fn delete(&self, token: &Input) -> AppResult<Confirmation> {
        let identity = self.gate.resolve_identity(token).await?;

        // Orders go first so a failure never leaves orphans behind
        let removed = self.repo.delete_orders_by_owner(identity.user_id).await?;
        self.repo.delete_user(identity.user_id).await?;

        tracing::info!(user_id = %identity.user_id, orders = removed, "User deleted");
        Ok(Confirmation::new(MSG_USER_DELETED))
    }
}
