//! Authorization gate - turns a token into an identity and checks rights.

use std::sync::Arc;

use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::validation::require_non_empty_string;
use domain::{DomainError, Input, Role, User, FIELD_TOKEN};

use super::token_service::TokenService;
use crate::repository::Repository;

/// Who is calling, and with which role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role(),
        }
    }
}

/// Resolves tokens to users and enforces ownership and elevation.
pub struct AuthorizationGate {
    tokens: Arc<TokenService>,
    repo: Arc<dyn Repository>,
}

impl AuthorizationGate {
    pub fn new(tokens: Arc<TokenService>, repo: Arc<dyn Repository>) -> Self {
        Self { tokens, repo }
    }

    /// Validate the raw token's shape without verifying it.
    pub fn token_shape(token: &Input) -> AppResult<&str> {
        Ok(require_non_empty_string(FIELD_TOKEN, token)?)
    }

    /// Verify a token and load the user it names.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let user_id = self.tokens.verify(token)?;
        self.repo
            .find_user_by_id(user_id)
            .await?
            .ok_or_not_found("user", user_id)
    }

    /// Validate, verify and resolve a raw token to an identity.
    pub async fn resolve_identity(&self, token: &Input) -> AppResult<Identity> {
        let token = Self::token_shape(token)?;
        let user = self.authenticate(token).await?;
        Ok(Identity::from(&user))
    }

    /// Allow the owner of a resource, or anyone elevated.
    pub fn authorize_ownership(identity: &Identity, owner_id: Uuid) -> AppResult<()> {
        if identity.user_id == owner_id || identity.role.is_elevated() {
            return Ok(());
        }
        tracing::warn!(user_id = %identity.user_id, "Ownership check failed");
        Err(DomainError::no_permission().into())
    }

    /// Allow only elevated identities.
    pub fn authorize_elevated(identity: &Identity) -> AppResult<()> {
        if identity.role.is_elevated() {
            return Ok(());
        }
        tracing::warn!(user_id = %identity.user_id, "Elevation check failed");
        Err(DomainError::no_permission().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRepository;
    use common::JwtConfig;
    use domain::NewUser;

    fn tokens() -> Arc<TokenService> {
        let config = JwtConfig::new("gate-test-secret-long-enough-000000", 1).unwrap();
        Arc::new(TokenService::new(&config))
    }

    fn user(super_user: bool) -> User {
        let mut user = User::new(
            Uuid::new_v4(),
            NewUser {
                name: "Ann".into(),
                surname: "Lee".into(),
                email: "ann@test.com".into(),
                password_hash: "hash".into(),
            },
        );
        user.super_user = super_user;
        user
    }

    fn message(err: common::AppError) -> String {
        err.user_message()
    }

    #[tokio::test]
    async fn test_resolve_identity_loads_role() {
        let tokens = tokens();
        let admin = user(true);
        let token = tokens.issue(admin.id).unwrap().token;

        let mut repo = MockRepository::new();
        let admin_id = admin.id;
        let found = admin.clone();
        repo.expect_find_user_by_id()
            .withf(move |id| *id == admin_id)
            .returning(move |_| Ok(Some(found.clone())));

        let gate = AuthorizationGate::new(tokens, Arc::new(repo));
        let identity = gate.resolve_identity(&Input::from(token)).await.unwrap();
        assert_eq!(identity.user_id, admin.id);
        assert_eq!(identity.role, Role::SuperUser);
    }

    #[tokio::test]
    async fn test_token_shape_checked_before_lookup() {
        let mut repo = MockRepository::new();
        repo.expect_find_user_by_id().never();
        let gate = AuthorizationGate::new(tokens(), Arc::new(repo));

        let err = gate.resolve_identity(&Input::Missing).await.unwrap_err();
        assert_eq!(message(err), "token is not optional");

        let err = gate.resolve_identity(&Input::from("")).await.unwrap_err();
        assert_eq!(message(err), "token is empty");

        let err = gate.resolve_identity(&Input::from(1i64)).await.unwrap_err();
        assert_eq!(message(err), "token 1 is not a string");

        let err = gate.resolve_identity(&Input::from("abc")).await.unwrap_err();
        assert_eq!(message(err), "jwt malformed");
    }

    #[tokio::test]
    async fn test_deleted_user_is_not_found() {
        let tokens = tokens();
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id).unwrap().token;

        let mut repo = MockRepository::new();
        repo.expect_find_user_by_id().returning(|_| Ok(None));

        let gate = AuthorizationGate::new(tokens, Arc::new(repo));
        let err = gate.resolve_identity(&Input::from(token)).await.unwrap_err();
        assert_eq!(message(err), format!("user with id {} not found", user_id));
    }

    #[test]
    fn test_ownership_and_elevation() {
        let customer = Identity::from(&user(false));
        let admin = Identity::from(&user(true));

        assert!(AuthorizationGate::authorize_ownership(&customer, customer.user_id).is_ok());
        assert!(AuthorizationGate::authorize_ownership(&admin, customer.user_id).is_ok());
        assert_eq!(
            message(
                AuthorizationGate::authorize_ownership(&customer, Uuid::new_v4()).unwrap_err()
            ),
            "You do not have permission to do this"
        );

        assert!(AuthorizationGate::authorize_elevated(&admin).is_ok());
        assert_eq!(
            message(AuthorizationGate::authorize_elevated(&customer).unwrap_err()),
            "You do not have permission to do this"
        );
    }
}
