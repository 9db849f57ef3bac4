//! Gelato Service Library
//!
//! Domain services for the ice-cream ordering backend: session tokens,
//! authorization, the user directory and the order ledger, plus the
//! repositories and schema they run on.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::{AppResult, DatabaseConfig, JwtConfig};
use domain::User;

use crate::infra::Database;
use crate::repository::{Repository, SqlStore};
use crate::service::{
    AuthorizationGate, Clock, OrderBook, OrderLedger, SystemClock, TokenService, UserDirectory,
    UserRegistry,
};

/// The service graph wired over one repository.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserDirectory>,
    pub orders: Arc<dyn OrderLedger>,
}

impl Services {
    /// Wire services on the wall clock.
    pub fn new(repo: Arc<dyn Repository>, jwt: &JwtConfig) -> Self {
        Self::with_clock(repo, jwt, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: Arc<dyn Repository>, jwt: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let tokens = Arc::new(TokenService::with_clock(jwt, clock));
        let gate = Arc::new(AuthorizationGate::new(tokens.clone(), repo.clone()));

        Self {
            users: Arc::new(UserRegistry::new(repo.clone(), tokens, gate.clone())),
            orders: Arc::new(OrderBook::new(repo, gate)),
        }
    }
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Grant the `superUser` flag to an existing account.
pub async fn promote_user(config: &DatabaseConfig, email: &str) -> AppResult<User> {
    let db = Database::connect(config).await?;
    let store = SqlStore::new(db.get_connection());

    let user = store.promote(email).await?;
    info!(user_id = %user.id, "User promoted to superUser");
    Ok(user)
}

/// Open the database, apply migrations and return a SQL-backed repository.
pub async fn sql_repository(config: &DatabaseConfig) -> AppResult<Arc<dyn Repository>> {
    let db = Database::connect_and_migrate(config).await?;
    db.ping().await?;
    Ok(Arc::new(SqlStore::new(db.get_connection())))
}
