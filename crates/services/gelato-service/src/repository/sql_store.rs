//! PostgreSQL repository implementation via SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::order::{self, Entity as OrderEntity};
use super::entities::user::{self, Entity as UserEntity};
use super::Repository;
use common::{AppError, AppResult, OptionExt};
use domain::{DomainError, NewOrder, NewUser, Order, User, UserPatch};

/// Concrete implementation of Repository over a SeaORM connection
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository for SqlStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn insert_user(&self, new_user: NewUser) -> AppResult<User> {
        let email = new_user.email.clone();
        let now = Utc::now();
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name),
            surname: Set(new_user.surname),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            super_user: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // idx_users_email rejects a duplicate that raced past the lookup
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|err| unique_violation(err, || DomainError::DuplicateEmail(email)))?;
        Ok(User::from(model))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> AppResult<User> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("user", id)?;

        let mut active: user::ActiveModel = existing.into();

        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(surname) = patch.surname {
            active.surname = Set(surname);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("user", id).into());
        }

        Ok(())
    }

    async fn insert_order(&self, new_order: NewOrder) -> AppResult<Order> {
        let active_model = order::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(new_order.owner_id),
            order_type: Set(new_order.order_type),
            size: Set(new_order.size),
            flavors: Set(serde_json::json!(new_order.flavors)),
            total_price: Set(new_order.total_price),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Order::from(model))
    }

    async fn find_orders_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Order>> {
        let models = OrderEntity::find()
            .filter(order::Column::OwnerId.eq(owner_id))
            .order_by_asc(order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Order::from).collect())
    }

    async fn find_order_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let result = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Order::from))
    }

    async fn delete_order(&self, id: Uuid) -> AppResult<()> {
        let result = OrderEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("order", id).into());
        }

        Ok(())
    }

    async fn delete_orders_by_owner(&self, owner_id: Uuid) -> AppResult<u64> {
        let result = OrderEntity::delete_many()
            .filter(order::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn find_all_orders(&self) -> AppResult<Vec<Order>> {
        let models = OrderEntity::find()
            .order_by_asc(order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Order::from).collect())
    }

    async fn promote(&self, email: &str) -> AppResult<User> {
        let existing = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user with email {} not found", email)))?;

        let mut active: user::ActiveModel = existing.into();
        active.super_user = Set(true);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}

/// Map a unique-constraint violation to a domain conflict, passing other errors through.
fn unique_violation(err: DbErr, conflict: impl FnOnce() -> DomainError) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict().into(),
        _ => AppError::from(err),
    }
}
