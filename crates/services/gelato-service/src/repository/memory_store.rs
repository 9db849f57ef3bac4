//! In-process repository backed by vectors behind async locks.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{DomainError, NewOrder, NewUser, Order, User, UserPatch};

use super::Repository;

/// In-memory repository for local runs and tests.
///
/// Rows keep insertion order, so listings come back oldest first.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    orders: RwLock<Vec<Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::DuplicateEmail(new_user.email).into());
        }
        let user = User::new(Uuid::new_v4(), new_user);
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_not_found("user", id)?;
        user.apply(patch);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_not_found("user", id)?;
        users.remove(index);
        Ok(())
    }

    async fn insert_order(&self, new_order: NewOrder) -> AppResult<Order> {
        let order = Order::new(Uuid::new_v4(), new_order);
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn find_orders_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn find_order_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn delete_order(&self, id: Uuid) -> AppResult<()> {
        let mut orders = self.orders.write().await;
        let index = orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_not_found("order", id)?;
        orders.remove(index);
        Ok(())
    }

    async fn delete_orders_by_owner(&self, owner_id: Uuid) -> AppResult<u64> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| !o.is_owned_by(owner_id));
        Ok((before - orders.len()) as u64)
    }

    async fn find_all_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn promote(&self, email: &str) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| DomainError::NotFound(format!("user with email {} not found", email)))?;
        user.super_user = true;
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ann".to_string(),
            surname: "Lee".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_order(owner_id: Uuid, flavor: &str) -> NewOrder {
        NewOrder {
            owner_id,
            order_type: "cone".to_string(),
            size: "big".to_string(),
            flavors: vec![flavor.to_string()],
            total_price: 4.5,
        }
    }

    #[tokio::test]
    async fn test_user_lifecycle() {
        let store = MemoryStore::new();
        let user = store.insert_user(new_user("ann@test.com")).await.unwrap();

        let found = store.find_user_by_email("ann@test.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(store.find_user_by_email("ANN@test.com").await.unwrap().is_none());

        let updated = store
            .update_user(
                user.id,
                UserPatch {
                    name: Some("Test".to_string()),
                    surname: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Test");

        store.delete_user(user.id).await.unwrap();
        assert!(store.find_user_by_id(user.id).await.unwrap().is_none());
        assert!(store.delete_user(user.id).await.is_err());
    }

    #[tokio::test]
    async fn test_insert_user_rejects_taken_email() {
        let store = MemoryStore::new();
        store.insert_user(new_user("ann@test.com")).await.unwrap();

        let err = store.insert_user(new_user("ann@test.com")).await.unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::DuplicateEmail("ann@test.com".to_string()))
        );
        assert_eq!(store.users.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_orders_keep_insertion_order() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        store.insert_order(new_order(owner, "vanilla")).await.unwrap();
        store.insert_order(new_order(other, "lemon")).await.unwrap();
        store.insert_order(new_order(owner, "chocolate")).await.unwrap();

        let flavors: Vec<_> = store
            .find_orders_by_owner(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.flavors[0].clone())
            .collect();
        assert_eq!(flavors, vec!["vanilla", "chocolate"]);
        assert_eq!(store.find_all_orders().await.unwrap().len(), 3);

        assert_eq!(store.delete_orders_by_owner(owner).await.unwrap(), 2);
        assert_eq!(store.find_all_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_promote() {
        let store = MemoryStore::new();
        store.insert_user(new_user("boss@test.com")).await.unwrap();

        let user = store.promote("boss@test.com").await.unwrap();
        assert!(user.super_user);
        assert!(store.promote("nobody@test.com").await.is_err());
    }
}
