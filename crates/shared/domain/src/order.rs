//! Order domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ice-cream order owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(rename = "type")]
    pub order_type: String,
    pub size: String,
    pub flavors: Vec<String>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: Uuid, new_order: NewOrder) -> Self {
        Self {
            id,
            owner_id: new_order.owner_id,
            order_type: new_order.order_type,
            size: new_order.size,
            flavors: new_order.flavors,
            total_price: new_order.total_price,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// Validated order data awaiting insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub owner_id: Uuid,
    pub order_type: String,
    pub size: String,
    pub flavors: Vec<String>,
    pub total_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_json_shape() {
        let owner = Uuid::new_v4();
        let order = Order::new(
            Uuid::new_v4(),
            NewOrder {
                owner_id: owner,
                order_type: "cone".to_string(),
                size: "big".to_string(),
                flavors: vec!["vanilla".to_string(), "chocolate".to_string()],
                total_price: 12.0,
            },
        );

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["type"], "cone");
        assert_eq!(json["totalPrice"], 12.0);
        assert_eq!(json["flavors"][1], "chocolate");
        assert!(order.is_owned_by(owner));
        assert!(!order.is_owned_by(Uuid::new_v4()));
    }
}
