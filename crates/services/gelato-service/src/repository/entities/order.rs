//! Order database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Order;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub order_type: String,
    pub size: String,
    /// JSON array of flavor names
    #[sea_orm(column_type = "JsonBinary")]
    pub flavors: Json,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// A flavors column that is not an array of strings reads back as empty.
impl From<Model> for Order {
    fn from(model: Model) -> Self {
        let flavors = serde_json::from_value(model.flavors).unwrap_or_else(|e| {
            tracing::warn!(order_id = %model.id, error = %e, "Unreadable flavors column");
            Vec::new()
        });

        Order {
            id: model.id,
            owner_id: model.owner_id,
            order_type: model.order_type,
            size: model.size,
            flavors,
            total_price: model.total_price,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn model(flavors: Json) -> Model {
        Model {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            order_type: "cone".to_string(),
            size: "big".to_string(),
            flavors,
            total_price: 12.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_flavors_read_back_in_order() {
        let order = Order::from(model(json!(["vanilla", "chocolate"])));
        assert_eq!(order.flavors, vec!["vanilla", "chocolate"]);
    }

    #[test]
    fn test_unreadable_flavors_become_empty() {
        let order = Order::from(model(json!({"vanilla": true})));
        assert!(order.flavors.is_empty());
        assert_eq!(order.order_type, "cone");
    }
}
