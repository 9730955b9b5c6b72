use crate::entities::inventory_item;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    /// `null` once the owning supplier has been deleted
    pub supplier_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<inventory_item::Model> for InventoryItemResponse {
    fn from(model: inventory_item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            quantity: model.quantity,
            supplier_id: model.supplier_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedItem {
    pub id: i32,
}
