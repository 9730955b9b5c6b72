use crate::{commands::suppliers::DeleteSupplierResult, entities::supplier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplierResponse {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<supplier::Model> for SupplierResponse {
    fn from(model: supplier::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            contact: model.contact,
            created_at: model.created_at,
        }
    }
}

/// Payload of a successful supplier delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedSupplier {
    pub id: i32,
    /// Number of inventory items left without a supplier
    pub released_items: u64,
}

impl From<DeleteSupplierResult> for DeletedSupplier {
    fn from(result: DeleteSupplierResult) -> Self {
        Self {
            id: result.id,
            released_items: result.released_items,
        }
    }
}
