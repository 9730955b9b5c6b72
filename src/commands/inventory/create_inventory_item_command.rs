use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::{ensure_supplier_exists, ActingSupplier, InventoryFields};
use crate::{
    commands::{Command, Payload},
    db::DbPool,
    entities::inventory_item,
    errors::ServiceError,
};

/// Creates an item owned by the acting supplier
#[derive(Debug, Clone)]
pub struct CreateInventoryItemCommand {
    pub acting: ActingSupplier,
    pub fields: Payload<InventoryFields>,
}

#[async_trait]
impl Command for CreateInventoryItemCommand {
    type Result = inventory_item::Model;

    #[instrument(skip(self, db_pool), fields(supplier_id = self.acting.id()))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        ensure_supplier_exists(db, self.acting).await?;
        let fields = self.fields.fields()?;
        fields.validate()?;

        let created = inventory_item::ActiveModel {
            name: Set(fields.name.clone()),
            category: Set(fields.category.clone()),
            quantity: Set(fields.quantity_value()),
            supplier_id: Set(Some(self.acting.id())),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(item_id = created.id, "Inventory item created");
        Ok(created)
    }
}
