use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::{ensure_supplier_exists, find_owned_item, ActingSupplier, InventoryFields};
use crate::{
    commands::{Command, Payload},
    db::DbPool,
    entities::inventory_item,
    errors::ServiceError,
};

/// Replaces name, category and quantity of an owned item
#[derive(Debug, Clone)]
pub struct UpdateInventoryItemCommand {
    pub id: i32,
    pub acting: ActingSupplier,
    pub fields: Payload<InventoryFields>,
}

#[async_trait]
impl Command for UpdateInventoryItemCommand {
    type Result = inventory_item::Model;

    #[instrument(skip(self, db_pool), fields(item_id = self.id, supplier_id = self.acting.id()))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        ensure_supplier_exists(db, self.acting).await?;
        let item = find_owned_item(db, self.id, self.acting).await?;
        let fields = self.fields.fields()?;
        fields.validate()?;

        let mut active: inventory_item::ActiveModel = item.into();
        active.name = Set(fields.name.clone());
        active.category = Set(fields.category.clone());
        active.quantity = Set(fields.quantity_value());
        let updated = active.update(db).await?;

        info!("Inventory item updated");
        Ok(updated)
    }
}
