use async_trait::async_trait;
use sea_orm::ModelTrait;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{ensure_supplier_exists, find_owned_item, ActingSupplier};
use crate::{commands::Command, db::DbPool, errors::ServiceError};

#[derive(Debug, Clone, Copy)]
pub struct DeleteInventoryItemCommand {
    pub id: i32,
    pub acting: ActingSupplier,
}

#[async_trait]
impl Command for DeleteInventoryItemCommand {
    /// Id of the removed item
    type Result = i32;

    #[instrument(skip(self, db_pool), fields(item_id = self.id, supplier_id = self.acting.id()))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        ensure_supplier_exists(db, self.acting).await?;
        let item = find_owned_item(db, self.id, self.acting).await?;
        item.delete(db).await?;

        info!("Inventory item deleted");
        Ok(self.id)
    }
}
