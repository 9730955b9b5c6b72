use async_trait::async_trait;
use metrics::counter;
use sea_orm::{
    sea_query::Expr, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, TransactionTrait, Value,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::{
    commands::Command,
    db::DbPool,
    entities::{inventory_item, supplier},
    errors::ServiceError,
};

#[derive(Debug, Clone, Copy)]
pub struct DeleteSupplierCommand {
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteSupplierResult {
    pub id: i32,
    /// Inventory items whose `supplier_id` was cleared
    pub released_items: u64,
}

#[async_trait]
impl Command for DeleteSupplierCommand {
    type Result = DeleteSupplierResult;

    /// Clears the supplier reference on owned items, then removes the supplier, atomically.
    #[instrument(skip(self, db_pool), fields(supplier_id = self.id))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        let txn = db_pool.begin().await?;

        let existing = supplier::Entity::find_by_id(self.id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Supplier not found"))?;

        let released = inventory_item::Entity::update_many()
            .col_expr(
                inventory_item::Column::SupplierId,
                Expr::value(Value::Int(None)),
            )
            .filter(inventory_item::Column::SupplierId.eq(self.id))
            .exec(&txn)
            .await?;

        existing.delete(&txn).await?;
        txn.commit().await?;

        counter!("stockroom.suppliers.released_items", released.rows_affected);
        info!(
            released_items = released.rows_affected,
            "Supplier deleted"
        );

        Ok(DeleteSupplierResult {
            id: self.id,
            released_items: released.rows_affected,
        })
    }
}
