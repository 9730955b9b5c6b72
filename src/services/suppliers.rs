use crate::{
    commands::suppliers::{
        CreateSupplierCommand, DeleteSupplierCommand, DeleteSupplierResult, UpdateSupplierCommand,
    },
    commands::Command,
    db::DbPool,
    entities::supplier,
    errors::ServiceError,
};
use metrics::counter;
use sea_orm::{EntityTrait, QueryOrder};
use std::sync::Arc;
use tracing::instrument;

/// Service for managing suppliers
#[derive(Clone)]
pub struct SupplierService {
    db_pool: Arc<DbPool>,
}

impl SupplierService {
    /// Creates a new supplier service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists every supplier, oldest first
    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        let suppliers = supplier::Entity::find()
            .order_by_asc(supplier::Column::Id)
            .all(&*self.db_pool)
            .await?;
        Ok(suppliers)
    }

    /// Gets a supplier by ID
    #[instrument(skip(self))]
    pub async fn get_supplier(&self, supplier_id: i32) -> Result<supplier::Model, ServiceError> {
        supplier::Entity::find_by_id(supplier_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Supplier not found"))
    }

    /// Creates a new supplier
    #[instrument(skip(self))]
    pub async fn create_supplier(
        &self,
        command: CreateSupplierCommand,
    ) -> Result<supplier::Model, ServiceError> {
        let created = command.execute(self.db_pool.clone()).await?;
        counter!("stockroom.suppliers.created", 1);
        Ok(created)
    }

    /// Updates an existing supplier
    #[instrument(skip(self))]
    pub async fn update_supplier(
        &self,
        command: UpdateSupplierCommand,
    ) -> Result<supplier::Model, ServiceError> {
        let updated = command.execute(self.db_pool.clone()).await?;
        counter!("stockroom.suppliers.updated", 1);
        Ok(updated)
    }

    /// Deletes a supplier, releasing the inventory it owned
    #[instrument(skip(self))]
    pub async fn delete_supplier(
        &self,
        command: DeleteSupplierCommand,
    ) -> Result<DeleteSupplierResult, ServiceError> {
        let result = command.execute(self.db_pool.clone()).await?;
        counter!("stockroom.suppliers.deleted", 1);
        Ok(result)
    }
}
