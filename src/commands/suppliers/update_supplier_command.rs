use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::SupplierFields;
use crate::{
    commands::{Command, Payload},
    db::DbPool,
    entities::supplier,
    errors::ServiceError,
};

/// Full replacement of a supplier's editable fields
#[derive(Debug, Clone)]
pub struct UpdateSupplierCommand {
    pub id: i32,
    pub fields: Payload<SupplierFields>,
}

#[async_trait]
impl Command for UpdateSupplierCommand {
    type Result = supplier::Model;

    #[instrument(skip(self, db_pool), fields(supplier_id = self.id))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        let existing = supplier::Entity::find_by_id(self.id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Supplier not found"))?;

        let fields = self.fields.fields()?;
        fields.validate()?;

        let mut active: supplier::ActiveModel = existing.into();
        active.name = Set(fields.name.clone());
        active.email = Set(fields.email.clone());
        active.phone = Set(fields.phone.clone());
        active.contact = Set(fields.contact.clone());
        let updated = active.update(db).await?;

        info!("Supplier updated");
        Ok(updated)
    }
}
