use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use super::SupplierFields;
use crate::{commands::Command, db::DbPool, entities::supplier, errors::ServiceError};

#[derive(Debug, Clone)]
pub struct CreateSupplierCommand {
    pub fields: SupplierFields,
}

#[async_trait]
impl Command for CreateSupplierCommand {
    type Result = supplier::Model;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        let fields = &self.fields;
        fields.validate()?;

        let created = supplier::ActiveModel {
            name: Set(fields.name.clone()),
            email: Set(fields.email.clone()),
            phone: Set(fields.phone.clone()),
            contact: Set(fields.contact.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db_pool.as_ref())
        .await?;

        info!(supplier_id = created.id, "Supplier created");
        Ok(created)
    }
}
