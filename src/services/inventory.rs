use crate::{
    commands::inventory::{
        ensure_supplier_exists, CreateInventoryItemCommand, DeleteInventoryItemCommand,
        UpdateInventoryItemCommand,
    },
    commands::{Command, MAX_TEXT_LEN},
    db::DbPool,
    entities::inventory_item,
    errors::ServiceError,
};
use metrics::counter;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};
use strum::{Display, EnumString};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

pub use crate::commands::inventory::ActingSupplier;

/// Items with fewer units than this are "low" on stock
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Stock buckets accepted by the filter endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    /// quantity < 10
    Low,
    /// quantity = 0
    Out,
    /// quantity > 0
    In,
}

impl StockLevel {
    pub fn condition(&self) -> Condition {
        let quantity = inventory_item::Column::Quantity;
        let expr = match self {
            StockLevel::Low => quantity.lt(LOW_STOCK_THRESHOLD),
            StockLevel::Out => quantity.eq(0),
            StockLevel::In => quantity.gt(0),
        };
        Condition::all().add(expr)
    }

    pub fn matches(&self, quantity: i32) -> bool {
        match self {
            StockLevel::Low => quantity < LOW_STOCK_THRESHOLD,
            StockLevel::Out => quantity == 0,
            StockLevel::In => quantity > 0,
        }
    }
}

/// Query string of `GET /inventory/filter`; empty values count as absent
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryFilterParams {
    /// Exact category match
    pub category: Option<String>,
    /// One of `low`, `out`, `in`
    pub stock: Option<String>,
}

impl InventoryFilterParams {
    fn category(&self) -> Result<Option<&str>, ServiceError> {
        match self.category.as_deref() {
            None | Some("") => Ok(None),
            Some(category) if category.chars().count() > MAX_TEXT_LEN => {
                Err(ServiceError::validation("Invalid category"))
            }
            Some(category) => Ok(Some(category)),
        }
    }

    fn stock(&self) -> Result<Option<StockLevel>, ServiceError> {
        match self.stock.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => StockLevel::from_str(raw).map(Some).map_err(|_| {
                ServiceError::validation("Invalid stock filter. Use low, out, or in")
            }),
        }
    }
}

/// Service for reading and mutating inventory on behalf of a supplier
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists all items, or only the acting supplier's items
    #[instrument(skip(self))]
    pub async fn list_inventory(
        &self,
        acting: Option<ActingSupplier>,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        if let Some(acting) = acting {
            ensure_supplier_exists(&*self.db_pool, acting).await?;
        }
        self.find_matching(acting, Condition::all()).await
    }

    /// Gets one item; an acting supplier must own it
    #[instrument(skip(self))]
    pub async fn get_item(
        &self,
        item_id: i32,
        acting: Option<ActingSupplier>,
    ) -> Result<inventory_item::Model, ServiceError> {
        let item = inventory_item::Entity::find_by_id(item_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Inventory item not found"))?;

        if let Some(acting) = acting {
            if !item.is_owned_by(acting.id()) {
                return Err(ServiceError::forbidden(
                    "Inventory item does not belong to this supplier",
                ));
            }
        }
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn create_item(
        &self,
        command: CreateInventoryItemCommand,
    ) -> Result<inventory_item::Model, ServiceError> {
        let created = command.execute(self.db_pool.clone()).await?;
        counter!("stockroom.inventory.created", 1);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        command: UpdateInventoryItemCommand,
    ) -> Result<inventory_item::Model, ServiceError> {
        let updated = command.execute(self.db_pool.clone()).await?;
        counter!("stockroom.inventory.updated", 1);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(
        &self,
        command: DeleteInventoryItemCommand,
    ) -> Result<i32, ServiceError> {
        let deleted = command.execute(self.db_pool.clone()).await?;
        counter!("stockroom.inventory.deleted", 1);
        Ok(deleted)
    }

    /// Filters by category and stock level, optionally scoped to the acting supplier
    #[instrument(skip(self))]
    pub async fn filter_inventory(
        &self,
        params: &InventoryFilterParams,
        acting: Option<ActingSupplier>,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        if let Some(acting) = acting {
            ensure_supplier_exists(&*self.db_pool, acting).await?;
        }

        let mut condition = Condition::all();
        if let Some(category) = params.category()? {
            condition = condition.add(inventory_item::Column::Category.eq(category));
        }
        if let Some(stock) = params.stock()? {
            debug!(%stock, "Applying stock filter");
            condition = condition.add(stock.condition());
        }

        self.find_matching(acting, condition).await
    }

    /// Runs `condition`, scoped to an already-verified acting supplier
    async fn find_matching(
        &self,
        acting: Option<ActingSupplier>,
        mut condition: Condition,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        if let Some(acting) = acting {
            condition = condition.add(inventory_item::Column::SupplierId.eq(acting.id()));
        }

        let items = inventory_item::Entity::find()
            .filter(condition)
            .order_by_asc(inventory_item::Column::Id)
            .all(&*self.db_pool)
            .await?;
        Ok(items)
    }
}
