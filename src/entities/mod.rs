pub mod inventory_item;
pub mod supplier;
