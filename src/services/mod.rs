pub mod inventory;
pub mod suppliers;
