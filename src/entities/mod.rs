//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod inventory_archive;
pub mod inventory_item;
pub mod requisition_archive;
pub mod requisition_form;
pub mod user;

// Re-export specific types to avoid conflicts
pub use inventory_archive::{
    Column as InventoryArchiveColumn, Entity as InventoryArchive, Model as InventoryArchiveModel,
};
pub use inventory_item::{
    Column as InventoryItemColumn, Entity as InventoryItem, Model as InventoryItemModel,
};
pub use requisition_archive::{
    Column as RequisitionArchiveColumn, Entity as RequisitionArchive,
    Model as RequisitionArchiveModel,
};
pub use requisition_form::{
    Column as RequisitionFormColumn, Entity as RequisitionForm, Model as RequisitionFormModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
