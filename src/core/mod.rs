//! Core business logic - framework-agnostic service operations.
//!
//! One module per entity, mirroring the service layer: every function is a
//! plain async fn taking a database connection, validating its input,
//! calling the data layer, and logging. No HTTP types appear here.

/// Credential verification and bearer-token issue/decode
pub mod auth;
/// Inventory CRUD and the soft-delete/archive workflow
pub mod inventory;
/// Requisition CRUD, archive, search, and retention purge
pub mod requisition;
/// User account management (create/update/delete, no archive)
pub mod user;
