//! Requisition form entity - A request for materials or equipment.
//!
//! Keyed by a generated string id (`REQ-YYYYMMDD-xxxxxxxx`). The four
//! approval-workflow stages (checked, approved, issued, received) are each
//! a name/position/date triple of nullable columns. By convention the
//! stages are filled in order, but nothing enforces that ordering.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Requisition form database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requisition_forms")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Generated string identifier, e.g. `"REQ-20260825-1a2b3c4d"`
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Name of the person requesting
    pub requester: String,
    /// Requesting department
    pub department: String,
    /// What the requisition is for
    pub purpose: String,
    /// Free-form status (e.g., "pending", "issued")
    pub status: String,
    /// When the requisition was lodged
    pub date_requested: DateTimeUtc,
    /// Name of whoever checked the form
    pub checked_by_name: Option<String>,
    /// Position of whoever checked the form
    pub checked_by_position: Option<String>,
    /// When the form was checked
    pub checked_date: Option<DateTimeUtc>,
    /// Name of whoever approved the form
    pub approved_by_name: Option<String>,
    /// Position of whoever approved the form
    pub approved_by_position: Option<String>,
    /// When the form was approved
    pub approved_date: Option<DateTimeUtc>,
    /// Name of whoever issued the goods
    pub issued_by_name: Option<String>,
    /// Position of whoever issued the goods
    pub issued_by_position: Option<String>,
    /// When the goods were issued
    pub issued_date: Option<DateTimeUtc>,
    /// Name of whoever received the goods
    pub received_by_name: Option<String>,
    /// Position of whoever received the goods
    pub received_by_position: Option<String>,
    /// When the goods were received
    pub received_date: Option<DateTimeUtc>,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// Active forms have no relations; the archive counterpart is a copy.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
