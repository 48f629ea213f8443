//! Requisition archive entity - Soft-deleted requisition forms.
//!
//! A field-for-field copy of the form at the moment of archiving, keyed by
//! the same string id (the active row and the archive row are mutually
//! exclusive in time, so the id can be reused directly).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Archived requisition form database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requisition_archive")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// The id the form carried in the active table
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Requester at time of archiving
    pub requester: String,
    /// Department at time of archiving
    pub department: String,
    /// Purpose at time of archiving
    pub purpose: String,
    /// Status at time of archiving
    pub status: String,
    /// Original request date
    pub date_requested: DateTimeUtc,
    /// Checked-stage name, if the stage was filled
    pub checked_by_name: Option<String>,
    /// Checked-stage position
    pub checked_by_position: Option<String>,
    /// Checked-stage date
    pub checked_date: Option<DateTimeUtc>,
    /// Approved-stage name
    pub approved_by_name: Option<String>,
    /// Approved-stage position
    pub approved_by_position: Option<String>,
    /// Approved-stage date
    pub approved_date: Option<DateTimeUtc>,
    /// Issued-stage name
    pub issued_by_name: Option<String>,
    /// Issued-stage position
    pub issued_by_position: Option<String>,
    /// Issued-stage date
    pub issued_date: Option<DateTimeUtc>,
    /// Received-stage name
    pub received_by_name: Option<String>,
    /// Received-stage position
    pub received_by_position: Option<String>,
    /// Received-stage date
    pub received_date: Option<DateTimeUtc>,
    /// Why the form was archived
    pub archived_reason: String,
    /// Username of the actor who archived the form
    pub archived_by: String,
    /// When the form was archived
    pub archived_at: DateTimeUtc,
}

/// Archive rows stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
