//! Activity log entities — the ambient audit trail added in SPEC_FULL,
//! grounded in the original's `activityLogModel.py`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::id::{EmployeeId, Id};

pub mod marker {
    pub struct ActivityLog;
}
pub type ActivityLogId = Id<marker::ActivityLog>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_action_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityActionType {
    Create,
    Update,
    Delete,
    Publish,
    Unpublish,
    Approve,
    Reject,
    Optimize,
    Apply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_entity_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityEntityType {
    Schedule,
    Shift,
    Assignment,
    TimeOff,
    User,
    Constraint,
    Config,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLogRow {
    pub id: ActivityLogId,
    pub action_type: ActivityActionType,
    pub entity_type: ActivityEntityType,
    pub entity_id: i32,
    pub employee_id: Option<EmployeeId>,
    pub details: Option<String>,
    pub created_at: NaiveDateTime,
}
