//! Request bodies for the CRUD surface SPEC_FULL adds around the core
//! (spec.md §6.1 says HTTP routing/serialization is an external collaborator;
//! these mirror the original's Pydantic schemas, `app/schemas/*.py`).

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::common::id::{EmployeeId, RoleId, ShiftTemplateId, WeeklyScheduleId};

use super::model::DayOfWeek;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignRoleRequest {
    pub employee_id: EmployeeId,
    pub role_id: RoleId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShiftRoleRequirementInput {
    pub role_id: RoleId,
    pub required_count: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateShiftTemplateRequest {
    pub name: String,
    pub start_time_of_day: Option<NaiveTime>,
    pub end_time_of_day: Option<NaiveTime>,
    pub location: Option<String>,
    pub role_requirements: Vec<ShiftRoleRequirementInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWeeklyScheduleRequest {
    pub week_start_date: NaiveDate,
    pub created_by: EmployeeId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlannedShiftRequest {
    pub weekly_schedule_id: WeeklyScheduleId,
    pub shift_template_id: ShiftTemplateId,
    pub shift_date: NaiveDate,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeOffRequestRequest {
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeePreferenceRequest {
    pub employee_id: EmployeeId,
    pub shift_template_id: Option<ShiftTemplateId>,
    pub day_of_week: Option<DayOfWeek>,
    pub start_time_of_day: Option<NaiveTime>,
    pub end_time_of_day: Option<NaiveTime>,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSystemConstraintRequest {
    pub constraint_type: super::model::SystemConstraintType,
    pub value: f64,
    pub is_hard: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOptimizationConfigRequest {
    pub name: String,
    pub weight_fairness: f64,
    pub weight_preferences: f64,
    pub weight_cost: f64,
    pub weight_coverage: f64,
    pub max_runtime_seconds: i32,
    pub mip_gap: f64,
    pub is_default: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishScheduleRequest {
    pub published_by: EmployeeId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    pub full_name: String,
    pub status: super::model::EmployeeStatus,
    pub is_manager: bool,
}
