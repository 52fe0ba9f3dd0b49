//! Wire and storage types for the workforce data model (spec §3).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::id::{
    EmployeeId, EmployeePreferenceId, OptimizationConfigId, PlannedShiftId, RoleId,
    SchedulingRunId, SchedulingSolutionId, ShiftAssignmentId, ShiftTemplateId, TimeOffRequestId,
    WeeklyScheduleId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "employee_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Vacation,
    Sick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "planned_shift_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlannedShiftStatus {
    Planned,
    PartiallyAssigned,
    FullyAssigned,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "weekly_schedule_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WeeklyScheduleStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "time_off_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "system_constraint_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SystemConstraintType {
    MaxHoursPerWeek,
    MinHoursPerWeek,
    MaxConsecutiveDays,
    MinRestHours,
    MaxShiftsPerWeek,
    MinShiftsPerWeek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "scheduling_run_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SchedulingRunStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "solver_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    NoSolutionFound,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "day_of_week", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    pub status: EmployeeStatus,
    pub is_manager: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShiftTemplateRoleRequirement {
    pub shift_template_id: ShiftTemplateId,
    pub role_id: RoleId,
    pub required_count: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShiftTemplate {
    pub id: ShiftTemplateId,
    pub name: String,
    pub start_time_of_day: Option<NaiveTime>,
    pub end_time_of_day: Option<NaiveTime>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeeklySchedule {
    pub id: WeeklyScheduleId,
    pub week_start_date: NaiveDate,
    pub status: WeeklyScheduleStatus,
    pub created_by: EmployeeId,
    pub published_by: Option<EmployeeId>,
    pub published_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlannedShift {
    pub id: PlannedShiftId,
    pub weekly_schedule_id: WeeklyScheduleId,
    pub shift_template_id: ShiftTemplateId,
    pub shift_date: NaiveDate,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub location: Option<String>,
    pub status: PlannedShiftStatus,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShiftAssignment {
    pub id: ShiftAssignmentId,
    pub planned_shift_id: PlannedShiftId,
    pub employee_id: Option<EmployeeId>,
    pub role_id: Option<RoleId>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeOffRequest {
    pub id: TimeOffRequestId,
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TimeOffStatus,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeePreference {
    pub id: EmployeePreferenceId,
    pub employee_id: EmployeeId,
    pub shift_template_id: Option<ShiftTemplateId>,
    pub day_of_week: Option<DayOfWeek>,
    pub start_time_of_day: Option<NaiveTime>,
    pub end_time_of_day: Option<NaiveTime>,
    pub weight: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemConstraint {
    pub id: crate::common::id::SystemConstraintId,
    pub constraint_type: SystemConstraintType,
    pub value: f64,
    pub is_hard: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OptimizationConfig {
    pub id: OptimizationConfigId,
    pub name: String,
    pub weight_fairness: f64,
    pub weight_preferences: f64,
    pub weight_cost: f64,
    pub weight_coverage: f64,
    pub max_runtime_seconds: i32,
    pub mip_gap: f64,
    pub is_default: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchedulingRun {
    pub id: SchedulingRunId,
    pub weekly_schedule_id: WeeklyScheduleId,
    pub optimization_config_id: OptimizationConfigId,
    pub status: SchedulingRunStatus,
    pub solver_status: Option<SolverStatus>,
    pub objective_value: Option<f64>,
    pub runtime_seconds: Option<f64>,
    pub achieved_gap: Option<f64>,
    pub total_assignments: Option<i32>,
    pub triggered_at: NaiveDateTime,
    pub started_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchedulingSolutionRow {
    pub id: SchedulingSolutionId,
    pub scheduling_run_id: SchedulingRunId,
    pub planned_shift_id: PlannedShiftId,
    pub employee_id: Option<EmployeeId>,
    pub role_id: Option<RoleId>,
    pub preference_score: f64,
}
