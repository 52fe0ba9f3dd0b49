//! Typed integer identities.
//!
//! Every entity in the domain model is keyed by a stable `i32` issued by
//! Postgres. Wrapping the bare integer in a phantom-tagged newtype means a
//! `RoleId` and an `EmployeeId` are distinct types at compile time even
//! though they share a representation, so a mixed-up argument order is a
//! type error instead of a runtime bug.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type};

#[repr(transparent)]
pub struct Id<T>(i32, PhantomData<fn() -> T>);

impl<T> Id<T> {
    pub const fn new(value: i32) -> Self {
        Self(value, PhantomData)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Id<T> {}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<i32> for Id<T> {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i32 {
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::new(i32::deserialize(deserializer)?))
    }
}

impl<T> Type<Postgres> for Id<T> {
    fn type_info() -> PgTypeInfo {
        <i32 as Type<Postgres>>::type_info()
    }
}

impl<'r, T> Decode<'r, Postgres> for Id<T> {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        Ok(Self::new(<i32 as Decode<Postgres>>::decode(value)?))
    }
}

impl<'q, T> Encode<'q, Postgres> for Id<T> {
    fn encode_by_ref(
        &self,
        buf: &mut PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as Encode<Postgres>>::encode_by_ref(&self.0, buf)
    }
}

/// Marker types for each identity domain. None of these are ever constructed.
pub mod marker {
    pub struct Employee;
    pub struct Role;
    pub struct ShiftTemplate;
    pub struct WeeklySchedule;
    pub struct PlannedShift;
    pub struct ShiftAssignment;
    pub struct TimeOffRequest;
    pub struct EmployeePreference;
    pub struct SystemConstraint;
    pub struct OptimizationConfig;
    pub struct SchedulingRun;
    pub struct SchedulingSolution;
}

pub type EmployeeId = Id<marker::Employee>;
pub type RoleId = Id<marker::Role>;
pub type ShiftTemplateId = Id<marker::ShiftTemplate>;
pub type WeeklyScheduleId = Id<marker::WeeklySchedule>;
pub type PlannedShiftId = Id<marker::PlannedShift>;
pub type ShiftAssignmentId = Id<marker::ShiftAssignment>;
pub type TimeOffRequestId = Id<marker::TimeOffRequest>;
pub type EmployeePreferenceId = Id<marker::EmployeePreference>;
pub type SystemConstraintId = Id<marker::SystemConstraint>;
pub type OptimizationConfigId = Id<marker::OptimizationConfig>;
pub type SchedulingRunId = Id<marker::SchedulingRun>;
pub type SchedulingSolutionId = Id<marker::SchedulingSolution>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_i32() {
        let id: EmployeeId = Id::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(i32::from(id), 42);
    }

    #[test]
    fn equal_values_are_equal_ids() {
        let a: RoleId = Id::new(7);
        let b: RoleId = Id::new(7);
        assert_eq!(a, b);
    }

    #[test]
    fn ordering_follows_inner_value() {
        let a: ShiftTemplateId = Id::new(1);
        let b: ShiftTemplateId = Id::new(2);
        assert!(a < b);
    }

    #[test]
    fn display_matches_inner_value() {
        let id: EmployeeId = Id::new(5);
        assert_eq!(format!("{}", id), "5");
    }
}
