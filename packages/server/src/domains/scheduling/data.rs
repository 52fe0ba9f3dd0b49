//! C2 — optimization data builder.
//!
//! Projects the eagerly-loaded [`RunContext`] into the dense, index-aligned
//! form the MIP formulator (C3) consumes. This is the only place overlap,
//! rest-conflict, and preference-scoring arithmetic lives; C3 only ever
//! reads the sets this module produces.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::common::id::{EmployeeId, PlannedShiftId, RoleId};
use crate::domains::workforce::model::{PlannedShift, SystemConstraintType};
use crate::domains::workforce::store::RunContext;

/// Frozen, numerically indexed view of one run's working set. Opaque to
/// C3's caller — its internal shape can change without touching the MIP
/// formulation as long as the accessors below stay stable.
#[derive(Debug, Clone)]
pub struct OptimizationData {
    pub employees: Vec<EmployeeId>,
    pub shifts: Vec<PlannedShiftId>,
    pub roles: Vec<RoleId>,
    pub employee_index: HashMap<EmployeeId, usize>,
    pub shift_index: HashMap<PlannedShiftId, usize>,
    pub availability: Vec<Vec<bool>>,
    pub preference: Vec<Vec<f64>>,
    pub role_requirements: HashMap<PlannedShiftId, Vec<(RoleId, i32)>>,
    pub employee_roles: HashMap<EmployeeId, HashSet<RoleId>>,
    pub shift_overlaps: HashMap<PlannedShiftId, HashSet<PlannedShiftId>>,
    pub shift_rest_conflicts: HashMap<PlannedShiftId, HashSet<PlannedShiftId>>,
    pub shift_durations: HashMap<PlannedShiftId, f64>,
    pub system_constraints: HashMap<SystemConstraintType, (f64, bool)>,
    pub existing_assignments: HashSet<(EmployeeId, PlannedShiftId, RoleId)>,
}

/// Given a calendar date and a template's time-of-day bounds, returns the
/// full start/end datetimes, rolling `end` to the next day when
/// `end_time_of_day <= start_time_of_day` (the shift spans midnight).
pub fn normalize_shift_interval(
    date: chrono::NaiveDate,
    start_time: chrono::NaiveTime,
    end_time: chrono::NaiveTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(start_time);
    let end = if end_time > start_time {
        date.and_time(end_time)
    } else {
        (date + chrono::Duration::days(1)).and_time(end_time)
    };
    (start, end)
}

fn intervals_overlap(a: &PlannedShift, b: &PlannedShift) -> bool {
    a.start_datetime < b.end_datetime && b.start_datetime < a.end_datetime
}

/// The gap between two non-overlapping shifts, in hours, measured from the
/// end of whichever starts first to the start of whichever starts second.
/// Overlapping shifts yield a negative gap, so they are rest conflicts too
/// whenever a `min_rest_hours` constraint is in force — consistent with the
/// no-overlap constraint already forbidding them outright.
fn rest_gap_hours(a: &PlannedShift, b: &PlannedShift) -> f64 {
    let (first, second) = if a.start_datetime <= b.start_datetime {
        (a, b)
    } else {
        (b, a)
    };
    (second.start_datetime - first.end_datetime).num_minutes() as f64 / 60.0
}

fn duration_hours(shift: &PlannedShift) -> f64 {
    (shift.end_datetime - shift.start_datetime).num_minutes() as f64 / 60.0
}

pub fn build(ctx: &RunContext) -> OptimizationData {
    let employees: Vec<EmployeeId> = ctx.employees.iter().map(|e| e.id).collect();
    let shifts: Vec<PlannedShiftId> = ctx.shifts.iter().map(|s| s.id).collect();
    let roles: Vec<RoleId> = ctx.roles.iter().map(|r| r.id).collect();

    let employee_index: HashMap<EmployeeId, usize> = employees
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();
    let shift_index: HashMap<PlannedShiftId, usize> = shifts
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();

    let min_rest_hours = ctx
        .system_constraints
        .iter()
        .find(|c| c.constraint_type == SystemConstraintType::MinRestHours)
        .map(|c| (c.value, c.is_hard));

    let mut shift_overlaps: HashMap<PlannedShiftId, HashSet<PlannedShiftId>> = HashMap::new();
    let mut shift_rest_conflicts: HashMap<PlannedShiftId, HashSet<PlannedShiftId>> =
        HashMap::new();
    let mut shift_durations: HashMap<PlannedShiftId, f64> = HashMap::new();

    for shift in &ctx.shifts {
        shift_durations.insert(shift.id, duration_hours(shift));
    }

    for (i, shift_a) in ctx.shifts.iter().enumerate() {
        for shift_b in ctx.shifts[i + 1..].iter() {
            if intervals_overlap(shift_a, shift_b) {
                shift_overlaps.entry(shift_a.id).or_default().insert(shift_b.id);
                shift_overlaps.entry(shift_b.id).or_default().insert(shift_a.id);
            }
            if let Some((threshold, _hard)) = min_rest_hours {
                if rest_gap_hours(shift_a, shift_b) < threshold {
                    shift_rest_conflicts
                        .entry(shift_a.id)
                        .or_default()
                        .insert(shift_b.id);
                    shift_rest_conflicts
                        .entry(shift_b.id)
                        .or_default()
                        .insert(shift_a.id);
                }
            }
        }
    }

    let approved_time_off_by_employee: HashMap<
        EmployeeId,
        Vec<&crate::domains::workforce::model::TimeOffRequest>,
    > = {
        let mut map: HashMap<EmployeeId, Vec<&crate::domains::workforce::model::TimeOffRequest>> =
            HashMap::new();
        for request in &ctx.approved_time_off {
            map.entry(request.employee_id).or_default().push(request);
        }
        map
    };

    let mut availability = vec![vec![true; shifts.len()]; employees.len()];
    for (e_idx, employee) in ctx.employees.iter().enumerate() {
        let Some(requests) = approved_time_off_by_employee.get(&employee.id) else {
            continue;
        };
        for (s_idx, shift) in ctx.shifts.iter().enumerate() {
            let blocked = requests
                .iter()
                .any(|r| shift.shift_date >= r.start_date && shift.shift_date <= r.end_date);
            if blocked {
                availability[e_idx][s_idx] = false;
            }
        }
    }

    let preferences_by_employee: HashMap<
        EmployeeId,
        Vec<&crate::domains::workforce::model::EmployeePreference>,
    > = {
        let mut map: HashMap<_, Vec<_>> = HashMap::new();
        for pref in &ctx.preferences {
            map.entry(pref.employee_id).or_default().push(pref);
        }
        map
    };

    let mut preference = vec![vec![0.0f64; shifts.len()]; employees.len()];
    for (e_idx, employee) in ctx.employees.iter().enumerate() {
        let Some(prefs) = preferences_by_employee.get(&employee.id) else {
            continue;
        };
        for (s_idx, shift) in ctx.shifts.iter().enumerate() {
            let weekday = DayOfWeekExt::from_date(shift.shift_date);
            let mut best = 0.0f64;
            for pref in prefs {
                let template_matches = pref
                    .shift_template_id
                    .map(|t| t == shift.shift_template_id)
                    .unwrap_or(true);
                let day_matches = pref.day_of_week.map(|d| d == weekday).unwrap_or(true);
                let time_matches = match (pref.start_time_of_day, pref.end_time_of_day) {
                    (Some(pref_start), Some(pref_end)) => {
                        let shift_start = shift.start_datetime.time();
                        let shift_end = shift.end_datetime.time();
                        pref_start < shift_end && shift_start < pref_end
                    }
                    _ => true,
                };
                if template_matches && day_matches && time_matches {
                    best = best.max(pref.weight);
                }
            }
            preference[e_idx][s_idx] = best.clamp(0.0, 1.0);
        }
    }

    let role_requirements: HashMap<PlannedShiftId, Vec<(RoleId, i32)>> = ctx
        .shifts
        .iter()
        .map(|s| {
            let reqs = ctx
                .role_requirements
                .get(&s.shift_template_id)
                .cloned()
                .unwrap_or_default();
            (s.id, reqs)
        })
        .collect();

    let system_constraints: HashMap<SystemConstraintType, (f64, bool)> = ctx
        .system_constraints
        .iter()
        .map(|c| (c.constraint_type, (c.value, c.is_hard)))
        .collect();

    let existing_assignments: HashSet<(EmployeeId, PlannedShiftId, RoleId)> = ctx
        .existing_assignments
        .iter()
        .filter_map(|a| Some((a.employee_id?, a.planned_shift_id, a.role_id?)))
        .collect();

    OptimizationData {
        employees,
        shifts,
        roles,
        employee_index,
        shift_index,
        availability,
        preference,
        role_requirements,
        employee_roles: ctx.employee_roles.clone(),
        shift_overlaps,
        shift_rest_conflicts,
        shift_durations,
        system_constraints,
        existing_assignments,
    }
}

/// Local day-of-week conversion so this module does not depend on the MIP
/// formulator's notion of a week anchor.
struct DayOfWeekExt;
impl DayOfWeekExt {
    fn from_date(date: chrono::NaiveDate) -> crate::domains::workforce::model::DayOfWeek {
        crate::domains::workforce::model::DayOfWeek::from_chrono(date.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn shift(id: i32, date: &str, start: &str, end: &str) -> PlannedShift {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let start_time = NaiveTime::parse_from_str(start, "%H:%M").unwrap();
        let end_time = NaiveTime::parse_from_str(end, "%H:%M").unwrap();
        let (start_datetime, end_datetime) = normalize_shift_interval(date, start_time, end_time);
        PlannedShift {
            id: id.into(),
            weekly_schedule_id: 1.into(),
            shift_template_id: 1.into(),
            shift_date: date,
            start_datetime,
            end_datetime,
            location: None,
            status: crate::domains::workforce::model::PlannedShiftStatus::Planned,
        }
    }

    #[test]
    fn overnight_shift_has_eight_hour_duration() {
        let s = shift(1, "2026-03-02", "22:00", "06:00");
        assert_eq!(duration_hours(&s), 8.0);
    }

    #[test]
    fn overnight_shift_overlaps_a_shift_that_starts_before_its_rollover_end() {
        let overnight = shift(1, "2026-03-02", "22:00", "06:00");
        let morning = shift(2, "2026-03-03", "05:00", "09:00");
        assert!(intervals_overlap(&overnight, &morning));
    }

    #[test]
    fn non_overlapping_same_day_shifts_do_not_overlap() {
        let morning = shift(1, "2026-03-02", "08:00", "12:00");
        let afternoon = shift(2, "2026-03-02", "13:00", "17:00");
        assert!(!intervals_overlap(&morning, &afternoon));
    }

    #[test]
    fn rest_gap_is_measured_across_midnight() {
        let overnight = shift(1, "2026-03-02", "22:00", "06:00");
        let next_morning = shift(2, "2026-03-03", "10:00", "16:00");
        assert_eq!(rest_gap_hours(&overnight, &next_morning), 4.0);
    }

    #[test]
    fn overlapping_shifts_count_as_a_rest_conflict_too() {
        let a = shift(1, "2026-03-02", "08:00", "14:00");
        let b = shift(2, "2026-03-02", "12:00", "18:00");
        assert!(rest_gap_hours(&a, &b) < 10.0);
    }
}
