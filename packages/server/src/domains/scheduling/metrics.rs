//! Run metric summary (spec §4.4.1), computed from persisted solution rows.

use std::collections::HashMap;

use serde::Serialize;

use crate::common::id::EmployeeId;
use crate::domains::workforce::model::SchedulingSolutionRow;

#[derive(Debug, Clone, Serialize, Default)]
pub struct RunMetrics {
    pub total_assignments: i64,
    pub avg_preference_score: f64,
    pub min_assignments: i64,
    pub max_assignments: i64,
    pub avg_assignments: f64,
    pub shifts_filled: i64,
    pub shifts_total: i64,
    pub employees_assigned: i64,
    pub employees_total: i64,
}

pub fn calculate_metrics(
    solutions: &[SchedulingSolutionRow],
    shifts_total: i64,
    employees_total: i64,
) -> RunMetrics {
    let total_assignments = solutions.len() as i64;

    let avg_preference_score = if solutions.is_empty() {
        0.0
    } else {
        solutions.iter().map(|s| s.preference_score).sum::<f64>() / solutions.len() as f64
    };

    let mut load_by_employee: HashMap<EmployeeId, i64> = HashMap::new();
    for solution in solutions {
        if let Some(employee_id) = solution.employee_id {
            *load_by_employee.entry(employee_id).or_insert(0) += 1;
        }
    }
    let loads: Vec<i64> = load_by_employee.values().copied().collect();
    let min_assignments = loads.iter().copied().min().unwrap_or(0);
    let max_assignments = loads.iter().copied().max().unwrap_or(0);
    let avg_assignments = if loads.is_empty() {
        0.0
    } else {
        loads.iter().sum::<i64>() as f64 / loads.len() as f64
    };

    let shifts_filled = solutions
        .iter()
        .map(|s| s.planned_shift_id)
        .collect::<std::collections::HashSet<_>>()
        .len() as i64;

    let employees_assigned = load_by_employee.len() as i64;

    RunMetrics {
        total_assignments,
        avg_preference_score,
        min_assignments,
        max_assignments,
        avg_assignments,
        shifts_filled,
        shifts_total,
        employees_assigned,
        employees_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::id::{PlannedShiftId, RoleId};

    fn row(id: i32, shift: i32, employee: i32, score: f64) -> SchedulingSolutionRow {
        SchedulingSolutionRow {
            id: id.into(),
            scheduling_run_id: 1.into(),
            planned_shift_id: PlannedShiftId::from(shift),
            employee_id: Some(employee.into()),
            role_id: Some(RoleId::from(1)),
            preference_score: score,
        }
    }

    #[test]
    fn empty_solutions_yield_zeroed_metrics() {
        let metrics = calculate_metrics(&[], 5, 3);
        assert_eq!(metrics.total_assignments, 0);
        assert_eq!(metrics.avg_preference_score, 0.0);
        assert_eq!(metrics.shifts_total, 5);
        assert_eq!(metrics.employees_total, 3);
    }

    #[test]
    fn computes_load_distribution_across_employees() {
        let solutions = vec![row(1, 1, 10, 0.5), row(2, 2, 10, 0.7), row(3, 3, 20, 0.9)];
        let metrics = calculate_metrics(&solutions, 3, 2);
        assert_eq!(metrics.total_assignments, 3);
        assert_eq!(metrics.shifts_filled, 3);
        assert_eq!(metrics.employees_assigned, 2);
        assert_eq!(metrics.min_assignments, 1);
        assert_eq!(metrics.max_assignments, 2);
        assert!((metrics.avg_preference_score - 0.7).abs() < 1e-9);
    }
}
