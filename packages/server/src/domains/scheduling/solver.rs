//! C3 — MIP formulator and solver driver.
//!
//! Builds the binary-variable model described in the scheduling pipeline's
//! design notes and hands it to a [`SolverBackend`]. The backend is a trait
//! so the HiGHS-backed implementation can be swapped for a deterministic
//! stub in tests without touching the formulation.

use std::collections::HashMap;
use std::time::Instant;

use good_lp::{constraint, variable, Expression, ProblemVariables, Solution, SolverModel, Variable};

use crate::common::id::{EmployeeId, PlannedShiftId, RoleId};
use crate::domains::workforce::model::{OptimizationConfig, SolverStatus};

use super::data::OptimizationData;

#[derive(Debug, Clone)]
pub struct AssignmentCandidate {
    pub employee_id: EmployeeId,
    pub shift_id: PlannedShiftId,
    pub role_id: RoleId,
    pub preference_score: f64,
}

#[derive(Debug, Clone)]
pub struct SolverOutcome {
    pub status: SolverStatus,
    pub objective_value: Option<f64>,
    pub runtime_seconds: f64,
    pub achieved_gap: Option<f64>,
    pub assignments: Vec<AssignmentCandidate>,
    pub error_detail: Option<String>,
}

pub trait SolverBackend: Send + Sync {
    fn solve(&self, data: &OptimizationData, config: &OptimizationConfig) -> SolverOutcome;
}

/// Every `(employee, shift, role)` combination a variable may legally be
/// created for: the employee holds the role, the shift's template demands
/// the role, and the employee is available for the shift.
fn eligible_triples(data: &OptimizationData) -> Vec<(EmployeeId, PlannedShiftId, RoleId)> {
    let mut triples = Vec::new();
    for (e_idx, &employee_id) in data.employees.iter().enumerate() {
        let Some(qualified) = data.employee_roles.get(&employee_id) else {
            continue;
        };
        for (s_idx, &shift_id) in data.shifts.iter().enumerate() {
            if !data.availability[e_idx][s_idx] {
                continue;
            }
            let Some(requirements) = data.role_requirements.get(&shift_id) else {
                continue;
            };
            for (role_id, _count) in requirements {
                if qualified.contains(role_id) {
                    triples.push((employee_id, shift_id, *role_id));
                }
            }
        }
    }
    triples
}

pub struct HighsSolverBackend;

impl SolverBackend for HighsSolverBackend {
    fn solve(&self, data: &OptimizationData, config: &OptimizationConfig) -> SolverOutcome {
        let started = Instant::now();
        let triples = eligible_triples(data);

        if config.weight_fairness == 0.0
            && config.weight_preferences == 0.0
            && config.weight_cost == 0.0
            && config.weight_coverage == 0.0
        {
            return SolverOutcome {
                status: SolverStatus::Error,
                objective_value: None,
                runtime_seconds: started.elapsed().as_secs_f64(),
                achieved_gap: None,
                assignments: Vec::new(),
                error_detail: Some(
                    "optimization configuration has an all-zero weight bundle".to_string(),
                ),
            };
        }

        let mut vars = ProblemVariables::new();
        let mut x: HashMap<(EmployeeId, PlannedShiftId, RoleId), Variable> = HashMap::new();
        for &triple in &triples {
            x.insert(triple, vars.add(variable().binary()));
        }

        if x.is_empty() {
            return SolverOutcome {
                status: SolverStatus::Infeasible,
                objective_value: None,
                runtime_seconds: started.elapsed().as_secs_f64(),
                achieved_gap: None,
                assignments: Vec::new(),
                error_detail: Some("no eligible employee/shift/role combinations".to_string()),
            };
        }

        // A required (shift, role) with zero candidate variables makes
        // `Σ_e x[e,s,r] == count` an unsatisfiable `0 == count` before the
        // solver ever runs — catch it here rather than silently dropping
        // the constraint below, which would let an incomplete assignment
        // report `Optimal`.
        for (&shift_id, requirements) in &data.role_requirements {
            for &(role_id, count) in requirements {
                if count <= 0 {
                    continue;
                }
                let has_candidate = data
                    .employees
                    .iter()
                    .any(|&employee_id| x.contains_key(&(employee_id, shift_id, role_id)));
                if !has_candidate {
                    return SolverOutcome {
                        status: SolverStatus::Infeasible,
                        objective_value: None,
                        runtime_seconds: started.elapsed().as_secs_f64(),
                        achieved_gap: None,
                        assignments: Vec::new(),
                        error_detail: Some(format!(
                            "no eligible employee holds role {role_id} for shift {shift_id} (demand {count})"
                        )),
                    };
                }
            }
        }

        let max_fairness = vars.add(variable().min(0.0));
        let min_fairness = vars.add(variable().min(0.0));

        let mut objective = Expression::from(0.0);
        for (&(employee_id, shift_id, _role_id), &var) in &x {
            let e_idx = data.employee_index[&employee_id];
            let s_idx = data.shift_index[&shift_id];
            objective += config.weight_preferences * data.preference[e_idx][s_idx] * var;
            objective += config.weight_coverage * var;
            objective -= config.weight_cost * data.shift_durations[&shift_id] * var;
        }
        objective -= config.weight_fairness * (max_fairness - min_fairness);
        let objective_for_eval = objective.clone();

        let time_limit_seconds = config.max_runtime_seconds.max(1) as f64;
        let mip_gap = config.mip_gap;
        let mut model = vars.maximise(objective).using(|problem| {
            let mut highs_model = good_lp::solvers::highs::highs(problem);
            highs_model.set_option("time_limit", time_limit_seconds);
            highs_model.set_option("mip_rel_gap", mip_gap);
            highs_model
        });

        // Demand: for each shift and required role, exactly `count` assigned.
        for (&shift_id, requirements) in &data.role_requirements {
            for &(role_id, count) in requirements {
                let mut sum = Expression::from(0.0);
                let mut any_var = false;
                for &employee_id in &data.employees {
                    if let Some(&var) = x.get(&(employee_id, shift_id, role_id)) {
                        sum += var;
                        any_var = true;
                    }
                }
                if any_var {
                    model = model.with(constraint!(sum == count as f64));
                }
            }
        }

        // Single assignment per (employee, shift).
        for &employee_id in &data.employees {
            for &shift_id in &data.shifts {
                let mut sum = Expression::from(0.0);
                let mut any_var = false;
                for &role_id in &data.roles {
                    if let Some(&var) = x.get(&(employee_id, shift_id, role_id)) {
                        sum += var;
                        any_var = true;
                    }
                }
                if any_var {
                    model = model.with(constraint!(sum <= 1.0));
                }
            }
        }

        // No overlap.
        for &employee_id in &data.employees {
            for (&shift_a, conflicts) in &data.shift_overlaps {
                for &shift_b in conflicts {
                    if shift_b <= shift_a {
                        continue;
                    }
                    let mut sum = Expression::from(0.0);
                    let mut any_var = false;
                    for &role_id in &data.roles {
                        if let Some(&var) = x.get(&(employee_id, shift_a, role_id)) {
                            sum += var;
                            any_var = true;
                        }
                        if let Some(&var) = x.get(&(employee_id, shift_b, role_id)) {
                            sum += var;
                            any_var = true;
                        }
                    }
                    if any_var {
                        model = model.with(constraint!(sum <= 1.0));
                    }
                }
            }
        }

        // Rest conflicts, only when hard.
        let min_rest_hard = data
            .system_constraints
            .get(&crate::domains::workforce::model::SystemConstraintType::MinRestHours)
            .map(|(_, hard)| *hard)
            .unwrap_or(false);
        if min_rest_hard {
            for &employee_id in &data.employees {
                for (&shift_a, conflicts) in &data.shift_rest_conflicts {
                    for &shift_b in conflicts {
                        if shift_b <= shift_a {
                            continue;
                        }
                        let mut sum = Expression::from(0.0);
                        let mut any_var = false;
                        for &role_id in &data.roles {
                            if let Some(&var) = x.get(&(employee_id, shift_a, role_id)) {
                                sum += var;
                                any_var = true;
                            }
                            if let Some(&var) = x.get(&(employee_id, shift_b, role_id)) {
                                sum += var;
                                any_var = true;
                            }
                        }
                        if any_var {
                            model = model.with(constraint!(sum <= 1.0));
                        }
                    }
                }
            }
        }

        // Weekly hours / shifts ceilings, only when hard.
        let max_hours = data
            .system_constraints
            .get(&crate::domains::workforce::model::SystemConstraintType::MaxHoursPerWeek)
            .filter(|(_, hard)| *hard)
            .map(|(value, _)| *value);
        let max_shifts = data
            .system_constraints
            .get(&crate::domains::workforce::model::SystemConstraintType::MaxShiftsPerWeek)
            .filter(|(_, hard)| *hard)
            .map(|(value, _)| *value);

        for &employee_id in &data.employees {
            let mut hours_sum = Expression::from(0.0);
            let mut shifts_sum = Expression::from(0.0);
            let mut any_var = false;
            for &shift_id in &data.shifts {
                for &role_id in &data.roles {
                    if let Some(&var) = x.get(&(employee_id, shift_id, role_id)) {
                        hours_sum += data.shift_durations[&shift_id] * var;
                        shifts_sum += var;
                        any_var = true;
                    }
                }
            }
            if !any_var {
                continue;
            }
            if let Some(max_hours) = max_hours {
                model = model.with(constraint!(hours_sum.clone() <= max_hours));
            }
            if let Some(max_shifts) = max_shifts {
                model = model.with(constraint!(shifts_sum.clone() <= max_shifts));
            }
            // Fairness linearization: bound the auxiliary max/min by every
            // employee's total assignment count.
            model = model.with(constraint!(max_fairness >= shifts_sum.clone()));
            model = model.with(constraint!(min_fairness <= shifts_sum));
        }

        let solution = model.solve();

        let runtime_seconds = started.elapsed().as_secs_f64();
        match solution {
            Ok(solution) => {
                let objective_value = solution.eval(objective_for_eval.clone());
                let assignments: Vec<AssignmentCandidate> = x
                    .iter()
                    .filter(|(_, &var)| solution.value(var) >= 0.5)
                    .map(|(&(employee_id, shift_id, role_id), _)| {
                        let e_idx = data.employee_index[&employee_id];
                        let s_idx = data.shift_index[&shift_id];
                        AssignmentCandidate {
                            employee_id,
                            shift_id,
                            role_id,
                            preference_score: data.preference[e_idx][s_idx],
                        }
                    })
                    .collect();
                SolverOutcome {
                    status: SolverStatus::Optimal,
                    objective_value: Some(objective_value),
                    runtime_seconds,
                    // `Ok` is only returned for a proven-optimal HiGHS status
                    // (infeasible/unbounded/other statuses are handled below),
                    // so the achieved gap is zero.
                    achieved_gap: Some(0.0),
                    assignments,
                    error_detail: None,
                }
            }
            Err(good_lp::ResolutionError::Infeasible) => SolverOutcome {
                status: SolverStatus::Infeasible,
                objective_value: None,
                runtime_seconds,
                achieved_gap: None,
                assignments: Vec::new(),
                error_detail: Some("no feasible assignment satisfies the hard constraints".to_string()),
            },
            Err(good_lp::ResolutionError::Unbounded) => SolverOutcome {
                status: SolverStatus::Error,
                objective_value: None,
                runtime_seconds,
                achieved_gap: None,
                assignments: Vec::new(),
                error_detail: Some("objective is unbounded".to_string()),
            },
            Err(other) => {
                let detail = other.to_string();
                let lower = detail.to_lowercase();
                if lower.contains("time") && lower.contains("limit") {
                    SolverOutcome {
                        status: SolverStatus::NoSolutionFound,
                        objective_value: None,
                        runtime_seconds,
                        achieved_gap: None,
                        assignments: Vec::new(),
                        error_detail: Some(format!(
                            "solver did not find a solution within {time_limit_seconds}s: {detail}"
                        )),
                    }
                } else {
                    SolverOutcome {
                        status: SolverStatus::Error,
                        objective_value: None,
                        runtime_seconds,
                        achieved_gap: None,
                        assignments: Vec::new(),
                        error_detail: Some(detail),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
pub mod stub {
    use super::*;

    /// Deterministic backend used in orchestrator tests: greedily assigns
    /// the first eligible employee to each (shift, role) slot in demand
    /// order, and reports `infeasible` when demand cannot be met.
    pub struct StubSolverBackend;

    impl SolverBackend for StubSolverBackend {
        fn solve(&self, data: &OptimizationData, _config: &OptimizationConfig) -> SolverOutcome {
            let mut taken: std::collections::HashSet<(EmployeeId, PlannedShiftId)> =
                std::collections::HashSet::new();
            let mut assignments = Vec::new();
            let mut infeasible = false;

            for &shift_id in &data.shifts {
                let Some(requirements) = data.role_requirements.get(&shift_id) else {
                    continue;
                };
                for &(role_id, count) in requirements {
                    let mut filled = 0;
                    for &employee_id in &data.employees {
                        if filled >= count {
                            break;
                        }
                        if taken.contains(&(employee_id, shift_id)) {
                            continue;
                        }
                        let e_idx = data.employee_index[&employee_id];
                        let s_idx = data.shift_index[&shift_id];
                        if !data.availability[e_idx][s_idx] {
                            continue;
                        }
                        let Some(qualified) = data.employee_roles.get(&employee_id) else {
                            continue;
                        };
                        if !qualified.contains(&role_id) {
                            continue;
                        }
                        let overlaps_taken = data
                            .shift_overlaps
                            .get(&shift_id)
                            .map(|conflicts| {
                                conflicts
                                    .iter()
                                    .any(|c| taken.contains(&(employee_id, *c)))
                            })
                            .unwrap_or(false);
                        if overlaps_taken {
                            continue;
                        }
                        taken.insert((employee_id, shift_id));
                        assignments.push(AssignmentCandidate {
                            employee_id,
                            shift_id,
                            role_id,
                            preference_score: data.preference[e_idx][s_idx],
                        });
                        filled += 1;
                    }
                    if filled < count {
                        infeasible = true;
                    }
                }
            }

            if infeasible {
                SolverOutcome {
                    status: SolverStatus::Infeasible,
                    objective_value: None,
                    runtime_seconds: 0.0,
                    achieved_gap: None,
                    assignments: Vec::new(),
                    error_detail: Some("demand could not be met".to_string()),
                }
            } else {
                SolverOutcome {
                    status: SolverStatus::Optimal,
                    objective_value: Some(assignments.len() as f64),
                    runtime_seconds: 0.0,
                    achieved_gap: Some(0.0),
                    assignments,
                    error_detail: None,
                }
            }
        }
    }
}
