use crate::cnf::Clause;
use crate::solver::assignment::AssignmentMap;
use crate::solver::trail::Trail;
use crate::solver::verdict::Propagation;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Finds the reason clause of the most recent implication that falsifies
/// one of `conflict`'s literals.
pub fn find_justifying(conflict: &Clause, trail: &Trail) -> Option<Clause> {
    trail
        .implications_reverse()
        .find(|assignment| {
            conflict
                .literals()
                .iter()
                .any(|lit| lit.var() == assignment.var && lit.is_positive() != assignment.value)
        })
        .and_then(|assignment| assignment.reason.clone())
}

enum ClauseState {
    Satisfied,
    Unresolved { unassigned_count: usize, unit: Option<crate::cnf::Literal> },
    Falsified,
}

fn evaluate(clause: &Clause, assignments: &AssignmentMap) -> ClauseState {
    let mut unassigned_count = 0;
    let mut unit = None;
    for lit in clause.literals() {
        match assignments.value_of(*lit) {
            Some(true) => return ClauseState::Satisfied,
            Some(false) => {}
            None => {
                unassigned_count += 1;
                unit = Some(*lit);
            }
        }
    }
    if unassigned_count == 0 {
        ClauseState::Falsified
    } else {
        ClauseState::Unresolved {
            unassigned_count,
            unit,
        }
    }
}

/// Scans every active clause each round and asserts any unit it finds,
/// until a round makes no progress, a clause is falsified, or
/// `max_bcp_rounds` is exceeded.
pub fn propagate<'a>(
    clauses: impl Fn() -> Box<dyn Iterator<Item = &'a Clause> + 'a>,
    trail: &mut Trail,
    assignments: &mut AssignmentMap,
    interrupt: &Arc<AtomicBool>,
    max_bcp_rounds: u32,
) -> Propagation {
    for _round in 0..max_bcp_rounds {
        if interrupt.load(Ordering::Relaxed) {
            return Propagation::Saturated;
        }
        let mut made_progress = false;
        for clause in clauses() {
            match evaluate(clause, assignments) {
                ClauseState::Falsified => {
                    let justifying = find_justifying(clause, trail);
                    return Propagation::Conflict {
                        clause: clause.clone(),
                        justifying,
                    };
                }
                ClauseState::Unresolved {
                    unassigned_count: 1,
                    unit: Some(lit),
                } => {
                    trail.push_implication(
                        assignments,
                        lit.var(),
                        lit.is_positive(),
                        clause.clone(),
                    );
                    made_progress = true;
                }
                _ => {}
            }
        }
        if !made_progress {
            return Propagation::Saturated;
        }
    }
    Propagation::Saturated
}
