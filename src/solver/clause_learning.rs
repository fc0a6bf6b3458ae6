use crate::cnf::{Clause, Literal};
use crate::solver::clause_database::ClauseDatabase;
use crate::solver::proof_logger::ProofRecorder;
use crate::solver::trail::Trail;
use crate::solver::verdict::Analysis;
use crate::solver::vsids::Vsids;

/// Sequential-explanation analysis, not the classical implication-graph
/// 1-UIP walk: just a chain of binary resolutions against whichever reason
/// clause the trail hands back next.
pub struct ConflictAnalyzer;

impl ConflictAnalyzer {
    #[allow(clippy::too_many_arguments)]
    pub fn analyze(
        conflict: Clause,
        justifying: Option<Clause>,
        trail: &Trail,
        vsids: &mut Vsids,
        proof: &mut ProofRecorder,
        database: &ClauseDatabase,
        max_explanation_steps: u32,
        restart_due: bool,
    ) -> Analysis {
        vsids.bump_clause(&conflict);

        let mut explanation = conflict.clone();
        if let Some(justifying) = justifying {
            let resolvent = justifying.resolve(&conflict);
            proof.record(justifying, conflict, resolvent.clone());
            explanation = resolvent;
        }

        // A due restart takes over right after the first resolution step,
        // before the usual unit/same-level-implication branching.
        if restart_due {
            return Analysis::Restart { clause: explanation };
        }

        for _ in 0..max_explanation_steps {
            if explanation.is_empty() {
                return Analysis::Unsat;
            }
            if explanation.is_unit() {
                let lit = explanation.literals()[0];
                if let Some(contradiction) = find_contradicting_unit(lit, trail, database) {
                    let resolvent = explanation.resolve(&contradiction);
                    proof.record(explanation, contradiction, resolvent);
                    return Analysis::Unsat;
                }
                return Analysis::Learn {
                    clause: explanation,
                    level: 0,
                };
            }
            match find_current_level_implication(&explanation, trail) {
                Some(reason) => {
                    let resolvent = reason.resolve(&explanation);
                    proof.record(reason, explanation.clone(), resolvent.clone());
                    explanation = resolvent;
                }
                None => {
                    let level = compute_backtrack_level(&explanation, trail);
                    return Analysis::Learn {
                        clause: explanation,
                        level,
                    };
                }
            }
        }
        // Cap hit: abort rather than return a silent partial result.
        Analysis::Unsat
    }
}

fn find_contradicting_unit(lit: Literal, trail: &Trail, database: &ClauseDatabase) -> Option<Clause> {
    if let Some(assignment) = trail.assignments_at(0).iter().find(|a| a.var == lit.var()) {
        if assignment.value != lit.is_positive() {
            return Some(
                assignment
                    .reason
                    .clone()
                    .unwrap_or_else(|| Clause::unit(-lit)),
            );
        }
    }
    database
        .iter_active()
        .find(|clause| clause.is_unit() && clause.literals()[0] == -lit)
        .cloned()
}

fn find_current_level_implication(explanation: &Clause, trail: &Trail) -> Option<Clause> {
    trail
        .assignments_at(trail.current_level())
        .iter()
        .find(|assignment| !assignment.is_decision && explanation.contains_var(assignment.var))
        .and_then(|assignment| assignment.reason.clone())
}

// Max level among explanation's literals other than the asserted one, or 0.
fn compute_backtrack_level(explanation: &Clause, trail: &Trail) -> u32 {
    let current_level = trail.current_level();
    explanation
        .literals()
        .iter()
        .map(|lit| trail.level_of(lit.var()).unwrap_or(0))
        .filter(|&level| level != current_level)
        .max()
        .unwrap_or(0)
}
