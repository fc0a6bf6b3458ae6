//! The CDCL search loop: decision, BCP, conflict analysis and
//! non-chronological backtracking wired together around the clause store
//! and trail.

mod assignment;
mod bcp;
pub mod clause_database;
mod clause_learning;
pub mod config;
pub mod heuristic;
mod proof_logger;
pub mod restarts;
pub mod statistics;
mod subsumption;
pub mod trace;
pub mod trail;
pub mod verdict;
pub mod vsids;

use crate::cnf::CnfInput;
use crate::solver::assignment::AssignmentMap;
use crate::solver::clause_database::ClauseDatabase;
use crate::solver::clause_learning::ConflictAnalyzer;
use crate::solver::config::Config;
use crate::solver::heuristic::Heuristic;
use crate::solver::proof_logger::ProofRecorder;
use crate::solver::restarts::Restarter;
use crate::solver::statistics::Statistics;
use crate::solver::trace::Trace;
use crate::solver::trail::Trail;
use crate::solver::verdict::{Analysis, Propagation, Verdict};
use crate::solver::vsids::Vsids;
use std::collections::HashMap;
use std::sync::atomic::Ordering;

/// Owns the CNF being decided. Constructed once per query; `solve` tears
/// down all search-local state (trail, clause database, proof recorder)
/// when it returns.
pub struct Solver {
    cnf: CnfInput,
    config: Config,
}

impl Solver {
    pub fn new(cnf: CnfInput, config: Config) -> Self {
        Solver { cnf, config }
    }

    /// `trace` observes decisions, learned clauses and restarts as they
    /// happen; pass [`trace::NoopTrace`] to opt out.
    pub fn solve(&mut self, trace: &dyn Trace) -> (Verdict, Statistics) {
        let mut stats = Statistics::new();
        stats.start_timing();

        let mut database = ClauseDatabase::new();
        for clause in self.cnf.clauses.iter().cloned() {
            database.add_original(clause);
        }
        if self.config.enable_subsumption {
            database.apply_subsumption_to_original();
        }

        let mut trail = Trail::new();
        let mut assignments = AssignmentMap::new(self.cnf.num_vars);
        let mut vsids = Vsids::new();
        let mut heuristic = Heuristic::new(&self.cnf);
        let mut restarter = Restarter::new();
        let mut proof = ProofRecorder::new(self.config.max_proof_steps);

        for _iteration in 0..self.config.max_iterations {
            if self.config.interrupt.load(Ordering::Relaxed) {
                stats.stop_timing();
                return (Verdict::Timeout, stats);
            }

            let trail_len_before = Self::trail_len(&trail);
            let propagation = bcp::propagate(
                || Box::new(database.iter_active()),
                &mut trail,
                &mut assignments,
                &self.config.interrupt,
                self.config.max_bcp_rounds,
            );
            stats.propagations += (Self::trail_len(&trail) - trail_len_before) as u64;

            match propagation {
                Propagation::Conflict { clause, justifying } => {
                    stats.conflicts += 1;
                    restarter.conflict();
                    let restart_due = restarter.is_due(self.config.enable_restart, self.config.restart_threshold);

                    let analysis = ConflictAnalyzer::analyze(
                        clause,
                        justifying,
                        &trail,
                        &mut vsids,
                        &mut proof,
                        &database,
                        self.config.max_explanation_steps,
                        restart_due,
                    );

                    match analysis {
                        Analysis::Unsat => {
                            stats.proof_steps = proof.step_count();
                            stats.stop_timing();
                            return (
                                Verdict::Unsat {
                                    proof: proof.render(&self.cnf.symbols),
                                    truncated: proof.is_truncated(),
                                },
                                stats,
                            );
                        }
                        Analysis::Learn { clause, level } => {
                            if database.add_learned(clause.clone()) {
                                stats.learned_clauses += 1;
                            }
                            stats.backjumps += 1;
                            trace.learned(&clause, level);

                            while trail.current_level() > level {
                                trail.pop_level(&mut assignments);
                            }
                            if clause.is_unit() {
                                let lit = clause.literals()[0];
                                if !assignments.is_assigned(lit.var()) {
                                    trail.push_implication(
                                        &mut assignments,
                                        lit.var(),
                                        lit.is_positive(),
                                        clause,
                                    );
                                }
                            }
                            heuristic.mark_backtrack();
                        }
                        Analysis::Restart { clause } => {
                            if database.add_learned(clause) {
                                stats.learned_clauses += 1;
                            }
                            database.apply_subsumption_to_learned();
                            while trail.current_level() > 0 {
                                trail.pop_level(&mut assignments);
                            }
                            heuristic.reset();
                            restarter.reset();
                            stats.restarts += 1;
                            trace.restart();
                        }
                    }
                }
                Propagation::Saturated => {
                    if assignments.all_assigned(self.cnf.num_vars) {
                        stats.proof_steps = proof.step_count();
                        stats.stop_timing();
                        return (Verdict::Sat { model: self.render_model(&assignments) }, stats);
                    }
                    match heuristic.choose(&assignments, &vsids) {
                        Some((var, value)) => {
                            stats.decisions += 1;
                            trace.decision(var, value);
                            trail.push_decision(&mut assignments, var, value);
                        }
                        None => {
                            // Every variable is assigned, just not by the check above
                            // because `all_assigned` disagreed mid-iteration; treat
                            // this as saturation with nothing left to decide.
                            stats.proof_steps = proof.step_count();
                            stats.stop_timing();
                            return (Verdict::Sat { model: self.render_model(&assignments) }, stats);
                        }
                    }
                }
            }
        }

        stats.proof_steps = proof.step_count();
        stats.stop_timing();
        (Verdict::Timeout, stats)
    }

    fn trail_len(trail: &Trail) -> usize {
        (0..=trail.current_level())
            .map(|level| trail.assignments_at(level).len())
            .sum()
    }

    fn render_model(&self, assignments: &AssignmentMap) -> HashMap<String, bool> {
        (1..=self.cnf.num_vars)
            .map(|var| {
                let value = assignments.get(var).map(|record| record.value).unwrap_or(false);
                (self.cnf.symbols.name(var).to_string(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::{Clause, Literal, SymbolTable};
    use crate::solver::trace::NoopTrace;
    use crate::solver::verdict::Verdict;

    fn cnf(clauses: Vec<Vec<i64>>, num_vars: usize) -> CnfInput {
        let clauses = clauses
            .into_iter()
            .map(|lits| Clause::new(lits.into_iter().map(Literal::new).collect()))
            .collect();
        CnfInput {
            num_vars,
            clauses,
            symbols: SymbolTable::default_for(num_vars),
        }
    }

    #[test]
    fn solves_a_satisfiable_triangle() {
        let mut solver = Solver::new(
            cnf(vec![vec![1, 2], vec![-1, 3], vec![-2, -3]], 3),
            Config::default(),
        );
        let (verdict, _) = solver.solve(&NoopTrace);
        match verdict {
            Verdict::Sat { model } => {
                assert!(model["x1"] || model["x2"]);
                assert!(!model["x1"] || model["x3"]);
                assert!(!model["x2"] || !model["x3"]);
            }
            other => panic!("expected Sat, got {other:?}"),
        }
    }

    #[test]
    fn contradicting_units_are_unsat_with_single_step_proof() {
        let mut solver = Solver::new(cnf(vec![vec![1], vec![-1]], 1), Config::default());
        let (verdict, _) = solver.solve(&NoopTrace);
        match verdict {
            Verdict::Unsat { proof, .. } => {
                assert_eq!(proof, "(x1) e (!x1) genera ([])");
            }
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    #[test]
    fn xor_chain_is_unsat() {
        let mut solver = Solver::new(
            cnf(
                vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]],
                2,
            ),
            Config::default(),
        );
        let (verdict, _) = solver.solve(&NoopTrace);
        assert!(matches!(verdict, Verdict::Unsat { .. }));
    }

    #[test]
    fn pigeonhole_two_into_one_is_unsat() {
        let mut solver = Solver::new(cnf(vec![vec![1], vec![2], vec![-1, -2]], 2), Config::default());
        let (verdict, _) = solver.solve(&NoopTrace);
        assert!(matches!(verdict, Verdict::Unsat { .. }));
    }

    #[test]
    fn restart_with_low_threshold_still_reaches_unsat() {
        let mut config = Config::default();
        config.enable_restart = true;
        config.restart_threshold = 2;
        let mut solver = Solver::new(
            cnf(
                vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]],
                2,
            ),
            config,
        );
        let (verdict, stats) = solver.solve(&NoopTrace);
        assert!(matches!(verdict, Verdict::Unsat { .. }));
        assert!(stats.restarts >= 1);
    }

    #[test]
    fn interrupt_flag_yields_timeout() {
        let config = Config::default();
        config.interrupt.store(true, Ordering::Relaxed);
        let mut solver = Solver::new(cnf(vec![vec![1, 2]], 2), config);
        let (verdict, _) = solver.solve(&NoopTrace);
        assert!(matches!(verdict, Verdict::Timeout));
    }
}
