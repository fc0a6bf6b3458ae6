use crate::cnf::{Clause, VarId};

/// Passed explicitly into [`crate::solver::Solver`] to observe decisions,
/// learned clauses and restarts as they happen. The core never configures a
/// logging subscriber itself; that stays the caller's job.
pub trait Trace {
    fn decision(&self, var: VarId, value: bool);
    fn learned(&self, clause: &Clause, backtrack_level: u32);
    fn restart(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl Trace for NoopTrace {
    fn decision(&self, _var: VarId, _value: bool) {}
    fn learned(&self, _clause: &Clause, _backtrack_level: u32) {}
    fn restart(&self) {}
}

/// Emits `log` crate events for decisions, learned clauses and restarts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTrace;

impl Trace for LoggingTrace {
    fn decision(&self, var: VarId, value: bool) {
        log::trace!("decision: x{var} = {value}");
    }

    fn learned(&self, clause: &Clause, backtrack_level: u32) {
        log::debug!(
            "learned clause of size {} backtracking to level {backtrack_level}",
            clause.len()
        );
    }

    fn restart(&self) {
        log::debug!("restart fired");
    }
}
