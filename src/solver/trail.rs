use crate::cnf::{Clause, VarId};
use crate::solver::assignment::AssignmentMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub var: VarId,
    pub value: bool,
    pub is_decision: bool,
    pub reason: Option<Clause>,
}

/// Level 0 holds assignments forced without a decision. Level `k > 0` opens
/// with one decision followed by zero or more implications.
#[derive(Debug, Clone)]
pub struct Trail {
    levels: Vec<Vec<Assignment>>,
}

impl Trail {
    pub fn new() -> Self {
        Trail {
            levels: vec![Vec::new()],
        }
    }

    pub fn current_level(&self) -> u32 {
        (self.levels.len() - 1) as u32
    }

    pub fn push_decision(&mut self, assignments: &mut AssignmentMap, var: VarId, value: bool) {
        assert!(
            !assignments.is_assigned(var),
            "variable {var} is already assigned; cannot push a decision onto it"
        );
        self.levels.push(Vec::new());
        assignments.set(var, value, true, None);
        self.levels.last_mut().unwrap().push(Assignment {
            var,
            value,
            is_decision: true,
            reason: None,
        });
    }

    pub fn push_implication(
        &mut self,
        assignments: &mut AssignmentMap,
        var: VarId,
        value: bool,
        reason: Clause,
    ) {
        assert!(!reason.is_empty(), "MalformedReason: reason is empty");
        assert!(
            reason.contains_var(var),
            "MalformedReason: reason does not contain the implied variable"
        );
        assert!(
            !assignments.is_assigned(var),
            "variable {var} is already assigned; cannot push an implication onto it"
        );
        assignments.set(var, value, false, Some(reason.clone()));
        self.levels.last_mut().unwrap().push(Assignment {
            var,
            value,
            is_decision: false,
            reason: Some(reason),
        });
    }

    // Level 0 is never popped; the call is silently refused.
    pub fn pop_level(&mut self, assignments: &mut AssignmentMap) -> Vec<Assignment> {
        if self.levels.len() <= 1 {
            return Vec::new();
        }
        let popped = self.levels.pop().unwrap();
        for assignment in &popped {
            assignments.clear(assignment.var);
        }
        popped
    }

    pub fn level_of(&self, var: VarId) -> Option<u32> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|assignment| assignment.var == var))
            .map(|level| level as u32)
    }

    pub fn assignments_at(&self, level: u32) -> &[Assignment] {
        &self.levels[level as usize]
    }

    pub fn implications_reverse(&self) -> impl Iterator<Item = &Assignment> {
        self.levels
            .iter()
            .rev()
            .flat_map(|level| level.iter().rev())
            .filter(|assignment| !assignment.is_decision)
    }

    pub fn is_empty_except_level_zero(&self) -> bool {
        self.levels.len() == 1
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Literal;

    #[test]
    fn decision_opens_a_new_level() {
        let mut trail = Trail::new();
        let mut assignments = AssignmentMap::new(2);
        assert_eq!(trail.current_level(), 0);
        trail.push_decision(&mut assignments, 1, true);
        assert_eq!(trail.current_level(), 1);
        assert_eq!(trail.assignments_at(1).len(), 1);
        assert!(trail.assignments_at(1)[0].is_decision);
    }

    #[test]
    fn implication_appends_to_current_level() {
        let mut trail = Trail::new();
        let mut assignments = AssignmentMap::new(2);
        trail.push_decision(&mut assignments, 1, true);
        trail.push_implication(
            &mut assignments,
            2,
            false,
            Clause::new(vec![Literal::new(-1), Literal::new(-2)]),
        );
        assert_eq!(trail.assignments_at(1).len(), 2);
        assert!(!trail.assignments_at(1)[1].is_decision);
    }

    #[test]
    fn pop_level_refuses_level_zero() {
        let mut trail = Trail::new();
        let mut assignments = AssignmentMap::new(1);
        trail.push_implication(&mut assignments, 1, true, Clause::unit(Literal::new(1)));
        let popped = trail.pop_level(&mut assignments);
        assert!(popped.is_empty());
        assert!(assignments.is_assigned(1));
    }

    #[test]
    fn pop_level_clears_assignments() {
        let mut trail = Trail::new();
        let mut assignments = AssignmentMap::new(2);
        trail.push_decision(&mut assignments, 1, true);
        trail.push_implication(
            &mut assignments,
            2,
            false,
            Clause::new(vec![Literal::new(-1), Literal::new(-2)]),
        );
        trail.pop_level(&mut assignments);
        assert_eq!(trail.current_level(), 0);
        assert!(!assignments.is_assigned(1));
        assert!(!assignments.is_assigned(2));
    }

    #[test]
    fn level_of_scans_all_levels() {
        let mut trail = Trail::new();
        let mut assignments = AssignmentMap::new(2);
        trail.push_implication(&mut assignments, 1, true, Clause::unit(Literal::new(1)));
        trail.push_decision(&mut assignments, 2, true);
        assert_eq!(trail.level_of(1), Some(0));
        assert_eq!(trail.level_of(2), Some(1));
        assert_eq!(trail.level_of(99), None);
    }
}
