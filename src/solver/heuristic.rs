use crate::cnf::{CnfInput, VarId};
use crate::solver::assignment::AssignmentMap;
use crate::solver::vsids::Vsids;

/// Variable order is fixed at construction: descending occurrence frequency,
/// ties broken by ascending id. VSIDS only picks the chosen variable's
/// polarity, never the order itself.
pub struct Heuristic {
    order: Vec<VarId>,
    last_chosen_var: Option<VarId>,
    last_decision_caused_backtrack: bool,
}

impl Heuristic {
    pub fn new(input: &CnfInput) -> Self {
        let mut counts = vec![0u32; input.num_vars + 1];
        for clause in &input.clauses {
            for lit in clause.literals() {
                counts[lit.var()] += 1;
            }
        }
        let mut order: Vec<VarId> = (1..=input.num_vars).collect();
        order.sort_by(|&a, &b| counts[b].cmp(&counts[a]).then(a.cmp(&b)));
        Heuristic {
            order,
            last_chosen_var: None,
            last_decision_caused_backtrack: false,
        }
    }

    // Skips last_chosen_var after a backtrack, unless that would leave no
    // unassigned variable at all.
    pub fn choose(&mut self, assignments: &AssignmentMap, vsids: &Vsids) -> Option<(VarId, bool)> {
        let guarded = self
            .last_decision_caused_backtrack
            .then_some(self.last_chosen_var)
            .flatten();

        let var = self
            .order
            .iter()
            .copied()
            .find(|&v| !assignments.is_assigned(v) && Some(v) != guarded)
            .or_else(|| self.order.iter().copied().find(|&v| !assignments.is_assigned(v)))?;

        self.last_chosen_var = Some(var);
        self.last_decision_caused_backtrack = false;
        Some((var, vsids.polarity(var)))
    }

    pub fn mark_backtrack(&mut self) {
        self.last_decision_caused_backtrack = true;
    }

    pub fn reset(&mut self) {
        self.last_chosen_var = None;
        self.last_decision_caused_backtrack = false;
    }
}
