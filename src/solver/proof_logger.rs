use crate::cnf::{Clause, SymbolTable};

#[derive(Debug, Clone)]
pub struct ProofStep {
    pub justifying: Clause,
    pub conflict: Clause,
    pub resolvent: Clause,
}

/// Bounded by `max_steps`; once full, further records are dropped and the
/// recorder is marked truncated.
#[derive(Debug, Clone)]
pub struct ProofRecorder {
    steps: Vec<ProofStep>,
    max_steps: u32,
    truncated: bool,
}

impl ProofRecorder {
    pub fn new(max_steps: u32) -> Self {
        ProofRecorder {
            steps: Vec::new(),
            max_steps,
            truncated: false,
        }
    }

    pub fn record(&mut self, justifying: Clause, conflict: Clause, resolvent: Clause) {
        if self.steps.len() as u32 >= self.max_steps {
            self.truncated = true;
            return;
        }
        self.steps.push(ProofStep {
            justifying,
            conflict,
            resolvent,
        });
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    // Walks backward reachability from the final empty clause, dropping
    // steps never consumed as a parent. Returned unfiltered if the proof
    // didn't end in the empty clause.
    pub fn optimized(&self) -> Vec<&ProofStep> {
        let Some(last) = self.steps.last() else {
            return Vec::new();
        };
        if !last.resolvent.is_empty() {
            return self.steps.iter().collect();
        }
        let mut needed: Vec<&Clause> = vec![&last.resolvent];
        let mut keep = vec![false; self.steps.len()];
        for (index, step) in self.steps.iter().enumerate().rev() {
            if needed.iter().any(|clause| **clause == step.resolvent) {
                keep[index] = true;
                needed.push(&step.justifying);
                needed.push(&step.conflict);
            }
        }
        self.steps
            .iter()
            .enumerate()
            .filter(|(index, _)| keep[*index])
            .map(|(_, step)| step)
            .collect()
    }

    pub fn render(&self, symbols: &SymbolTable) -> String {
        self.optimized()
            .iter()
            .map(|step| {
                format!(
                    "({}) e ({}) genera ({})",
                    step.justifying.render(symbols),
                    step.conflict.render(symbols),
                    step.resolvent.render(symbols)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
