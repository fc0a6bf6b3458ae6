use crate::cnf::Clause;
use std::collections::HashMap;

#[derive(Debug)]
pub enum Propagation {
    Saturated,
    /// `justifying` is the reason clause of the most recent implication that
    /// falsifies one of `clause`'s literals, or `None` if no such
    /// implication exists on the trail.
    Conflict {
        clause: Clause,
        justifying: Option<Clause>,
    },
}

#[derive(Debug)]
pub enum Analysis {
    Unsat,
    Learn { clause: Clause, level: u32 },
    /// A restart fired mid-analysis; `clause` is the single resolution
    /// step's resolvent, still to be learned before the trail pops to
    /// level 0.
    Restart { clause: Clause },
}

/// Model maps user-facing variable names to their assigned value;
/// unassigned variables default to `false`.
#[derive(Debug)]
pub enum Verdict {
    Sat { model: HashMap<String, bool> },
    Unsat { proof: String, truncated: bool },
    Timeout,
}
