use crate::cnf::Clause;

pub fn filter_learned(base: &[Clause], learned: &mut Vec<Clause>) {
    let snapshot = learned.clone();
    learned.retain(|candidate| {
        let subsumed_by_base = base
            .iter()
            .any(|other| other != candidate && other.subset_of(candidate));
        let subsumed_by_sibling = snapshot
            .iter()
            .any(|other| other != candidate && other.subset_of(candidate));
        !(subsumed_by_base || subsumed_by_sibling)
    });
}

pub fn filter_self(clauses: &mut Vec<Clause>) {
    let snapshot = clauses.clone();
    clauses.retain(|candidate| {
        !snapshot
            .iter()
            .any(|other| other != candidate && other.subset_of(candidate))
    });
}
