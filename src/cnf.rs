//! Literal, clause and CNF input types consumed by the solver.

use crate::error::SolverError;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

pub type VarId = usize;
pub type ClauseId = usize;

/// Positive means the variable is asserted true, negative means false.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    value: i64,
}

impl Literal {
    pub fn new(value: i64) -> Self {
        debug_assert_ne!(value, 0, "literal 0 is not a valid literal");
        Literal { value }
    }

    pub fn from_var(var: VarId, positive: bool) -> Self {
        let magnitude = var as i64;
        Literal::new(if positive { magnitude } else { -magnitude })
    }

    pub fn var(&self) -> VarId {
        self.value.unsigned_abs() as VarId
    }

    pub fn is_positive(&self) -> bool {
        self.value > 0
    }

    pub fn is_negative(&self) -> bool {
        self.value < 0
    }
}

impl std::ops::Neg for Literal {
    type Output = Literal;

    fn neg(self) -> Literal {
        Literal::new(-self.value)
    }
}

// Sorted by variable id ascending, positive polarity before negative.
impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.var()
            .cmp(&other.var())
            .then_with(|| other.is_positive().cmp(&self.is_positive()))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Literals are sorted and deduplicated at construction, so equality is
/// plain set equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort_unstable();
        literals.dedup();
        Clause { literals }
    }

    pub fn empty() -> Self {
        Clause { literals: vec![] }
    }

    pub fn unit(lit: Literal) -> Self {
        Clause {
            literals: vec![lit],
        }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn contains_var(&self, var: VarId) -> bool {
        self.literals.iter().any(|lit| lit.var() == var)
    }

    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.binary_search(&lit).is_ok()
    }

    pub fn subset_of(&self, other: &Clause) -> bool {
        self.literals.iter().all(|lit| other.contains(*lit))
    }

    /// Binary resolution: union of both literal sets with every
    /// complementary pair removed.
    pub fn resolve(&self, other: &Clause) -> Clause {
        let mut merged: Vec<Literal> = self
            .literals
            .iter()
            .chain(other.literals.iter())
            .copied()
            .collect();
        merged.sort_unstable();
        merged.dedup();
        let snapshot = merged.clone();
        merged.retain(|lit| !snapshot.contains(&-*lit));
        Clause { literals: merged }
    }

    pub fn render(&self, symbols: &SymbolTable) -> String {
        if self.literals.is_empty() {
            return "[]".to_string();
        }
        if self.literals.len() == 1 {
            let lit = self.literals[0];
            let name = symbols.name(lit.var());
            return if lit.is_positive() {
                name.to_string()
            } else {
                format!("!{name}")
            };
        }
        self.literals
            .iter()
            .map(|lit| {
                let name = symbols.name(lit.var());
                if lit.is_positive() {
                    name.to_string()
                } else {
                    format!("!{name}")
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.literals)
    }
}

/// Bijection between internal `1..N` variable ids and user-facing names.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, VarId>,
}

impl SymbolTable {
    pub fn from_names(names: Vec<String>) -> Self {
        let ids = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx + 1))
            .collect();
        SymbolTable { names, ids }
    }

    pub fn default_for(num_vars: usize) -> Self {
        Self::from_names((1..=num_vars).map(|id| format!("x{id}")).collect())
    }

    pub fn name(&self, var: VarId) -> &str {
        self.names.get(var - 1).map(String::as_str).unwrap_or("?")
    }

    pub fn id(&self, name: &str) -> Option<VarId> {
        self.ids.get(name).copied()
    }

    pub fn num_vars(&self) -> usize {
        self.names.len()
    }
}

#[derive(Debug, Clone)]
pub struct CnfInput {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
    pub symbols: SymbolTable,
}

impl CnfInput {
    pub fn new(
        num_vars: usize,
        raw_clauses: Vec<Vec<i64>>,
        symbols: SymbolTable,
    ) -> Result<Self, SolverError> {
        if symbols.num_vars() < num_vars {
            return Err(SolverError::MissingSymbol {
                var: symbols.num_vars() + 1,
            });
        }
        let mut clauses = Vec::with_capacity(raw_clauses.len());
        for (index, raw) in raw_clauses.into_iter().enumerate() {
            if raw.is_empty() {
                return Err(SolverError::EmptyClause { index });
            }
            let mut literals = Vec::with_capacity(raw.len());
            for value in raw {
                if value == 0 {
                    return Err(SolverError::ZeroLiteral { index });
                }
                if value.unsigned_abs() as usize > num_vars {
                    return Err(SolverError::LiteralOutOfRange {
                        index,
                        literal: value,
                        num_vars,
                    });
                }
                literals.push(Literal::new(value));
            }
            clauses.push(Clause::new(literals));
        }
        Ok(CnfInput {
            num_vars,
            clauses,
            symbols,
        })
    }

    pub fn check_model(&self, model: &HashMap<VarId, bool>) -> bool {
        self.clauses.iter().all(|clause| {
            clause.literals().iter().any(|lit| {
                model
                    .get(&lit.var())
                    .map(|value| *value == lit.is_positive())
                    .unwrap_or(false)
            })
        })
    }

    /// Same check, keyed by variable name instead of id.
    pub fn check_named_model(&self, model: &HashMap<String, bool>) -> bool {
        let by_id: HashMap<VarId, bool> = (1..=self.num_vars)
            .filter_map(|var| model.get(self.symbols.name(var)).map(|value| (var, *value)))
            .collect();
        self.check_model(&by_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_ordering_is_by_var_then_polarity() {
        let mut lits = vec![
            Literal::from_var(2, false),
            Literal::from_var(1, false),
            Literal::from_var(1, true),
        ];
        lits.sort();
        assert_eq!(
            lits,
            vec![
                Literal::from_var(1, true),
                Literal::from_var(1, false),
                Literal::from_var(2, false),
            ]
        );
    }

    #[test]
    fn clause_equality_is_set_equality() {
        let a = Clause::new(vec![Literal::new(1), Literal::new(2)]);
        let b = Clause::new(vec![Literal::new(2), Literal::new(1), Literal::new(2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn resolve_removes_complementary_pair() {
        let a = Clause::new(vec![Literal::new(1), Literal::new(2)]);
        let b = Clause::new(vec![Literal::new(-1), Literal::new(3)]);
        let resolvent = a.resolve(&b);
        assert_eq!(
            resolvent,
            Clause::new(vec![Literal::new(2), Literal::new(3)])
        );
    }

    #[test]
    fn resolve_of_contradicting_units_is_empty() {
        let a = Clause::unit(Literal::new(1));
        let b = Clause::unit(Literal::new(-1));
        assert!(a.resolve(&b).is_empty());
    }

    #[test]
    fn subset_containment() {
        let c1 = Clause::new(vec![Literal::new(1)]);
        let c2 = Clause::new(vec![Literal::new(1), Literal::new(2)]);
        assert!(c1.subset_of(&c2));
        assert!(!c2.subset_of(&c1));
    }

    #[test]
    fn render_formats() {
        let symbols = SymbolTable::default_for(3);
        assert_eq!(Clause::empty().render(&symbols), "[]");
        assert_eq!(Clause::unit(Literal::new(1)).render(&symbols), "x1");
        assert_eq!(Clause::unit(Literal::new(-1)).render(&symbols), "!x1");
        let clause = Clause::new(vec![Literal::new(1), Literal::new(-2)]);
        assert_eq!(clause.render(&symbols), "x1 | !x2");
    }

    #[test]
    fn rejects_zero_literal() {
        let err = CnfInput::new(2, vec![vec![1, 0]], SymbolTable::default_for(2)).unwrap_err();
        assert_eq!(err, SolverError::ZeroLiteral { index: 0 });
    }

    #[test]
    fn rejects_out_of_range_literal() {
        let err = CnfInput::new(2, vec![vec![3]], SymbolTable::default_for(2)).unwrap_err();
        assert_eq!(
            err,
            SolverError::LiteralOutOfRange {
                index: 0,
                literal: 3,
                num_vars: 2
            }
        );
    }

    #[test]
    fn rejects_empty_clause() {
        let err = CnfInput::new(2, vec![vec![]], SymbolTable::default_for(2)).unwrap_err();
        assert_eq!(err, SolverError::EmptyClause { index: 0 });
    }

    #[test]
    fn rejects_symbol_table_missing_a_name() {
        let err = CnfInput::new(3, vec![vec![1]], SymbolTable::default_for(2)).unwrap_err();
        assert_eq!(err, SolverError::MissingSymbol { var: 3 });
    }
}
