use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("clause {index} is empty")]
    EmptyClause { index: usize },

    #[error("clause {index} contains literal 0")]
    ZeroLiteral { index: usize },

    #[error("clause {index} contains literal {literal} out of range for {num_vars} variables")]
    LiteralOutOfRange {
        index: usize,
        literal: i64,
        num_vars: usize,
    },

    #[error("symbol table is missing a name for variable {var}")]
    MissingSymbol { var: usize },
}
