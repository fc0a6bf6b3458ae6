//! DIMACS CNF loader. Turns a `.cnf`/`.cnf.gz` file into the
//! [`crate::cnf::CnfInput`] the solver consumes, inventing default `x{n}`
//! variable names since bare DIMACS carries none of its own.

use flate2::read::GzDecoder;
use itertools::Itertools;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::cnf::{CnfInput, SymbolTable};
use crate::error::SolverError;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("file {path} not found")]
    NotFound { path: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file is empty")]
    EmptyFile,
    #[error("invalid DIMACS header, expected 'p cnf <vars> <clauses>'")]
    InvalidHeader,
    #[error("expected {expected} clauses, got {actual}")]
    ClauseCountMismatch { expected: usize, actual: usize },
    #[error("'{token}' is not a valid literal")]
    InvalidLiteral { token: String },
    #[error("last clause is not terminated with 0")]
    UnterminatedClause,
    #[error(transparent)]
    Clause(#[from] SolverError),
}

pub fn clauses_from_dimacs_file(path: &str) -> Result<CnfInput, DimacsError> {
    if !Path::new(path).exists() {
        return Err(DimacsError::NotFound { path: path.to_string() });
    }
    let contents = if path.ends_with(".gz") {
        let file = std::fs::File::open(path).map_err(|source| DimacsError::Io {
            path: path.to_string(),
            source,
        })?;
        let mut decoder = GzDecoder::new(file);
        let mut out = String::new();
        decoder.read_to_string(&mut out).map_err(|source| DimacsError::Io {
            path: path.to_string(),
            source,
        })?;
        out
    } else {
        std::fs::read_to_string(path).map_err(|source| DimacsError::Io {
            path: path.to_string(),
            source,
        })?
    };
    clauses_from_dimacs(&contents)
}

pub fn clauses_from_dimacs(input: &str) -> Result<CnfInput, DimacsError> {
    let lines: Vec<&str> = input
        .lines()
        .filter(|line| !line.starts_with('c') && !line.starts_with('%') && !line.trim().is_empty())
        .collect();

    let header_line = lines.first().ok_or(DimacsError::EmptyFile)?;
    let header: Vec<&str> = header_line.split_whitespace().collect();
    if header.len() != 4 || header[0] != "p" || header[1] != "cnf" {
        return Err(DimacsError::InvalidHeader);
    }
    let num_vars = header[2].parse::<usize>().map_err(|_| DimacsError::InvalidHeader)?;
    let num_clauses = header[3].parse::<usize>().map_err(|_| DimacsError::InvalidHeader)?;

    let body = lines[1..]
        .iter()
        .filter(|line| !line.starts_with('p'))
        .join(" ");
    let values: Vec<i64> = body
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| DimacsError::InvalidLiteral { token: token.to_string() })
        })
        .collect::<Result<_, _>>()?;

    if values.last() != Some(&0) {
        return Err(DimacsError::UnterminatedClause);
    }

    let mut raw_clauses: Vec<Vec<i64>> = Vec::new();
    let mut current = Vec::new();
    for value in values {
        if value == 0 {
            raw_clauses.push(std::mem::take(&mut current));
        } else {
            current.push(value);
        }
    }

    if raw_clauses.len() != num_clauses {
        return Err(DimacsError::ClauseCountMismatch {
            expected: num_clauses,
            actual: raw_clauses.len(),
        });
    }

    let symbols = SymbolTable::default_for(num_vars);
    CnfInput::new(num_vars, raw_clauses, symbols).map_err(DimacsError::from)
}

/// Renders a solved model as a `v <lit> <lit> ... 0` DIMACS solution line,
/// variables in ascending id order.
pub fn render_model(model: &HashMap<String, bool>, symbols: &SymbolTable) -> String {
    let mut entries: Vec<(usize, bool)> = model
        .iter()
        .filter_map(|(name, value)| symbols.id(name).map(|id| (id, *value)))
        .collect();
    entries.sort_by_key(|(id, _)| *id);
    let mut line = String::from("v ");
    for (id, value) in entries {
        line.push_str(&format!("{}{} ", if value { "" } else { "-" }, id));
    }
    line.push('0');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "c a comment\np cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n";

    #[test]
    fn parses_a_small_instance() {
        let cnf = clauses_from_dimacs(TRIANGLE).unwrap();
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.clauses.len(), 3);
    }

    #[test]
    fn rejects_wrong_clause_count() {
        let text = "p cnf 2 5\n1 2 0\n";
        let err = clauses_from_dimacs(text).unwrap_err();
        assert!(matches!(err, DimacsError::ClauseCountMismatch { expected: 5, actual: 1 }));
    }

    #[test]
    fn rejects_malformed_header() {
        let err = clauses_from_dimacs("p sat 2 1\n1 2 0\n").unwrap_err();
        assert!(matches!(err, DimacsError::InvalidHeader));
    }

    #[test]
    fn render_model_sorts_by_variable_id() {
        let symbols = SymbolTable::default_for(2);
        let mut model = HashMap::new();
        model.insert("x2".to_string(), false);
        model.insert("x1".to_string(), true);
        assert_eq!(render_model(&model, &symbols), "v 1 -2 0");
    }
}
