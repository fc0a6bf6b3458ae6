//! A CDCL SAT solver core: given a CNF and a symbol table,
//! `solver::Solver::solve` decides satisfiability and returns a model or a
//! resolution proof.

pub mod cnf;
pub mod dimacs;
pub mod error;
pub mod solver;
