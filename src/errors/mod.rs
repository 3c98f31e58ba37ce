//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexing and parsing phases
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions
//!
//! Semantic findings are not represented here: the semantic analyzer
//! accumulates non-fatal diagnostics of its own (see `crate::semantic`).

pub mod errors;

#[cfg(test)]
mod tests;
