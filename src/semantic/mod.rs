//! Semantic analysis for Minipar programs.
//!
//! The analyzer walks the AST once, maintaining a scoped symbol table,
//! and accumulates diagnostics instead of stopping at the first
//! problem. Type checking is permissive around the `any` type: it is
//! compatible with everything, and `bool` may stand in for `number`.
//!
//! Scopes live in an arena inside the symbol table. Each scope stores
//! the index of its parent, and name lookups walk that chain.

pub mod analyzer;
pub mod symbol_table;

pub use analyzer::{analyze, Analysis, Diagnostic};
pub use symbol_table::{Symbol, SymbolKind, SymbolTable};
