//! Recursive-descent parser with Pratt expression parsing.
//!
//! The parser drives itself from lookup tables built once per parser:
//! statement handlers keyed by the leading token, and NUD/LED handlers
//! plus binding powers for expressions. Statements end at an optional
//! semicolon, so `var x: number = 1` and `var x: number = 1;` both
//! parse.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
