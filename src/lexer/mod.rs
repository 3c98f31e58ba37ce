//! Lexical analysis for Minipar source code.
//!
//! The lexer walks the source with a prioritised list of regular
//! expression patterns, each paired with a handler function. The first
//! pattern matching at the current position wins, so two-character
//! operators (`==`, `->`, `||`) are listed before their one-character
//! prefixes and `/*` before `/`.
//!
//! Reserved words and type names are resolved through `RESERVED_LOOKUP`
//! after an identifier-shaped match. Every token carries a span with
//! 1-based line and column information for diagnostics.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
