//! Abstract syntax tree for Minipar programs.
//!
//! Expressions and statements are closed enums: every node kind the
//! parser can produce is listed here, and the later phases match on
//! them exhaustively. Each node carries the span of the source text it
//! was parsed from.

pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

pub use ast::Program;
pub use expressions::{BinaryOp, Expr, UnaryOp};
pub use statements::Stmt;
pub use types::{ChannelKind, Type};
