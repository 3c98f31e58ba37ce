use crate::Span;

use super::statements::Stmt;

/// A parsed Minipar source file: the top-level statements in order.
#[derive(Debug, Clone)]
pub struct Program {
    pub declarations: Vec<Stmt>,
    pub span: Span,
}
