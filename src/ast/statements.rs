use crate::Span;

use super::expressions::Expr;
use super::types::{ChannelKind, Type};

#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub name: String,
    pub declared_type: Type,
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub declared_type: Type,
    pub default: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct FuncDeclStmt {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Type,
    pub body: BlockStmt,
    pub span: Span,
}

/// `s_channel name { handler, "description", "host", port }` or the
/// two-argument `c_channel` form.
#[derive(Debug, Clone)]
pub struct ChannelDeclStmt {
    pub kind: ChannelKind,
    pub name: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// The else branch is either a block or another if statement, which is
/// how `else if` chains parse.
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: BlockStmt,
    pub else_branch: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

/// `for (var cursor [: type] in iterable) { ... }`. The cursor's
/// declared type defaults to `any` when the annotation is omitted.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub cursor: String,
    pub declared_type: Option<Type>,
    pub iterable: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SeqStmt {
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ParStmt {
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    FuncDecl(FuncDeclStmt),
    ChannelDecl(ChannelDeclStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Expression(ExpressionStmt),
    Seq(SeqStmt),
    Par(ParStmt),
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FuncDecl(stmt) => &stmt.span,
            Stmt::ChannelDecl(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Continue(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Seq(stmt) => &stmt.span,
            Stmt::Par(stmt) => &stmt.span,
        }
    }
}
