use std::fmt::Display;

use crate::Span;

/// Binary operators, in source spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    And,
    Or,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Subtract => write!(f, "-"),
            BinaryOp::Multiply => write!(f, "*"),
            BinaryOp::Divide => write!(f, "/"),
            BinaryOp::Modulo => write!(f, "%"),
            BinaryOp::Equals => write!(f, "=="),
            BinaryOp::NotEquals => write!(f, "!="),
            BinaryOp::Less => write!(f, "<"),
            BinaryOp::LessEquals => write!(f, "<="),
            BinaryOp::Greater => write!(f, ">"),
            BinaryOp::GreaterEquals => write!(f, ">="),
            BinaryOp::And => write!(f, "&&"),
            BinaryOp::Or => write!(f, "||"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Negate => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub name: String,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOp,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub name: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MethodCallExpr {
    pub object: Box<Expr>,
    pub method: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

/// `xs[start:end]` where either bound may be omitted.
#[derive(Debug, Clone)]
pub struct SliceExpr {
    pub object: Box<Expr>,
    pub start: Option<Box<Expr>>,
    pub end: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct VariableExpr {
    pub name: String,
    pub span: Span,
}

/// A numeric literal. The lexeme is kept as written so backends can
/// reproduce it exactly.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BoolExpr {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ListExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct DictExpr {
    pub entries: Vec<(Expr, Expr)>,
    pub span: Span,
}

/// `[element for cursor in iterable if condition]`.
#[derive(Debug, Clone)]
pub struct ListComprehensionExpr {
    pub element: Box<Expr>,
    pub cursor: String,
    pub iterable: Box<Expr>,
    pub condition: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Assignment(AssignmentExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    MethodCall(MethodCallExpr),
    Index(IndexExpr),
    Slice(SliceExpr),
    Variable(VariableExpr),
    Number(NumberExpr),
    String(StringExpr),
    Bool(BoolExpr),
    List(ListExpr),
    Dict(DictExpr),
    ListComprehension(ListComprehensionExpr),
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Assignment(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::MethodCall(expr) => &expr.span,
            Expr::Index(expr) => &expr.span,
            Expr::Slice(expr) => &expr.span,
            Expr::Variable(expr) => &expr.span,
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::List(expr) => &expr.span,
            Expr::Dict(expr) => &expr.span,
            Expr::ListComprehension(expr) => &expr.span,
        }
    }
}
