use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Comma,
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(
        TokenKind::Assignment,
        BindingPower::Assignment,
        parse_assignment_expr,
    );

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(
        TokenKind::NotEquals,
        BindingPower::Equality,
        parse_binary_expr,
    );
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(
        TokenKind::LessEquals,
        BindingPower::Relational,
        parse_binary_expr,
    );
    parser.led(
        TokenKind::Greater,
        BindingPower::Relational,
        parse_binary_expr,
    );
    parser.led(
        TokenKind::GreaterEquals,
        BindingPower::Relational,
        parse_binary_expr,
    );

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(
        TokenKind::Star,
        BindingPower::Multiplicative,
        parse_binary_expr,
    );
    parser.led(
        TokenKind::Slash,
        BindingPower::Multiplicative,
        parse_binary_expr,
    );
    parser.led(
        TokenKind::Percent,
        BindingPower::Multiplicative,
        parse_binary_expr,
    );

    // Calls, indexing and member access
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(
        TokenKind::OpenBracket,
        BindingPower::Member,
        parse_index_expr,
    );
    parser.led(TokenKind::Dot, BindingPower::Member, parse_method_call_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_list_expr);
    parser.nud(TokenKind::OpenCurly, parse_dict_expr);

    // Statements
    parser.stmt(TokenKind::Var, parse_var_decl_stmt);
    parser.stmt(TokenKind::Func, parse_func_decl_stmt);
    parser.stmt(TokenKind::SChannel, parse_channel_decl_stmt);
    parser.stmt(TokenKind::CChannel, parse_channel_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Continue, parse_continue_stmt);
    parser.stmt(TokenKind::Seq, parse_seq_stmt);
    parser.stmt(TokenKind::Par, parse_par_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
