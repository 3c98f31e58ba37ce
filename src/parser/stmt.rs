use crate::{
    ast::{
        statements::{
            BlockStmt, BreakStmt, ChannelDeclStmt, ContinueStmt, ExpressionStmt, ForStmt,
            FuncDeclStmt, IfStmt, Parameter, ParStmt, ReturnStmt, SeqStmt, Stmt, VarDeclStmt,
            WhileStmt,
        },
        types::ChannelKind,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::parse_expr,
    lookups::BindingPower,
    parser::Parser,
    types::parse_type,
};

/// Parses a single statement, dispatching through the statement lookup
/// table. Anything without a registered handler is an expression
/// statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();

    if let Some(handler) = parser.get_stmt_lookup().get(&kind) {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.eat_semicolon();

    Ok(Stmt::Expression(ExpressionStmt {
        span: expression.span().clone(),
        expression,
    }))
}

/// `var name: type` with an optional `= expr` initializer.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Var)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Colon)?;
    let declared_type = parse_type(parser)?;

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let end = match &value {
        Some(expr) => expr.span().end.clone(),
        None => parser.current_token().span.start.clone(),
    };
    parser.eat_semicolon();

    Ok(Stmt::VarDecl(VarDeclStmt {
        name,
        declared_type,
        value,
        span: Span { start, end },
    }))
}

/// `func name(a: type, b: type = default) -> type { ... }`. The arrow
/// and return type are mandatory, and functions can only be declared
/// at the top level of a program.
pub fn parse_func_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.expect(TokenKind::Func)?;
    if !parser.at_top_level() {
        return Err(Error::new(ErrorImpl::MisplacedFunction, keyword.span.start));
    }
    let start = keyword.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let parameter_name = parser.expect(TokenKind::Identifier)?.value;
        parser.expect(TokenKind::Colon)?;
        let declared_type = parse_type(parser)?;

        let default = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expr(parser, BindingPower::Default)?)
        } else {
            None
        };

        parameters.push(Parameter {
            name: parameter_name,
            declared_type,
            default,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let token = parser.current_token().clone();
    let return_type = if token.kind == TokenKind::Arrow {
        parser.advance();
        parse_type(parser)?
    } else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value,
                message: String::from("expected `->` and a return type"),
            },
            token.span.start,
        ));
    };

    let body = parse_block(parser)?;
    let end = body.span.end.clone();

    Ok(Stmt::FuncDecl(FuncDeclStmt {
        name,
        parameters,
        return_type,
        body,
        span: Span { start, end },
    }))
}

/// `s_channel name { handler, "description", "host", port }` or
/// `c_channel name { "host", port }`.
pub fn parse_channel_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();
    let kind = match keyword.kind {
        TokenKind::SChannel => ChannelKind::Server,
        _ => ChannelKind::Client,
    };

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::OpenCurly)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;
    parser.eat_semicolon();

    Ok(Stmt::ChannelDecl(ChannelDeclStmt {
        kind,
        name,
        arguments,
        span: Span {
            start: keyword.span.start,
            end: close.span.end,
        },
    }))
}

/// Parses a brace-delimited block of statements.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;
    let start = open.span.start;

    parser.enter_block();
    let mut statements = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        statements.push(parse_stmt(parser)?);
    }
    parser.exit_block();

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        statements,
        span: Span {
            start,
            end: close.span.end,
        },
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;
    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_branch = parse_block(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(Box::new(parse_if_stmt(parser)?))
        } else {
            Some(Box::new(Stmt::Block(parse_block(parser)?)))
        }
    } else {
        None
    };

    let end = match &else_branch {
        Some(stmt) => stmt.span().end.clone(),
        None => then_branch.span.end.clone(),
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_branch,
        else_branch,
        span: Span { start, end },
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;
    let end = body.span.end.clone();

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: Span { start, end },
    }))
}

/// `for (var cursor in iterable) { ... }`, with an optional type
/// annotation on the cursor. The header mirrors the comprehension
/// form `[for (var x in it) -> expr]`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::For)?.span.start;
    parser.expect(TokenKind::OpenParen)?;
    parser.expect(TokenKind::Var)?;
    let cursor = parser.expect(TokenKind::Identifier)?.value;

    let declared_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    let body = parse_block(parser)?;
    let end = body.span.end.clone();

    Ok(Stmt::For(ForStmt {
        cursor,
        declared_type,
        iterable,
        body,
        span: Span { start, end },
    }))
}

/// `return` with an optional value. The value is absent when the next
/// token cannot start an expression on the same statement.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.expect(TokenKind::Return)?;
    let start = keyword.span.start;

    let value = match parser.current_token_kind() {
        TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF => None,
        _ => Some(parse_expr(parser, BindingPower::Default)?),
    };

    let end = match &value {
        Some(expr) => expr.span().end.clone(),
        None => keyword.span.end,
    };
    parser.eat_semicolon();

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span { start, end },
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.expect(TokenKind::Break)?;
    parser.eat_semicolon();

    Ok(Stmt::Break(BreakStmt { span: keyword.span }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.expect(TokenKind::Continue)?;
    parser.eat_semicolon();

    Ok(Stmt::Continue(ContinueStmt { span: keyword.span }))
}

pub fn parse_seq_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Seq)?.span.start;
    let body = parse_block(parser)?;
    let end = body.span.end.clone();

    Ok(Stmt::Seq(SeqStmt {
        body,
        span: Span { start, end },
    }))
}

pub fn parse_par_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Par)?.span.start;
    let body = parse_block(parser)?;
    let end = body.span.end.clone();

    Ok(Stmt::Par(ParStmt {
        body,
        span: Span { start, end },
    }))
}
