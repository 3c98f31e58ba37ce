use crate::{
    ast::expressions::{
        AssignmentExpr, BinaryExpr, BinaryOp, BoolExpr, CallExpr, DictExpr, Expr, IndexExpr,
        ListComprehensionExpr, ListExpr, MethodCallExpr, NumberExpr, SliceExpr, StringExpr,
        UnaryExpr, UnaryOp, VariableExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    if !parser.get_nud_lookup().contains_key(&token_kind) {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.current_token().span.start.clone(),
        ));
    }

    let mut left = parser.get_nud_lookup().get(&token_kind).unwrap()(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        if !parser.get_led_lookup().contains_key(&token_kind) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.current_token().span.start.clone(),
            ));
        }

        let operator_bp = *parser.get_bp_lookup().get(&token_kind).unwrap();
        left = parser.get_led_lookup().get(&token_kind).unwrap()(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.current_token();
            // The lexeme is kept as written, but it must be a valid number.
            if token.value.parse::<f64>().is_err() {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                ));
            }

            let token = parser.advance();
            Ok(Expr::Number(NumberExpr {
                value: token.value.clone(),
                span: token.span.clone(),
            }))
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Expr::Variable(VariableExpr {
                name: token.value.clone(),
                span: token.span.clone(),
            }))
        }
        TokenKind::String => {
            let token = parser.advance();
            Ok(Expr::String(StringExpr {
                value: token.value.clone(),
                span: token.span.clone(),
            }))
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(Expr::Bool(BoolExpr {
                value: token.kind == TokenKind::True,
                span: token.span.clone(),
            }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.current_token().span.start.clone(),
        )),
    }
}

fn binary_op_for(kind: TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Subtract,
        TokenKind::Star => BinaryOp::Multiply,
        TokenKind::Slash => BinaryOp::Divide,
        TokenKind::Percent => BinaryOp::Modulo,
        TokenKind::Equals => BinaryOp::Equals,
        TokenKind::NotEquals => BinaryOp::NotEquals,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::LessEquals => BinaryOp::LessEquals,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::GreaterEquals => BinaryOp::GreaterEquals,
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        // Only tokens registered with parse_binary_expr reach here.
        _ => unreachable!(),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.span().start.clone(),
            end: right.span().end.clone(),
        },
        left: Box::new(left),
        operator: binary_op_for(operator_token.kind),
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = match operator_token.kind {
        TokenKind::Dash => UnaryOp::Negate,
        _ => UnaryOp::Not,
    };

    // Bind tighter than any binary operator: `-a + b` is `(-a) + b`.
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: operand.span().end.clone(),
        },
        operator,
        operand: Box::new(operand),
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();

    let name = match &left {
        Expr::Variable(variable) => variable.name.clone(),
        _ => {
            return Err(Error::new(
                ErrorImpl::InvalidAssignmentTarget,
                left.span().start.clone(),
            ))
        }
    };

    // Parsed at the lowest binding power so `a = b = c` nests to the right.
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assignment(AssignmentExpr {
        span: Span {
            start: left.span().start.clone(),
            end: value.span().end.clone(),
        },
        name,
        value: Box::new(value),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

fn parse_argument_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(arguments)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let name = match &left {
        Expr::Variable(variable) => variable.name.clone(),
        _ => {
            return Err(Error::new(
                ErrorImpl::InvalidCallTarget,
                left.span().start.clone(),
            ))
        }
    };

    let arguments = parse_argument_list(parser)?;
    let end = parser.current_token().span.start.clone();

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: left.span().start.clone(),
            end,
        },
        name,
        arguments,
    }))
}

pub fn parse_method_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.expect(TokenKind::Dot)?;
    let method = parser.expect(TokenKind::Identifier)?.value;
    let arguments = parse_argument_list(parser)?;
    let end = parser.current_token().span.start.clone();

    Ok(Expr::MethodCall(MethodCallExpr {
        span: Span {
            start: left.span().start.clone(),
            end,
        },
        object: Box::new(left),
        method,
        arguments,
    }))
}

/// Parses `xs[i]`, `xs[a:b]`, `xs[:b]`, `xs[a:]` and `xs[:]`.
pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let start_bound = if parser.current_token_kind() == TokenKind::Colon {
        None
    } else {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    };

    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();

        let end_bound = if parser.current_token_kind() == TokenKind::CloseBracket {
            None
        } else {
            Some(Box::new(parse_expr(parser, BindingPower::Default)?))
        };

        let close = parser.expect(TokenKind::CloseBracket)?;
        return Ok(Expr::Slice(SliceExpr {
            span: Span {
                start: left.span().start.clone(),
                end: close.span.end,
            },
            object: Box::new(left),
            start: start_bound,
            end: end_bound,
        }));
    }

    let close = parser.expect(TokenKind::CloseBracket)?;
    Ok(Expr::Index(IndexExpr {
        span: Span {
            start: left.span().start.clone(),
            end: close.span.end,
        },
        object: Box::new(left),
        // A bare `xs[]` is not valid.
        index: start_bound.ok_or_else(|| {
            Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: String::from("]"),
                    message: String::from("an index expression needs a value between brackets"),
                },
                close.span.start.clone(),
            )
        })?,
    }))
}

/// Parses a list literal or a list comprehension, both of which start
/// with `[`.
pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.expect(TokenKind::OpenBracket)?.clone();

    if parser.current_token_kind() == TokenKind::CloseBracket {
        let close = parser.advance().clone();
        return Ok(Expr::List(ListExpr {
            elements: vec![],
            span: Span {
                start: open.span.start,
                end: close.span.end,
            },
        }));
    }

    // `[for (var x in xs) -> expr]` is a comprehension, anything else
    // is a literal.
    if parser.current_token_kind() == TokenKind::For {
        parser.advance();
        parser.expect(TokenKind::OpenParen)?;
        parser.expect(TokenKind::Var)?;
        let cursor = parser.expect(TokenKind::Identifier)?.value;
        parser.expect(TokenKind::In)?;
        let iterable = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseParen)?;
        parser.expect(TokenKind::Arrow)?;
        let element = parse_expr(parser, BindingPower::Default)?;

        let condition = if parser.current_token_kind() == TokenKind::If {
            parser.advance();
            Some(Box::new(parse_expr(parser, BindingPower::Default)?))
        } else {
            None
        };

        let close = parser.expect(TokenKind::CloseBracket)?;
        return Ok(Expr::ListComprehension(ListComprehensionExpr {
            element: Box::new(element),
            cursor,
            iterable: Box::new(iterable),
            condition,
            span: Span {
                start: open.span.start,
                end: close.span.end,
            },
        }));
    }

    let first = parse_expr(parser, BindingPower::Default)?;
    let mut elements = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        elements.push(parse_expr(parser, BindingPower::Default)?);
    }

    let close = parser.expect(TokenKind::CloseBracket)?;
    Ok(Expr::List(ListExpr {
        elements,
        span: Span {
            start: open.span.start,
            end: close.span.end,
        },
    }))
}

pub fn parse_dict_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?.clone();

    let mut entries = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let key = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Default)?;
        entries.push((key, value));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;
    Ok(Expr::Dict(DictExpr {
        entries,
        span: Span {
            start: open.span.start,
            end: close.span.end,
        },
    }))
}
