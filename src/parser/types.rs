use crate::{
    ast::Type,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Parses a type annotation. Types are single keywords, so no lookup
/// tables are needed here.
pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let parsed = match parser.current_token_kind() {
        TokenKind::NumberType => Type::Number,
        TokenKind::StringType => Type::String,
        TokenKind::BoolType => Type::Bool,
        TokenKind::VoidType => Type::Void,
        TokenKind::ListType => Type::List,
        TokenKind::DictType => Type::Dict,
        TokenKind::AnyType => Type::Any,
        _ => {
            let token = parser.current_token();
            return Err(Error::new(
                ErrorImpl::UnknownType {
                    type_: token.value.clone(),
                },
                token.span.start.clone(),
            ));
        }
    };

    parser.advance();
    Ok(parsed)
}
