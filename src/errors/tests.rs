//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(1, 9, Rc::new("test.mp".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let pos = Position::new(7, 3, Rc::new("test.mp".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().line, 7);
    assert_eq!(error.get_position().column, 3);
}

#[test]
fn test_unterminated_string_error() {
    let error = Error::new(
        ErrorImpl::UnterminatedString,
        Position::new(2, 1, Rc::new("test.mp".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnterminatedString");
    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_unterminated_comment_error() {
    let error = Error::new(
        ErrorImpl::UnterminatedComment,
        Position::new(4, 1, Rc::new("test.mp".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnterminatedComment");
}

#[test]
fn test_invalid_assignment_target_error() {
    let error = Error::new(
        ErrorImpl::InvalidAssignmentTarget,
        Position::new(1, 1, Rc::new("test.mp".to_string())),
    );

    assert_eq!(error.get_error_name(), "InvalidAssignmentTarget");
}

#[test]
fn test_invalid_call_target_error() {
    let error = Error::new(
        ErrorImpl::InvalidCallTarget,
        Position::new(1, 1, Rc::new("test.mp".to_string())),
    );

    assert_eq!(error.get_error_name(), "InvalidCallTarget");
}

#[test]
fn test_unknown_type_error() {
    let error = Error::new(
        ErrorImpl::UnknownType {
            type_: "vector".to_string(),
        },
        Position::new(1, 1, Rc::new("test.mp".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnknownType");
}

#[test]
fn test_misplaced_function_error() {
    let error = Error::new(
        ErrorImpl::MisplacedFunction,
        Position::new(2, 5, Rc::new("test.mp".to_string())),
    );

    assert_eq!(error.get_error_name(), "MisplacedFunction");
    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(1, 1, Rc::new("test.mp".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
