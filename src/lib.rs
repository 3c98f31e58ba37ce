#![allow(clippy::module_inception)]

use std::{fs, path::PathBuf, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod backend;
pub mod errors;
pub mod ir;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantic;

extern crate regex;

/// Source position, 1-based line and column.
#[derive(Debug, Clone)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }

    pub fn null() -> Self {
        Position {
            line: 0,
            column: 0,
            file: Rc::new(String::from("<null>")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

fn get_line_at(content: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    content.lines().nth((line - 1) as usize)
}

pub fn display_error(error: Error, file: PathBuf) {
    /*
        Error: name (tip)
        -> main.mp
           |
        20 | var a = #
           | --------^
    */

    let position = error.get_position();
    let content = fs::read_to_string(&file).unwrap_or_default();
    let line_text = get_line_at(&content, position.line).unwrap_or("");

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file.as_os_str().to_string_lossy());
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at() {
        let content = "first line\nsecond line\n\nfourth line\n";

        assert_eq!(super::get_line_at(content, 1), Some("first line"));
        assert_eq!(super::get_line_at(content, 2), Some("second line"));
        assert_eq!(super::get_line_at(content, 3), Some(""));
        assert_eq!(super::get_line_at(content, 4), Some("fourth line"));
        assert_eq!(super::get_line_at(content, 5), None);
        assert_eq!(super::get_line_at(content, 0), None);
    }

    #[test]
    fn test_remove_starting_whitespace() {
        let (text, removed) = super::remove_starting_whitespace("    var x: number = 1");
        assert_eq!(text, "var x: number = 1");
        assert_eq!(removed, 4);
    }
}
