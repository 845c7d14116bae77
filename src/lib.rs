#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Diagnostic, Severity};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod limits;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in a source unit: a byte offset into the source text plus the
/// name of the unit it came from. All offsets produced by the lexer and
/// parser are byte offsets, never character counts.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

// Two positions are equal when they name the same offset in the same unit.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl Eq for Position {}

/// A half-open byte range `[start, end)` over a single source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Joins two spans into the smallest span covering both.
    pub fn merge(start: &Span, end: &Span) -> Span {
        Span {
            start: start.start.clone(),
            end: end.end.clone(),
        }
    }
}

/// Finds the line containing `offset` in `source`.
///
/// Returns the 1-based line number, the line's text, and the offset of the
/// position within that line, or None when the offset is past the end of
/// the source.
pub fn get_line_at_offset(source: &str, offset: u32) -> Option<(usize, String, usize)> {
    let pos = offset as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        last = (line_number, line.to_string(), line.len());
        start = end;
        line_number += 1;
    }

    // Offsets at the very end of the source clamp to the final line.
    Some(last)
}

pub fn display_diagnostic(diagnostic: &Diagnostic, source: &str) {
    /*
        Error: message
        -> contract.compact
           |
        20 | ledger count: ;
           | -------------^
    */

    let position = &diagnostic.span.start;
    let severity = match diagnostic.severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
    };

    println!("{}: {}", severity, diagnostic.message);
    println!("-> {}", position.1);

    let Some((line, line_text, line_pos)) = get_line_at_offset(source, position.0) else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

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
    fn test_get_line_at_offset() {
        let source = "pragma language_version 0.13;\nledger count: Field;\n";

        let (line_number, line, line_pos) = super::get_line_at_offset(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "pragma language_version 0.13;\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_offset(source, 37).unwrap();
        assert_eq!(line_number, 2);
        assert_eq!(line, "ledger count: Field;\n");
        assert_eq!(line_pos, 7);
    }

    #[test]
    fn test_get_line_at_offset_past_end() {
        assert!(super::get_line_at_offset("abc", 17).is_none());
    }
}
