//! Parse typed robot programs into normalized instruction lines
//!
//! Each line is checked on its own: a bad line is reported and skipped, the
//! remaining lines still parse.

use crate::command::instruction::{GrammarError, Instruction};

/// Lines starting with this marker are ignored
pub const COMMENT_MARKER: &str = "//";

/// A line that did not pass the grammar
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// 1-based line number in the submitted text
    pub line_number: usize,
    pub text: String,
    pub reason: GrammarError,
}

/// Outcome of parsing a whole program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Accepted lines, trimmed and upper-cased, in submission order
    pub accepted: Vec<String>,
    pub rejected: Vec<RejectedLine>,
}

impl ParseReport {
    /// True when there is nothing to hand to the robot
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Parse a program, keeping track of which lines were rejected and why
pub fn parse_program(input: &str) -> ParseReport {
    let mut report = ParseReport::default();

    // Bare '\r' also separates lines; it keeps the number of its '\n' line
    let lines = input
        .lines()
        .enumerate()
        .flat_map(|(index, line)| line.split('\r').map(move |part| (index, part)));

    for (index, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }

        match Instruction::parse_line(trimmed) {
            Ok(_) => report.accepted.push(trimmed.to_uppercase()),
            Err(reason) => {
                tracing::warn!(line = index + 1, %reason, "Invalid command: {}", trimmed);
                report.rejected.push(RejectedLine {
                    line_number: index + 1,
                    text: trimmed.to_string(),
                    reason,
                });
            }
        }
    }

    report
}

/// Parse a program into the ordered list of accepted, normalized lines
///
/// Empty or all-invalid input yields an empty list.
pub fn parse_commands(input: &str) -> Vec<String> {
    parse_program(input).accepted
}

/// Player-facing command reference
pub fn command_help() -> &'static str {
    "Available Commands:\n\n\
     MOVE_FORWARD(distance)\n\
     - Moves robot forward\n\
     - Example: MOVE_FORWARD(5)\n\n\
     ROTATE(degrees)\n\
     - Rotates robot\n\
     - Positive = right, Negative = left\n\
     - Example: ROTATE(90) or ROTATE(-90)\n\n\
     Tips:\n\
     - One command per line\n\
     - Use // for comments"
}
