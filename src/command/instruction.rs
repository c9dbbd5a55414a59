//! Robot instructions and their grammar
//!
//! Two forms exist, matched case-insensitively against a whole trimmed line:
//!
//! ```text
//! MOVE_FORWARD(<digits>[.<digits>])      0 < distance <= 20
//! ROTATE([-]<digits>[.<digits>])         -360 <= degrees <= 360
//! ```

use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map_res, opt, recognize};
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest distance a single MOVE_FORWARD may cover
pub const MAX_MOVE_DISTANCE: f32 = 20.0;

/// Largest rotation magnitude a single ROTATE may request
pub const MAX_ROTATION_DEGREES: f32 = 360.0;

pub const MOVE_FORWARD_KEYWORD: &str = "MOVE_FORWARD";
pub const ROTATE_KEYWORD: &str = "ROTATE";

/// One validated robot command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// Drive along the current facing
    MoveForward { distance: f32 },
    /// Turn about the vertical axis; positive turns right
    Rotate { degrees: f32 },
}

/// Why a line was not accepted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrammarError {
    #[error("unrecognized command `{0}`")]
    Unrecognized(String),

    #[error("{keyword} argument {value} is out of range ({expected})")]
    OutOfRange {
        keyword: &'static str,
        value: f32,
        expected: &'static str,
    },
}

impl Instruction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Instruction::MoveForward { .. } => MOVE_FORWARD_KEYWORD,
            Instruction::Rotate { .. } => ROTATE_KEYWORD,
        }
    }

    /// Parse one line, checking both syntax and argument range
    pub fn parse_line(line: &str) -> Result<Self, GrammarError> {
        let trimmed = line.trim();
        let (_, raw) = all_consuming(alt((move_forward, rotate)))
            .parse(trimmed)
            .map_err(|_| GrammarError::Unrecognized(trimmed.to_string()))?;
        raw.validate()
    }
}

impl FromStr for Instruction {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::MoveForward { distance } => {
                write!(f, "{}({})", MOVE_FORWARD_KEYWORD, distance)
            }
            Instruction::Rotate { degrees } => write!(f, "{}({})", ROTATE_KEYWORD, degrees),
        }
    }
}

/// Syntactically valid instruction whose argument is not yet range-checked
#[derive(Debug, Clone, Copy, PartialEq)]
enum RawInstruction {
    MoveForward(f32),
    Rotate(f32),
}

impl RawInstruction {
    fn validate(self) -> Result<Instruction, GrammarError> {
        match self {
            RawInstruction::MoveForward(distance) => {
                if distance > 0.0 && distance <= MAX_MOVE_DISTANCE {
                    Ok(Instruction::MoveForward { distance })
                } else {
                    Err(GrammarError::OutOfRange {
                        keyword: MOVE_FORWARD_KEYWORD,
                        value: distance,
                        expected: "0 < distance <= 20",
                    })
                }
            }
            RawInstruction::Rotate(degrees) => {
                if (-MAX_ROTATION_DEGREES..=MAX_ROTATION_DEGREES).contains(&degrees) {
                    Ok(Instruction::Rotate { degrees })
                } else {
                    Err(GrammarError::OutOfRange {
                        keyword: ROTATE_KEYWORD,
                        value: degrees,
                        expected: "-360 <= degrees <= 360",
                    })
                }
            }
        }
    }
}

fn unsigned_number(input: &str) -> IResult<&str, &str> {
    recognize(pair(digit1, opt(pair(char('.'), digit1)))).parse(input)
}

fn signed_number(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(char('-')), unsigned_number)).parse(input)
}

fn move_forward(input: &str) -> IResult<&str, RawInstruction> {
    map_res(
        delimited(tag_no_case("MOVE_FORWARD("), unsigned_number, char(')')),
        |value: &str| value.parse::<f32>().map(RawInstruction::MoveForward),
    )
    .parse(input)
}

fn rotate(input: &str) -> IResult<&str, RawInstruction> {
    map_res(
        delimited(tag_no_case("ROTATE("), signed_number, char(')')),
        |value: &str| value.parse::<f32>().map(RawInstruction::Rotate),
    )
    .parse(input)
}
