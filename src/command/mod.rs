//! Command pipeline
//!
//! Typed program text -> parser (line-by-line grammar check) -> normalized
//! lines -> InstructionSequence, drained by the robot executor.

pub mod instruction;
pub mod parser;
pub mod sequence;

pub use instruction::{GrammarError, Instruction, MAX_MOVE_DISTANCE, MAX_ROTATION_DEGREES};
pub use parser::{command_help, parse_commands, parse_program, ParseReport, RejectedLine};
pub use sequence::InstructionSequence;
