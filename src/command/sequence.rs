//! Ordered queue of instruction lines for one run

use std::collections::VecDeque;

/// Instruction lines waiting to be executed, front first
///
/// Created fresh for every run request and drained one line at a time.
#[derive(Debug, Clone, Default)]
pub struct InstructionSequence {
    queued: VecDeque<String>,
    total: usize,
}

impl InstructionSequence {
    pub fn new() -> Self {
        Self {
            queued: VecDeque::new(),
            total: 0,
        }
    }

    pub fn from_commands<S: AsRef<str>>(commands: &[S]) -> Self {
        let queued: VecDeque<String> = commands
            .iter()
            .map(|command| command.as_ref().trim().to_string())
            .collect();
        let total = queued.len();
        Self { queued, total }
    }

    /// Take the next line off the front of the queue
    pub fn pop_next(&mut self) -> Option<String> {
        self.queued.pop_front()
    }

    /// 1-based position of the line most recently taken
    pub fn position(&self) -> usize {
        self.total - self.queued.len()
    }

    /// Number of lines the sequence started with
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Drop every remaining line
    pub fn clear(&mut self) {
        self.queued.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_in_order() {
        let mut sequence = InstructionSequence::from_commands(&["MOVE_FORWARD(1)", "ROTATE(90)"]);
        assert_eq!(sequence.total(), 2);
        assert_eq!(sequence.pop_next().as_deref(), Some("MOVE_FORWARD(1)"));
        assert_eq!(sequence.position(), 1);
        assert_eq!(sequence.pop_next().as_deref(), Some("ROTATE(90)"));
        assert_eq!(sequence.position(), 2);
        assert!(sequence.pop_next().is_none());
        assert!(sequence.is_empty());
    }

    #[test]
    fn test_clear_discards_remaining() {
        let mut sequence =
            InstructionSequence::from_commands(&["ROTATE(1)", "ROTATE(2)", "ROTATE(3)"]);
        sequence.pop_next();
        sequence.clear();
        assert_eq!(sequence.remaining(), 0);
        assert_eq!(sequence.total(), 3);
    }

    #[test]
    fn test_trims_lines() {
        let mut sequence = InstructionSequence::from_commands(&["  ROTATE(5) "]);
        assert_eq!(sequence.pop_next().as_deref(), Some("ROTATE(5)"));
    }
}
