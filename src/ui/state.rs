//! Feedback panel state for the programming screen

use crate::core::types::Seconds;
use crate::robot::events::{ExecutionEvent, FeedbackSink};
use std::collections::VecDeque;

/// Maximum action log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

pub const WELCOME_MESSAGE: &str = "Enter commands and press Run!";

/// Colour family of the feedback line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTone {
    Normal,
    Success,
    Error,
}

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: Seconds,
    pub message: String,
    pub tone: FeedbackTone,
}

/// What the player sees next to the code editor
#[derive(Debug)]
pub struct FeedbackPanel {
    pub message: String,
    pub tone: FeedbackTone,
    /// Run and reset buttons accept clicks
    pub controls_enabled: bool,
    pub help_visible: bool,
    pub action_log: VecDeque<LogEntry>,
    /// Clock used to stamp log entries
    pub time: Seconds,
}

impl Default for FeedbackPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackPanel {
    pub fn new() -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
            tone: FeedbackTone::Normal,
            controls_enabled: true,
            help_visible: false,
            action_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            time: 0.0,
        }
    }

    /// Replace the feedback line and log it
    pub fn show(&mut self, message: &str, tone: FeedbackTone) {
        self.message = message.to_string();
        self.tone = tone;
        if self.action_log.len() >= MAX_LOG_ENTRIES {
            self.action_log.pop_front();
        }
        self.action_log.push_back(LogEntry {
            time: self.time,
            message: message.to_string(),
            tone,
        });
        tracing::info!("UI Feedback: {}", message);
    }

    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

impl FeedbackSink for FeedbackPanel {
    fn on_event(&mut self, event: ExecutionEvent) {
        match event {
            ExecutionEvent::ExecutionStarted => {
                self.show("Executing commands...", FeedbackTone::Normal);
                self.set_controls_enabled(false);
            }
            ExecutionEvent::ExecutionFinished => {
                self.show("Execution complete!", FeedbackTone::Success);
                self.set_controls_enabled(true);
            }
            ExecutionEvent::CollectibleFound => {
                self.show("Collectible found! Level complete!", FeedbackTone::Success);
            }
        }
    }
}
