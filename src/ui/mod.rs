//! UI module - headless feedback panel and button handlers

pub mod controller;
pub mod state;

pub use controller::{ProgramController, RunRequest};
pub use state::{FeedbackPanel, FeedbackTone, LogEntry};
