//! Notifications published by the executor

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionEvent {
    ExecutionStarted,
    ExecutionFinished,
    CollectibleFound,
}

/// Listener for executor notifications
///
/// Fire-and-forget: sinks cannot reject or acknowledge an event.
pub trait FeedbackSink {
    fn on_event(&mut self, event: ExecutionEvent);
}

impl FeedbackSink for Vec<ExecutionEvent> {
    fn on_event(&mut self, event: ExecutionEvent) {
        self.push(event);
    }
}

impl FeedbackSink for std::sync::mpsc::Sender<ExecutionEvent> {
    fn on_event(&mut self, event: ExecutionEvent) {
        // A dropped receiver just means nobody is listening any more
        let _ = self.send(event);
    }
}

/// Deliver events to a sink in order
pub fn dispatch<I>(events: I, sink: &mut dyn FeedbackSink)
where
    I: IntoIterator<Item = ExecutionEvent>,
{
    for event in events {
        sink.on_event(event);
    }
}
