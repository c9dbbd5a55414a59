//! The robot actor: motion interpolation, the command executor, and the
//! notifications it publishes

pub mod contact;
pub mod events;
pub mod executor;
pub mod motion;

pub use contact::{CollisionResponse, HitOutcome, HitReceiver};
pub use events::{dispatch, ExecutionEvent, FeedbackSink};
pub use executor::{ExecutionState, Executor, RunOutcome};
pub use motion::Motion;
