//! Payloads the coordinator hands to message sinks.

pub mod game_state;
pub mod notification;

pub use game_state::{MatchView, ViewerState};
pub use notification::{DrawSource, Notification};
