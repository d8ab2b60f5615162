#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod protocol;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::MatchConfig;
pub use domain::outcome::{EndReason, MatchOutcome};
pub use domain::state::{MatchPhase, PlayerId, SessionId};
pub use error::AppError;
pub use errors::{ErrorCode, MatchError};
pub use services::collaborators::{MessageSink, RuleEngine, SnapshotStore};
pub use services::match_flow::{Match, TurnAdvance};
pub use services::registry::SessionRegistry;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
