//! Error handling for the match coordinator.

pub mod domain;
pub mod error_code;

pub use domain::{MarketChoiceKind, MatchError, SeatingKind, SetupKind};
pub use error_code::ErrorCode;

#[cfg(test)]
mod tests_error_mapping;
