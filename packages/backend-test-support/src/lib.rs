//! Shared test support for the match coordinator
//!
//! Provides the unified test logging bootstrap and helpers for generating
//! unique player identities so parallel tests never share a registry entry.

pub mod logging;
pub mod unique_helpers;
