//! Concrete collaborators for the match coordinator.

pub mod basic_rules;
pub mod file_snapshots;
pub mod memory_snapshots;
pub mod queue_sink;

pub use basic_rules::BasicRuleEngine;
pub use file_snapshots::FileSnapshotStore;
pub use memory_snapshots::InMemorySnapshotStore;
pub use queue_sink::QueueSink;
