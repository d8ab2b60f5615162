//! Coordinator services and the collaborator seams they depend on.

pub mod collaborators;
pub mod match_flow;
pub mod registry;
