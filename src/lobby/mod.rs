pub mod orchestrator;
pub mod pacing;
pub mod projection;
pub mod registry;
