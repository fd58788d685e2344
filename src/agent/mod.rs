//! Agent module: request orchestration around the conversation engine.

pub mod lead_agent;
pub mod locks;

pub use lead_agent::LeadAgent;
pub use locks::SessionLocks;
