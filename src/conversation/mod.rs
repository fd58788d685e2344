//! Lead-capture conversation: steps, records, classification and the engine.

pub mod classify;
pub mod engine;
pub mod model;
pub mod state;

#[cfg(test)]
mod proptests;

pub use classify::MenuChoice;
pub use engine::{ConversationEngine, Transition};
pub use model::{Language, LeadFields, LeadUpdate, OutboundMessage, SessionRecord};
pub use state::Step;
