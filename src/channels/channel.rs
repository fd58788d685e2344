//! Channel trait and the inbound message type shared by transports.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::conversation::OutboundMessage;
use crate::error::ChannelError;

/// One inbound text, already mapped to a session id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUpdate {
    pub session_id: String,
    pub text: String,
}

impl InboundUpdate {
    pub fn new(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            text: text.into(),
        }
    }
}

/// Stream of inbound updates from a pull-based transport.
pub type MessageStream = Pin<Box<dyn Stream<Item = InboundUpdate> + Send>>;

/// A transport that can deliver replies to a session.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Deliver one reply, quick replies included.
    async fn send(&self, session_id: &str, message: &OutboundMessage) -> Result<(), ChannelError>;

    /// Check that the transport is reachable and credentials are valid.
    async fn health_check(&self) -> Result<(), ChannelError>;
}
