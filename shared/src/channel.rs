use thiserror::Error;

/// Errors that can occur when sending over a [`Channel`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel is not currently connected
    #[error("Channel is not live. The peer has disconnected or the session was torn down")]
    NotLive,

    /// The channel has been closed for good
    #[error("Channel has been closed")]
    Closed,

    /// The transport rejected the message
    #[error("Failed to send message: {reason}")]
    SendFailed { reason: String },
}

/// Asynchronous, size-limited message channel between host and renderer.
///
/// Sends are fire-and-forget; delivery is observed by the peer polling its
/// own end.
pub trait Channel<M> {
    /// Whether the peer is still reachable. Checked before every send of a
    /// multi-message transfer.
    fn is_live(&self) -> bool;

    /// Whether raw binary frames can be sent. When `false`, binary payloads
    /// must be text encoded.
    fn supports_binary(&self) -> bool;

    fn send(&mut self, message: M) -> Result<(), ChannelError>;
}
