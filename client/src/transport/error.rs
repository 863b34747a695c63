use thiserror::Error;

/// Outbound payload could not be handed to the server
///
/// Never retried; the next local change produces a fresh full snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The connection is gone; payload was dropped
    #[error("Connection to server is closed, dropped {len} byte payload")]
    Disconnected {
        len: usize,
    },

    /// Interface state could not be serialized
    #[error("Failed to encode outbound message: {reason}")]
    Encode {
        reason: String,
    },
}

/// Inbound stream ended
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecvError {
    /// Server hung up, or the client shut the channel down
    #[error("Connection closed")]
    Closed,

    /// Transport failed underneath the stream
    #[error("Transport failure: {reason}")]
    Io {
        reason: String,
    },
}
