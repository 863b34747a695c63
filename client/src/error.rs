use thiserror::Error;

use roborally_shared::DecodeError;

/// Errors surfaced by `Client::receive`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Server sent a payload that does not decode. Nothing of it was applied
    /// and the session has been torn down.
    #[error("Server payload could not be decoded: {0}")]
    Decode(#[from] DecodeError),

    /// Inbound stream ended. Local state stays frozen at its last values;
    /// `applied` messages from this call were applied before the close.
    #[error("Connection to server closed after {applied} messages: {reason}")]
    ConnectionClosed {
        reason: String,
        applied: usize,
    },

    /// No connection has been made, or it has already ended
    #[error("Client is not connected to a server")]
    NotConnected,
}

/// A local input that would break program invariants; checked before any
/// state is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputRejected {
    #[error("Selection is already confirmed for this round")]
    SelectionConfirmed,

    #[error("Every program slot is blocked this round")]
    NoFillableSlots,

    #[error("Every fillable program slot already holds a card")]
    ProgramFull,

    #[error("No dealt card at index {index} ({dealt} cards dealt)")]
    UnknownCard {
        index: usize,
        dealt: usize,
    },

    #[error("Dealt card {index} is already in the program")]
    CardAlreadyPlaced {
        index: usize,
    },

    #[error("Program slot {slot} holds no card")]
    SlotEmpty {
        slot: usize,
    },

    #[error("Cursor is already at the edge of the program")]
    CursorAtEdge,

    #[error("Program slot {slot} does not exist ({len} fillable slots)")]
    CursorOutOfRange {
        slot: usize,
        len: usize,
    },

    #[error("Program still has empty slots")]
    ProgramIncomplete,
}
