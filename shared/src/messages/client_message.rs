use serde::{Deserialize, Serialize};

use crate::GameRound;

/// What the client reports to the server after every local change
///
/// The field names are a contract with the server and are serialized as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    pub interface_data: InterfaceData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceData {
    /// Indices into the dealt cards, one per editable program slot
    pub program: Vec<Option<usize>>,
    pub power_down: bool,
    pub confirmed: bool,
    /// Last round number the server announced, echoed back unchanged
    pub game_round: Option<GameRound>,
}

impl ClientMessage {
    pub fn new(interface_data: InterfaceData) -> Self {
        Self { interface_data }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}
