use roborally_shared::{GameState, Robot};

use crate::InterfaceState;

/// Everything the client knows, in one owner
///
/// The synchronizer and the input path both reach state only through a
/// `&mut ClientState`; there is no other handle to either half.
#[derive(Debug, Default)]
pub struct ClientState {
    /// Authoritative mirror; absent until the first `game_state` message
    pub game: Option<GameState>,
    /// Robot name the server assigned this session. Outlives round resets,
    /// unlike the binding kept in `interface`.
    pub identity: Option<String>,
    pub interface: InterfaceState,
}

impl ClientState {
    pub fn local_robot(&self) -> Option<&Robot> {
        self.game
            .as_ref()
            .and_then(|game| self.interface.local_robot(game))
    }

    /// Every robot in the roster except the local one
    pub fn opponents(&self) -> Vec<&Robot> {
        match &self.game {
            Some(game) => game.opponents(self.interface.robot_name()).collect(),
            None => Vec::new(),
        }
    }
}
