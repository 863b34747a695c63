use std::fmt;

use log::{debug, warn};

use roborally_shared::{ClientMessage, GameRound};

use crate::transport::{MessageSender, SendError};

/// Pushes the local interface state to the server after each local change
///
/// Fire-and-forget: a payload is handed to the transport and forgotten. A
/// failed hand-off is kept as a notice for the owner to pick up, but is never
/// retried and never fails the input that caused it.
pub struct ChangePublisher {
    sender: Option<Box<dyn MessageSender>>,
    game_round: Option<GameRound>,
    last_error: Option<SendError>,
    notifications: u64,
}

impl Default for ChangePublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChangePublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePublisher")
            .field("bound", &self.sender.is_some())
            .field("game_round", &self.game_round)
            .field("last_error", &self.last_error)
            .field("notifications", &self.notifications)
            .finish()
    }
}

impl ChangePublisher {
    pub fn new() -> Self {
        Self {
            sender: None,
            game_round: None,
            last_error: None,
            notifications: 0,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.sender.is_some()
    }

    /// Round number attached to every outbound message
    pub fn game_round(&self) -> Option<GameRound> {
        self.game_round
    }

    /// How many local changes have been published (or attempted) so far
    pub fn notifications(&self) -> u64 {
        self.notifications
    }

    /// Take the most recent send failure, if any
    pub fn take_send_error(&mut self) -> Option<SendError> {
        self.last_error.take()
    }

    pub(crate) fn bind(&mut self, sender: Box<dyn MessageSender>) {
        self.sender = Some(sender);
    }

    pub(crate) fn unbind(&mut self) {
        self.sender = None;
    }

    pub(crate) fn set_game_round(&mut self, game_round: GameRound) {
        self.game_round = Some(game_round);
    }

    pub(crate) fn notify(&mut self, message: &ClientMessage) {
        self.notifications += 1;

        let Some(sender) = self.sender.as_ref() else {
            debug!("No connection to server, local change not published");
            return;
        };

        let result = message
            .to_bytes()
            .map_err(|e| SendError::Encode {
                reason: e.to_string(),
            })
            .and_then(|payload| sender.send(&payload));

        if let Err(e) = result {
            warn!("Client Error: Cannot send interface state to Server: {}", e);
            self.last_error = Some(e);
        }
    }
}
