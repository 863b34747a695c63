use std::time::{Duration, Instant};

use log::{error, info, warn};

use roborally_shared::{GameState, Robot, ServerMessage};

use crate::{
    input::InputCommand,
    sync,
    transport::{MessageReceiver, RecvError, SendError, ServerAddr, Socket},
    ClientConfig, ClientError, ClientState, InputRejected, InterfaceState,
};

/// Client handle for one game session
///
/// Poll-driven: the owner calls `receive` from its loop to apply whatever the
/// server has sent, reads state on its render tick, and forwards local input
/// through the input methods. Both paths run on the owner's thread, so the
/// state needs no locking.
pub struct Client {
    config: ClientConfig,
    state: ClientState,
    receiver: Option<Box<dyn MessageReceiver>>,
    server_addr: Option<ServerAddr>,
}

impl Client {
    /// Create a new Client
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            state: ClientState::default(),
            receiver: None,
            server_addr: None,
        }
    }

    // Connection

    /// Connect to the given server socket. Any previous connection is
    /// dropped.
    pub fn connect<S: Into<Box<dyn Socket>>>(&mut self, socket: S) {
        if self.is_connected() {
            warn!("Client is already connected, replacing connection");
            self.disconnect();
        }

        let boxed_socket: Box<dyn Socket> = socket.into();
        let (sender, receiver) = boxed_socket.connect();
        let server_addr = receiver.server_addr();
        info!("Client connecting to {:?}", server_addr);

        self.state.interface.publisher_mut().bind(sender);
        self.receiver = Some(receiver);
        self.server_addr = Some(server_addr);
    }

    /// Drop both halves of the connection. State stays as it was.
    pub fn disconnect(&mut self) {
        self.receiver = None;
        self.server_addr = None;
        self.state.interface.publisher_mut().unbind();
    }

    pub fn is_connected(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn server_addr(&self) -> Option<ServerAddr> {
        self.server_addr
    }

    // Incoming data

    /// Apply every message the server has sent since the last call, in
    /// arrival order, up to `max_messages_per_receive`. Returns how many were
    /// applied.
    ///
    /// A payload that fails to decode is fatal: nothing of it is applied and
    /// the connection is dropped. A closed stream also drops the connection
    /// and is reported as `ConnectionClosed`, carrying how many messages made
    /// it in before the close.
    pub fn receive(&mut self, now: &Instant) -> Result<usize, ClientError> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }

        let mut applied = 0;
        while applied < self.config.max_messages_per_receive {
            let next = match self.receiver.as_mut() {
                Some(receiver) => receiver.receive(),
                None => break,
            };
            match next {
                Ok(Some(payload)) => {
                    let message = match ServerMessage::decode(&payload) {
                        Ok(message) => message,
                        Err(e) => {
                            error!("Client Error: Cannot decode server message: {}", e);
                            self.disconnect();
                            return Err(e.into());
                        }
                    };
                    sync::apply(&mut self.state, message, now);
                    applied += 1;
                }
                Ok(None) => break,
                Err(RecvError::Closed) => {
                    info!("Server closed the connection");
                    self.disconnect();
                    return Err(ClientError::ConnectionClosed {
                        reason: RecvError::Closed.to_string(),
                        applied,
                    });
                }
                Err(RecvError::Io { reason }) => {
                    warn!("Connection to server lost: {}", reason);
                    self.disconnect();
                    return Err(ClientError::ConnectionClosed { reason, applied });
                }
            }
        }

        Ok(applied)
    }

    // State access

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn game_state(&self) -> Option<&GameState> {
        self.state.game.as_ref()
    }

    pub fn interface(&self) -> &InterfaceState {
        &self.state.interface
    }

    pub fn local_robot(&self) -> Option<&Robot> {
        self.state.local_robot()
    }

    pub fn opponents(&self) -> Vec<&Robot> {
        self.state.opponents()
    }

    /// Time left for choosing cards, once the server has started the timer
    pub fn timer_remaining(&self, now: &Instant) -> Option<Duration> {
        self.state.interface.timer().map(|started| {
            self.config
                .selection_timeout
                .saturating_sub(now.saturating_duration_since(started))
        })
    }

    /// Whether a winner announcement should still be on screen
    pub fn winner_visible(&self, now: &Instant) -> bool {
        self.state
            .interface
            .winner_shown_at()
            .is_some_and(|shown_at| {
                now.saturating_duration_since(shown_at) < self.config.winner_display_duration
            })
    }

    /// Most recent failure to hand an update to the server, if any
    pub fn take_send_error(&mut self) -> Option<SendError> {
        self.state.interface.publisher_mut().take_send_error()
    }

    // Local input

    pub fn handle_input(&mut self, command: InputCommand) -> Result<(), InputRejected> {
        self.state.interface.apply_input(command)
    }

    pub fn select_card(&mut self, dealt_index: usize) -> Result<(), InputRejected> {
        self.state.interface.select_card(dealt_index)
    }

    pub fn return_card(&mut self) -> Result<(), InputRejected> {
        self.state.interface.return_card()
    }

    pub fn return_cards(&mut self) -> Result<(), InputRejected> {
        self.state.interface.return_cards()
    }

    pub fn cursor_next(&mut self) -> Result<(), InputRejected> {
        self.state.interface.cursor_next()
    }

    pub fn cursor_prev(&mut self) -> Result<(), InputRejected> {
        self.state.interface.cursor_prev()
    }

    pub fn set_cursor(&mut self, slot: usize) -> Result<(), InputRejected> {
        self.state.interface.set_cursor(slot)
    }

    pub fn switch_power_down(&mut self) -> Result<(), InputRejected> {
        self.state.interface.switch_power_down()
    }

    pub fn confirm_selection(&mut self) -> Result<(), InputRejected> {
        self.state.interface.confirm_selection()
    }
}
