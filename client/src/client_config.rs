use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// How long the server lets the last undecided player choose once the
    /// round timer has started
    pub selection_timeout: Duration,
    /// How long a winner announcement stays on screen
    pub winner_display_duration: Duration,
    /// Upper bound of inbound messages applied per `Client::receive` call, so
    /// one call never stalls a frame behind a long backlog
    pub max_messages_per_receive: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            selection_timeout: Duration::from_secs(30),
            winner_display_duration: Duration::from_secs(5),
            max_messages_per_receive: 256,
        }
    }
}
