cfg_if! {
    if #[cfg(feature = "transport_tcp")] {
        pub mod tcp;
    } else {}
}

pub mod local;

mod error;
mod server_addr;

pub use error::{RecvError, SendError};
pub use server_addr::ServerAddr;

pub use inner::{MessageReceiver, MessageSender, Socket};

mod inner {

    use super::{RecvError, SendError, ServerAddr};

    /// A not-yet-connected channel to the game server
    pub trait Socket {
        /// Start connecting. Returns immediately; the halves report progress
        /// (and failure) through their own results.
        fn connect(self: Box<Self>) -> (Box<dyn MessageSender>, Box<dyn MessageReceiver>);
    }

    pub trait MessageSender: Send + Sync {
        /// Queues a payload for transmission to the server. Never blocks and
        /// never waits for delivery.
        fn send(&self, payload: &[u8]) -> Result<(), SendError>;
        /// Get the Server's address
        fn server_addr(&self) -> ServerAddr;
    }

    pub trait MessageReceiver: Send + Sync {
        /// Takes the next complete payload from the server, if one has
        /// arrived. `Err(RecvError::Closed)` marks the end of the stream.
        fn receive(&mut self) -> Result<Option<Vec<u8>>, RecvError>;
        /// Get the Server's address
        fn server_addr(&self) -> ServerAddr;
    }
}
