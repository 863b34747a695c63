//! In-memory transport: routes payloads between a client and an in-process
//! server handle without any network I/O.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::debug;

use super::{
    MessageReceiver as TransportReceiver, MessageSender as TransportSender, RecvError, SendError,
    ServerAddr, Socket as TransportSocket,
};

struct LocalChannel {
    to_client: VecDeque<Vec<u8>>,
    to_server: VecDeque<Vec<u8>>,
    open: bool,
    reject_sends: bool,
}

type SharedChannel = Arc<Mutex<LocalChannel>>;

fn lock(channel: &SharedChannel) -> MutexGuard<'_, LocalChannel> {
    channel.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Client end of a local channel, handed to `Client::connect`
pub struct Socket {
    channel: SharedChannel,
}

/// Server end of a local channel
#[derive(Clone)]
pub struct LocalServer {
    channel: SharedChannel,
}

impl Socket {
    /// Create a connected client socket and the matching server handle
    pub fn pair() -> (Self, LocalServer) {
        let channel = Arc::new(Mutex::new(LocalChannel {
            to_client: VecDeque::new(),
            to_server: VecDeque::new(),
            open: true,
            reject_sends: false,
        }));
        (
            Self {
                channel: channel.clone(),
            },
            LocalServer { channel },
        )
    }
}

impl From<Socket> for Box<dyn TransportSocket> {
    fn from(socket: Socket) -> Self {
        Box::new(socket)
    }
}

impl TransportSocket for Socket {
    fn connect(self: Box<Self>) -> (Box<dyn TransportSender>, Box<dyn TransportReceiver>) {
        let sender = MessageSender {
            channel: self.channel.clone(),
        };
        let receiver = MessageReceiver {
            channel: self.channel,
        };
        (Box::new(sender), Box::new(receiver))
    }
}

impl LocalServer {
    /// Queue a raw frame for the client
    pub fn send(&self, payload: &[u8]) {
        lock(&self.channel).to_client.push_back(payload.to_vec());
    }

    /// Queue a JSON value for the client
    pub fn send_json(&self, value: &serde_json::Value) {
        self.send(value.to_string().as_bytes());
    }

    /// Take the oldest frame the client has sent
    pub fn receive(&self) -> Option<Vec<u8>> {
        lock(&self.channel).to_server.pop_front()
    }

    /// Take every frame the client has sent, oldest first
    pub fn drain(&self) -> Vec<Vec<u8>> {
        lock(&self.channel).to_server.drain(..).collect()
    }

    /// Hang up. Frames already queued for the client are still delivered.
    pub fn close(&self) {
        debug!("Local server closing channel");
        lock(&self.channel).open = false;
    }

    pub fn is_open(&self) -> bool {
        lock(&self.channel).open
    }

    /// Make every client send fail, as a broken uplink would
    pub fn reject_sends(&self, reject: bool) {
        lock(&self.channel).reject_sends = reject;
    }
}

struct MessageSender {
    channel: SharedChannel,
}

impl TransportSender for MessageSender {
    fn send(&self, payload: &[u8]) -> Result<(), SendError> {
        let mut channel = lock(&self.channel);
        if !channel.open || channel.reject_sends {
            return Err(SendError::Disconnected { len: payload.len() });
        }
        channel.to_server.push_back(payload.to_vec());
        Ok(())
    }

    fn server_addr(&self) -> ServerAddr {
        ServerAddr::Local
    }
}

struct MessageReceiver {
    channel: SharedChannel,
}

impl TransportReceiver for MessageReceiver {
    fn receive(&mut self) -> Result<Option<Vec<u8>>, RecvError> {
        let mut channel = lock(&self.channel);
        match channel.to_client.pop_front() {
            Some(payload) => Ok(Some(payload)),
            None if channel.open => Ok(None),
            None => Err(RecvError::Closed),
        }
    }

    fn server_addr(&self) -> ServerAddr {
        ServerAddr::Local
    }
}
