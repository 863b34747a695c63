//! TCP transport: one newline-delimited JSON frame per line.
//!
//! Socket I/O runs on its own thread with a current-thread tokio runtime;
//! the client side only ever touches unbounded channels, so sending never
//! blocks and receiving is a poll.

use std::net::SocketAddr;

use log::{debug, error, info, warn};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{tcp::OwnedWriteHalf, TcpStream},
    sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender},
};

use super::{
    MessageReceiver as TransportReceiver, MessageSender as TransportSender, RecvError, SendError,
    ServerAddr, Socket as TransportSocket,
};

type Incoming = Result<Vec<u8>, RecvError>;

// Socket
pub struct Socket {
    server_addr: SocketAddr,
}

impl Socket {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

impl From<Socket> for Box<dyn TransportSocket> {
    fn from(socket: Socket) -> Self {
        Box::new(socket)
    }
}

impl TransportSocket for Socket {
    fn connect(self: Box<Self>) -> (Box<dyn TransportSender>, Box<dyn TransportReceiver>) {
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (incoming_tx, incoming_rx) = mpsc::unbounded_channel::<Incoming>();

        spawn_connection_task(self.server_addr, outgoing_rx, incoming_tx);

        let sender = MessageSender {
            server_addr: self.server_addr,
            outgoing: outgoing_tx,
        };
        let receiver = MessageReceiver {
            server_addr: self.server_addr,
            incoming: incoming_rx,
        };
        (Box::new(sender), Box::new(receiver))
    }
}

fn spawn_connection_task(
    server_addr: SocketAddr,
    outgoing: UnboundedReceiver<Vec<u8>>,
    incoming: UnboundedSender<Incoming>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Failed to create tokio runtime: {}", e);
                let _ = incoming.send(Err(RecvError::Io {
                    reason: e.to_string(),
                }));
                return;
            }
        };

        runtime.block_on(async move {
            match TcpStream::connect(server_addr).await {
                Ok(stream) => {
                    info!("TCP connection established to {}", server_addr);
                    run_connection(stream, outgoing, incoming).await;
                    info!("TCP connection to {} closed", server_addr);
                }
                Err(e) => {
                    error!("Failed to connect to {}: {}", server_addr, e);
                    let _ = incoming.send(Err(RecvError::Io {
                        reason: e.to_string(),
                    }));
                }
            }
        });
    });
}

// Returning drops `incoming`, which the receiver sees as a closed stream
async fn run_connection(
    stream: TcpStream,
    mut outgoing: UnboundedReceiver<Vec<u8>>,
    incoming: UnboundedSender<Incoming>,
) {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if incoming.send(Ok(line.into_bytes())).is_err() {
                        debug!("Client dropped the inbound channel");
                        return;
                    }
                }
                Ok(None) => return,
                Err(e) => {
                    warn!("Failed to read from server: {}", e);
                    let _ = incoming.send(Err(RecvError::Io { reason: e.to_string() }));
                    return;
                }
            },
            payload = outgoing.recv() => match payload {
                Some(payload) => {
                    if let Err(e) = write_frame(&mut write_half, &payload).await {
                        warn!("Failed to write to server: {}", e);
                        let _ = incoming.send(Err(RecvError::Io { reason: e.to_string() }));
                        return;
                    }
                }
                None => {
                    debug!("Client dropped the outbound channel");
                    return;
                }
            },
        }
    }
}

async fn write_frame(write_half: &mut OwnedWriteHalf, payload: &[u8]) -> std::io::Result<()> {
    write_half.write_all(payload).await?;
    write_half.write_all(b"\n").await?;
    write_half.flush().await
}

// MessageSender
struct MessageSender {
    server_addr: SocketAddr,
    outgoing: UnboundedSender<Vec<u8>>,
}

impl TransportSender for MessageSender {
    fn send(&self, payload: &[u8]) -> Result<(), SendError> {
        self.outgoing
            .send(payload.to_vec())
            .map_err(|_| SendError::Disconnected { len: payload.len() })
    }

    fn server_addr(&self) -> ServerAddr {
        ServerAddr::Found(self.server_addr)
    }
}

// MessageReceiver
struct MessageReceiver {
    server_addr: SocketAddr,
    incoming: UnboundedReceiver<Incoming>,
}

impl TransportReceiver for MessageReceiver {
    fn receive(&mut self) -> Result<Option<Vec<u8>>, RecvError> {
        match self.incoming.try_recv() {
            Ok(Ok(payload)) => Ok(Some(payload)),
            Ok(Err(e)) => Err(e),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(RecvError::Closed),
        }
    }

    fn server_addr(&self) -> ServerAddr {
        ServerAddr::Found(self.server_addr)
    }
}
