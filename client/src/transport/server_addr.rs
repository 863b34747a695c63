use std::net::SocketAddr;

/// Where the server lives, as far as a transport knows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerAddr {
    /// Network address of a remote server
    Found(SocketAddr),
    /// In-process server with no network address
    Local,
}
