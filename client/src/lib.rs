//! # RoboRally Client
//! Keeps a local mirror of a RoboRally game in sync with the server's
//! incremental updates, and publishes the local player's card program back.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use roborally_shared as shared;
pub use roborally_shared::{
    Card, ClientMessage, DecodeError, Direction, GameRound, GameState, Robot, ServerField,
    ServerMessage, Winners, PROGRAM_SIZE,
};

mod client;
mod client_config;
mod client_state;
mod error;
mod input;
mod interface_state;
mod publisher;
pub mod sync;
pub mod transport;

pub use client::Client;
pub use client_config::ClientConfig;
pub use client_state::ClientState;
pub use error::{ClientError, InputRejected};
pub use input::{InputCommand, CARD_KEYS};
pub use interface_state::InterfaceState;
pub use publisher::ChangePublisher;
