//! # RoboRally Shared
//! Data model and JSON wire protocol shared between the RoboRally client and
//! its test harness.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod card;
mod constants;
mod decode;
mod error;
mod game_state;
mod messages;
mod robot;
mod types;

pub use card::Card;
pub use constants::{MAX_DEALT_CARDS, PROGRAM_SIZE};
pub use decode::{decode_field, json_type_name};
pub use error::DecodeError;
pub use game_state::{GameState, Winners};
pub use messages::{
    client_message::{ClientMessage, InterfaceData},
    server_message::{ServerField, ServerMessage},
};
pub use robot::{Direction, Robot};
pub use types::GameRound;
