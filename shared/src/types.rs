use std::fmt;

use serde::{Deserialize, Serialize};

/// Round counter owned by the server
///
/// The client only ever stores what the server sent and echoes it back in
/// outbound messages; it has no operation that advances it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameRound(pub u32);

impl GameRound {
    pub fn new(round: u32) -> Self {
        Self(round)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for GameRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
