use serde::{Deserialize, Serialize};

/// An action card: what the robot does (`name`) and when, relative to the
/// other robots' cards in the same register (`value`, higher goes first)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub value: u32,
}

impl Card {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
