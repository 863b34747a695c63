use serde::{Deserialize, Deserializer, Serialize};

use crate::{decode::null_as_default, DecodeError, PROGRAM_SIZE};

/// Board orientation, carried on the wire as a rotation angle in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "i64")]
pub enum Direction {
    #[default]
    N,
    E,
    S,
    W,
}

impl Direction {
    pub fn angle(&self) -> u16 {
        match self {
            Direction::N => 0,
            Direction::E => 90,
            Direction::S => 180,
            Direction::W => 270,
        }
    }

    pub fn from_angle(angle: i64) -> Result<Self, DecodeError> {
        match angle {
            0 => Ok(Direction::N),
            90 => Ok(Direction::E),
            180 => Ok(Direction::S),
            270 => Ok(Direction::W),
            _ => Err(DecodeError::UnknownDirection { angle }),
        }
    }
}

impl From<Direction> for u16 {
    fn from(direction: Direction) -> Self {
        direction.angle()
    }
}

impl TryFrom<i64> for Direction {
    type Error = DecodeError;

    fn try_from(angle: i64) -> Result<Self, Self::Error> {
        Self::from_angle(angle)
    }
}

/// A player's unit on the board
///
/// Only `name` is required on the wire. Everything else is either opaque to
/// the client core (position, orientation, counters) or defaults to the
/// unrestricted value (`unblocked_cards` = whole program). Null reads the
/// same as absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub name: String,
    /// How many program slots stay editable this round
    #[serde(default = "full_program", deserialize_with = "unblocked_or_full")]
    pub unblocked_cards: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: (i32, i32),
    #[serde(default, deserialize_with = "null_as_default")]
    pub direction: Direction,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lives: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub damages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permanent_damages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub power_down: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub winner: bool,
}

fn full_program() -> usize {
    PROGRAM_SIZE
}

fn unblocked_or_full<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(Option::<usize>::deserialize(deserializer)?.unwrap_or(PROGRAM_SIZE))
}

impl Robot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unblocked_cards: PROGRAM_SIZE,
            coordinates: (0, 0),
            direction: Direction::N,
            lives: 0,
            flags: 0,
            damages: 0,
            permanent_damages: 0,
            power_down: false,
            winner: false,
        }
    }

    pub fn with_unblocked_cards(mut self, unblocked_cards: usize) -> Self {
        self.unblocked_cards = unblocked_cards;
        self
    }

    pub fn with_position(mut self, coordinates: (i32, i32), direction: Direction) -> Self {
        self.coordinates = coordinates;
        self.direction = direction;
        self
    }
}
