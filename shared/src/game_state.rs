use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{decode::null_as_default, GameRound, Robot};

/// Names of the robots that have won the game
///
/// The server announces either a single name, a list of names or null; all
/// three collapse into this list (empty meaning "no winner yet").
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<WinnersWire>", into = "Vec<String>")]
pub struct Winners(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum WinnersWire {
    One(String),
    Many(Vec<String>),
}

impl From<Option<WinnersWire>> for Winners {
    fn from(wire: Option<WinnersWire>) -> Self {
        match wire {
            None => Self::default(),
            Some(WinnersWire::One(name)) => Self(vec![name]),
            Some(WinnersWire::Many(names)) => Self(names),
        }
    }
}

impl From<Winners> for Vec<String> {
    fn from(winners: Winners) -> Self {
        winners.0
    }
}

impl Winners {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|winner| winner == name)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Client-side mirror of the authoritative game
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub robots: Vec<Robot>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flag_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub game_round: GameRound,
    #[serde(default)]
    pub winners: Winners,
    /// Server-owned board description, kept as-is for rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Value>,
}

impl GameState {
    pub fn new(robots: Vec<Robot>) -> Self {
        Self {
            robots,
            ..Self::default()
        }
    }

    pub fn robot(&self, name: &str) -> Option<&Robot> {
        self.robots.iter().find(|robot| robot.name == name)
    }

    /// Every robot except the local one, in roster order
    ///
    /// With no local robot bound yet, that is the whole roster.
    pub fn opponents<'a>(&'a self, local_name: Option<&'a str>) -> impl Iterator<Item = &'a Robot> {
        self.robots
            .iter()
            .filter(move |robot| Some(robot.name.as_str()) != local_name)
    }
}
