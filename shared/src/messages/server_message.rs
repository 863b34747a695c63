use log::trace;
use serde_json::Value;

use crate::{
    decode_field, json_type_name,
    messages::constants::{
        BLOCKED_CARDS, CARDS, CURRENT_GAME_ROUND, GAME_STATE, ROBOTS, ROBOT_NAME, ROUND_OVER,
        TIMER_START, WINNER,
    },
    Card, DecodeError, GameRound, GameState, Robot, Winners,
};

/// One recognized piece of a server message
///
/// A server message is a loose bag of independently optional fields. Each
/// field decodes to exactly one variant; keys the client does not know
/// decode to `Unknown` so newer servers can add fields without breaking
/// older clients.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerField {
    RobotName(String),
    GameState(GameState),
    Robots(Vec<Robot>),
    Cards(Vec<Card>),
    BlockedCards(Vec<Card>),
    Winner(Winners),
    TimerStart,
    CurrentGameRound(GameRound),
    RoundOver,
    Unknown(String),
}

impl ServerField {
    /// Position in the apply order. Later fields depend on earlier ones
    /// (identity before roster, roster before anything about "my" robot)
    /// and `RoundOver` discards everything, so it must come last.
    pub fn priority(&self) -> u8 {
        match self {
            ServerField::RobotName(_) => 0,
            ServerField::GameState(_) => 1,
            ServerField::Robots(_) => 2,
            ServerField::Cards(_) => 3,
            ServerField::BlockedCards(_) => 4,
            ServerField::Winner(_) => 5,
            ServerField::TimerStart => 6,
            ServerField::CurrentGameRound(_) => 7,
            ServerField::RoundOver => 8,
            ServerField::Unknown(_) => 9,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ServerField::RobotName(_) => ROBOT_NAME,
            ServerField::GameState(_) => GAME_STATE,
            ServerField::Robots(_) => ROBOTS,
            ServerField::Cards(_) => CARDS,
            ServerField::BlockedCards(_) => BLOCKED_CARDS,
            ServerField::Winner(_) => WINNER,
            ServerField::TimerStart => TIMER_START,
            ServerField::CurrentGameRound(_) => CURRENT_GAME_ROUND,
            ServerField::RoundOver => ROUND_OVER,
            ServerField::Unknown(key) => key,
        }
    }

    fn decode_entry(key: &str, value: &Value) -> Result<Self, DecodeError> {
        let field = match key {
            ROBOT_NAME => ServerField::RobotName(decode_field(ROBOT_NAME, value)?),
            GAME_STATE => ServerField::GameState(decode_field(GAME_STATE, value)?),
            ROBOTS => ServerField::Robots(decode_field(ROBOTS, value)?),
            CARDS => ServerField::Cards(decode_field(CARDS, value)?),
            BLOCKED_CARDS => ServerField::BlockedCards(decode_field(BLOCKED_CARDS, value)?),
            WINNER => ServerField::Winner(decode_field(WINNER, value)?),
            CURRENT_GAME_ROUND => {
                ServerField::CurrentGameRound(decode_field(CURRENT_GAME_ROUND, value)?)
            }
            // sentinels: presence is the whole meaning, the value is ignored
            TIMER_START => ServerField::TimerStart,
            ROUND_OVER => ServerField::RoundOver,
            other => ServerField::Unknown(other.to_owned()),
        };
        Ok(field)
    }

    fn from_sentinel(name: &str) -> Self {
        match name {
            TIMER_START => ServerField::TimerStart,
            ROUND_OVER => ServerField::RoundOver,
            other => ServerField::Unknown(other.to_owned()),
        }
    }
}

/// A fully decoded inbound message, with its fields in apply order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServerMessage {
    fields: Vec<ServerField>,
}

impl ServerMessage {
    /// Decode one raw frame from the server
    ///
    /// Decoding is all-or-nothing: if any field is malformed the whole
    /// message is rejected.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_slice(payload).map_err(|error| DecodeError::MalformedJson {
                reason: error.to_string(),
            })?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(map) => {
                let fields = map
                    .iter()
                    .map(|(key, value)| ServerField::decode_entry(key, value))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::from_fields(fields))
            }
            // the game server also broadcasts bare sentinel strings
            Value::String(name) => Ok(Self::from_fields(vec![ServerField::from_sentinel(name)])),
            other => Err(DecodeError::UnexpectedType {
                expected: "object or sentinel string",
                found: json_type_name(other),
            }),
        }
    }

    pub fn from_fields(mut fields: Vec<ServerField>) -> Self {
        fields.sort_by_key(ServerField::priority);
        for field in &fields {
            if let ServerField::Unknown(key) = field {
                trace!("Ignoring unknown server message field `{}`", key);
            }
        }
        Self { fields }
    }

    pub fn fields(&self) -> &[ServerField] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<ServerField> {
        self.fields
    }

    /// True when nothing in the message would change local state
    pub fn is_noop(&self) -> bool {
        self.fields
            .iter()
            .all(|field| matches!(field, ServerField::Unknown(_)))
    }
}
