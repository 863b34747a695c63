// Inbound message keys, as sent by the game server

pub const ROBOT_NAME: &str = "robot_name";
pub const GAME_STATE: &str = "game_state";
pub const ROBOTS: &str = "robots";
pub const CARDS: &str = "cards";
pub const BLOCKED_CARDS: &str = "blocked_cards";
pub const WINNER: &str = "winner";
pub const TIMER_START: &str = "timer_start";
pub const CURRENT_GAME_ROUND: &str = "current_game_round";
pub const ROUND_OVER: &str = "round_over";
