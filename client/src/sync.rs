//! Applies decoded server messages to the local state mirror.
//!
//! A message is a set of optional fields that arrive already sorted into
//! apply order (see `ServerField::priority`). Nothing here ever publishes to
//! the server: only local input does, so server updates cannot echo back.

use std::time::Instant;

use log::{debug, info, warn};

use roborally_shared::{GameRound, GameState, Robot, ServerField, ServerMessage, Winners};

use crate::ClientState;

/// Apply one inbound message, fields in priority order
pub fn apply(state: &mut ClientState, message: ServerMessage, now: &Instant) {
    if message.is_noop() {
        debug!("Server message carries no known fields, ignoring");
        return;
    }

    for field in message.into_fields() {
        match field {
            ServerField::RobotName(name) => {
                debug!("Server assigned robot {}", name);
                state.identity = Some(name);
            }
            ServerField::GameState(game) => apply_game_state(state, game),
            ServerField::Robots(robots) => apply_robots(state, robots),
            ServerField::Cards(cards) => {
                debug!("Dealt {} cards", cards.len());
                state.interface.receive_dealt_cards(cards);
            }
            ServerField::BlockedCards(cards) => state.interface.receive_blocked_cards(cards),
            ServerField::Winner(winners) => apply_winner(state, winners, now),
            ServerField::TimerStart => state.interface.start_timer(*now),
            ServerField::CurrentGameRound(round) => apply_game_round(state, round),
            ServerField::RoundOver => {
                debug!("Round over, resetting interface");
                state.interface.reset();
            }
            ServerField::Unknown(_) => {}
        }
    }
}

fn apply_game_state(state: &mut ClientState, game: GameState) {
    info!(
        "Game state received: {} robots, {} flags, round {}",
        game.robots.len(),
        game.flag_count,
        game.game_round
    );
    state
        .interface
        .publisher_mut()
        .set_game_round(game.game_round);
    state.game = Some(game);
    resolve_local_robot(state);
}

fn apply_robots(state: &mut ClientState, robots: Vec<Robot>) {
    match state.game.as_mut() {
        Some(game) => game.robots = robots,
        None => {
            debug!("Robots received before any game state, starting a new one");
            state.game = Some(GameState::new(robots));
        }
    }
    resolve_local_robot(state);
}

/// Bind the local robot to the cached identity, if the roster has it
fn resolve_local_robot(state: &mut ClientState) {
    let (Some(name), Some(game)) = (state.identity.as_deref(), state.game.as_ref()) else {
        return;
    };

    if game.robot(name).is_some() {
        if state.interface.robot_name() != Some(name) {
            info!("Playing as robot {}", name);
        }
        state.interface.bind_robot(name.to_owned());
    } else {
        warn!("Robot {} is not in the roster", name);
    }
}

fn apply_winner(state: &mut ClientState, winners: Winners, now: &Instant) {
    info!("Winner announced: {:?}", winners.names());
    match state.game.as_mut() {
        Some(game) => game.winners = winners,
        None => {
            debug!("Winner received before any game state, starting a new one");
            state.game = Some(GameState {
                winners,
                ..GameState::default()
            });
        }
    }
    state.interface.show_winner(*now);
}

fn apply_game_round(state: &mut ClientState, round: GameRound) {
    match state.game.as_mut() {
        Some(game) => {
            if round < game.game_round {
                warn!(
                    "Server moved game round back from {} to {}",
                    game.game_round, round
                );
            }
            game.game_round = round;
        }
        None => {
            debug!("Game round {} received before any game state, starting a new one", round);
            state.game = Some(GameState {
                game_round: round,
                ..GameState::default()
            });
        }
    }
    state.interface.publisher_mut().set_game_round(round);
}
