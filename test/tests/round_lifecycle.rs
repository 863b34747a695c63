/// A full round as the server drives it, plus how the client copes with
/// malformed traffic and a connection that goes away.

use std::time::{Duration, Instant};

use serde_json::json;

use roborally_client::{
    shared::{DecodeError, GameRound},
    transport::SendError,
    Client, ClientConfig, ClientError, InputCommand,
};
use roborally_test::{
    assert_local_robot, assert_opponents, assert_program, connected_client, deliver, game, hand,
    init_logger, pump, robots, MessageBuilder, TestServer,
};

fn welcomed() -> (Client, TestServer) {
    let (mut client, server) = connected_client();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R2")
            .game_state(&game(&["R2", "R5", "R7"], 4, 3))
            .build(),
    );
    (client, server)
}

#[test]
fn welcome_message_binds_robot_and_mirrors_game() {
    init_logger();
    let (client, _server) = welcomed();

    assert_local_robot!(client, "R2");
    assert_opponents!(client, ["R5", "R7"]);
    let game_state = client.game_state().expect("game state mirrored");
    assert_eq!(game_state.flag_count, 4);
    assert_eq!(game_state.game_round, GameRound::new(3));
}

#[test]
fn local_changes_publish_full_interface_state() {
    init_logger();
    let (mut client, server) = welcomed();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new().cards(&hand("c", 9)).build(),
    );

    client.select_card(4).unwrap();
    client.handle_input(InputCommand::SwitchPowerDown).unwrap();

    let sent = server.received();
    assert_eq!(sent.len(), 2);
    let first = &sent[0].interface_data;
    assert_eq!(first.program, vec![Some(4), None, None, None, None]);
    assert!(!first.power_down);
    assert!(!first.confirmed);
    assert_eq!(first.game_round, Some(GameRound::new(3)));
    assert!(sent[1].interface_data.power_down);
}

#[test]
fn round_number_update_is_echoed_back() {
    init_logger();
    let (mut client, server) = welcomed();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .cards(&hand("c", 9))
            .current_game_round(4)
            .build(),
    );

    client.select_card(0).unwrap();

    let sent = server.received();
    assert_eq!(sent[0].interface_data.game_round, Some(GameRound::new(4)));
    assert_eq!(
        client.game_state().map(|game_state| game_state.game_round),
        Some(GameRound::new(4))
    );
}

#[test]
fn robots_broadcast_replaces_roster() {
    init_logger();
    let (mut client, server) = welcomed();
    let mut updated = robots(&["R7", "R2"]);
    updated[1].damages = 3;
    updated[1].coordinates = (4, 6);

    deliver(&mut client, &server, MessageBuilder::new().robots(&updated).build());

    assert_local_robot!(client, "R2");
    assert_opponents!(client, ["R7"]);
    let local = client.local_robot().unwrap();
    assert_eq!(local.damages, 3);
    assert_eq!(local.coordinates, (4, 6));
}

#[test]
fn full_round_then_new_deal() {
    init_logger();
    let (mut client, server) = welcomed();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new().cards(&hand("c", 9)).build(),
    );
    for index in [8, 6, 4, 2, 0] {
        client.select_card(index).unwrap();
    }
    client.confirm_selection().unwrap();
    assert!(server.received().last().unwrap().interface_data.confirmed);
    assert_eq!(client.return_card(), Err(roborally_client::InputRejected::SelectionConfirmed));

    deliver(&mut client, &server, MessageBuilder::new().round_over().build());
    assert!(!client.interface().selection_confirmed());
    assert_program!(client, [None, None, None, None, None]);

    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R2")
            .robots(&robots(&["R2", "R5", "R7"]))
            .cards(&hand("n", 8))
            .build(),
    );
    assert_local_robot!(client, "R2");
    assert_eq!(client.interface().dealt_cards().len(), 8);
    client.select_card(7).unwrap();
    assert_program!(client, [Some(7), None, None, None, None]);
}

#[test]
fn roster_after_round_over_rebinds_without_new_name() {
    init_logger();
    let (mut client, server) = welcomed();
    deliver(&mut client, &server, MessageBuilder::new().round_over().build());
    assert!(client.local_robot().is_none());

    deliver(
        &mut client,
        &server,
        MessageBuilder::new().robots(&robots(&["R7", "R2", "R5"])).build(),
    );

    assert_local_robot!(client, "R2");
    assert_opponents!(client, ["R7", "R5"]);
}

#[test]
fn bare_round_over_string_resets() {
    init_logger();
    let (mut client, server) = welcomed();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new().cards(&hand("c", 9)).timer_start().build(),
    );

    deliver(&mut client, &server, json!("round_over"));

    assert!(client.interface().dealt_cards().is_empty());
    assert!(client.interface().timer().is_none());
    assert_eq!(client.interface().robot_name(), None);
}

#[test]
fn bare_timer_start_string_starts_timer() {
    init_logger();
    let (mut client, server) = welcomed();

    deliver(&mut client, &server, json!("timer_start"));

    assert!(client.interface().timer().is_some());
}

#[test]
fn unknown_fields_are_ignored() {
    init_logger();
    let (mut client, server) = welcomed();

    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .field("chat", json!("gg"))
            .cards(&hand("c", 3))
            .build(),
    );
    deliver(
        &mut client,
        &server,
        MessageBuilder::new().field("spectators", json!(2)).build(),
    );

    assert_eq!(client.interface().dealt_cards().len(), 3);
    assert!(client.is_connected());
}

#[test]
fn undecodable_payload_is_fatal() {
    init_logger();
    let (mut client, server) = welcomed();
    server.send(MessageBuilder::new().cards(&hand("c", 9)).build());
    server.send_raw(b"{not json");
    server.send(MessageBuilder::new().timer_start().build());

    let result = pump(&mut client);

    assert!(matches!(
        result,
        Err(ClientError::Decode(DecodeError::MalformedJson { .. }))
    ));
    // messages before the bad one stay applied, nothing after it is
    assert_eq!(client.interface().dealt_cards().len(), 9);
    assert!(client.interface().timer().is_none());
    assert!(!client.is_connected());
    assert_eq!(pump(&mut client), Err(ClientError::NotConnected));
}

#[test]
fn invalid_field_discards_whole_message() {
    init_logger();
    let (mut client, server) = welcomed();
    server.send(
        MessageBuilder::new()
            .cards(&hand("c", 9))
            .field("game_state", json!({ "flag_count": 2 }))
            .build(),
    );

    let result = pump(&mut client);

    match result {
        Err(ClientError::Decode(DecodeError::InvalidField { field, reason })) => {
            assert_eq!(field, "game_state");
            assert!(reason.contains("missing field `robots`"), "{}", reason);
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(client.interface().dealt_cards().is_empty());
    assert_eq!(
        client.game_state().map(|game_state| game_state.flag_count),
        Some(4)
    );
}

#[test]
fn server_close_is_reported_once() {
    init_logger();
    let (mut client, server) = welcomed();
    server.send(MessageBuilder::new().cards(&hand("c", 9)).build());
    server.close();

    let result = pump(&mut client);

    // backlog queued before the close still lands and is counted
    assert!(matches!(
        result,
        Err(ClientError::ConnectionClosed { applied: 1, .. })
    ));
    assert_eq!(client.interface().dealt_cards().len(), 9);
    assert!(!client.is_connected());
    assert_eq!(pump(&mut client), Err(ClientError::NotConnected));

    // state stays readable and local input still works offline
    assert_local_robot!(client, "R2");
    client.select_card(0).unwrap();
    assert!(client.take_send_error().is_none());
}

#[test]
fn send_failure_does_not_fail_input() {
    init_logger();
    let (mut client, server) = welcomed();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new().cards(&hand("c", 9)).build(),
    );
    server.reject_sends(true);

    client.select_card(0).unwrap();

    assert_program!(client, [Some(0), None, None, None, None]);
    assert!(matches!(
        client.take_send_error(),
        Some(SendError::Disconnected { .. })
    ));
    assert!(client.take_send_error().is_none());
    assert!(client.is_connected());
}

#[test]
fn receive_before_connect_fails() {
    init_logger();
    let mut client = Client::new(ClientConfig::default());

    assert_eq!(pump(&mut client), Err(ClientError::NotConnected));
    assert!(client.game_state().is_none());
}

#[test]
fn timer_and_winner_presentation() {
    init_logger();
    let (mut client, server) = welcomed();
    let start = Instant::now();
    server.send(
        MessageBuilder::new()
            .timer_start()
            .winner(json!("R5"))
            .build(),
    );
    assert_eq!(client.receive(&start), Ok(1));

    assert_eq!(
        client.timer_remaining(&(start + Duration::from_secs(10))),
        Some(Duration::from_secs(20))
    );
    assert_eq!(
        client.timer_remaining(&(start + Duration::from_secs(45))),
        Some(Duration::ZERO)
    );
    assert!(client.winner_visible(&(start + Duration::from_secs(1))));
    assert!(!client.winner_visible(&(start + Duration::from_secs(6))));
    assert!(client.game_state().unwrap().winners.contains("R5"));
}
