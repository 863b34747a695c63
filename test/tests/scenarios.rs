/// End-to-end scenarios: a scripted server drives a real client over the
/// local transport, and the tests inspect the client's mirror.

use roborally_client::InputRejected;
use roborally_test::{
    assert_local_robot, assert_opponents, assert_program, connected_client, deliver, game, hand,
    init_logger, robots, MessageBuilder,
};

fn card_names<'a>(cards: impl Iterator<Item = Option<&'a roborally_client::Card>>) -> Vec<String> {
    cards
        .map(|card| card.map(|card| card.name.clone()).unwrap_or_default())
        .collect()
}

/// Scenario A: identity and roster in one message
#[test]
fn robot_name_with_roster_binds_local_robot() {
    init_logger();
    let (mut client, server) = connected_client();

    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R2")
            .robots(&robots(&["R2", "R5"]))
            .build(),
    );

    assert_local_robot!(client, "R2");
    assert_opponents!(client, ["R5"]);
}

/// Scenario A, once more after a full game state
#[test]
fn roster_update_keeps_local_robot_out_of_opponents() {
    init_logger();
    let (mut client, server) = connected_client();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R5")
            .game_state(&game(&["R2", "R5"], 3, 0))
            .build(),
    );

    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robots(&robots(&["R5", "R2", "R7"]))
            .build(),
    );

    assert_local_robot!(client, "R5");
    assert_opponents!(client, ["R2", "R7"]);
}

/// Scenario B: blocked cards take over the leading registers
#[test]
fn blocked_cards_truncate_program_front() {
    init_logger();
    let (mut client, server) = connected_client();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R2")
            .game_state(&game(&["R2", "R5"], 3, 1))
            .cards(&hand("c", 5))
            .build(),
    );
    for index in 0..5 {
        client.select_card(index).unwrap();
    }
    assert_program!(client, [Some(0), Some(1), Some(2), Some(3), Some(4)]);

    deliver(
        &mut client,
        &server,
        MessageBuilder::new().blocked_cards(&hand("b", 2)).build(),
    );

    let blocked: Vec<_> = client
        .interface()
        .blocked_cards()
        .iter()
        .map(|card| card.name.as_str())
        .collect();
    assert_eq!(blocked, vec!["b1", "b2"]);
    assert_eq!(
        card_names(client.interface().program_cards()),
        vec!["c3", "c4", "c5"]
    );
}

/// Scenario C: a fresh deal reopens selection
#[test]
fn dealt_cards_reset_confirmation_and_timer() {
    init_logger();
    let (mut client, server) = connected_client();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R2")
            .game_state(&game(&["R2", "R5"], 3, 1))
            .cards(&hand("c", 5))
            .build(),
    );
    for index in 0..5 {
        client.select_card(index).unwrap();
    }
    client.confirm_selection().unwrap();
    deliver(&mut client, &server, MessageBuilder::new().timer_start().build());
    assert!(client.interface().selection_confirmed());
    assert!(client.interface().timer().is_some());

    deliver(
        &mut client,
        &server,
        MessageBuilder::new().cards(&hand("d", 5)).build(),
    );

    assert_eq!(client.interface().dealt_cards(), hand("d", 5).as_slice());
    assert!(!client.interface().selection_confirmed());
    assert!(client.interface().timer().is_none());
    assert_program!(client, [None, None, None, None, None]);
}

/// Scenario D: identity is rebuilt after a round reset
#[test]
fn round_over_then_game_state_rebuilds_identity() {
    init_logger();
    let (mut client, server) = connected_client();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R2")
            .game_state(&game(&["R2", "R5"], 3, 1))
            .cards(&hand("c", 7))
            .blocked_cards(&hand("b", 1))
            .build(),
    );
    client.select_card(3).unwrap();

    deliver(&mut client, &server, MessageBuilder::new().round_over().build());
    assert_eq!(client.interface().robot_name(), None);

    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R2")
            .game_state(&game(&["R2", "R5"], 3, 2))
            .build(),
    );

    assert_local_robot!(client, "R2");
    assert_opponents!(client, ["R5"]);
    assert_program!(client, [None, None, None, None, None]);
    assert!(client.interface().dealt_cards().is_empty());
    assert!(client.interface().blocked_cards().is_empty());
}

/// Scenario E: no room left means no change and nothing sent
#[test]
fn input_beyond_capacity_is_rejected_silently() {
    init_logger();
    let (mut client, server) = connected_client();
    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .robot_name("R2")
            .game_state(&game(&["R2"], 1, 1))
            .cards(&hand("c", 9))
            .build(),
    );
    for index in 0..5 {
        client.select_card(index).unwrap();
    }
    assert_eq!(server.received().len(), 5);

    assert_eq!(client.select_card(7), Err(InputRejected::ProgramFull));
    assert_program!(client, [Some(0), Some(1), Some(2), Some(3), Some(4)]);
    assert!(server.received().is_empty());

    // every register blocked
    deliver(
        &mut client,
        &server,
        MessageBuilder::new()
            .cards(&hand("d", 9))
            .blocked_cards(&hand("b", 5))
            .build(),
    );
    let notifications = client.interface().publisher().notifications();
    assert_eq!(client.select_card(0), Err(InputRejected::NoFillableSlots));
    assert_eq!(client.interface().publisher().notifications(), notifications);
    assert!(server.received().is_empty());
}
