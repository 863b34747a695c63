use std::time::Instant;

use log::debug;

use roborally_shared::{Card, ClientMessage, GameState, InterfaceData, Robot, PROGRAM_SIZE};

use crate::{input::InputCommand, publisher::ChangePublisher, InputRejected};

/// The local player's view of the current round
///
/// Two kinds of mutation reach this type. Server-driven updates (dealing,
/// blocking, timers, resets) are crate-private and only the synchronizer
/// calls them; they never publish. Local input goes through the public
/// mutators, which validate first and publish the new state on success.
#[derive(Debug)]
pub struct InterfaceState {
    robot_name: Option<String>,
    /// Dealt-card indices for the slots the player may still fill. Blocked
    /// registers are not part of this list.
    program: Vec<Option<usize>>,
    cursor_index: usize,
    dealt_cards: Vec<Card>,
    blocked_cards: Vec<Card>,
    power_down: bool,
    selection_confirmed: bool,
    timer: Option<Instant>,
    winner_shown_at: Option<Instant>,
    publisher: ChangePublisher,
}

impl Default for InterfaceState {
    fn default() -> Self {
        Self::new(ChangePublisher::new())
    }
}

/// Compares everything except the publisher binding
impl PartialEq for InterfaceState {
    fn eq(&self, other: &Self) -> bool {
        self.robot_name == other.robot_name
            && self.program == other.program
            && self.cursor_index == other.cursor_index
            && self.dealt_cards == other.dealt_cards
            && self.blocked_cards == other.blocked_cards
            && self.power_down == other.power_down
            && self.selection_confirmed == other.selection_confirmed
            && self.timer == other.timer
            && self.winner_shown_at == other.winner_shown_at
    }
}

impl InterfaceState {
    pub fn new(publisher: ChangePublisher) -> Self {
        Self {
            robot_name: None,
            program: vec![None; PROGRAM_SIZE],
            cursor_index: 0,
            dealt_cards: Vec::new(),
            blocked_cards: Vec::new(),
            power_down: false,
            selection_confirmed: false,
            timer: None,
            winner_shown_at: None,
            publisher,
        }
    }

    // Read access

    pub fn robot_name(&self) -> Option<&str> {
        self.robot_name.as_deref()
    }

    /// The bound local robot, looked up in the authoritative roster
    pub fn local_robot<'a>(&self, game_state: &'a GameState) -> Option<&'a Robot> {
        self.robot_name
            .as_deref()
            .and_then(|name| game_state.robot(name))
    }

    pub fn program(&self) -> &[Option<usize>] {
        &self.program
    }

    /// Cards currently placed in the program, in slot order
    pub fn program_cards(&self) -> impl Iterator<Item = Option<&Card>> {
        self.program
            .iter()
            .map(|slot| slot.and_then(|index| self.dealt_cards.get(index)))
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    pub fn dealt_cards(&self) -> &[Card] {
        &self.dealt_cards
    }

    pub fn blocked_cards(&self) -> &[Card] {
        &self.blocked_cards
    }

    /// Program slots the player may fill this round
    pub fn fillable_slots(&self) -> usize {
        PROGRAM_SIZE.saturating_sub(self.blocked_cards.len())
    }

    pub fn is_program_complete(&self) -> bool {
        self.program.iter().all(Option::is_some)
    }

    pub fn power_down(&self) -> bool {
        self.power_down
    }

    pub fn selection_confirmed(&self) -> bool {
        self.selection_confirmed
    }

    /// When the server started the selection countdown
    pub fn timer(&self) -> Option<Instant> {
        self.timer
    }

    /// When the winner announcement arrived
    pub fn winner_shown_at(&self) -> Option<Instant> {
        self.winner_shown_at
    }

    pub fn publisher(&self) -> &ChangePublisher {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut ChangePublisher {
        &mut self.publisher
    }

    /// Snapshot sent to the server after each local change
    pub fn to_message(&self) -> ClientMessage {
        ClientMessage::new(InterfaceData {
            program: self.program.clone(),
            power_down: self.power_down,
            confirmed: self.selection_confirmed,
            game_round: self.publisher.game_round(),
        })
    }

    // Local input

    pub fn apply_input(&mut self, command: InputCommand) -> Result<(), InputRejected> {
        match command {
            InputCommand::SelectCard(index) => self.select_card(index),
            InputCommand::ReturnCard => self.return_card(),
            InputCommand::ReturnCards => self.return_cards(),
            InputCommand::CursorNext => self.cursor_next(),
            InputCommand::CursorPrev => self.cursor_prev(),
            InputCommand::SetCursor(slot) => self.set_cursor(slot),
            InputCommand::SwitchPowerDown => self.switch_power_down(),
            InputCommand::ConfirmSelection => self.confirm_selection(),
        }
    }

    /// Put a dealt card into the slot under the cursor, replacing whatever it
    /// held, then move the cursor right
    pub fn select_card(&mut self, dealt_index: usize) -> Result<(), InputRejected> {
        self.check_editable()?;
        if self.program.is_empty() {
            return Err(InputRejected::NoFillableSlots);
        }
        if self.is_program_complete() {
            return Err(InputRejected::ProgramFull);
        }
        if dealt_index >= self.dealt_cards.len() {
            return Err(InputRejected::UnknownCard {
                index: dealt_index,
                dealt: self.dealt_cards.len(),
            });
        }
        if self.program.contains(&Some(dealt_index)) {
            return Err(InputRejected::CardAlreadyPlaced { index: dealt_index });
        }
        let slot = self.cursor_index;
        if let Some(replaced) = self.program[slot] {
            debug!("Card {} in slot {} replaced by card {}", replaced, slot, dealt_index);
        }

        self.program[slot] = Some(dealt_index);
        if slot + 1 < self.program.len() {
            self.cursor_index += 1;
        }
        self.publish();
        Ok(())
    }

    /// Take the card under the cursor back to the dealt cards
    pub fn return_card(&mut self) -> Result<(), InputRejected> {
        self.check_editable()?;
        let slot = self.cursor_index;
        if !matches!(self.program.get(slot), Some(Some(_))) {
            return Err(InputRejected::SlotEmpty { slot });
        }
        self.program[slot] = None;
        self.publish();
        Ok(())
    }

    /// Empty the whole program
    pub fn return_cards(&mut self) -> Result<(), InputRejected> {
        self.check_editable()?;
        self.clear_program();
        self.publish();
        Ok(())
    }

    pub fn cursor_next(&mut self) -> Result<(), InputRejected> {
        self.check_editable()?;
        if self.cursor_index + 1 >= self.program.len() {
            return Err(InputRejected::CursorAtEdge);
        }
        self.cursor_index += 1;
        self.publish();
        Ok(())
    }

    pub fn cursor_prev(&mut self) -> Result<(), InputRejected> {
        self.check_editable()?;
        if self.cursor_index == 0 {
            return Err(InputRejected::CursorAtEdge);
        }
        self.cursor_index -= 1;
        self.publish();
        Ok(())
    }

    pub fn set_cursor(&mut self, slot: usize) -> Result<(), InputRejected> {
        self.check_editable()?;
        if slot >= self.program.len() {
            return Err(InputRejected::CursorOutOfRange {
                slot,
                len: self.program.len(),
            });
        }
        self.cursor_index = slot;
        self.publish();
        Ok(())
    }

    /// Toggle sitting the next round out
    pub fn switch_power_down(&mut self) -> Result<(), InputRejected> {
        self.check_editable()?;
        self.power_down = !self.power_down;
        self.publish();
        Ok(())
    }

    /// Lock the program in. Only possible once every fillable slot is filled.
    pub fn confirm_selection(&mut self) -> Result<(), InputRejected> {
        self.check_editable()?;
        if !self.is_program_complete() {
            return Err(InputRejected::ProgramIncomplete);
        }
        self.selection_confirmed = true;
        self.publish();
        Ok(())
    }

    fn check_editable(&self) -> Result<(), InputRejected> {
        if self.selection_confirmed {
            return Err(InputRejected::SelectionConfirmed);
        }
        Ok(())
    }

    fn publish(&mut self) {
        let message = self.to_message();
        self.publisher.notify(&message);
    }

    fn clear_program(&mut self) {
        self.program.iter_mut().for_each(|slot| *slot = None);
        self.cursor_index = 0;
    }

    // Server-driven updates

    pub(crate) fn bind_robot(&mut self, name: String) {
        self.robot_name = Some(name);
    }

    /// A new hand: everything placed from the previous hand goes back
    pub(crate) fn receive_dealt_cards(&mut self, cards: Vec<Card>) {
        self.dealt_cards = cards;
        self.timer = None;
        self.selection_confirmed = false;
        self.clear_program();
    }

    /// The first `cards.len()` registers become server-controlled
    ///
    /// The program always covers the registers after the blocked ones. Slots
    /// that stay unblocked keep their cards; registers that were blocked
    /// before and are free now come back empty.
    pub(crate) fn receive_blocked_cards(&mut self, cards: Vec<Card>) {
        let previously_blocked = PROGRAM_SIZE - self.program.len();
        let now_blocked = cards.len().min(PROGRAM_SIZE);

        let program = (now_blocked..PROGRAM_SIZE)
            .map(|register| {
                register
                    .checked_sub(previously_blocked)
                    .and_then(|slot| self.program.get(slot).copied().flatten())
            })
            .collect::<Vec<_>>();

        debug!(
            "{} blocked registers, {} fillable program slots",
            now_blocked,
            program.len()
        );
        self.program = program;
        self.blocked_cards = cards;
        self.cursor_index = self.cursor_index.min(self.program.len().saturating_sub(1));
    }

    pub(crate) fn start_timer(&mut self, now: Instant) {
        self.timer = Some(now);
    }

    pub(crate) fn show_winner(&mut self, now: Instant) {
        self.winner_shown_at = Some(now);
    }

    /// Back to a fresh round: every round-scoped field returns to its initial
    /// value. The publisher (and with it the connection) stays.
    pub(crate) fn reset(&mut self) {
        let publisher = std::mem::take(&mut self.publisher);
        *self = Self::new(publisher);
    }
}
