use roborally_shared::MAX_DEALT_CARDS;

/// Keys that pick dealt cards, in dealt order
pub const CARD_KEYS: [char; MAX_DEALT_CARDS] = ['q', 'w', 'e', 'r', 't', 'a', 's', 'd', 'f'];

/// A local player action, independent of how it was entered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    SelectCard(usize),
    ReturnCard,
    ReturnCards,
    CursorNext,
    CursorPrev,
    SetCursor(usize),
    SwitchPowerDown,
    ConfirmSelection,
}

impl InputCommand {
    /// Keyboard layout of the game console
    pub fn from_key(key: char) -> Option<Self> {
        if let Some(index) = CARD_KEYS.iter().position(|card_key| *card_key == key) {
            return Some(InputCommand::SelectCard(index));
        }
        match key {
            'i' => Some(InputCommand::ReturnCard),
            'o' => Some(InputCommand::ReturnCards),
            'm' => Some(InputCommand::CursorNext),
            'n' => Some(InputCommand::CursorPrev),
            'p' => Some(InputCommand::SwitchPowerDown),
            'k' => Some(InputCommand::ConfirmSelection),
            _ => None,
        }
    }
}
