/// Number of slots in a robot's program (one card per register)
pub const PROGRAM_SIZE: usize = 5;

/// Upper bound of cards the server deals to one robot in a round
pub const MAX_DEALT_CARDS: usize = 9;
