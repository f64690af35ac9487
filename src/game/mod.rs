// Game engine modules

pub mod deck;
pub mod session;

pub use deck::{Deck, DeckGenerator, DECK_SIZE};
pub use session::GameSession;
