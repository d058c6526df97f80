pub mod deck;

pub use deck::{generate, simulated_cards, CardView, Flashcard, FlashcardDeck};
