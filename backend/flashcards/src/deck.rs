use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use studyforge_core::StudyError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// What the card widget shows right now.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardView {
    pub question: String,
    pub answer: String,
    pub counter: String,
    pub is_flipped: bool,
}

/// An ordered deck with a cursor and flip state.
///
/// Invariant: `cursor < cards.len()` whenever the deck is non-empty.
/// Every operation is a no-op on an empty deck.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    cursor: usize,
    is_flipped: bool,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            cursor: 0,
            is_flipped: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.cursor)
    }

    /// `"position / total"`, 1-based. Empty string for an empty deck.
    pub fn counter(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("{} / {}", self.cursor + 1, self.cards.len())
    }

    pub fn view(&self) -> Option<CardView> {
        self.current().map(|card| CardView {
            question: card.question.clone(),
            answer: card.answer.clone(),
            counter: self.counter(),
            is_flipped: self.is_flipped,
        })
    }

    pub fn flip(&mut self) {
        if self.is_empty() {
            return;
        }
        self.is_flipped = !self.is_flipped;
    }

    /// Show the question side again without moving.
    pub fn unflip(&mut self) {
        self.is_flipped = false;
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.cards.len();
        self.is_flipped = false;
        debug!(cursor = self.cursor, "Next card");
    }

    pub fn previous(&mut self) {
        if self.is_empty() {
            return;
        }
        let len = self.cards.len();
        self.cursor = (self.cursor + len - 1) % len;
        self.is_flipped = false;
        debug!(cursor = self.cursor, "Previous card");
    }
}

/// The fixed five-card study set. Content does not depend on the document.
pub fn simulated_cards() -> Vec<Flashcard> {
    vec![
        Flashcard::new(
            "What is the main topic discussed in the document?",
            "The document covers key concepts and principles related to the subject matter, providing foundational knowledge for understanding the topic.",
        ),
        Flashcard::new(
            "What are the primary components mentioned?",
            "The document outlines several important components that work together to form the complete system or concept being discussed.",
        ),
        Flashcard::new(
            "How do these concepts apply in practice?",
            "These concepts have practical applications in real-world scenarios and can be used to solve various problems effectively.",
        ),
        Flashcard::new(
            "What are the key benefits discussed?",
            "The main benefits include improved efficiency, better understanding, and enhanced problem-solving capabilities in the field.",
        ),
        Flashcard::new(
            "What should you remember most?",
            "The most important takeaway is understanding the fundamental principles and how they interconnect to form a cohesive framework.",
        ),
    ]
}

/// Build a fresh deck for the extracted text, cursor at 0 and unflipped.
pub fn generate(text: &str) -> Result<FlashcardDeck, StudyError> {
    if text.is_empty() {
        return Err(StudyError::EmptyDocument);
    }
    let deck = FlashcardDeck::new(simulated_cards());
    info!(cards = deck.len(), "Flashcard deck generated");
    Ok(deck)
}
