//! # Card Deck Navigation
//!
//! A deck is either empty or being browsed. While browsing, the cursor always points
//! at a valid card; every transition is total and returns the new cursor.

use crate::types::Flashcard;
use rand::Rng;

/// The current card and whether its answer is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
    pub answer_visible: bool,
}

impl Cursor {
    fn start() -> Self {
        Self {
            index: 0,
            answer_visible: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Browsing {
    cards: Vec<Flashcard>,
    cursor: Cursor,
}

/// The generated cards of a session plus the navigation cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDeck {
    state: Option<Browsing>,
}

impl CardDeck {
    /// Creates an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a deck already browsing `cards`, or an empty one if there are none.
    pub fn with_cards(cards: Vec<Flashcard>) -> Self {
        let mut deck = Self::new();
        deck.load(cards);
        deck
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none()
    }

    pub fn len(&self) -> usize {
        self.state.as_ref().map_or(0, |b| b.cards.len())
    }

    /// All cards in generation order.
    pub fn cards(&self) -> &[Flashcard] {
        match &self.state {
            Some(browsing) => &browsing.cards,
            None => &[],
        }
    }

    /// The cursor, or `None` when the deck is empty.
    pub fn cursor(&self) -> Option<Cursor> {
        self.state.as_ref().map(|b| b.cursor)
    }

    /// The card under the cursor.
    pub fn current(&self) -> Option<&Flashcard> {
        self.state.as_ref().map(|b| &b.cards[b.cursor.index])
    }

    /// Whether `next` would move the cursor.
    pub fn has_next(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|b| b.cursor.index + 1 < b.cards.len())
    }

    /// Whether `previous` would move the cursor.
    pub fn has_previous(&self) -> bool {
        self.state.as_ref().is_some_and(|b| b.cursor.index > 0)
    }

    /// Replaces the deck. An empty list leaves the deck empty.
    pub fn load(&mut self, cards: Vec<Flashcard>) -> Option<Cursor> {
        self.state = if cards.is_empty() {
            None
        } else {
            Some(Browsing {
                cards,
                cursor: Cursor::start(),
            })
        };
        self.cursor()
    }

    /// Discards the cards and the cursor.
    pub fn clear(&mut self) {
        self.state = None;
    }

    /// Moves to the next card and hides the answer. Stays put on the last card.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Cursor> {
        self.transition(|b| {
            if b.cursor.index + 1 < b.cards.len() {
                b.cursor = Cursor {
                    index: b.cursor.index + 1,
                    answer_visible: false,
                };
            }
        })
    }

    /// Moves to the previous card and hides the answer. Stays put on the first card.
    pub fn previous(&mut self) -> Option<Cursor> {
        self.transition(|b| {
            if b.cursor.index > 0 {
                b.cursor = Cursor {
                    index: b.cursor.index - 1,
                    answer_visible: false,
                };
            }
        })
    }

    /// Shows or hides the answer of the current card.
    pub fn toggle_answer(&mut self) -> Option<Cursor> {
        self.transition(|b| b.cursor.answer_visible = !b.cursor.answer_visible)
    }

    /// Jumps to a uniformly chosen card and hides the answer.
    pub fn random_jump(&mut self) -> Option<Cursor> {
        self.random_jump_with(&mut rand::rng())
    }

    /// Same as [`CardDeck::random_jump`] with a caller-supplied random source.
    pub fn random_jump_with<R: Rng>(&mut self, rng: &mut R) -> Option<Cursor> {
        self.transition(|b| {
            b.cursor = Cursor {
                index: rng.random_range(0..b.cards.len()),
                answer_visible: false,
            };
        })
    }

    fn transition<F>(&mut self, apply: F) -> Option<Cursor>
    where
        F: FnOnce(&mut Browsing),
    {
        let browsing = self.state.as_mut()?;
        apply(browsing);
        Some(browsing.cursor)
    }
}
