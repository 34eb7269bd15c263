//! # CSV Export
//!
//! Writes a deck as CSV with a `question,answer` header, one row per card in deck order.

use crate::{deck::CardDeck, errors::FlashcardError, types::Flashcard};
use std::io::Write;
use tracing::info;

/// Serializes the deck to CSV bytes, or `None` when the deck is empty.
///
/// The cursor position has no effect on row order.
pub fn to_csv(deck: &CardDeck) -> Result<Option<Vec<u8>>, FlashcardError> {
    if deck.is_empty() {
        return Ok(None);
    }
    let mut buffer = Vec::new();
    write_csv(deck.cards(), &mut buffer)?;
    info!("Exported {} flashcards as CSV.", deck.len());
    Ok(Some(buffer))
}

/// Writes `cards` as CSV to `writer`, header first.
///
/// Fields containing a comma, a quote, or a line break are quoted and embedded quotes
/// are doubled.
pub fn write_csv<W: Write>(cards: &[Flashcard], writer: W) -> Result<(), FlashcardError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(["question", "answer"])?;
    for card in cards {
        csv_writer.write_record([card.question.as_str(), card.answer.as_str()])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
