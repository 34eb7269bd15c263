//! # Prompt Templates
//!
//! This module holds the flashcard prompt templates and the builder that fills them.
//! Document text is cut to [`MAX_PROMPT_TEXT_CHARS`] characters before it is embedded.

pub mod flashcards;

use crate::constants::MAX_PROMPT_TEXT_CHARS;
use flashcards::{FLASHCARD_SYSTEM_PROMPT, FLASHCARD_USER_PROMPT};

/// The two halves of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardPrompt {
    pub system_instruction: String,
    pub user_content: String,
}

/// Builds the prompt asking for `card_count` flashcards about `text`.
///
/// `card_count` is expected to lie in `MIN_CARD_COUNT..=MAX_CARD_COUNT`; callers enforce
/// the range, it is not checked here.
pub fn build_prompt(text: &str, card_count: usize) -> FlashcardPrompt {
    let system_instruction =
        FLASHCARD_SYSTEM_PROMPT.replace("{card_count}", &card_count.to_string());
    let user_content =
        FLASHCARD_USER_PROMPT.replace("{text}", truncate_chars(text, MAX_PROMPT_TEXT_CHARS));

    FlashcardPrompt {
        system_instruction,
        user_content,
    }
}

/// Returns the first `max_chars` characters of `text`.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
