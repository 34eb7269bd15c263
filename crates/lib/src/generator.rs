//! # Flashcard Generation
//!
//! Sends the flashcard prompt to an [`AiProvider`] and validates the JSON it returns.
//! One attempt per call; a failure is reported, never retried.

use crate::{
    errors::GenerationFailure,
    prompts::build_prompt,
    providers::ai::AiProvider,
    types::{Flashcard, FlashcardResponse},
};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, instrument, warn};

/// Generates flashcards through a configured AI provider.
#[derive(Debug, Clone)]
pub struct FlashcardGenerator {
    ai_provider: Box<dyn AiProvider>,
}

impl FlashcardGenerator {
    pub fn new(ai_provider: Box<dyn AiProvider>) -> Self {
        Self { ai_provider }
    }

    /// Asks the provider for `card_count` flashcards about `text`.
    ///
    /// The cards are returned exactly as the model produced them: a different count
    /// than requested is accepted as-is.
    #[instrument(skip(self, text), fields(text_chars = text.len()))]
    pub async fn generate(
        &self,
        text: &str,
        card_count: usize,
    ) -> Result<Vec<Flashcard>, GenerationFailure> {
        let prompt = build_prompt(text, card_count);
        debug!(system_prompt = %prompt.system_instruction, user_prompt = %prompt.user_content, "--> Sending prompts to AI Provider");

        let raw_response = self
            .ai_provider
            .generate(&prompt.system_instruction, &prompt.user_content)
            .await?;
        debug!("<-- Flashcards from AI: {}", raw_response);

        let flashcards = parse_flashcards(&raw_response)?;
        if flashcards.len() != card_count {
            warn!(
                "Requested {} flashcards but the model returned {}.",
                card_count,
                flashcards.len()
            );
        }
        info!("Generated {} flashcards.", flashcards.len());
        Ok(flashcards)
    }
}

/// Parses a model response of the form `{"flashcards": [{"question", "answer"}, ...]}`.
///
/// An optional Markdown code fence around the JSON is ignored. An empty body, invalid
/// JSON, a missing `flashcards` key, or an entry without both fields is a failure.
pub fn parse_flashcards(raw_response: &str) -> Result<Vec<Flashcard>, GenerationFailure> {
    let trimmed = raw_response.trim();
    if trimmed.is_empty() {
        return Err(GenerationFailure::EmptyResponse);
    }

    let cleaned = code_fence()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(trimmed);
    if cleaned.is_empty() {
        return Err(GenerationFailure::EmptyResponse);
    }

    let response: FlashcardResponse = serde_json::from_str(cleaned)?;
    Ok(response.flashcards)
}

fn code_fence() -> &'static Regex {
    static CODE_FENCE: OnceLock<Regex> = OnceLock::new();
    CODE_FENCE.get_or_init(|| {
        Regex::new(r"^```(?:json)?\s*([\s\S]*?)\s*```$").expect("code fence regex is valid")
    })
}
