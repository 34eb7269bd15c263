//! # Study Session
//!
//! A [`Session`] owns the deck of one user and runs the pipeline stages on its behalf.
//! Every failure is recovered here: it becomes a [`Notice`] for the caller to show and
//! the stage returns an empty result. Nothing past this boundary sees an error.

use crate::{
    deck::CardDeck,
    errors::FlashcardError,
    export::to_csv,
    generator::FlashcardGenerator,
    ingest::pdf::{extract_text_with_progress, preview, PageProgress},
    providers::factory::{create_provider, ProviderSettings},
};
use tracing::{error, info, warn};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the user, produced while running a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// The state of one study session.
#[derive(Debug, Default)]
pub struct Session {
    deck: CardDeck,
    preview: Option<String>,
    notices: Vec<Notice>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deck(&self) -> &CardDeck {
        &self.deck
    }

    /// Mutable access for navigation.
    pub fn deck_mut(&mut self) -> &mut CardDeck {
        &mut self.deck
    }

    /// The preview of the last successfully extracted text.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Drains the notices collected so far.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Extracts the text of a PDF, or `None` if there is none to work with.
    pub fn extract(&mut self, pdf_data: &[u8]) -> Option<String> {
        self.extract_with_progress(pdf_data, |_| {})
    }

    /// Same as [`Session::extract`], forwarding per-page progress to `on_page`.
    pub fn extract_with_progress<F>(&mut self, pdf_data: &[u8], on_page: F) -> Option<String>
    where
        F: FnMut(PageProgress),
    {
        let result = extract_text_with_progress(pdf_data, on_page);
        if let Ok(extracted) = &result {
            self.notices.push(Notice::new(
                NoticeLevel::Info,
                format!("Processing {} pages...", extracted.page_count()),
            ));
        }

        match result {
            Ok(extracted) if extracted.no_text_found() => {
                self.report(FlashcardError::NoTextFound);
                None
            }
            Ok(extracted) => {
                self.notices.push(Notice::new(
                    NoticeLevel::Success,
                    format!(
                        "Text extracted successfully! Extracted {} characters of text.",
                        extracted.char_count()
                    ),
                ));
                let text = extracted.into_text();
                self.preview = Some(preview(&text));
                Some(text)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Generates a new deck with a provider built from `settings`.
    ///
    /// The credential is checked before anything is sent.
    pub async fn generate_with_settings(
        &mut self,
        settings: &ProviderSettings,
        text: &str,
        card_count: usize,
    ) -> usize {
        match create_provider(settings) {
            Ok(provider) => {
                let generator = FlashcardGenerator::new(provider);
                self.generate(&generator, text, card_count).await
            }
            Err(err) => {
                self.report(err);
                0
            }
        }
    }

    /// Generates a new deck and returns the number of cards loaded.
    ///
    /// On failure, or when the model returns no cards, the current deck is kept.
    pub async fn generate(
        &mut self,
        generator: &FlashcardGenerator,
        text: &str,
        card_count: usize,
    ) -> usize {
        match generator.generate(text, card_count).await {
            Ok(cards) if cards.is_empty() => {
                warn!("The model returned no flashcards.");
                self.notices.push(Notice::new(
                    NoticeLevel::Error,
                    "No flashcards generated. Please try again.",
                ));
                0
            }
            Ok(cards) => {
                let count = cards.len();
                self.deck.load(cards);
                self.notices.push(Notice::new(
                    NoticeLevel::Success,
                    format!("Successfully generated {count} flashcards!"),
                ));
                count
            }
            Err(failure) => {
                self.report(FlashcardError::GenerationFailed(failure));
                0
            }
        }
    }

    /// Clears the deck and its cursor.
    pub fn clear(&mut self) {
        info!("Clearing {} flashcards.", self.deck.len());
        self.deck.clear();
    }

    /// Exports the deck as CSV bytes, or `None` when there is nothing to export.
    pub fn export_csv(&mut self) -> Option<Vec<u8>> {
        match to_csv(&self.deck) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    fn report(&mut self, err: FlashcardError) {
        let level = if err.is_warning() {
            warn!("{err}");
            NoticeLevel::Warning
        } else {
            error!("{err}");
            NoticeLevel::Error
        };
        self.notices.push(Notice::new(level, err.to_string()));
        if let Some(guidance) = err.guidance() {
            self.notices.push(Notice::new(NoticeLevel::Info, guidance));
        }
    }
}
