//! # flashgen: PDF to Flashcards
//!
//! This crate turns a PDF document into question/answer study cards. It extracts the
//! document text page by page, asks a configurable AI provider to write flashcards as
//! JSON, and exposes the result as a navigable deck that can be exported to CSV.
//!
//! The [`session::Session`] type ties the stages together and converts every failure
//! into a user-facing [`session::Notice`], so callers only render state.

pub mod constants;
pub mod deck;
pub mod errors;
pub mod export;
pub mod generator;
pub mod ingest;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod types;

pub use deck::{CardDeck, Cursor};
pub use errors::{FlashcardError, GenerationFailure, PromptError};
pub use export::{to_csv, write_csv};
pub use generator::{parse_flashcards, FlashcardGenerator};
pub use ingest::pdf::{extract_text, extract_text_with_progress, ExtractedText};
pub use prompts::{build_prompt, FlashcardPrompt};
pub use providers::factory::{create_provider, ProviderKind, ProviderSettings};
pub use session::{Notice, NoticeLevel, Session};
pub use types::Flashcard;
