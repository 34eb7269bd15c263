//! # Shared Constants
//!
//! This module provides a centralized location for constants that are shared across
//! the `flashgen` workspace. Using these constants helps to avoid "magic strings" and
//! keeps the library and the CLI consistent.

/// The number of characters of document text embedded in a generation prompt.
///
/// Longer documents are cut to this prefix to stay inside the model's input limits.
pub const MAX_PROMPT_TEXT_CHARS: usize = 4000;

/// The smallest number of cards a caller may request.
pub const MIN_CARD_COUNT: u8 = 5;

/// The largest number of cards a caller may request.
pub const MAX_CARD_COUNT: u8 = 25;

/// The card count used when the caller does not pick one.
pub const DEFAULT_CARD_COUNT: u8 = 10;

/// The Gemini model used for generation unless configuration says otherwise.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// The base URL of the Gemini `generateContent` endpoints.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Documents with more pages than this get periodic progress reports.
pub const PROGRESS_PAGE_THRESHOLD: usize = 5;

/// The number of characters kept for the extracted-text preview.
pub const PREVIEW_CHARS: usize = 500;

/// The default file name for CSV downloads.
pub const DEFAULT_EXPORT_FILE: &str = "flashcards.csv";
