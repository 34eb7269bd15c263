//! # Flashcard Prompts
//!
//! Placeholders: `{card_count}` in the system prompt, `{text}` in the user prompt.

/// Sets the educator persona and fixes the JSON response contract.
pub const FLASHCARD_SYSTEM_PROMPT: &str = r#"You are an expert educator who creates high-quality study flashcards.
Based on the following text, create {card_count} educational flashcards for studying.
Each flashcard should have a clear question and a comprehensive answer.
Focus on key concepts, important facts, definitions, and relationships.

Return the response as a JSON object with this exact format:
{"flashcards": [{"question": "Question text here", "answer": "Answer text here"}]}"#;

pub const FLASHCARD_USER_PROMPT: &str = "Text to analyze:\n{text}";
