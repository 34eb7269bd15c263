//! # Flashcard Generation Tests
//!
//! Drives the generator with a mock AI provider to check prompt construction and the
//! handling of well-formed and malformed model output.

use flashgen::constants::MAX_PROMPT_TEXT_CHARS;
use flashgen::{FlashcardGenerator, GenerationFailure};
use flashgen_test_utils::{setup_tracing, MockAiProvider};
use serde_json::json;

const PROMPT_KEY: &str = "expert educator";

fn generator_with(response: &str) -> (FlashcardGenerator, MockAiProvider) {
    let ai_provider = MockAiProvider::new();
    ai_provider.add_response(PROMPT_KEY, response);
    (
        FlashcardGenerator::new(Box::new(ai_provider.clone())),
        ai_provider,
    )
}

#[tokio::test]
async fn test_generates_cards_from_short_text() {
    setup_tracing();
    let response = json!({
        "flashcards": [
            {"question": "What is the capital of France?", "answer": "Paris"},
            {"question": "Which country has Paris as its capital?", "answer": "France"}
        ]
    })
    .to_string();
    let (generator, ai_provider) = generator_with(&response);

    let cards = generator
        .generate("Paris is the capital of France.", 5)
        .await
        .expect("generation should succeed");

    // The model returned fewer cards than requested; they are kept as-is.
    assert_eq!(cards.len(), 2);
    assert!(cards
        .iter()
        .all(|c| !c.question.is_empty() && !c.answer.is_empty()));
    assert_eq!(cards[0].answer, "Paris");

    let calls = ai_provider.get_calls();
    assert_eq!(calls.len(), 1, "Expected exactly one AI call");
    let (system_prompt, user_prompt) = &calls[0];
    assert!(system_prompt.contains("create 5 educational flashcards"));
    assert_eq!(user_prompt, "Text to analyze:\nParis is the capital of France.");
}

#[tokio::test]
async fn test_more_cards_than_requested_are_not_truncated() {
    setup_tracing();
    let cards: Vec<_> = (0..7)
        .map(|i| json!({"question": format!("Q{i}"), "answer": format!("A{i}")}))
        .collect();
    let response = json!({ "flashcards": cards }).to_string();
    let (generator, _) = generator_with(&response);

    let cards = generator.generate("Some text.", 5).await.unwrap();

    assert_eq!(cards.len(), 7);
}

#[tokio::test]
async fn test_long_text_is_truncated_in_prompt() {
    setup_tracing();
    let (generator, ai_provider) = generator_with(r#"{"flashcards": []}"#);
    let text = format!("{}{}", "x".repeat(MAX_PROMPT_TEXT_CHARS), "BEYOND_THE_LIMIT");

    generator.generate(&text, 10).await.unwrap();

    let (_, user_prompt) = &ai_provider.get_calls()[0];
    assert!(!user_prompt.contains("BEYOND_THE_LIMIT"));
    assert_eq!(
        user_prompt.trim_start_matches("Text to analyze:\n").len(),
        MAX_PROMPT_TEXT_CHARS
    );
}

#[tokio::test]
async fn test_malformed_body_is_a_generation_failure() {
    setup_tracing();
    let (generator, _) = generator_with("Sure! Here are your flashcards: Q: ... A: ...");

    let result = generator.generate("Paris is the capital of France.", 5).await;

    assert!(matches!(result, Err(GenerationFailure::InvalidResponse(_))));
}

#[tokio::test]
async fn test_missing_flashcards_key_is_a_generation_failure() {
    setup_tracing();
    let (generator, _) = generator_with(r#"{"cards": [{"question": "Q", "answer": "A"}]}"#);

    let result = generator.generate("text", 5).await;

    assert!(matches!(result, Err(GenerationFailure::InvalidResponse(_))));
}

#[tokio::test]
async fn test_empty_body_is_a_generation_failure() {
    setup_tracing();
    let (generator, _) = generator_with("");

    let result = generator.generate("text", 5).await;

    assert!(matches!(result, Err(GenerationFailure::EmptyResponse)));
}

#[tokio::test]
async fn test_provider_error_is_a_generation_failure() {
    setup_tracing();
    // No response programmed: the mock answers with an API error.
    let ai_provider = MockAiProvider::new();
    let generator = FlashcardGenerator::new(Box::new(ai_provider.clone()));

    let result = generator.generate("text", 5).await;

    assert!(matches!(result, Err(GenerationFailure::Provider(_))));
    assert_eq!(ai_provider.get_calls().len(), 1, "No retry is expected");
}
