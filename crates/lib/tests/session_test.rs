//! # Session Workflow Tests
//!
//! Runs the whole pipeline through a `Session`: PDF in, deck browsing, CSV out, and the
//! notices produced when a stage fails.

use anyhow::Result;
use flashgen::{Flashcard, FlashcardGenerator, NoticeLevel, ProviderSettings, Session};
use flashgen_test_utils::helpers::{generate_test_pdf, generate_test_pdf_with, TestPage};
use flashgen_test_utils::{setup_tracing, MockAiProvider};
use serde_json::json;
use std::env;

fn mock_generator(response: &str) -> FlashcardGenerator {
    let ai_provider = MockAiProvider::new();
    ai_provider.add_response("expert educator", response);
    FlashcardGenerator::new(Box::new(ai_provider))
}

fn five_cards() -> String {
    let cards: Vec<_> = (1..=5)
        .map(|i| json!({"question": format!("Question {i}?"), "answer": format!("Answer {i}.")}))
        .collect();
    json!({ "flashcards": cards }).to_string()
}

#[tokio::test]
async fn test_pdf_to_deck_to_csv_workflow() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let mut session = Session::new();
    let pdf = generate_test_pdf(&["Paris is the capital of France."]);
    let generator = mock_generator(&five_cards());

    // --- 2. Act ---
    let text = session.extract(&pdf).expect("text should be extracted");
    let loaded = session.generate(&generator, &text, 5).await;

    // --- 3. Assert ---
    assert_eq!(text, "Paris is the capital of France.");
    assert_eq!(session.preview(), Some("Paris is the capital of France."));
    assert_eq!(loaded, 5);
    assert_eq!(session.deck().len(), 5);
    let cursor = session.deck().cursor().unwrap();
    assert_eq!((cursor.index, cursor.answer_visible), (0, false));

    let notices = session.take_notices();
    assert!(notices
        .iter()
        .any(|n| n.level == NoticeLevel::Success && n.message.contains("generated 5 flashcards")));
    assert!(notices.iter().all(|n| n.level != NoticeLevel::Error));

    // Browsing does not affect export order.
    session.deck_mut().next();
    session.deck_mut().toggle_answer();
    let csv_bytes = session.export_csv().expect("non-empty deck exports");
    let mut reader = csv::Reader::from_reader(csv_bytes.as_slice());
    let headers: Vec<&str> = reader.headers()?.iter().collect();
    assert_eq!(headers, vec!["question", "answer"]);
    let rows: Vec<Flashcard> = reader.deserialize().collect::<Result<_, _>>()?;
    assert_eq!(rows, session.deck().cards());

    // --- 4. Clear ---
    session.clear();
    assert!(session.deck().is_empty());
    assert!(session.deck().cursor().is_none());
    assert!(session.export_csv().is_none());
    Ok(())
}

#[tokio::test]
async fn test_malformed_response_keeps_previous_deck() {
    setup_tracing();
    let mut session = Session::new();
    session.generate(&mock_generator(&five_cards()), "text", 5).await;
    session.take_notices();

    let loaded = session
        .generate(&mock_generator("{not valid json"), "text", 5)
        .await;

    assert_eq!(loaded, 0);
    assert_eq!(session.deck().len(), 5);
    let notices = session.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.starts_with("Error generating flashcards"));
}

#[tokio::test]
async fn test_empty_card_list_is_reported() {
    setup_tracing();
    let mut session = Session::new();

    let loaded = session
        .generate(&mock_generator(r#"{"flashcards": []}"#), "text", 5)
        .await;

    assert_eq!(loaded, 0);
    assert!(session.deck().is_empty());
    assert!(session
        .take_notices()
        .iter()
        .any(|n| n.level == NoticeLevel::Error));
}

#[test]
fn test_image_only_pdf_produces_a_warning() {
    setup_tracing();
    let mut session = Session::new();
    let pdf = generate_test_pdf_with(&[TestPage::Graphic]);

    assert!(session.extract(&pdf).is_none());

    let notices = session.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(notices[0].message, "Processing 1 pages...");
    assert_eq!(notices[1].level, NoticeLevel::Warning);
    assert!(notices[1].message.contains("image-based"));
    assert!(notices.iter().all(|n| n.level != NoticeLevel::Error));
    assert!(session.preview().is_none());
}

#[test]
fn test_page_count_is_announced_for_an_empty_document() {
    setup_tracing();
    let mut session = Session::new();
    let pdf = generate_test_pdf_with(&[]);

    assert!(session.extract(&pdf).is_none());

    let notices = session.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(notices[0].message, "Processing 0 pages...");
    assert_eq!(notices[1].level, NoticeLevel::Warning);
}

#[test]
fn test_corrupt_pdf_produces_an_error() {
    setup_tracing();
    let mut session = Session::new();

    assert!(session.extract(b"definitely not a pdf").is_none());

    let notices = session.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.starts_with("Error extracting text from PDF"));
    assert!(notices[1].message.contains("different PDF file"));
}

#[tokio::test]
async fn test_missing_credential_leaves_session_untouched() {
    setup_tracing();
    let mut session = Session::new();
    let settings = ProviderSettings {
        api_key: None,
        ..Default::default()
    };
    env::remove_var("GEMINI_API_KEY");

    let loaded = session
        .generate_with_settings(&settings, "Paris is the capital of France.", 5)
        .await;

    assert_eq!(loaded, 0);
    assert!(session.deck().is_empty());
    let notices = session.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.contains("Gemini API key not found"));
}
