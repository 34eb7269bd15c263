use serde::{Deserialize, Serialize};

/// A single study card.
///
/// Field order matters: it is the column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The JSON envelope the model is instructed to return.
#[derive(Debug, Deserialize, Serialize)]
pub struct FlashcardResponse {
    pub flashcards: Vec<Flashcard>,
}
