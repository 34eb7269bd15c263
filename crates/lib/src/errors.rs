use thiserror::Error;

/// Errors raised while talking to an AI provider.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
}

/// Why a single generation attempt produced no cards.
#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error(transparent)]
    Provider(#[from] PromptError),
    #[error("No content received from the AI provider")]
    EmptyResponse,
    #[error("AI response is not a valid flashcard document: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// The error kinds a user can run into while turning a PDF into flashcards.
#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Error extracting text from PDF: {0}")]
    PdfUnreadable(String),
    #[error("PDF processed but no text found. This might be an image-based PDF.")]
    NoTextFound,
    #[error("{0}")]
    CredentialMissing(String),
    #[error("Error generating flashcards: {0}")]
    GenerationFailed(#[from] GenerationFailure),
    #[error("Failed to write CSV export: {0}")]
    Export(#[from] csv::Error),
}

impl FlashcardError {
    /// Returns `true` for conditions that are advisory rather than failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, FlashcardError::NoTextFound)
    }

    /// Remediation text to show next to the error, if there is any.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            FlashcardError::PdfUnreadable(_) => {
                Some("Please try a different PDF file or check if the file is corrupted.")
            }
            FlashcardError::NoTextFound => Some(
                "The file might be image-based, scanned, or empty. Text recognition is not supported.",
            ),
            FlashcardError::CredentialMissing(_) => Some(
                "Set GEMINI_API_KEY in your environment or add `api_key` to your flashgen.yml.",
            ),
            FlashcardError::GenerationFailed(_) => {
                Some("Failed to generate flashcards. Please try again.")
            }
            FlashcardError::Export(_) => None,
        }
    }
}
