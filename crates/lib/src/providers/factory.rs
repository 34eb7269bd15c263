//! # AI Provider Factory
//!
//! This module centralizes the creation of AI provider instances from settings. It is
//! also where credentials are resolved, so a missing key is reported before any
//! network call is attempted.

use crate::{
    constants::{DEFAULT_GEMINI_MODEL, GEMINI_API_BASE_URL, GEMINI_API_KEY_ENV},
    errors::{FlashcardError, PromptError},
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
};
use serde::Deserialize;
use std::fmt;
use tracing::info;

/// The kind of AI backend to talk to.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint.
    Local,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Local => write!(f, "local"),
        }
    }
}

/// Everything needed to build a provider.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_model")]
    pub model: String,
    /// Overrides the endpoint derived from `model`. Required for local providers.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Fallback credential, used when the environment does not provide one.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            api_url: None,
            api_key: None,
        }
    }
}

/// Resolves the Gemini API key.
///
/// The `GEMINI_API_KEY` environment variable wins; the configured key is the fallback.
/// Empty values count as missing.
pub fn resolve_gemini_api_key(settings: &ProviderSettings) -> Option<String> {
    std::env::var(GEMINI_API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
        })
}

/// Creates an AI provider from settings.
pub fn create_provider(
    settings: &ProviderSettings,
) -> Result<Box<dyn AiProvider>, FlashcardError> {
    let provider: Box<dyn AiProvider> = match settings.provider {
        ProviderKind::Gemini => {
            let api_key = resolve_gemini_api_key(settings).ok_or_else(|| {
                FlashcardError::CredentialMissing(
                    "Gemini API key not found. Please ensure GEMINI_API_KEY is set in your environment variables."
                        .to_string(),
                )
            })?;
            let api_url = settings.api_url.clone().unwrap_or_else(|| {
                format!(
                    "{GEMINI_API_BASE_URL}/{model}:generateContent",
                    model = settings.model
                )
            });
            info!("Configuring Gemini provider with URL: {}", api_url);
            Box::new(GeminiProvider::new(api_url, api_key).map_err(generation_setup)?)
        }
        ProviderKind::Local => {
            let api_url = settings.api_url.clone().ok_or_else(|| {
                generation_setup(PromptError::MissingAiProvider(
                    "api_url must be set to use a local provider.".to_string(),
                ))
            })?;
            info!("Configuring Local AI provider with URL: {}", api_url);
            // The Gemini default means no model was chosen; let the server pick its own.
            let model = Some(settings.model.clone()).filter(|m| m != DEFAULT_GEMINI_MODEL);
            Box::new(
                LocalAiProvider::new(api_url, settings.api_key.clone(), model)
                    .map_err(generation_setup)?,
            )
        }
    };

    Ok(provider)
}

fn generation_setup(err: PromptError) -> FlashcardError {
    FlashcardError::GenerationFailed(err.into())
}
