mod client;
mod decode;
mod prompts;
mod schema;

pub use client::GeminiClient;
pub use decode::{itinerary_from_json, service_catalog_from_json};
pub use prompts::{itinerary_prompt, modify_prompt, services_prompt};

use crate::domain::{Itinerary, ServiceCatalog, UserPreferences};
use crate::i18n::Language;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("provider response carried no content text")]
    EmptyResponse,
    #[error("provider response shape invalid: {0}")]
    Shape(String),
}

/// The generative content collaborator. Production talks to the Gemini
/// REST API; tests script this trait.
pub trait ContentProvider: Send + Sync {
    fn generate_itinerary(
        &self,
        preferences: &UserPreferences,
        language: Language,
    ) -> Result<Itinerary, ProviderError>;

    /// Full-replacement contract: the result supersedes `current` wholesale.
    fn modify_itinerary(
        &self,
        current: &Itinerary,
        instruction: &str,
        language: Language,
    ) -> Result<Itinerary, ProviderError>;

    fn search_services(
        &self,
        destination: &str,
        duration_days: u32,
        language: Language,
    ) -> Result<ServiceCatalog, ProviderError>;
}
