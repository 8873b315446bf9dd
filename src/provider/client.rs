use super::schema::{itinerary_schema, services_schema};
use super::{
    itinerary_from_json, itinerary_prompt, modify_prompt, service_catalog_from_json,
    services_prompt, ContentProvider, ProviderError,
};
use crate::config::Settings;
use crate::domain::{Itinerary, ServiceCatalog, UserPreferences};
use crate::i18n::Language;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_base: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(settings: &Settings, api_key: String) -> Self {
        Self {
            api_base: settings.provider.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: settings.provider.model.clone(),
            timeout: Duration::from_secs(settings.provider.timeout_seconds),
        }
    }

    pub fn from_env(settings: &Settings) -> Result<Self, ProviderError> {
        let api_key = crate::config::provider_api_key().ok_or(ProviderError::MissingApiKey)?;
        Ok(Self::new(settings, api_key))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base,
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }

    /// One structured-output call: prompt in, raw JSON text out.
    fn generate_content(&self, prompt: &str, response_schema: Value) -> Result<String, ProviderError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
            },
        });

        let response = ureq::post(&self.endpoint())
            .timeout(self.timeout)
            .send_json(body)
            .map_err(|err| ProviderError::Request(err.to_string()))?;

        let decoded: GenerateContentResponse = response
            .into_json()
            .map_err(|err| ProviderError::Request(err.to_string()))?;

        decoded
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}

impl ContentProvider for GeminiClient {
    fn generate_itinerary(
        &self,
        preferences: &UserPreferences,
        language: Language,
    ) -> Result<Itinerary, ProviderError> {
        let today = chrono::Local::now().date_naive();
        let prompt = itinerary_prompt(preferences, language, today);
        let text = self.generate_content(&prompt, itinerary_schema())?;
        itinerary_from_json(&text)
    }

    fn modify_itinerary(
        &self,
        current: &Itinerary,
        instruction: &str,
        language: Language,
    ) -> Result<Itinerary, ProviderError> {
        let prompt = modify_prompt(current, instruction, language);
        let text = self.generate_content(&prompt, itinerary_schema())?;
        itinerary_from_json(&text)
    }

    fn search_services(
        &self,
        destination: &str,
        duration_days: u32,
        language: Language,
    ) -> Result<ServiceCatalog, ProviderError> {
        let prompt = services_prompt(destination, duration_days, language);
        let text = self.generate_content(&prompt, services_schema())?;
        service_catalog_from_json(&text)
    }
}
