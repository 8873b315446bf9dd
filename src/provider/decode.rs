use super::ProviderError;
use crate::domain::{validate_itinerary, validate_service_catalog, Itinerary, ServiceCatalog};

/// Decode plus invariant validation; a payload that parses but violates
/// the itinerary invariants is a shape failure, never silently coerced.
pub fn itinerary_from_json(raw: &str) -> Result<Itinerary, ProviderError> {
    let itinerary: Itinerary = serde_json::from_str(raw.trim())
        .map_err(|err| ProviderError::Shape(format!("itinerary decode: {err}")))?;
    validate_itinerary(&itinerary).map_err(ProviderError::Shape)?;
    Ok(itinerary)
}

pub fn service_catalog_from_json(raw: &str) -> Result<ServiceCatalog, ProviderError> {
    let catalog: ServiceCatalog = serde_json::from_str(raw.trim())
        .map_err(|err| ProviderError::Shape(format!("service catalog decode: {err}")))?;
    validate_service_catalog(&catalog).map_err(ProviderError::Shape)?;
    Ok(catalog)
}
