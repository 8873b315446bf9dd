mod validate;

pub use validate::{validate_itinerary, validate_service_catalog};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Economy,
    Comfort,
    Luxury,
}

impl BudgetTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Comfort => "comfort",
            Self::Luxury => "luxury",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(Self::Economy),
            "comfort" => Ok(Self::Comfort),
            "luxury" => Ok(Self::Luxury),
            _ => Err("budget must be one of: economy, comfort, luxury".to_string()),
        }
    }
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preferences captured on the home form. Immutable once submitted; a new
/// submission builds a new value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserPreferences {
    pub destination: String,
    pub days: u32,
    pub budget: BudgetTier,
    pub interests: Vec<String>,
}

impl UserPreferences {
    /// Local submission gate: no network call is issued while this fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.destination.trim().is_empty() {
            return Err("destination must be non-empty".to_string());
        }
        if self.days < 1 {
            return Err("trip length must be at least 1 day".to_string());
        }
        if self.interests.iter().all(|tag| tag.trim().is_empty()) {
            return Err("select at least one interest".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Activity {
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

impl Activity {
    /// Coordinate usable for map rendering: present and finite.
    pub fn locatable(&self) -> Option<GeoPoint> {
        self.coordinates.filter(|point| point.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Dining {
    pub lunch: String,
    pub dinner: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Hotel {
    pub name: String,
    pub rating: f64,
    #[serde(rename = "pricePerNight")]
    pub price_per_night: f64,
    #[serde(rename = "bookingLink")]
    pub booking_link: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DayPlan {
    pub day: u32,
    pub date: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    pub dining: Dining,
    pub transport: String,
    #[serde(rename = "hotelRecommendation", default)]
    pub hotel_recommendation: Option<Hotel>,
}

/// The full generated multi-day trip plan. Replaced wholesale on
/// regenerate/modify; never mutated in place.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Itinerary {
    pub destination: String,
    pub duration: u32,
    pub budget: BudgetTier,
    pub trip_title: String,
    pub overall_summary: String,
    pub daily_plans: Vec<DayPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ServiceCategory {
    Guide,
    Vehicle,
}

impl ServiceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guide => "Guide",
            Self::Vehicle => "Vehicle",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: ServiceCategory,
    pub description: String,
    #[serde(rename = "pricePerDay")]
    pub price_per_day: f64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceCatalog {
    pub guides: Vec<Service>,
    pub vehicles: Vec<Service>,
}

/// At most one booked service per category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BookedServices {
    #[serde(default)]
    pub guide: Option<Service>,
    #[serde(default)]
    pub vehicle: Option<Service>,
}
