use serde_json::{json, Value};

/// Gemini REST response schemas. Uppercase type names per the
/// generativelanguage API; `propertyOrdering` is not needed, field presence
/// is enforced through `required`.
pub(crate) fn itinerary_schema() -> Value {
    let hotel = json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "rating": { "type": "NUMBER", "description": "star rating between 0 and 5" },
            "pricePerNight": { "type": "NUMBER" },
            "bookingLink": { "type": "STRING" },
        },
        "required": ["name", "rating", "pricePerNight", "bookingLink"],
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "destination": { "type": "STRING" },
            "duration": { "type": "INTEGER" },
            "budget": { "type": "STRING", "enum": ["economy", "comfort", "luxury"] },
            "trip_title": { "type": "STRING" },
            "overall_summary": { "type": "STRING" },
            "daily_plans": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER" },
                        "date": { "type": "STRING", "description": "date of this plan, e.g. 2026-08-30" },
                        "title": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "activities": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "startTime": { "type": "STRING", "description": "e.g. 09:00" },
                                    "endTime": { "type": "STRING", "description": "e.g. 11:00" },
                                    "name": { "type": "STRING" },
                                    "type": { "type": "STRING", "description": "activity tag, e.g. sightseeing" },
                                    "location": { "type": "STRING" },
                                    "description": { "type": "STRING" },
                                    "coordinates": {
                                        "type": "OBJECT",
                                        "properties": {
                                            "lat": { "type": "NUMBER" },
                                            "lng": { "type": "NUMBER" },
                                        },
                                        "required": ["lat", "lng"],
                                    },
                                },
                                "required": ["startTime", "endTime", "name", "type", "location", "description", "coordinates"],
                            },
                        },
                        "dining": {
                            "type": "OBJECT",
                            "properties": {
                                "lunch": { "type": "STRING" },
                                "dinner": { "type": "STRING" },
                            },
                            "required": ["lunch", "dinner"],
                        },
                        "transport": { "type": "STRING" },
                        "hotelRecommendation": hotel,
                    },
                    "required": ["day", "date", "title", "summary", "activities", "dining", "transport"],
                },
            },
        },
        "required": ["destination", "duration", "budget", "trip_title", "overall_summary", "daily_plans"],
    })
}

pub(crate) fn services_schema() -> Value {
    let service = |category: &str| {
        json!({
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "type": { "type": "STRING", "enum": [category] },
                "description": { "type": "STRING" },
                "pricePerDay": { "type": "NUMBER" },
                "imageUrl": { "type": "STRING" },
            },
            "required": ["id", "name", "type", "description", "pricePerDay", "imageUrl"],
        })
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "guides": { "type": "ARRAY", "items": service("Guide") },
            "vehicles": { "type": "ARRAY", "items": service("Vehicle") },
        },
        "required": ["guides", "vehicles"],
    })
}
