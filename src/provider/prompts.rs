use crate::domain::{Itinerary, UserPreferences};
use crate::i18n::Language;
use chrono::NaiveDate;

pub fn itinerary_prompt(
    preferences: &UserPreferences,
    language: Language,
    today: NaiveDate,
) -> String {
    format!(
        "You are a professional travel planner. Create a detailed, personalized \
trip itinerary for the user's preferences. Respond strictly as JSON matching the \
provided schema, with no text outside the JSON object. {directive}\n\
\n\
User preferences:\n\
- destination: {destination}\n\
- duration: {days} days\n\
- budget tier: {budget}\n\
- interests: {interests}\n\
\n\
Requirements:\n\
1. An inviting trip_title and overall_summary.\n\
2. Exactly {days} daily_plans, numbered day 1 through day {days} in order.\n\
3. Per day: a date (the trip starts on {today}), a title, a short summary, \
lunch and dinner suggestions, and a recommended transport mode.\n\
4. Per activity: startTime and endTime as HH:MM with the end no earlier than \
the start, a clear name, a type tag, a location, a compelling description, and \
coordinates with precise lat and lng for the place.\n\
5. Per day an optional hotelRecommendation with name, rating between 0 and 5, \
pricePerNight, and a fictional bookingLink.",
        directive = language.prompt_directive(),
        destination = preferences.destination,
        days = preferences.days,
        budget = preferences.budget,
        interests = preferences.interests.join(", "),
        today = today.format("%Y-%m-%d"),
    )
}

/// Carries the serialized current itinerary so the provider returns a full
/// replacement rather than a delta.
pub fn modify_prompt(current: &Itinerary, instruction: &str, language: Language) -> String {
    let current_json =
        serde_json::to_string(current).unwrap_or_else(|_| "{}".to_string());
    format!(
        "You are a professional travel planner. Below is the user's current trip \
itinerary as JSON, followed by a change request. Apply the change and return the \
complete updated itinerary as JSON matching the provided schema; keep everything \
the user did not ask to change. Keep the same destination and the same number of \
days with day numbers 1..duration in order, unless the request explicitly changes \
the trip length. No text outside the JSON object. {directive}\n\
\n\
Current itinerary:\n{current_json}\n\
\n\
Change request:\n{instruction}",
        directive = language.prompt_directive(),
    )
}

pub fn services_prompt(destination: &str, duration_days: u32, language: Language) -> String {
    format!(
        "Generate a fictional list of bookable services for a {duration_days}-day \
trip to {destination}. Provide exactly 3 local guides with distinct specialties \
(for example history, food, adventure) and exactly 3 vehicle rental options (for \
example compact car, SUV, motorbike). Per service: a unique id, a name, a \
description, a pricePerDay, and a placeholder image URL of the form \
https://picsum.photos/seed/{{some_random_string}}/400/300. Respond as valid JSON \
matching the provided schema. {directive}",
        directive = language.prompt_directive(),
    )
}
