use super::{Itinerary, ServiceCatalog, ServiceCategory};
use chrono::NaiveTime;
use std::collections::HashSet;

const ACTIVITY_TIME_FORMAT: &str = "%H:%M";

/// Boundary validation for a generated itinerary. The generator is not
/// trusted to uphold these invariants; a violation classifies the whole
/// response as a failure instead of coercing the payload.
pub fn validate_itinerary(itinerary: &Itinerary) -> Result<(), String> {
    if itinerary.destination.trim().is_empty() {
        return Err("itinerary destination is empty".to_string());
    }
    if itinerary.duration < 1 {
        return Err("itinerary duration must be at least 1 day".to_string());
    }
    if itinerary.daily_plans.len() != itinerary.duration as usize {
        return Err(format!(
            "itinerary duration is {} but {} daily plans were returned",
            itinerary.duration,
            itinerary.daily_plans.len()
        ));
    }

    for (index, plan) in itinerary.daily_plans.iter().enumerate() {
        let expected = index as u32 + 1;
        if plan.day != expected {
            return Err(format!(
                "daily plan at position {} is numbered day {} (expected {})",
                index, plan.day, expected
            ));
        }
        for activity in &plan.activities {
            if activity.name.trim().is_empty() {
                return Err(format!("day {} has an activity without a name", plan.day));
            }
            if let Some(reason) = invalid_time_order(&activity.start_time, &activity.end_time) {
                return Err(format!(
                    "day {} activity `{}`: {}",
                    plan.day, activity.name, reason
                ));
            }
        }
        if let Some(hotel) = &plan.hotel_recommendation {
            if !(0.0..=5.0).contains(&hotel.rating) {
                return Err(format!(
                    "day {} hotel `{}` has rating {} outside 0-5",
                    plan.day, hotel.name, hotel.rating
                ));
            }
            if hotel.price_per_night < 0.0 {
                return Err(format!(
                    "day {} hotel `{}` has a negative nightly price",
                    plan.day, hotel.name
                ));
            }
        }
    }
    Ok(())
}

/// Times are free text; only when both sides parse as HH:MM is the
/// ordering enforced.
fn invalid_time_order(start: &str, end: &str) -> Option<String> {
    let start = NaiveTime::parse_from_str(start.trim(), ACTIVITY_TIME_FORMAT).ok()?;
    let end = NaiveTime::parse_from_str(end.trim(), ACTIVITY_TIME_FORMAT).ok()?;
    if end < start {
        return Some(format!("end time {end} precedes start time {start}"));
    }
    None
}

pub fn validate_service_catalog(catalog: &ServiceCatalog) -> Result<(), String> {
    let mut seen_ids = HashSet::new();
    for (list, expected) in [
        (&catalog.guides, ServiceCategory::Guide),
        (&catalog.vehicles, ServiceCategory::Vehicle),
    ] {
        for service in list {
            if service.id.trim().is_empty() {
                return Err("service id is empty".to_string());
            }
            if !seen_ids.insert(service.id.clone()) {
                return Err(format!("duplicate service id `{}`", service.id));
            }
            if service.category != expected {
                return Err(format!(
                    "service `{}` is listed under {expected} but categorized as {}",
                    service.id, service.category
                ));
            }
            if service.price_per_day < 0.0 {
                return Err(format!("service `{}` has a negative daily price", service.id));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Activity, BudgetTier, DayPlan, Dining, Hotel, Service};

    fn plan(day: u32) -> DayPlan {
        DayPlan {
            day,
            date: "2026-09-01".to_string(),
            title: format!("Day {day}"),
            summary: "walkabout".to_string(),
            activities: Vec::new(),
            dining: Dining {
                lunch: "ramen".to_string(),
                dinner: "izakaya".to_string(),
            },
            transport: "metro".to_string(),
            hotel_recommendation: None,
        }
    }

    fn itinerary(plans: Vec<DayPlan>) -> Itinerary {
        Itinerary {
            destination: "Tokyo".to_string(),
            duration: plans.len() as u32,
            budget: BudgetTier::Comfort,
            trip_title: "Tokyo Days".to_string(),
            overall_summary: "three days in Tokyo".to_string(),
            daily_plans: plans,
        }
    }

    fn activity(start: &str, end: &str) -> Activity {
        Activity {
            start_time: start.to_string(),
            end_time: end.to_string(),
            name: "Senso-ji".to_string(),
            category: "sightseeing".to_string(),
            location: "Asakusa".to_string(),
            description: "old temple".to_string(),
            coordinates: None,
        }
    }

    #[test]
    fn accepts_sequential_days() {
        let it = itinerary(vec![plan(1), plan(2), plan(3)]);
        assert!(validate_itinerary(&it).is_ok());
    }

    #[test]
    fn rejects_duration_mismatch() {
        let mut it = itinerary(vec![plan(1), plan(2)]);
        it.duration = 3;
        assert!(validate_itinerary(&it).is_err());
    }

    #[test]
    fn rejects_day_number_gap() {
        let it = itinerary(vec![plan(1), plan(3)]);
        assert!(validate_itinerary(&it).is_err());
    }

    #[test]
    fn rejects_duplicate_day_numbers() {
        let it = itinerary(vec![plan(1), plan(1)]);
        assert!(validate_itinerary(&it).is_err());
    }

    #[test]
    fn rejects_end_time_before_start_time() {
        let mut day = plan(1);
        day.activities.push(activity("14:00", "09:30"));
        assert!(validate_itinerary(&itinerary(vec![day])).is_err());
    }

    #[test]
    fn tolerates_unparseable_activity_times() {
        let mut day = plan(1);
        day.activities.push(activity("after breakfast", "whenever"));
        assert!(validate_itinerary(&itinerary(vec![day])).is_ok());
    }

    #[test]
    fn rejects_hotel_rating_out_of_range() {
        let mut day = plan(1);
        day.hotel_recommendation = Some(Hotel {
            name: "Grand".to_string(),
            rating: 6.5,
            price_per_night: 120.0,
            booking_link: "https://example.com/grand".to_string(),
        });
        assert!(validate_itinerary(&itinerary(vec![day])).is_err());
    }

    fn service(id: &str, category: ServiceCategory) -> Service {
        Service {
            id: id.to_string(),
            name: format!("service {id}"),
            category,
            description: "desc".to_string(),
            price_per_day: 40.0,
            image_url: "https://picsum.photos/seed/x/400/300".to_string(),
        }
    }

    #[test]
    fn rejects_service_listed_under_wrong_category() {
        let catalog = ServiceCatalog {
            guides: vec![service("g1", ServiceCategory::Vehicle)],
            vehicles: Vec::new(),
        };
        assert!(validate_service_catalog(&catalog).is_err());
    }

    #[test]
    fn rejects_duplicate_service_ids_across_categories() {
        let catalog = ServiceCatalog {
            guides: vec![service("s1", ServiceCategory::Guide)],
            vehicles: vec![service("s1", ServiceCategory::Vehicle)],
        };
        assert!(validate_service_catalog(&catalog).is_err());
    }

    #[test]
    fn accepts_three_per_category_catalog() {
        let catalog = ServiceCatalog {
            guides: vec![
                service("g1", ServiceCategory::Guide),
                service("g2", ServiceCategory::Guide),
                service("g3", ServiceCategory::Guide),
            ],
            vehicles: vec![
                service("v1", ServiceCategory::Vehicle),
                service("v2", ServiceCategory::Vehicle),
                service("v3", ServiceCategory::Vehicle),
            ],
        };
        assert!(validate_service_catalog(&catalog).is_ok());
    }
}
