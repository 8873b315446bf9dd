use crate::domain::{BookedServices, Service, ServiceCategory};

/// Two independent slots, at most one selection each. Mutated only by
/// `book` and `clear`; the workflow reads it for the final summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSelectionStore {
    guide: Option<Service>,
    vehicle: Option<Service>,
}

impl BookingSelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the slot matching the service category. Rebooking the id
    /// already occupying that slot is a no-op.
    pub fn book(&mut self, service: Service) {
        let slot = match service.category {
            ServiceCategory::Guide => &mut self.guide,
            ServiceCategory::Vehicle => &mut self.vehicle,
        };
        if slot.as_ref().is_some_and(|held| held.id == service.id) {
            return;
        }
        *slot = Some(service);
    }

    pub fn guide(&self) -> Option<&Service> {
        self.guide.as_ref()
    }

    pub fn vehicle(&self) -> Option<&Service> {
        self.vehicle.as_ref()
    }

    pub fn is_booked(&self, service_id: &str) -> bool {
        self.guide.as_ref().is_some_and(|s| s.id == service_id)
            || self.vehicle.as_ref().is_some_and(|s| s.id == service_id)
    }

    pub fn is_empty(&self) -> bool {
        self.guide.is_none() && self.vehicle.is_none()
    }

    pub fn booked(&self) -> BookedServices {
        BookedServices {
            guide: self.guide.clone(),
            vehicle: self.vehicle.clone(),
        }
    }

    pub fn total_cost(&self, duration_days: u32) -> f64 {
        let per_day: f64 = self
            .guide
            .iter()
            .chain(self.vehicle.iter())
            .map(|service| service.price_per_day)
            .sum();
        per_day * f64::from(duration_days)
    }

    pub fn clear(&mut self) {
        self.guide = None;
        self.vehicle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, category: ServiceCategory, price: f64) -> Service {
        Service {
            id: id.to_string(),
            name: format!("service {id}"),
            category,
            description: "desc".to_string(),
            price_per_day: price,
            image_url: format!("https://picsum.photos/seed/{id}/400/300"),
        }
    }

    #[test]
    fn booking_same_id_twice_is_a_no_op() {
        let mut store = BookingSelectionStore::new();
        store.book(service("g1", ServiceCategory::Guide, 50.0));
        let before = store.clone();
        store.book(service("g1", ServiceCategory::Guide, 50.0));
        assert_eq!(store, before);
    }

    #[test]
    fn second_guide_replaces_first_and_leaves_vehicle_untouched() {
        let mut store = BookingSelectionStore::new();
        store.book(service("v1", ServiceCategory::Vehicle, 80.0));
        store.book(service("g1", ServiceCategory::Guide, 50.0));
        store.book(service("g2", ServiceCategory::Guide, 60.0));
        assert_eq!(store.guide().map(|s| s.id.as_str()), Some("g2"));
        assert_eq!(store.vehicle().map(|s| s.id.as_str()), Some("v1"));
    }

    #[test]
    fn total_cost_sums_occupied_slots_times_duration() {
        let mut store = BookingSelectionStore::new();
        assert_eq!(store.total_cost(5), 0.0);
        store.book(service("g1", ServiceCategory::Guide, 50.0));
        store.book(service("v1", ServiceCategory::Vehicle, 80.0));
        assert_eq!(store.total_cost(3), (50.0 + 80.0) * 3.0);
    }

    #[test]
    fn clear_empties_both_slots() {
        let mut store = BookingSelectionStore::new();
        store.book(service("g1", ServiceCategory::Guide, 50.0));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.total_cost(4), 0.0);
    }
}
