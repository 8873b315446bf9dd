use super::state::{apply_event, EventContext, Page, WorkflowEvent, WorkflowState};
use crate::booking::BookingSelectionStore;
use crate::domain::{DayPlan, Itinerary, Service, ServiceCatalog, UserPreferences};
use crate::i18n::{Language, TextKey};
use crate::provider::ContentProvider;
use crate::shared::logging::append_app_log_line;
use crate::tasks::{AsyncTaskRunner, TaskAction, TaskCompletion, TaskOutcome};
use std::path::PathBuf;
use std::sync::Arc;

/// Owns the workflow state and every piece of trip data, and is the only
/// place async completions are applied. The TUI translates key presses
/// into these methods and renders whatever the controller holds.
pub struct WorkflowController {
    state: WorkflowState,
    runner: AsyncTaskRunner,
    booking: BookingSelectionStore,
    language: Language,
    preferences: Option<UserPreferences>,
    itinerary: Option<Itinerary>,
    services: Option<ServiceCatalog>,
    log_root: Option<PathBuf>,
}

impl WorkflowController {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        language: Language,
        log_root: Option<PathBuf>,
    ) -> Self {
        Self {
            state: WorkflowState::initial(),
            runner: AsyncTaskRunner::new(provider, language),
            booking: BookingSelectionStore::new(),
            language,
            preferences: None,
            itinerary: None,
            services: None,
            log_root,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn page(&self) -> Page {
        self.state.page
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn preferences(&self) -> Option<&UserPreferences> {
        self.preferences.as_ref()
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        self.itinerary.as_ref()
    }

    pub fn services(&self) -> Option<&ServiceCatalog> {
        self.services.as_ref()
    }

    pub fn booking(&self) -> &BookingSelectionStore {
        &self.booking
    }

    pub fn selected_day_plan(&self) -> Option<&DayPlan> {
        let index = self.state.selected_day?;
        self.itinerary.as_ref()?.daily_plans.get(index)
    }

    pub fn total_service_cost(&self) -> f64 {
        let duration = self.itinerary.as_ref().map_or(0, |it| it.duration);
        self.booking.total_cost(duration)
    }

    /// Home: validate locally, then kick off generation. A validation
    /// failure never issues a network call.
    pub fn submit_preferences(&mut self, preferences: UserPreferences) {
        if self.state.is_busy() || self.state.page != Page::Home {
            return;
        }
        if let Err(message) = preferences.validate() {
            self.apply(WorkflowEvent::ValidationRejected { message });
            return;
        }
        if self
            .runner
            .dispatch_generate(preferences.clone())
            .is_err()
        {
            return;
        }
        self.preferences = Some(preferences);
        self.apply(WorkflowEvent::PreferencesSubmitted {
            busy_message: self.text(TextKey::BusyGenerating),
        });
    }

    /// Itinerary: regenerate with the same preferences.
    pub fn regenerate(&mut self) {
        if self.state.is_busy() || self.state.page != Page::Itinerary {
            return;
        }
        let Some(preferences) = self.preferences.clone() else {
            return;
        };
        if self.runner.dispatch_regenerate(preferences).is_err() {
            return;
        }
        self.apply(WorkflowEvent::RegenerateRequested {
            busy_message: self.text(TextKey::BusyGenerating),
        });
    }

    /// Itinerary: free-text modification of the current itinerary.
    pub fn modify(&mut self, instruction: String) {
        if self.state.is_busy() || self.state.page != Page::Itinerary {
            return;
        }
        if instruction.trim().is_empty() {
            self.apply(WorkflowEvent::ValidationRejected {
                message: "change request must be non-empty".to_string(),
            });
            return;
        }
        let Some(current) = self.itinerary.clone() else {
            return;
        };
        if self.runner.dispatch_modify(current, instruction).is_err() {
            return;
        }
        self.apply(WorkflowEvent::ModifyRequested {
            busy_message: self.text(TextKey::BusyModifying),
        });
    }

    pub fn select_day(&mut self, index: usize) {
        self.apply(WorkflowEvent::DaySelected { index });
    }

    pub fn back_to_itinerary(&mut self) {
        self.apply(WorkflowEvent::ReturnedToItinerary);
    }

    /// Detail: look up bookable guides and vehicles for the trip.
    pub fn request_services(&mut self) {
        if self.state.is_busy() || self.state.page != Page::Detail {
            return;
        }
        let Some(itinerary) = self.itinerary.as_ref() else {
            return;
        };
        let destination = itinerary.destination.clone();
        let duration = itinerary.duration;
        if self
            .runner
            .dispatch_search_services(destination, duration)
            .is_err()
        {
            return;
        }
        self.apply(WorkflowEvent::ServicesRequested {
            busy_message: self.text(TextKey::BusySearchingServices),
        });
    }

    pub fn book(&mut self, service: Service) {
        if self.state.is_busy() || self.state.page != Page::Booking {
            return;
        }
        self.log(&format!(
            "booked service id={} category={}",
            service.id, service.category
        ));
        self.booking.book(service);
    }

    pub fn finalize(&mut self) {
        self.apply(WorkflowEvent::Finalized);
    }

    pub fn dismiss_error(&mut self) {
        self.apply(WorkflowEvent::ErrorDismissed);
    }

    /// Start over: clears every piece of state and makes any outstanding
    /// async response stale.
    pub fn reset(&mut self) {
        self.runner.invalidate_all();
        self.booking.clear();
        self.preferences = None;
        self.itinerary = None;
        self.services = None;
        self.apply(WorkflowEvent::Reset);
    }

    /// Applies any fresh async completions. Call once per UI tick; returns
    /// true when anything changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Some(completion) = self.runner.poll() {
            changed = true;
            self.apply_completion(completion);
        }
        changed
    }

    fn apply_completion(&mut self, completion: TaskCompletion) {
        self.log(&format!("task {} completed", completion.action));
        match completion.outcome {
            TaskOutcome::ItineraryReady(itinerary) => {
                self.itinerary = Some(itinerary);
                let event = if completion.action == TaskAction::Generate {
                    WorkflowEvent::GenerationSucceeded
                } else {
                    WorkflowEvent::ItineraryReplaced
                };
                self.apply(event);
            }
            TaskOutcome::GenerationFailed(message) => {
                if self.itinerary.is_none() {
                    // Entry-point failure discards the in-flight preferences.
                    self.preferences = None;
                }
                self.apply(WorkflowEvent::GenerationFailed { message });
            }
            TaskOutcome::ModificationFailed(message) => {
                self.apply(WorkflowEvent::ModificationFailed { message });
            }
            TaskOutcome::ServicesReady(catalog) => {
                self.services = Some(catalog);
                self.apply(WorkflowEvent::ServicesLoaded);
            }
            TaskOutcome::ServiceSearchFailed(message) => {
                self.apply(WorkflowEvent::ServiceSearchFailed { message });
            }
        }
    }

    fn apply(&mut self, event: WorkflowEvent) {
        let next = apply_event(&self.state, &event, self.context());
        if next != self.state {
            self.log(&format!(
                "event {} page {} -> {}",
                event.as_str(),
                self.state.page,
                next.page
            ));
        }
        self.state = next;
    }

    fn context(&self) -> EventContext {
        EventContext {
            has_itinerary: self.itinerary.is_some(),
            day_count: self
                .itinerary
                .as_ref()
                .map_or(0, |itinerary| itinerary.daily_plans.len()),
        }
    }

    fn text(&self, key: TextKey) -> String {
        key.text(self.language).to_string()
    }

    fn log(&self, line: &str) {
        if let Some(root) = &self.log_root {
            let stamped = format!("{} {line}", chrono::Local::now().to_rfc3339());
            let _ = append_app_log_line(root, &stamped);
        }
    }
}
