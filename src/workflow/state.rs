#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Itinerary,
    Detail,
    Booking,
    Final,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Itinerary => "itinerary",
            Self::Detail => "detail",
            Self::Booking => "booking",
            Self::Final => "final",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowErrorKind {
    Validation,
    Generation,
    Modification,
    ServiceSearch,
}

impl WorkflowErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_failed",
            Self::Generation => "generation_failed",
            Self::Modification => "modification_failed",
            Self::ServiceSearch => "service_search_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowError {
    pub kind: WorkflowErrorKind,
    pub message: String,
}

/// Page plus the transient overlays. `busy` and `error` suppress normal
/// page rendering until completion or dismissal.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub page: Page,
    pub busy: Option<String>,
    pub error: Option<WorkflowError>,
    /// Index into the itinerary's daily plans; meaningful only on Detail.
    pub selected_day: Option<usize>,
}

impl WorkflowState {
    pub fn initial() -> Self {
        Self {
            page: Page::Home,
            busy: None,
            error: None,
            selected_day: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::initial()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    PreferencesSubmitted { busy_message: String },
    ValidationRejected { message: String },
    GenerationSucceeded,
    GenerationFailed { message: String },
    RegenerateRequested { busy_message: String },
    ModifyRequested { busy_message: String },
    ItineraryReplaced,
    ModificationFailed { message: String },
    DaySelected { index: usize },
    ReturnedToItinerary,
    ServicesRequested { busy_message: String },
    ServicesLoaded,
    ServiceSearchFailed { message: String },
    Finalized,
    ErrorDismissed,
    Reset,
}

impl WorkflowEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreferencesSubmitted { .. } => "preferences_submitted",
            Self::ValidationRejected { .. } => "validation_rejected",
            Self::GenerationSucceeded => "generation_succeeded",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::RegenerateRequested { .. } => "regenerate_requested",
            Self::ModifyRequested { .. } => "modify_requested",
            Self::ItineraryReplaced => "itinerary_replaced",
            Self::ModificationFailed { .. } => "modification_failed",
            Self::DaySelected { .. } => "day_selected",
            Self::ReturnedToItinerary => "returned_to_itinerary",
            Self::ServicesRequested { .. } => "services_requested",
            Self::ServicesLoaded => "services_loaded",
            Self::ServiceSearchFailed { .. } => "service_search_failed",
            Self::Finalized => "finalized",
            Self::ErrorDismissed => "error_dismissed",
            Self::Reset => "reset",
        }
    }

    /// Async completions end a busy overlay; everything else is a user
    /// trigger that busy suppresses.
    fn is_completion(&self) -> bool {
        matches!(
            self,
            Self::GenerationSucceeded
                | Self::GenerationFailed { .. }
                | Self::ItineraryReplaced
                | Self::ModificationFailed { .. }
                | Self::ServicesLoaded
                | Self::ServiceSearchFailed { .. }
        )
    }
}

/// Data the reducer needs but does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    pub has_itinerary: bool,
    pub day_count: usize,
}

fn error(kind: WorkflowErrorKind, message: &str) -> Option<WorkflowError> {
    Some(WorkflowError {
        kind,
        message: message.to_string(),
    })
}

/// Pure transition function: every row of the workflow table lives here
/// and is testable without a terminal or a network.
pub fn apply_event(
    state: &WorkflowState,
    event: &WorkflowEvent,
    ctx: EventContext,
) -> WorkflowState {
    if let WorkflowEvent::Reset = event {
        return WorkflowState::initial();
    }
    if state.is_busy() && !event.is_completion() {
        return state.clone();
    }

    let mut next = state.clone();
    match event {
        WorkflowEvent::PreferencesSubmitted { busy_message } if state.page == Page::Home => {
            next.busy = Some(busy_message.clone());
            next.error = None;
        }
        WorkflowEvent::ValidationRejected { message } => {
            next.error = error(WorkflowErrorKind::Validation, message);
        }
        WorkflowEvent::GenerationSucceeded => {
            next.busy = None;
            next.error = None;
            next.page = Page::Itinerary;
        }
        WorkflowEvent::GenerationFailed { message } => {
            next.busy = None;
            next.error = error(WorkflowErrorKind::Generation, message);
            // First generation returns to the entry point; a failed
            // regenerate keeps the last-known-good itinerary on screen.
            next.page = if ctx.has_itinerary {
                Page::Itinerary
            } else {
                Page::Home
            };
        }
        WorkflowEvent::RegenerateRequested { busy_message }
        | WorkflowEvent::ModifyRequested { busy_message }
            if state.page == Page::Itinerary && ctx.has_itinerary =>
        {
            next.busy = Some(busy_message.clone());
            next.error = None;
        }
        WorkflowEvent::ItineraryReplaced => {
            next.busy = None;
            next.error = None;
            next.page = Page::Itinerary;
        }
        WorkflowEvent::ModificationFailed { message } => {
            next.busy = None;
            next.error = error(WorkflowErrorKind::Modification, message);
            next.page = Page::Itinerary;
        }
        WorkflowEvent::DaySelected { index } if state.page == Page::Itinerary => {
            if *index < ctx.day_count {
                next.page = Page::Detail;
                next.selected_day = Some(*index);
            }
        }
        WorkflowEvent::ReturnedToItinerary if state.page == Page::Detail => {
            next.page = Page::Itinerary;
            next.selected_day = None;
        }
        WorkflowEvent::ServicesRequested { busy_message } if state.page == Page::Detail => {
            next.busy = Some(busy_message.clone());
            next.error = None;
        }
        WorkflowEvent::ServicesLoaded => {
            next.busy = None;
            next.error = None;
            next.page = Page::Booking;
            next.selected_day = None;
        }
        WorkflowEvent::ServiceSearchFailed { message } => {
            next.busy = None;
            next.error = error(WorkflowErrorKind::ServiceSearch, message);
        }
        WorkflowEvent::Finalized
            if state.page == Page::Itinerary || state.page == Page::Booking =>
        {
            next.page = Page::Final;
            next.selected_day = None;
        }
        WorkflowEvent::ErrorDismissed => {
            next.error = None;
        }
        _ => {}
    }
    reconcile(next, ctx)
}

/// A page whose required data is absent falls back to Home instead of
/// rendering undefined content.
pub fn reconcile(mut state: WorkflowState, ctx: EventContext) -> WorkflowState {
    let supported = match state.page {
        Page::Home => true,
        Page::Itinerary | Page::Booking | Page::Final => ctx.has_itinerary,
        Page::Detail => {
            ctx.has_itinerary
                && state
                    .selected_day
                    .is_some_and(|index| index < ctx.day_count)
        }
    };
    if !supported {
        state.page = Page::Home;
        state.selected_day = None;
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX_EMPTY: EventContext = EventContext {
        has_itinerary: false,
        day_count: 0,
    };
    const CTX_THREE_DAYS: EventContext = EventContext {
        has_itinerary: true,
        day_count: 3,
    };

    fn at(page: Page) -> WorkflowState {
        WorkflowState {
            page,
            busy: None,
            error: None,
            selected_day: None,
        }
    }

    fn submitted() -> WorkflowEvent {
        WorkflowEvent::PreferencesSubmitted {
            busy_message: "working".to_string(),
        }
    }

    #[test]
    fn submit_sets_busy_and_stays_home() {
        let next = apply_event(&at(Page::Home), &submitted(), CTX_EMPTY);
        assert_eq!(next.page, Page::Home);
        assert!(next.is_busy());
    }

    #[test]
    fn generation_success_advances_to_itinerary() {
        let mut state = at(Page::Home);
        state.busy = Some("working".to_string());
        let next = apply_event(&state, &WorkflowEvent::GenerationSucceeded, CTX_THREE_DAYS);
        assert_eq!(next.page, Page::Itinerary);
        assert!(!next.is_busy());
        assert!(next.error.is_none());
    }

    #[test]
    fn first_generation_failure_returns_home_with_error() {
        let mut state = at(Page::Home);
        state.busy = Some("working".to_string());
        let next = apply_event(
            &state,
            &WorkflowEvent::GenerationFailed {
                message: "boom".to_string(),
            },
            CTX_EMPTY,
        );
        assert_eq!(next.page, Page::Home);
        assert_eq!(
            next.error.as_ref().map(|e| e.kind),
            Some(WorkflowErrorKind::Generation)
        );
    }

    #[test]
    fn regenerate_failure_keeps_itinerary_page() {
        let mut state = at(Page::Itinerary);
        state.busy = Some("working".to_string());
        let next = apply_event(
            &state,
            &WorkflowEvent::GenerationFailed {
                message: "boom".to_string(),
            },
            CTX_THREE_DAYS,
        );
        assert_eq!(next.page, Page::Itinerary);
        assert!(next.error.is_some());
    }

    #[test]
    fn busy_state_ignores_page_advancing_triggers() {
        let mut state = at(Page::Itinerary);
        state.busy = Some("working".to_string());
        for event in [
            WorkflowEvent::DaySelected { index: 0 },
            WorkflowEvent::Finalized,
            WorkflowEvent::RegenerateRequested {
                busy_message: "again".to_string(),
            },
        ] {
            assert_eq!(apply_event(&state, &event, CTX_THREE_DAYS), state);
        }
    }

    #[test]
    fn day_selection_out_of_range_is_ignored() {
        let state = at(Page::Itinerary);
        let next = apply_event(&state, &WorkflowEvent::DaySelected { index: 3 }, CTX_THREE_DAYS);
        assert_eq!(next, state);
    }

    #[test]
    fn day_selection_in_range_opens_detail() {
        let next = apply_event(
            &at(Page::Itinerary),
            &WorkflowEvent::DaySelected { index: 2 },
            CTX_THREE_DAYS,
        );
        assert_eq!(next.page, Page::Detail);
        assert_eq!(next.selected_day, Some(2));
    }

    #[test]
    fn service_search_failure_stays_on_detail() {
        let mut state = at(Page::Detail);
        state.selected_day = Some(1);
        state.busy = Some("searching".to_string());
        let next = apply_event(
            &state,
            &WorkflowEvent::ServiceSearchFailed {
                message: "down".to_string(),
            },
            CTX_THREE_DAYS,
        );
        assert_eq!(next.page, Page::Detail);
        assert_eq!(
            next.error.as_ref().map(|e| e.kind),
            Some(WorkflowErrorKind::ServiceSearch)
        );
    }

    #[test]
    fn services_loaded_advances_to_booking_and_clears_day() {
        let mut state = at(Page::Detail);
        state.selected_day = Some(1);
        state.busy = Some("searching".to_string());
        let next = apply_event(&state, &WorkflowEvent::ServicesLoaded, CTX_THREE_DAYS);
        assert_eq!(next.page, Page::Booking);
        assert_eq!(next.selected_day, None);
    }

    #[test]
    fn finalize_from_itinerary_and_booking_only() {
        assert_eq!(
            apply_event(&at(Page::Itinerary), &WorkflowEvent::Finalized, CTX_THREE_DAYS).page,
            Page::Final
        );
        assert_eq!(
            apply_event(&at(Page::Booking), &WorkflowEvent::Finalized, CTX_THREE_DAYS).page,
            Page::Final
        );
        assert_eq!(
            apply_event(&at(Page::Home), &WorkflowEvent::Finalized, CTX_EMPTY).page,
            Page::Home
        );
    }

    #[test]
    fn reset_clears_everything_from_any_page() {
        let mut state = at(Page::Booking);
        state.error = error(WorkflowErrorKind::ServiceSearch, "down");
        state.busy = Some("working".to_string());
        let next = apply_event(&state, &WorkflowEvent::Reset, CTX_THREE_DAYS);
        assert_eq!(next, WorkflowState::initial());
    }

    #[test]
    fn detail_without_selected_day_falls_back_to_home() {
        let state = at(Page::Detail);
        let next = reconcile(state, CTX_THREE_DAYS);
        assert_eq!(next.page, Page::Home);
    }

    #[test]
    fn itinerary_page_without_itinerary_falls_back_to_home() {
        let next = reconcile(at(Page::Itinerary), CTX_EMPTY);
        assert_eq!(next.page, Page::Home);
    }
}
