use crate::domain::{Itinerary, ServiceCatalog, UserPreferences};
use crate::i18n::Language;
use crate::provider::ContentProvider;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Generate,
    Regenerate,
    Modify,
    SearchServices,
}

impl TaskAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Regenerate => "regenerate",
            Self::Modify => "modify",
            Self::SearchServices => "search_services",
        }
    }

    /// Actions that replace the same piece of state share a fence, so a
    /// completion from an older action is stale once a newer one has been
    /// dispatched for that state.
    fn fence(self) -> FenceDomain {
        match self {
            Self::Generate | Self::Regenerate | Self::Modify => FenceDomain::Itinerary,
            Self::SearchServices => FenceDomain::Services,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Generate => 0,
            Self::Regenerate => 1,
            Self::Modify => 2,
            Self::SearchServices => 3,
        }
    }
}

impl std::fmt::Display for TaskAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceDomain {
    Itinerary,
    Services,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("a `{0}` request is already in flight")]
    SlotBusy(&'static str),
}

/// Typed task results; a raw provider error never crosses this boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    ItineraryReady(Itinerary),
    ServicesReady(ServiceCatalog),
    GenerationFailed(String),
    ModificationFailed(String),
    ServiceSearchFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskCompletion {
    pub action: TaskAction,
    pub outcome: TaskOutcome,
}

#[derive(Debug)]
struct CompletionEnvelope {
    action: TaskAction,
    generation: u64,
    outcome: TaskOutcome,
}

/// Runs one fallible action per named slot on a worker thread; completions
/// come back over a channel and are applied on the owner's thread via
/// `poll`, fenced by per-domain generation counters.
pub struct AsyncTaskRunner {
    provider: Arc<dyn ContentProvider>,
    language: Language,
    tx: Sender<CompletionEnvelope>,
    rx: Receiver<CompletionEnvelope>,
    itinerary_generation: u64,
    services_generation: u64,
    // Generation of the in-flight dispatch per action, if any.
    in_flight: [Option<u64>; 4],
}

impl AsyncTaskRunner {
    pub fn new(provider: Arc<dyn ContentProvider>, language: Language) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            provider,
            language,
            tx,
            rx,
            itinerary_generation: 0,
            services_generation: 0,
            in_flight: [None; 4],
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.iter().any(Option::is_some)
    }

    pub fn is_pending(&self, action: TaskAction) -> bool {
        self.in_flight[action.index()].is_some()
    }

    pub fn dispatch_generate(&mut self, preferences: UserPreferences) -> Result<(), TaskError> {
        let generation = self.begin(TaskAction::Generate)?;
        let provider = Arc::clone(&self.provider);
        let language = self.language;
        self.run_worker(TaskAction::Generate, generation, move || {
            match provider.generate_itinerary(&preferences, language) {
                Ok(itinerary) => TaskOutcome::ItineraryReady(itinerary),
                Err(err) => TaskOutcome::GenerationFailed(err.to_string()),
            }
        });
        Ok(())
    }

    pub fn dispatch_regenerate(&mut self, preferences: UserPreferences) -> Result<(), TaskError> {
        let generation = self.begin(TaskAction::Regenerate)?;
        let provider = Arc::clone(&self.provider);
        let language = self.language;
        self.run_worker(TaskAction::Regenerate, generation, move || {
            match provider.generate_itinerary(&preferences, language) {
                Ok(itinerary) => TaskOutcome::ItineraryReady(itinerary),
                Err(err) => TaskOutcome::GenerationFailed(err.to_string()),
            }
        });
        Ok(())
    }

    pub fn dispatch_modify(
        &mut self,
        current: Itinerary,
        instruction: String,
    ) -> Result<(), TaskError> {
        let generation = self.begin(TaskAction::Modify)?;
        let provider = Arc::clone(&self.provider);
        let language = self.language;
        self.run_worker(TaskAction::Modify, generation, move || {
            match provider.modify_itinerary(&current, &instruction, language) {
                Ok(itinerary) => TaskOutcome::ItineraryReady(itinerary),
                Err(err) => TaskOutcome::ModificationFailed(err.to_string()),
            }
        });
        Ok(())
    }

    pub fn dispatch_search_services(
        &mut self,
        destination: String,
        duration_days: u32,
    ) -> Result<(), TaskError> {
        let generation = self.begin(TaskAction::SearchServices)?;
        let provider = Arc::clone(&self.provider);
        let language = self.language;
        self.run_worker(TaskAction::SearchServices, generation, move || {
            match provider.search_services(&destination, duration_days, language) {
                Ok(catalog) => TaskOutcome::ServicesReady(catalog),
                Err(err) => TaskOutcome::ServiceSearchFailed(err.to_string()),
            }
        });
        Ok(())
    }

    /// Surfaces the next fresh completion, discarding stale ones. Call from
    /// the owning thread's event loop.
    pub fn poll(&mut self) -> Option<TaskCompletion> {
        loop {
            let envelope = self.rx.try_recv().ok()?;
            if let Some(completion) = self.accept(envelope) {
                return Some(completion);
            }
        }
    }

    /// Logical cancellation: any outstanding response becomes stale. The
    /// worker threads are left to finish and be discarded on arrival.
    pub fn invalidate_all(&mut self) {
        self.itinerary_generation += 1;
        self.services_generation += 1;
        self.in_flight = [None; 4];
    }

    fn begin(&mut self, action: TaskAction) -> Result<u64, TaskError> {
        if self.is_pending(action) {
            return Err(TaskError::SlotBusy(action.as_str()));
        }
        let counter = self.fence_counter_mut(action.fence());
        *counter += 1;
        let generation = *counter;
        self.in_flight[action.index()] = Some(generation);
        Ok(generation)
    }

    fn run_worker(
        &self,
        action: TaskAction,
        generation: u64,
        job: impl FnOnce() -> TaskOutcome + Send + 'static,
    ) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = job();
            let _ = tx.send(CompletionEnvelope {
                action,
                generation,
                outcome,
            });
        });
    }

    fn accept(&mut self, envelope: CompletionEnvelope) -> Option<TaskCompletion> {
        let index = envelope.action.index();
        if self.in_flight[index] == Some(envelope.generation) {
            self.in_flight[index] = None;
        }
        if envelope.generation != self.fence_counter(envelope.action.fence()) {
            return None;
        }
        Some(TaskCompletion {
            action: envelope.action,
            outcome: envelope.outcome,
        })
    }

    fn fence_counter(&self, fence: FenceDomain) -> u64 {
        match fence {
            FenceDomain::Itinerary => self.itinerary_generation,
            FenceDomain::Services => self.services_generation,
        }
    }

    fn fence_counter_mut(&mut self, fence: FenceDomain) -> &mut u64 {
        match fence {
            FenceDomain::Itinerary => &mut self.itinerary_generation,
            FenceDomain::Services => &mut self.services_generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetTier, DayPlan, Dining, ServiceCatalog};
    use crate::provider::ProviderError;

    struct NeverProvider;

    impl ContentProvider for NeverProvider {
        fn generate_itinerary(
            &self,
            _preferences: &UserPreferences,
            _language: Language,
        ) -> Result<Itinerary, ProviderError> {
            Err(ProviderError::EmptyResponse)
        }

        fn modify_itinerary(
            &self,
            _current: &Itinerary,
            _instruction: &str,
            _language: Language,
        ) -> Result<Itinerary, ProviderError> {
            Err(ProviderError::EmptyResponse)
        }

        fn search_services(
            &self,
            _destination: &str,
            _duration_days: u32,
            _language: Language,
        ) -> Result<ServiceCatalog, ProviderError> {
            Err(ProviderError::EmptyResponse)
        }
    }

    fn runner() -> AsyncTaskRunner {
        AsyncTaskRunner::new(Arc::new(NeverProvider), Language::En)
    }

    fn itinerary(title: &str) -> Itinerary {
        Itinerary {
            destination: "Tokyo".to_string(),
            duration: 1,
            budget: BudgetTier::Comfort,
            trip_title: title.to_string(),
            overall_summary: "trip".to_string(),
            daily_plans: vec![DayPlan {
                day: 1,
                date: "2026-09-01".to_string(),
                title: "Day 1".to_string(),
                summary: "walk".to_string(),
                activities: Vec::new(),
                dining: Dining {
                    lunch: "a".to_string(),
                    dinner: "b".to_string(),
                },
                transport: "metro".to_string(),
                hotel_recommendation: None,
            }],
        }
    }

    fn envelope(action: TaskAction, generation: u64, title: &str) -> CompletionEnvelope {
        CompletionEnvelope {
            action,
            generation,
            outcome: TaskOutcome::ItineraryReady(itinerary(title)),
        }
    }

    #[test]
    fn second_begin_on_pending_action_is_rejected() {
        let mut runner = runner();
        runner.begin(TaskAction::Generate).expect("first");
        assert_eq!(
            runner.begin(TaskAction::Generate),
            Err(TaskError::SlotBusy("generate"))
        );
    }

    #[test]
    fn stale_itinerary_completion_is_discarded_in_favor_of_newer_dispatch() {
        let mut runner = runner();
        let g1 = runner.begin(TaskAction::Regenerate).expect("regenerate");
        let g2 = runner.begin(TaskAction::Modify).expect("modify");
        assert!(g2 > g1);

        // The slow regenerate resolves after the modify was issued.
        assert!(runner.accept(envelope(TaskAction::Regenerate, g1, "old")).is_none());

        let completion = runner
            .accept(envelope(TaskAction::Modify, g2, "new"))
            .expect("fresh completion");
        assert_eq!(completion.action, TaskAction::Modify);
        match completion.outcome {
            TaskOutcome::ItineraryReady(it) => assert_eq!(it.trip_title, "new"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn completions_resolve_in_dispatch_order_when_applied_in_order() {
        let mut runner = runner();
        let g1 = runner.begin(TaskAction::Generate).expect("generate");
        let completion = runner
            .accept(envelope(TaskAction::Generate, g1, "first"))
            .expect("fresh");
        assert_eq!(completion.action, TaskAction::Generate);
        assert!(!runner.is_busy());
    }

    #[test]
    fn invalidate_all_makes_outstanding_completions_stale() {
        let mut runner = runner();
        let g1 = runner.begin(TaskAction::Generate).expect("generate");
        runner.invalidate_all();
        assert!(!runner.is_busy());
        assert!(runner.accept(envelope(TaskAction::Generate, g1, "late")).is_none());
    }

    #[test]
    fn services_fence_is_independent_of_itinerary_fence() {
        let mut runner = runner();
        let services_generation = runner.begin(TaskAction::SearchServices).expect("services");
        let _ = runner.begin(TaskAction::Modify).expect("modify");

        let completion = runner
            .accept(CompletionEnvelope {
                action: TaskAction::SearchServices,
                generation: services_generation,
                outcome: TaskOutcome::ServicesReady(ServiceCatalog {
                    guides: Vec::new(),
                    vehicles: Vec::new(),
                }),
            })
            .expect("services completion survives itinerary dispatches");
        assert_eq!(completion.action, TaskAction::SearchServices);
    }

    #[test]
    fn stale_completion_does_not_clear_a_newer_in_flight_dispatch() {
        let mut runner = runner();
        let g1 = runner.begin(TaskAction::Modify).expect("first modify");
        runner.invalidate_all();
        let g2 = runner.begin(TaskAction::Modify).expect("second modify");

        assert!(runner.accept(envelope(TaskAction::Modify, g1, "old")).is_none());
        assert!(runner.is_pending(TaskAction::Modify));

        assert!(runner.accept(envelope(TaskAction::Modify, g2, "new")).is_some());
        assert!(!runner.is_pending(TaskAction::Modify));
    }

    #[test]
    fn dispatch_runs_worker_and_poll_delivers_completion() {
        let mut runner = runner();
        runner
            .dispatch_generate(UserPreferences {
                destination: "Tokyo".to_string(),
                days: 1,
                budget: BudgetTier::Economy,
                interests: vec!["food".to_string()],
            })
            .expect("dispatch");
        assert!(runner.is_busy());

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            if let Some(completion) = runner.poll() {
                assert_eq!(completion.action, TaskAction::Generate);
                match completion.outcome {
                    TaskOutcome::GenerationFailed(_) => break,
                    other => panic!("unexpected outcome: {other:?}"),
                }
            }
            assert!(std::time::Instant::now() < deadline, "worker never completed");
            thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(!runner.is_busy());
    }
}
