use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tripsmith::domain::{
    BudgetTier, DayPlan, Dining, Itinerary, ServiceCatalog, UserPreferences,
};
use tripsmith::i18n::Language;
use tripsmith::provider::{ContentProvider, ProviderError};
use tripsmith::tasks::{AsyncTaskRunner, TaskAction, TaskCompletion, TaskError, TaskOutcome};

fn preferences(destination: &str) -> UserPreferences {
    UserPreferences {
        destination: destination.to_string(),
        days: 2,
        budget: BudgetTier::Economy,
        interests: vec!["food".to_string()],
    }
}

fn itinerary(title: &str) -> Itinerary {
    Itinerary {
        destination: title.to_string(),
        duration: 1,
        budget: BudgetTier::Economy,
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

/// Each generate call blocks until the test releases one gate; the result
/// is titled after the requested destination so completions are
/// distinguishable. Modify answers immediately.
struct GatedProvider {
    gates: Mutex<VecDeque<Receiver<()>>>,
}

impl GatedProvider {
    fn with_gates(count: usize) -> (Arc<Self>, Vec<Sender<()>>) {
        let mut gates = VecDeque::new();
        let mut releases = Vec::new();
        for _ in 0..count {
            let (tx, rx) = mpsc::channel();
            gates.push_back(rx);
            releases.push(tx);
        }
        (
            Arc::new(Self {
                gates: Mutex::new(gates),
            }),
            releases,
        )
    }
}

impl ContentProvider for GatedProvider {
    fn generate_itinerary(
        &self,
        preferences: &UserPreferences,
        _language: Language,
    ) -> Result<Itinerary, ProviderError> {
        let gate = self
            .gates
            .lock()
            .expect("gate lock")
            .pop_front()
            .expect("a gate per generate call");
        if gate.recv().is_err() {
            // Gate dropped without a release: the test no longer cares.
            return Err(ProviderError::EmptyResponse);
        }
        Ok(itinerary(&preferences.destination))
    }

    fn modify_itinerary(
        &self,
        _current: &Itinerary,
        instruction: &str,
        _language: Language,
    ) -> Result<Itinerary, ProviderError> {
        Ok(itinerary(instruction))
    }

    fn search_services(
        &self,
        _destination: &str,
        _duration_days: u32,
        _language: Language,
    ) -> Result<ServiceCatalog, ProviderError> {
        Ok(ServiceCatalog {
            guides: Vec::new(),
            vehicles: Vec::new(),
        })
    }
}

fn poll_next(runner: &mut AsyncTaskRunner) -> TaskCompletion {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(completion) = runner.poll() {
            return completion;
        }
        assert!(Instant::now() < deadline, "no completion arrived");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn itinerary_title(completion: &TaskCompletion) -> &str {
    match &completion.outcome {
        TaskOutcome::ItineraryReady(itinerary) => &itinerary.trip_title,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn dispatching_a_pending_action_again_is_rejected() {
    let (provider, _releases) = GatedProvider::with_gates(1);
    let mut runner = AsyncTaskRunner::new(provider, Language::En);

    runner.dispatch_generate(preferences("Tokyo")).expect("first");
    assert_eq!(
        runner.dispatch_generate(preferences("Tokyo")),
        Err(TaskError::SlotBusy("generate"))
    );
}

#[test]
fn slow_regenerate_is_discarded_once_a_modify_dispatches() {
    let (provider, releases) = GatedProvider::with_gates(1);
    let mut runner = AsyncTaskRunner::new(provider, Language::En);

    runner
        .dispatch_regenerate(preferences("old"))
        .expect("regenerate");
    runner
        .dispatch_modify(itinerary("base"), "revised".to_string())
        .expect("modify");

    // The modify resolves first and is the current itinerary generation.
    let completion = poll_next(&mut runner);
    assert_eq!(completion.action, TaskAction::Modify);
    assert_eq!(itinerary_title(&completion), "revised");

    // Now the slow regenerate lands; it must be swallowed, observable as
    // the pending slot clearing with no completion surfacing.
    releases[0].send(()).expect("release regenerate");
    let deadline = Instant::now() + Duration::from_secs(5);
    while runner.is_pending(TaskAction::Regenerate) {
        assert!(runner.poll().is_none(), "stale regenerate was delivered");
        assert!(Instant::now() < deadline, "stale completion never arrived");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(runner.poll().is_none());
    assert!(!runner.is_busy());
}

#[test]
fn invalidate_all_discards_a_completion_already_in_flight() {
    let (provider, releases) = GatedProvider::with_gates(2);
    let mut runner = AsyncTaskRunner::new(provider, Language::En);

    runner.dispatch_generate(preferences("old")).expect("first");
    runner.invalidate_all();
    assert!(!runner.is_busy());

    runner.dispatch_generate(preferences("new")).expect("second");

    // Release the invalidated worker first; whether its envelope arrives
    // before or after the fresh one, only the fresh completion surfaces.
    releases[0].send(()).expect("release first");
    releases[1].send(()).expect("release second");

    let completion = poll_next(&mut runner);
    assert_eq!(completion.action, TaskAction::Generate);
    assert_eq!(itinerary_title(&completion), "new");
    assert!(runner.poll().is_none());
}

#[test]
fn services_dispatch_is_unaffected_by_itinerary_traffic() {
    let (provider, _releases) = GatedProvider::with_gates(1);
    let mut runner = AsyncTaskRunner::new(provider, Language::En);

    runner.dispatch_generate(preferences("Tokyo")).expect("generate");
    runner
        .dispatch_search_services("Tokyo".to_string(), 2)
        .expect("services");

    let completion = poll_next(&mut runner);
    assert_eq!(completion.action, TaskAction::SearchServices);
    assert!(matches!(completion.outcome, TaskOutcome::ServicesReady(_)));
    assert!(runner.is_pending(TaskAction::Generate));
}
