use crate::booking::BookingSelectionStore;
use crate::config::Settings;
use crate::domain::{BudgetTier, DayPlan, Service, UserPreferences};
use crate::i18n::{Language, TextKey};
use crate::map::{CanvasSurface, MapView, Viewport};
use crate::provider::GeminiClient;
use crate::snapshot::{snapshot_db_path, SnapshotStore, TripSnapshot};
use crate::workflow::{Page, WorkflowController};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

const BUSY_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);
const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(120);
const WORLD_VIEWPORT: Viewport = Viewport {
    x_bounds: [-180.0, 180.0],
    y_bounds: [-90.0, 90.0],
};

pub const INTEREST_OPTIONS: [&str; 8] = [
    "history",
    "food",
    "nature",
    "art",
    "adventure",
    "shopping",
    "nightlife",
    "relaxation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomeField {
    Destination,
    Days,
    Budget,
    Interests,
}

#[derive(Debug, Clone)]
struct HomeForm {
    destination: String,
    days: String,
    budget_index: usize,
    interest_cursor: usize,
    selected_interests: [bool; INTEREST_OPTIONS.len()],
    focus: HomeField,
}

impl HomeForm {
    fn new() -> Self {
        Self {
            destination: String::new(),
            days: "3".to_string(),
            budget_index: 1,
            interest_cursor: 0,
            selected_interests: [false; INTEREST_OPTIONS.len()],
            focus: HomeField::Destination,
        }
    }

    fn budget(&self) -> BudgetTier {
        match self.budget_index {
            0 => BudgetTier::Economy,
            1 => BudgetTier::Comfort,
            _ => BudgetTier::Luxury,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            HomeField::Destination => HomeField::Days,
            HomeField::Days => HomeField::Budget,
            HomeField::Budget => HomeField::Interests,
            HomeField::Interests => HomeField::Destination,
        };
    }

    /// Unparseable day counts become 0 so the submission gate rejects
    /// them with its own message.
    fn preferences(&self) -> UserPreferences {
        UserPreferences {
            destination: self.destination.trim().to_string(),
            days: self.days.trim().parse().unwrap_or(0),
            budget: self.budget(),
            interests: INTEREST_OPTIONS
                .iter()
                .zip(self.selected_interests.iter())
                .filter(|(_, selected)| **selected)
                .map(|(label, _)| label.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BookingColumn {
    Guides,
    Vehicles,
}

struct AppState {
    controller: WorkflowController,
    snapshot_store: SnapshotStore,
    form: HomeForm,
    itinerary_cursor: usize,
    booking_cursor: usize,
    booking_column: BookingColumn,
    modify_input: Option<String>,
    map_view: Option<MapView<CanvasSurface>>,
    status: Option<String>,
    spinner_index: usize,
    last_spinner_tick: Instant,
}

impl AppState {
    fn new(controller: WorkflowController, snapshot_store: SnapshotStore) -> Self {
        Self {
            controller,
            snapshot_store,
            form: HomeForm::new(),
            itinerary_cursor: 0,
            booking_cursor: 0,
            booking_column: BookingColumn::Guides,
            modify_input: None,
            map_view: None,
            status: None,
            spinner_index: 0,
            last_spinner_tick: Instant::now(),
        }
    }

    fn language(&self) -> Language {
        self.controller.language()
    }

    fn text(&self, key: TextKey) -> &'static str {
        key.text(self.language())
    }

    fn spinner_frame(&self) -> &'static str {
        BUSY_FRAMES[self.spinner_index % BUSY_FRAMES.len()]
    }

    fn advance_spinner_if_needed(&mut self) {
        if self.controller.state().is_busy()
            && self.last_spinner_tick.elapsed() >= SPINNER_TICK_INTERVAL
        {
            self.spinner_index = (self.spinner_index + 1) % BUSY_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }

    /// The map surface lives exactly as long as the Detail page is
    /// mounted; leaving it on any path drops the surface with the view.
    fn reconcile_map(&mut self) {
        if self.controller.page() != Page::Detail {
            self.map_view = None;
            return;
        }
        if self.map_view.is_none() {
            self.map_view = Some(MapView::mount(CanvasSurface::new()));
        }
        let activities = self
            .controller
            .selected_day_plan()
            .map(|plan| plan.activities.clone())
            .unwrap_or_default();
        if let Some(view) = &mut self.map_view {
            view.sync(&activities);
        }
    }

    fn save_final_snapshot(&mut self) {
        let Some(itinerary) = self.controller.itinerary().cloned() else {
            return;
        };
        let snapshot = TripSnapshot {
            booked_services: self.controller.booking().booked(),
            total_service_cost: self.controller.total_service_cost(),
            saved_at: chrono::Local::now().timestamp(),
            itinerary,
        };
        self.status = Some(match self.snapshot_store.save(&snapshot) {
            Ok(()) => self.text(TextKey::StatusSnapshotSaved).to_string(),
            Err(err) => format!("{}: {err}", self.text(TextKey::StatusSnapshotFailed)),
        });
    }
}

pub fn run(settings: &Settings, state_root: &Path) -> Result<(), String> {
    let provider = GeminiClient::from_env(settings).map_err(|err| err.to_string())?;
    let controller = WorkflowController::new(
        Arc::new(provider),
        settings.language,
        Some(state_root.to_path_buf()),
    );
    let snapshot_store =
        SnapshotStore::open(&snapshot_db_path(state_root)).map_err(|err| err.to_string())?;
    let mut state = AppState::new(controller, snapshot_store);

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut state);
    teardown_terminal(&mut terminal)?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
) -> Result<(), String> {
    loop {
        state.advance_spinner_if_needed();
        state.controller.pump();
        state.reconcile_map();
        draw_ui(terminal, state)?;

        if !event::poll(UI_POLL_INTERVAL).map_err(|e| format!("failed to poll events: {e}"))? {
            continue;
        }
        let Event::Key(key) = event::read().map_err(|e| format!("failed to read event: {e}"))?
        else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            break;
        }
        handle_key(state, key);
    }
    Ok(())
}

fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        state.controller.reset();
        state.form = HomeForm::new();
        state.itinerary_cursor = 0;
        state.booking_cursor = 0;
        state.booking_column = BookingColumn::Guides;
        state.modify_input = None;
        state.status = None;
        return;
    }
    if state.controller.state().is_busy() {
        return;
    }
    if state.controller.state().error.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            state.controller.dismiss_error();
        }
        return;
    }
    if state.modify_input.is_some() {
        handle_modify_input_key(state, key);
        return;
    }
    match state.controller.page() {
        Page::Home => handle_home_key(state, key),
        Page::Itinerary => handle_itinerary_key(state, key),
        Page::Detail => handle_detail_key(state, key),
        Page::Booking => handle_booking_key(state, key),
        Page::Final => handle_final_key(state, key),
    }
}

fn handle_modify_input_key(state: &mut AppState, key: KeyEvent) {
    let Some(input) = state.modify_input.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            state.modify_input = None;
        }
        KeyCode::Enter => {
            let instruction = input.trim().to_string();
            state.modify_input = None;
            state.controller.modify(instruction);
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) => {
            input.push(c);
        }
        _ => {}
    }
}

fn handle_home_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => state.form.next_focus(),
        KeyCode::Enter => {
            let preferences = state.form.preferences();
            state.controller.submit_preferences(preferences);
        }
        KeyCode::Backspace => match state.form.focus {
            HomeField::Destination => {
                state.form.destination.pop();
            }
            HomeField::Days => {
                state.form.days.pop();
            }
            _ => {}
        },
        KeyCode::Left => match state.form.focus {
            HomeField::Budget => {
                state.form.budget_index = state.form.budget_index.saturating_sub(1);
            }
            HomeField::Interests => {
                state.form.interest_cursor = state.form.interest_cursor.saturating_sub(1);
            }
            _ => {}
        },
        KeyCode::Right => match state.form.focus {
            HomeField::Budget => {
                state.form.budget_index = (state.form.budget_index + 1).min(2);
            }
            HomeField::Interests => {
                state.form.interest_cursor =
                    (state.form.interest_cursor + 1).min(INTEREST_OPTIONS.len() - 1);
            }
            _ => {}
        },
        KeyCode::Char(' ') if state.form.focus == HomeField::Interests => {
            let cursor = state.form.interest_cursor;
            state.form.selected_interests[cursor] = !state.form.selected_interests[cursor];
        }
        KeyCode::Char(c) => match state.form.focus {
            HomeField::Destination => state.form.destination.push(c),
            HomeField::Days if c.is_ascii_digit() => state.form.days.push(c),
            _ => {}
        },
        _ => {}
    }
}

fn handle_itinerary_key(state: &mut AppState, key: KeyEvent) {
    let day_count = state
        .controller
        .itinerary()
        .map_or(0, |it| it.daily_plans.len());
    match key.code {
        KeyCode::Up => state.itinerary_cursor = state.itinerary_cursor.saturating_sub(1),
        KeyCode::Down => {
            state.itinerary_cursor =
                (state.itinerary_cursor + 1).min(day_count.saturating_sub(1));
        }
        KeyCode::Enter => state.controller.select_day(state.itinerary_cursor),
        KeyCode::Char('r') => state.controller.regenerate(),
        KeyCode::Char('m') => state.modify_input = Some(String::new()),
        KeyCode::Char('f') => state.controller.finalize(),
        _ => {}
    }
}

fn handle_detail_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.controller.back_to_itinerary(),
        KeyCode::Char('b') => state.controller.request_services(),
        _ => {}
    }
}

fn handle_booking_key(state: &mut AppState, key: KeyEvent) {
    let column_len = |state: &AppState, column: BookingColumn| {
        state.controller.services().map_or(0, |catalog| match column {
            BookingColumn::Guides => catalog.guides.len(),
            BookingColumn::Vehicles => catalog.vehicles.len(),
        })
    };
    match key.code {
        KeyCode::Left => {
            state.booking_column = BookingColumn::Guides;
            state.booking_cursor = state
                .booking_cursor
                .min(column_len(state, BookingColumn::Guides).saturating_sub(1));
        }
        KeyCode::Right => {
            state.booking_column = BookingColumn::Vehicles;
            state.booking_cursor = state
                .booking_cursor
                .min(column_len(state, BookingColumn::Vehicles).saturating_sub(1));
        }
        KeyCode::Up => state.booking_cursor = state.booking_cursor.saturating_sub(1),
        KeyCode::Down => {
            let len = column_len(state, state.booking_column);
            state.booking_cursor = (state.booking_cursor + 1).min(len.saturating_sub(1));
        }
        KeyCode::Enter => {
            let service = state.controller.services().and_then(|catalog| {
                let list = match state.booking_column {
                    BookingColumn::Guides => &catalog.guides,
                    BookingColumn::Vehicles => &catalog.vehicles,
                };
                list.get(state.booking_cursor).cloned()
            });
            if let Some(service) = service {
                state.controller.book(service);
            }
        }
        KeyCode::Char('f') => state.controller.finalize(),
        _ => {}
    }
}

fn handle_final_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('s') {
        state.save_final_snapshot();
    }
}

fn draw_ui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &AppState,
) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(10),
                    Constraint::Length(3),
                ])
                .split(frame.area());

            draw_header(frame, state, sections[0]);
            draw_body(frame, state, sections[1]);
            draw_status(frame, state, sections[2]);
        })
        .map_err(|e| format!("failed to render UI: {e}"))?;
    Ok(())
}

fn page_title(state: &AppState) -> &'static str {
    match state.controller.page() {
        Page::Home => state.text(TextKey::TitleHome),
        Page::Itinerary => state.text(TextKey::TitleItinerary),
        Page::Detail => state.text(TextKey::TitleDetail),
        Page::Booking => state.text(TextKey::TitleBooking),
        Page::Final => state.text(TextKey::TitleFinal),
    }
}

fn draw_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let header = Paragraph::new(vec![Line::raw(format!(
        "{} - {}",
        state.text(TextKey::AppTitle),
        page_title(state)
    ))])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, area);
}

fn draw_body(frame: &mut Frame, state: &AppState, area: Rect) {
    if let Some(error) = &state.controller.state().error {
        let overlay = Paragraph::new(vec![
            Line::styled(
                state.text(TextKey::ErrorHeading),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw(error.message.clone()),
            Line::raw(""),
            Line::styled(
                state.text(TextKey::ErrorRecoveryHint),
                Style::default().fg(Color::Gray),
            ),
        ])
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
        frame.render_widget(overlay, area);
        return;
    }
    if let Some(message) = &state.controller.state().busy {
        let overlay = Paragraph::new(format!("{} {}", state.spinner_frame(), message))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Magenta));
        frame.render_widget(overlay, area);
        return;
    }
    match state.controller.page() {
        Page::Home => draw_home(frame, state, area),
        Page::Itinerary => draw_itinerary(frame, state, area),
        Page::Detail => draw_detail(frame, state, area),
        Page::Booking => draw_booking(frame, state, area),
        Page::Final => draw_final(frame, state, area),
    }
}

fn focus_marker(active: bool) -> &'static str {
    if active {
        "> "
    } else {
        "  "
    }
}

fn draw_home(frame: &mut Frame, state: &AppState, area: Rect) {
    let form = &state.form;
    let budget_label = match form.budget() {
        BudgetTier::Economy => state.text(TextKey::BudgetEconomy),
        BudgetTier::Comfort => state.text(TextKey::BudgetComfort),
        BudgetTier::Luxury => state.text(TextKey::BudgetLuxury),
    };
    let interests_line = INTEREST_OPTIONS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let mark = if form.selected_interests[index] { "x" } else { " " };
            let cursor = if form.focus == HomeField::Interests && form.interest_cursor == index {
                "*"
            } else {
                " "
            };
            format!("{cursor}[{mark}] {label}")
        })
        .collect::<Vec<_>>()
        .join(" ");

    let lines = vec![
        Line::raw(format!(
            "{}{}: {}",
            focus_marker(form.focus == HomeField::Destination),
            state.text(TextKey::LabelDestination),
            form.destination
        )),
        Line::raw(format!(
            "{}{}: {}",
            focus_marker(form.focus == HomeField::Days),
            state.text(TextKey::LabelDays),
            form.days
        )),
        Line::raw(format!(
            "{}{}: {}",
            focus_marker(form.focus == HomeField::Budget),
            state.text(TextKey::LabelBudget),
            budget_label
        )),
        Line::raw(format!(
            "{}{}: {}",
            focus_marker(form.focus == HomeField::Interests),
            state.text(TextKey::LabelInterests),
            interests_line
        )),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn draw_itinerary(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(itinerary) = state.controller.itinerary() else {
        return;
    };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    let summary = Paragraph::new(vec![
        Line::styled(
            itinerary.trip_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(itinerary.overall_summary.clone()),
    ])
    .block(Block::default().borders(Borders::ALL))
    .wrap(Wrap { trim: false });
    frame.render_widget(summary, sections[0]);

    let items: Vec<ListItem> = itinerary
        .daily_plans
        .iter()
        .map(|plan| ListItem::new(format!("Day {} - {} ({})", plan.day, plan.title, plan.date)))
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(state.itinerary_cursor.min(items.len().saturating_sub(1))));
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, sections[1], &mut list_state);

    if let Some(input) = &state.modify_input {
        let hint = state.text(TextKey::HintModifyInput);
        let overlay = Paragraph::new(format!("{hint}\n> {input}"))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Green));
        let input_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(4),
            width: area.width,
            height: 4.min(area.height),
        };
        frame.render_widget(overlay, input_area);
    }
}

fn day_plan_lines(state: &AppState, plan: &DayPlan) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            format!("Day {} - {} ({})", plan.day, plan.title, plan.date),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(plan.summary.clone()),
        Line::raw(""),
    ];
    for activity in &plan.activities {
        lines.push(Line::raw(format!(
            "{}-{} {} @ {}",
            activity.start_time, activity.end_time, activity.name, activity.location
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!(
        "{}: {}  {}: {}",
        state.text(TextKey::LabelLunch),
        plan.dining.lunch,
        state.text(TextKey::LabelDinner),
        plan.dining.dinner
    )));
    lines.push(Line::raw(format!(
        "{}: {}",
        state.text(TextKey::LabelTransport),
        plan.transport
    )));
    if let Some(hotel) = &plan.hotel_recommendation {
        lines.push(Line::raw(format!(
            "{}: {} ({} {:.1}, {:.0}{})",
            state.text(TextKey::LabelHotel),
            hotel.name,
            state.text(TextKey::LabelRating),
            hotel.rating,
            hotel.price_per_night,
            state.text(TextKey::LabelPerNight)
        )));
    }
    lines
}

fn draw_detail(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(plan) = state.controller.selected_day_plan() else {
        return;
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let details = Paragraph::new(day_plan_lines(state, plan))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(details, columns[0]);

    draw_map(frame, state, columns[1]);
}

fn draw_map(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let Some(surface) = state.map_view.as_ref().map(MapView::surface) else {
        frame.render_widget(block, area);
        return;
    };
    if surface.placeholder() {
        let placeholder = Paragraph::new(state.text(TextKey::MapNoLocatableActivities))
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(placeholder, area);
        return;
    }
    let viewport = surface.viewport().unwrap_or(WORLD_VIEWPORT);
    let canvas = Canvas::default()
        .block(block)
        .x_bounds(viewport.x_bounds)
        .y_bounds(viewport.y_bounds)
        .paint(|ctx| {
            for (from, to) in surface.route_segments() {
                ctx.draw(&CanvasLine {
                    x1: from.lng,
                    y1: from.lat,
                    x2: to.lng,
                    y2: to.lat,
                    color: Color::Cyan,
                });
            }
            for marker in surface.markers() {
                ctx.print(
                    marker.point.lng,
                    marker.point.lat,
                    format!("{} {}", marker.position, marker.name),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn service_items(
    state: &AppState,
    services: &[Service],
    booking: &BookingSelectionStore,
) -> Vec<ListItem<'static>> {
    services
        .iter()
        .map(|service| {
            let booked = if booking.is_booked(&service.id) {
                format!(" [{}]", state.text(TextKey::LabelBooked))
            } else {
                String::new()
            };
            ListItem::new(format!(
                "{} - {:.0}{}{}",
                service.name,
                service.price_per_day,
                state.text(TextKey::LabelPerDay),
                booked
            ))
        })
        .collect()
}

fn draw_booking(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(catalog) = state.controller.services() else {
        return;
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let booking = state.controller.booking();
    for (column, services, label, area) in [
        (
            BookingColumn::Guides,
            &catalog.guides,
            state.text(TextKey::LabelGuides),
            columns[0],
        ),
        (
            BookingColumn::Vehicles,
            &catalog.vehicles,
            state.text(TextKey::LabelVehicles),
            columns[1],
        ),
    ] {
        let items = service_items(state, services, booking);
        let selected = (state.booking_column == column && !services.is_empty())
            .then(|| state.booking_cursor.min(services.len() - 1));
        let mut list_state = ListState::default();
        list_state.select(selected);
        let list = List::new(items)
            .block(Block::default().title(label).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

fn draw_final(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(itinerary) = state.controller.itinerary() else {
        return;
    };
    let booking = state.controller.booking();
    let mut lines = vec![
        Line::styled(
            itinerary.trip_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!(
            "{} - {} {}",
            itinerary.destination,
            itinerary.duration,
            state.text(TextKey::LabelDays)
        )),
        Line::raw(""),
    ];
    for plan in &itinerary.daily_plans {
        lines.push(Line::raw(format!(
            "Day {} - {} ({} activities)",
            plan.day,
            plan.title,
            plan.activities.len()
        )));
    }
    lines.push(Line::raw(""));
    if booking.is_empty() {
        lines.push(Line::raw(state.text(TextKey::LabelNothingBooked)));
    } else {
        for service in booking.guide().into_iter().chain(booking.vehicle()) {
            lines.push(Line::raw(format!(
                "{}: {} - {:.0}{}",
                service.category,
                service.name,
                service.price_per_day,
                state.text(TextKey::LabelPerDay)
            )));
        }
        lines.push(Line::raw(format!(
            "{}: {:.0}",
            state.text(TextKey::LabelTotalCost),
            state.controller.total_service_cost()
        )));
    }
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn page_hint(state: &AppState) -> &'static str {
    if state.modify_input.is_some() {
        return state.text(TextKey::HintModifyInput);
    }
    match state.controller.page() {
        Page::Home => state.text(TextKey::HintHome),
        Page::Itinerary => state.text(TextKey::HintItinerary),
        Page::Detail => state.text(TextKey::HintDetail),
        Page::Booking => state.text(TextKey::HintBooking),
        Page::Final => state.text(TextKey::HintFinal),
    }
}

fn draw_status(frame: &mut Frame, state: &AppState, area: Rect) {
    let line = match &state.status {
        Some(status) => format!("{status} | {}", page_hint(state)),
        None => page_hint(state).to_string(),
    };
    let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)
        .map_err(|e| format!("failed to enter alternate screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| format!("failed to initialize terminal: {e}"))
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)
        .map_err(|e| format!("failed to leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("failed to restore cursor: {e}"))?;
    Ok(())
}
