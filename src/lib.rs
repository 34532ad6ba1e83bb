use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::{mpsc::Sender, Arc};
use std::time::{Duration, Instant};

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use ratatui::widgets::Block;
use tracing::{debug, info, warn};

pub mod backend;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod error_display;
mod help_strings;
pub mod image_export;
mod render;
pub mod request;
pub mod results;
pub mod selection;
pub mod session;
pub mod telemetry;
pub mod widgets;

pub use backend::{ChartBackend, HttpBackend};
pub use cache::CacheManager;
pub use cli::{render_options_markdown, Args, DatasetFormat};
pub use config::{
    rgb_to_256_color, rgb_to_basic_ansi, AppConfig, ColorParser, ConfigManager, Theme,
};
pub use error::{FailureKind, SessionError, SessionResult};
pub use session::{Phase, SessionState};

use catalog::find_entry;
use error_display::{user_message_from_report, user_message_from_session, Operation};
use render::catalog_view::CatalogView;
use render::context::RenderContext;
use render::layout::app_layout;
use render::overlays;
use render::results_view::ResultsView;
use render::selection_view::SelectionView;
use request::{CatalogResponse, DatasetHandle, GenerateResponse};
use session::{decode_catalog, decode_generate};
use widgets::controls::Controls;
use widgets::debug::DebugState;
use widgets::text_input::{TextInput, TextInputEvent};

/// Application name used for cache directory and other app-specific paths
pub const APP_NAME: &str = "plotpick";

const DATASET_HISTORY_LIMIT: usize = 50;
const RESULTS_PAGE: u16 = 10;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16), // resized (width, height)
    OpenDataset(PathBuf),
    FetchCatalog,
    /// Worker reply for the catalog request, with the time it took.
    CatalogFetched(SessionResult<CatalogResponse>, Duration),
    Generate,
    /// Worker reply for the generate request, with the time it took.
    GraphsGenerated(SessionResult<GenerateResponse>, Duration),
    SaveImages,
    Tick,
    Exit,
    Crash(String),
}

/// Pane that owns the cursor keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Catalog,
    Selections,
    Results,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Catalog => Pane::Selections,
            Pane::Selections => Pane::Results,
            Pane::Results => Pane::Catalog,
        }
    }

    fn prev(self) -> Self {
        match self {
            Pane::Catalog => Pane::Results,
            Pane::Selections => Pane::Catalog,
            Pane::Results => Pane::Selections,
        }
    }
}

#[derive(Default)]
pub struct ErrorModal {
    pub active: bool,
    pub message: String,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: String) {
        self.active = true;
        self.message = message;
    }

    pub fn hide(&mut self) {
        self.active = false;
        self.message.clear();
    }
}

#[derive(Default)]
pub struct SuccessModal {
    pub active: bool,
    pub message: String,
}

impl SuccessModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: String) {
        self.active = true;
        self.message = message;
    }

    pub fn hide(&mut self) {
        self.active = false;
        self.message.clear();
    }
}

pub struct App {
    events: Sender<AppEvent>,
    session: SessionState,
    backend: Arc<dyn ChartBackend>,
    theme: Theme,
    cache: CacheManager,
    image_dir: PathBuf,
    focus: Pane,
    catalog_cursor: usize,
    selection_cursor: usize,
    results_scroll: u16,
    /// Largest results scroll offset, as measured by the last render.
    results_max_scroll: u16,
    dataset_prompt: TextInput,
    prompt_active: bool,
    error_modal: ErrorModal,
    success_modal: SuccessModal,
    show_help: bool,
    help_scroll: u16,
    status: Option<String>,
    throbber_frame: u8,
    use_unicode_throbber: bool,
    pub debug: DebugState,
}

impl App {
    pub fn new(events: Sender<AppEvent>, backend: Arc<dyn ChartBackend>) -> App {
        let theme = Theme::from_config(&AppConfig::default().theme).unwrap_or_else(|e| {
            warn!(error = %e, "failed to build default theme, using fallback");
            Theme::default()
        });
        Self::new_with_config(events, backend, theme, AppConfig::default())
    }

    pub fn new_with_config(
        events: Sender<AppEvent>,
        backend: Arc<dyn ChartBackend>,
        theme: Theme,
        app_config: AppConfig,
    ) -> App {
        let cache = CacheManager::new(APP_NAME).unwrap_or_else(|e| {
            warn!(error = %e, "could not initialize cache manager");
            CacheManager::with_dir(std::env::temp_dir().join(APP_NAME))
        });

        let dataset_prompt = TextInput::new()
            .with_theme(&theme)
            .with_history(cache::DATASET_HISTORY)
            .with_history_limit(DATASET_HISTORY_LIMIT);

        let use_unicode_throbber = std::env::var("LANG")
            .map(|l| l.to_uppercase().contains("UTF-8"))
            .unwrap_or(false);

        let debug = DebugState {
            enabled: app_config.debug.enabled,
            ..DebugState::default()
        };

        App {
            events,
            session: SessionState::new(),
            backend,
            theme,
            cache,
            image_dir: app_config.export.image_dir_or_default(),
            focus: Pane::default(),
            catalog_cursor: 0,
            selection_cursor: 0,
            results_scroll: 0,
            results_max_scroll: 0,
            dataset_prompt,
            prompt_active: false,
            error_modal: ErrorModal::new(),
            success_modal: SuccessModal::new(),
            show_help: false,
            help_scroll: 0,
            status: None,
            throbber_frame: 0,
            use_unicode_throbber,
            debug,
        }
    }

    /// Use a specific cache directory (dataset history) instead of the user cache.
    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        self.cache = cache;
        self
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn focus(&self) -> Pane {
        self.focus
    }

    pub fn catalog_cursor(&self) -> usize {
        self.catalog_cursor
    }

    pub fn selection_cursor(&self) -> usize {
        self.selection_cursor
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn prompt_active(&self) -> bool {
        self.prompt_active
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Message of the visible error modal, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_modal
            .active
            .then_some(self.error_modal.message.as_str())
    }

    /// Message of the visible success modal, if any.
    pub fn success_message(&self) -> Option<&str> {
        self.success_modal
            .active
            .then_some(self.success_modal.message.as_str())
    }

    /// Add one selection slot per label, e.g. from repeated `--graph` flags.
    pub fn prefill_selections(&mut self, labels: &[String]) {
        for label in labels {
            let index = self.session.add_selection();
            if let Err(e) = self.session.update_selection(index, label) {
                warn!(error = %e, label = %label, "could not prefill selection");
            }
        }
    }

    pub fn event(&mut self, event: AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(&key),
            AppEvent::Resize(_, _) => None,
            AppEvent::OpenDataset(path) => {
                self.open_dataset(path);
                None
            }
            AppEvent::FetchCatalog => {
                self.start_catalog_fetch();
                None
            }
            AppEvent::CatalogFetched(outcome, elapsed) => {
                self.debug.last_request_ms = Some(elapsed.as_millis());
                match self.session.finish_catalog_fetch(outcome) {
                    Ok(count) => {
                        self.catalog_cursor = 0;
                        self.results_scroll = 0;
                        self.set_status(format!("Loaded {} graph option(s)", count));
                    }
                    Err(e) => self.show_session_error(&e, Operation::FetchCatalog),
                }
                None
            }
            AppEvent::Generate => {
                self.start_generate();
                None
            }
            AppEvent::GraphsGenerated(outcome, elapsed) => {
                self.debug.last_request_ms = Some(elapsed.as_millis());
                match self.session.finish_generate(outcome) {
                    Ok(count) => {
                        self.results_scroll = 0;
                        self.focus = Pane::Results;
                        self.set_status(format!("Generated {} graph(s)", count));
                    }
                    Err(e) => self.show_session_error(&e, Operation::Generate),
                }
                None
            }
            AppEvent::SaveImages => {
                self.save_images();
                None
            }
            AppEvent::Tick => {
                self.throbber_frame = self.throbber_frame.wrapping_add(1);
                None
            }
            AppEvent::Exit => None,
            AppEvent::Crash(msg) => Some(AppEvent::Crash(msg)),
        }
    }

    fn set_status(&mut self, status: String) {
        debug!(status = %status, "status");
        self.status = Some(status);
    }

    fn show_session_error(&mut self, err: &SessionError, op: Operation) {
        self.error_modal.show(user_message_from_session(err, op));
    }

    fn open_dataset(&mut self, path: PathBuf) {
        let dataset = match DatasetHandle::open(&path) {
            Ok(dataset) => dataset,
            Err(e) => {
                self.error_modal.show(e.to_string());
                return;
            }
        };
        let name = dataset.file_name().to_string();
        match self.session.set_dataset(dataset) {
            Ok(()) => {
                if self.session.phase() == Phase::Idle {
                    self.catalog_cursor = 0;
                    self.results_scroll = 0;
                }
                self.set_status(format!("Opened {}", name));
            }
            Err(e) => self.show_session_error(&e, Operation::FetchCatalog),
        }
    }

    fn start_catalog_fetch(&mut self) {
        let request = match self.session.begin_catalog_fetch() {
            Ok(request) => request,
            Err(e) => {
                self.show_session_error(&e, Operation::FetchCatalog);
                return;
            }
        };
        info!(file = request.file.file_name(), "fetching graph options");
        let backend = Arc::clone(&self.backend);
        let tx = self.events.clone();
        std::thread::spawn(move || {
            let started = Instant::now();
            let outcome = decode_catalog(backend.fetch_catalog(&request).map_err(Into::into));
            // Receiver is gone only when the app is shutting down.
            let _ = tx.send(AppEvent::CatalogFetched(outcome, started.elapsed()));
        });
    }

    fn start_generate(&mut self) {
        let request = match self.session.begin_generate() {
            Ok(request) => request,
            Err(e) => {
                self.show_session_error(&e, Operation::Generate);
                return;
            }
        };
        info!(graphs = self.session.selections().len(), "generating graphs");
        let backend = Arc::clone(&self.backend);
        let tx = self.events.clone();
        std::thread::spawn(move || {
            let started = Instant::now();
            let outcome = decode_generate(backend.generate(&request).map_err(Into::into));
            let _ = tx.send(AppEvent::GraphsGenerated(outcome, started.elapsed()));
        });
    }

    fn save_images(&mut self) {
        let Some(results) = self.session.results().filter(|r| !r.is_empty()) else {
            self.error_modal
                .show("Generate graphs before saving images.".to_string());
            return;
        };
        match image_export::save_images(results, &self.image_dir) {
            Ok(summary) => {
                let message = summary.to_string();
                self.set_status(message.clone());
                self.success_modal.show(message);
            }
            Err(e) => self
                .error_modal
                .show(user_message_from_report(&e, Some(self.image_dir.as_path()))),
        }
    }

    fn open_prompt(&mut self) {
        let current = self
            .session
            .dataset()
            .map(|d| d.path().display().to_string())
            .unwrap_or_default();
        self.dataset_prompt.set_value(&current);
        self.dataset_prompt.set_focused(true);
        self.prompt_active = true;
    }

    fn close_prompt(&mut self) {
        self.dataset_prompt.set_focused(false);
        self.prompt_active = false;
    }

    /// Put the highlighted catalog entry into the current slot, adding a slot if none exist.
    fn assign_catalog_entry(&mut self) {
        let Some(label) = self
            .session
            .catalog()
            .get(self.catalog_cursor)
            .map(|entry| entry.label())
        else {
            return;
        };
        if self.session.selections().is_empty() {
            self.selection_cursor = self.session.add_selection();
        }
        match self.session.update_selection(self.selection_cursor, &label) {
            Ok(_) => self.debug.last_action = "assign_selection".to_string(),
            Err(e) => self.error_modal.show(e.to_string()),
        }
    }

    fn move_cursor(&mut self, down: bool, step: u16) {
        match self.focus {
            Pane::Catalog => {
                let len = self.session.catalog().len();
                self.catalog_cursor = step_cursor(self.catalog_cursor, len, down, step);
            }
            Pane::Selections => {
                let len = self.session.selections().len();
                self.selection_cursor = step_cursor(self.selection_cursor, len, down, step);
            }
            Pane::Results => {
                self.results_scroll = if down {
                    self.results_scroll
                        .saturating_add(step)
                        .min(self.results_max_scroll)
                } else {
                    self.results_scroll.saturating_sub(step)
                };
            }
        }
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        self.debug.on_key(event);

        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Exit);
        }

        // Modals take every key until dismissed
        if self.error_modal.active {
            if matches!(event.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_modal.hide();
            }
            return None;
        }
        if self.success_modal.active {
            if matches!(event.code, KeyCode::Esc | KeyCode::Enter) {
                self.success_modal.hide();
            }
            return None;
        }

        if self.prompt_active {
            return match self.dataset_prompt.handle_key(event, Some(&self.cache)) {
                TextInputEvent::Submit => {
                    let value = self.dataset_prompt.value().trim().to_string();
                    self.close_prompt();
                    if value.is_empty() {
                        None
                    } else {
                        Some(AppEvent::OpenDataset(PathBuf::from(value)))
                    }
                }
                TextInputEvent::Cancel => {
                    self.close_prompt();
                    None
                }
                TextInputEvent::None | TextInputEvent::HistoryChanged => None,
            };
        }

        if self.show_help {
            match event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                    self.help_scroll = 0;
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.help_scroll = self.help_scroll.saturating_add(1)
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.help_scroll = self.help_scroll.saturating_sub(1)
                }
                _ => {}
            }
            return None;
        }

        match event.code {
            KeyCode::Char('q') => Some(AppEvent::Exit),
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            KeyCode::Char('o') => {
                self.open_prompt();
                None
            }
            KeyCode::Char('f') => Some(AppEvent::FetchCatalog),
            KeyCode::Char('g') => Some(AppEvent::Generate),
            KeyCode::Char('s') => Some(AppEvent::SaveImages),
            KeyCode::Char('a') => {
                self.selection_cursor = self.session.add_selection();
                if !self.session.catalog().is_empty() {
                    self.focus = Pane::Catalog;
                }
                self.debug.last_action = "add_selection".to_string();
                None
            }
            KeyCode::Char('d') | KeyCode::Delete if !self.session.selections().is_empty() => {
                match self.session.remove_selection(self.selection_cursor) {
                    Ok(_) => {
                        let len = self.session.selections().len();
                        self.selection_cursor = self.selection_cursor.min(len.saturating_sub(1));
                        self.debug.last_action = "remove_selection".to_string();
                    }
                    Err(e) => self.error_modal.show(e.to_string()),
                }
                None
            }
            KeyCode::Char('c') if !self.session.selections().is_empty() => {
                if let Err(e) = self.session.update_selection(self.selection_cursor, "") {
                    self.error_modal.show(e.to_string());
                }
                self.debug.last_action = "clear_selection".to_string();
                None
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Enter => {
                match self.focus {
                    Pane::Catalog => self.assign_catalog_entry(),
                    Pane::Selections => {
                        let current = self
                            .session
                            .selections()
                            .get(self.selection_cursor)
                            .and_then(|spec| find_entry(self.session.catalog(), spec));
                        if let Some(index) = current {
                            self.catalog_cursor = index;
                        }
                        self.focus = Pane::Catalog;
                    }
                    Pane::Results => {}
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(true, 1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(false, 1);
                None
            }
            KeyCode::PageDown => {
                self.move_cursor(true, RESULTS_PAGE);
                None
            }
            KeyCode::PageUp => {
                self.move_cursor(false, RESULTS_PAGE);
                None
            }
            _ => None,
        }
    }

    fn dataset_line(&self, ctx: &RenderContext) -> Line<'static> {
        let mut spans = vec![Span::styled(
            "Dataset: ",
            Style::default().fg(ctx.text_secondary),
        )];
        match self.session.dataset() {
            Some(dataset) => {
                spans.push(Span::styled(
                    dataset.file_name().to_string(),
                    Style::default().fg(ctx.text_primary),
                ));
                if let Some(id) = self.session.file_id() {
                    spans.push(Span::styled(
                        format!("  (server id {})", id),
                        Style::default().fg(ctx.dimmed),
                    ));
                }
                if !self.session.columns().is_empty() {
                    spans.push(Span::styled(
                        format!("  {} column(s)", self.session.columns().len()),
                        Style::default().fg(ctx.dimmed),
                    ));
                }
            }
            None => spans.push(Span::styled(
                "none (press o to open one)",
                Style::default().fg(ctx.dimmed),
            )),
        }
        Line::from(spans)
    }
}

fn step_cursor(cursor: usize, len: usize, down: bool, step: u16) -> usize {
    if len == 0 {
        return 0;
    }
    let step = usize::from(step);
    if down {
        cursor.saturating_add(step).min(len - 1)
    } else {
        cursor.saturating_sub(step)
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.debug.num_frames += 1;
        let ctx = RenderContext::from_theme(&self.theme);

        Block::default()
            .style(Style::default().bg(ctx.background))
            .render(area, buf);

        let layout = app_layout(area, self.debug.enabled);
        self.dataset_line(&ctx).render(layout.dataset_line, buf);

        let current = self
            .session
            .selections()
            .get(self.selection_cursor)
            .and_then(|spec| find_entry(self.session.catalog(), spec));
        CatalogView {
            entries: self.session.catalog(),
            cursor: self.catalog_cursor,
            current,
            phase: self.session.phase(),
            focused: self.focus == Pane::Catalog,
        }
        .render(layout.catalog, buf, &ctx);

        SelectionView {
            selections: self.session.selections(),
            cursor: self.selection_cursor,
            focused: self.focus == Pane::Selections,
        }
        .render(layout.selections, buf, &ctx);

        let units = self.session.display_units();
        self.results_max_scroll = ResultsView {
            units: &units,
            generated_at: self.session.generated_at(),
            scroll: self.results_scroll,
            focused: self.focus == Pane::Results,
        }
        .render(layout.results, buf, &ctx);
        self.results_scroll = self.results_scroll.min(self.results_max_scroll);

        let phase = self.session.phase();
        let status = if phase.is_busy() {
            format!("{}...", phase.as_str())
        } else {
            self.status
                .clone()
                .unwrap_or_else(|| phase.as_str().to_string())
        };
        let controls = Controls::from_context(&ctx)
            .with_status(status)
            .with_busy(phase.is_busy(), self.throbber_frame)
            .with_unicode_throbber(self.use_unicode_throbber);
        (&controls).render(layout.control_bar, buf);

        if let Some(debug_area) = layout.debug {
            self.debug.phase = phase.as_str().to_string();
            (&self.debug).render(debug_area, buf);
        }

        if self.prompt_active {
            let hint = format!("Accepted: {}", DatasetFormat::accepted_extensions());
            overlays::render_dataset_prompt(area, buf, &self.dataset_prompt, &hint, &ctx);
        }
        if self.show_help {
            overlays::render_help_overlay(
                area,
                buf,
                help_strings::main_view(),
                &mut self.help_scroll,
                &ctx,
            );
        }
        if self.error_modal.active {
            overlays::render_error_modal(area, buf, &self.error_modal, &ctx);
        } else if self.success_modal.active {
            overlays::render_success_modal(area, buf, &self.success_modal, &ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::request::{CatalogRequest, GenerateRequest};
    use serde_json::{json, Value};
    use std::sync::mpsc::channel;

    struct Unreachable;

    impl ChartBackend for Unreachable {
        fn fetch_catalog(&self, _: &CatalogRequest) -> Result<Value, TransportError> {
            Err(TransportError::Network("offline".into()))
        }

        fn generate(&self, _: &GenerateRequest) -> Result<Value, TransportError> {
            Err(TransportError::Network("offline".into()))
        }
    }

    fn test_app() -> App {
        let (tx, _rx) = channel();
        let dir = std::env::temp_dir().join("plotpick-lib-tests");
        App::new(tx, Arc::new(Unreachable))
            .with_cache(CacheManager::with_dir(dir))
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_error_modal_show_hide() {
        let mut modal = ErrorModal::new();
        modal.show("boom".to_string());
        assert!(modal.active);
        modal.hide();
        assert!(!modal.active);
        assert!(modal.message.is_empty());
    }

    #[test]
    fn test_quit_and_ctrl_c_exit() {
        let mut app = test_app();
        let quit = app.event(key(KeyCode::Char('q')));
        assert!(matches!(quit, Some(AppEvent::Exit)));
        let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(app.event(ctrl_c), Some(AppEvent::Exit)));
    }

    #[test]
    fn test_fetch_without_dataset_shows_message() {
        let mut app = test_app();
        let next = app.event(key(KeyCode::Char('f')));
        assert!(matches!(next, Some(AppEvent::FetchCatalog)));
        assert!(app.event(AppEvent::FetchCatalog).is_none());
        assert_eq!(
            app.error_message(),
            Some("Please upload a file before fetching graph options.")
        );
        assert!(!app.is_busy());

        app.event(key(KeyCode::Esc));
        assert_eq!(app.error_message(), None);
    }

    #[test]
    fn test_add_and_remove_slots() {
        let mut app = test_app();
        app.event(key(KeyCode::Char('a')));
        app.event(key(KeyCode::Char('a')));
        assert_eq!(app.session().selections().len(), 2);
        assert_eq!(app.selection_cursor(), 1);

        app.event(key(KeyCode::Char('d')));
        assert_eq!(app.session().selections().len(), 1);
        assert_eq!(app.selection_cursor(), 0);
    }

    #[test]
    fn test_catalog_reply_fills_catalog() {
        let mut app = test_app();
        // Put the session in flight without a worker thread.
        let file = std::env::temp_dir().join("plotpick-lib-tests-data.csv");
        std::fs::write(&file, "a,b\n1,2\n").unwrap();
        app.event(AppEvent::OpenDataset(file));
        app.session.begin_catalog_fetch().unwrap();
        assert!(app.is_busy());

        let body = json!({"Possible Graphs": [
            {"Graph Type": "Bar Chart", "X": "a", "Y": "b"},
            {"Graph Type": "Histogram", "X": "a"}
        ]});
        let outcome = decode_catalog(Ok(body));
        app.event(AppEvent::CatalogFetched(outcome, Duration::from_millis(12)));
        assert!(!app.is_busy());
        assert_eq!(app.session().catalog().len(), 2);
        assert_eq!(app.debug.last_request_ms, Some(12));

        app.event(key(KeyCode::Down));
        app.event(key(KeyCode::Enter));
        assert_eq!(
            app.session().selections().get(0).map(|s| s.label()),
            Some("Histogram (a)".to_string())
        );
    }

    #[test]
    fn test_prefill_selections() {
        let mut app = test_app();
        app.prefill_selections(&["Pie Chart (Region)".to_string(), String::new()]);
        let labels: Vec<String> = app
            .session()
            .selections()
            .iter()
            .map(|s| s.display_label())
            .collect();
        assert_eq!(labels, vec!["Pie Chart (Region)", "-- Choose Graph --"]);
    }

    /// Render a fresh frame and return its text, row after row.
    fn draw(app: &mut App, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_long_error_results_scroll_into_view() {
        let mut app = test_app();
        let file = std::env::temp_dir().join("plotpick-lib-tests-scroll.csv");
        std::fs::write(&file, "a,b\n1,2\n").unwrap();
        app.event(AppEvent::OpenDataset(file));
        app.session.begin_catalog_fetch().unwrap();
        let catalog = json!({"Possible Graphs": [{"Graph Type": "Histogram", "X": "a"}]});
        app.event(AppEvent::CatalogFetched(decode_catalog(Ok(catalog)), Duration::ZERO));
        app.session.add_selection();
        app.session.update_selection(0, "Histogram (a)").unwrap();
        app.session.begin_generate().unwrap();

        let graphs: Vec<Value> = (1..=20)
            .map(|i| {
                json!({"error": format!(
                    "Invalid graph request: {}ZZ{:02}",
                    "{'graph_type': 'Histogram', 'columns_selected': {'x_axis': 'a'}} ".repeat(3),
                    i
                )})
            })
            .collect();
        let body = json!({ "graphs": graphs });
        app.event(AppEvent::GraphsGenerated(decode_generate(Ok(body)), Duration::ZERO));
        assert_eq!(app.focus(), Pane::Results);

        let area = Rect::new(0, 0, 80, 30);
        assert!(!draw(&mut app, area).contains("ZZ20"));

        let mut text = String::new();
        for _ in 0..50 {
            app.event(key(KeyCode::PageDown));
            text = draw(&mut app, area);
        }
        assert!(text.contains("ZZ20"));
        assert!(text.contains("ZZ19"));

        app.event(key(KeyCode::PageUp));
        assert!(!draw(&mut app, area).contains("ZZ20"));
    }

    #[test]
    fn test_render_does_not_panic() {
        let mut app = test_app();
        app.enable_debug();
        app.event(key(KeyCode::Char('?')));
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        (&mut app).render(area, &mut buf);
        assert_eq!(app.debug.num_frames, 1);
    }
}
