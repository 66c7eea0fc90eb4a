use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::storage::{JsonFileStorage, TaskStorage};
use crate::model::config::{Config, ThemeMode, UiConfig};
use crate::model::filter::Filter;
use crate::model::task::TaskId;
use crate::ops::filter::FilterController;
use crate::ops::notice::{Notice, NoticeKind};
use crate::ops::store::{StoreError, TaskStore};
use crate::ops::view::{ViewModel, project};
use crate::util::date::today;

use super::input;
use super::render;
use super::theme::Theme;

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task
    Add,
    /// Waiting for y/n before deleting everything
    Confirm,
}

/// Which field of the add form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Text,
    Date,
}

/// In-progress new task
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub text: String,
    pub date: String,
    pub field: AddField,
}

impl AddForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.field {
            AddField::Text => &mut self.text,
            AddField::Date => &mut self.date,
        }
    }
}

/// Transient message in the status row
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Main application state
pub struct App<S: TaskStorage> {
    pub store: TaskStore<S>,
    pub filter: FilterController,
    pub mode: Mode,
    pub form: AddForm,
    /// Index into the filtered list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    pub ui_config: UiConfig,
    /// Where theme changes are saved; `None` keeps them in memory
    pub config_dir: Option<PathBuf>,
    pub toast: Option<Toast>,
    /// Date used for overdue flags, refreshed every tick
    pub today: NaiveDate,
    pub should_quit: bool,
}

impl<S: TaskStorage> App<S> {
    pub fn new(store: TaskStore<S>, ui_config: UiConfig, today: NaiveDate) -> Self {
        let theme_mode = ui_config.theme;
        let theme = Theme::from_config(theme_mode, &ui_config);
        App {
            store,
            filter: FilterController::default(),
            mode: Mode::Navigate,
            form: AddForm::default(),
            cursor: 0,
            scroll_offset: 0,
            theme_mode,
            theme,
            ui_config,
            config_dir: None,
            toast: None,
            today,
            should_quit: false,
        }
    }

    /// Projection of the current store + filter
    pub fn view(&self) -> ViewModel<'_> {
        project(self.store.tasks(), self.filter.current(), self.today)
    }

    /// ID of the task under the cursor
    pub fn selected_id(&self) -> Option<TaskId> {
        self.view().items.get(self.cursor).map(|item| item.task.id)
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let count = self.view().items.len();
        if count == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(count - 1);
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter.set_filter(filter) {
            self.cursor = 0;
            self.scroll_offset = 0;
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        if notice.kind == NoticeKind::Error {
            log::warn!("event=toast kind=error message={}", notice.message);
        }
        self.toast = Some(Toast {
            notice,
            shown_at: Instant::now(),
        });
    }

    pub fn notify_error(&mut self, err: &StoreError) {
        self.notify(Notice::from_error(err));
    }

    /// Drop the toast once it has been visible long enough
    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    /// Switch light/dark and persist the preference
    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        self.theme = Theme::from_config(self.theme_mode, &self.ui_config);
        let Some(dir) = self.config_dir.clone() else {
            return;
        };
        if let Err(e) = config_io::save_theme(&dir, self.theme_mode) {
            self.notify(Notice {
                kind: NoticeKind::Error,
                message: format!("Could not save theme: {}", e),
            });
        }
    }
}

/// Run the TUI against the tasks in `data_dir`
pub fn run(data_dir: &Path, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::open(JsonFileStorage::new(data_dir));
    let mut app = App::new(store, config.ui, today());
    app.config_dir = Some(data_dir.to_path_buf());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal even if we panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    log::info!("event=tui_exit count={}", app.store.len());

    result
}

fn run_event_loop<S: TaskStorage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.today = today();
        app.expire_toast(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
