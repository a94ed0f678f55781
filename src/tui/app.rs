use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::io::storage::Storage;
use crate::model::{AppConfig, Notification, Task, TaskStatus, View};
use crate::ops::auth::{AuthError, LoginField};
use crate::ops::kanban::{self, TaskDraft};
use crate::ops::market::MarketData;
use crate::ops::settings::{ProfileError, ProfileForm};
use crate::ops::store::AppState;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a search query
    Search,
    /// Carrying a task across the board
    Move,
    /// Task editor modal
    Edit,
    /// Yes/no popup for the modal in `state.ui.modal`
    Confirm,
    /// Editing a text field of the settings profile form
    Profile,
}

/// What the search prompt filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Board,
    Companies,
}

/// Login screen fields
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<AuthError>,
}

/// Board cursor: column index and row within the column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardCursor {
    pub column: usize,
    pub row: usize,
}

/// A task picked up in move mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveState {
    pub task_id: String,
    /// Column the task will be dropped on
    pub target: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Description,
    Tag,
    Priority,
    Status,
    Due,
}

impl EditorField {
    pub const ALL: [EditorField; 6] = [
        EditorField::Title,
        EditorField::Description,
        EditorField::Tag,
        EditorField::Priority,
        EditorField::Status,
        EditorField::Due,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditorField::Title => "Title",
            EditorField::Description => "Description",
            EditorField::Tag => "Tag",
            EditorField::Priority => "Priority",
            EditorField::Status => "Status",
            EditorField::Due => "Due date",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            EditorField::Title | EditorField::Description | EditorField::Due
        )
    }
}

/// Open task editor
#[derive(Debug, Clone)]
pub struct EditorState {
    /// `None` when creating a task
    pub task_id: Option<String>,
    pub draft: TaskDraft,
    /// Stored status of the task being edited; stays selectable
    pub original_status: Option<TaskStatus>,
    pub field: EditorField,
    /// Due date as typed (YYYY-MM-DD)
    pub due_input: String,
    /// Inline validation message
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Name,
    Phone,
    Avatar,
    SaveProfile,
    Theme,
    Density,
    AdvancedMetrics,
    Export,
    ClearCache,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 9] = [
        SettingsItem::Name,
        SettingsItem::Phone,
        SettingsItem::Avatar,
        SettingsItem::SaveProfile,
        SettingsItem::Theme,
        SettingsItem::Density,
        SettingsItem::AdvancedMetrics,
        SettingsItem::Export,
        SettingsItem::ClearCache,
    ];
}

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub cursor: usize,
    pub form: ProfileForm,
    pub error: Option<ProfileError>,
    /// Field value before the current edit, restored on Esc
    pub edit_original: String,
}

impl SettingsState {
    pub fn item(&self) -> SettingsItem {
        SettingsItem::ALL[self.cursor.min(SettingsItem::ALL.len() - 1)]
    }
}

/// The notification currently shown as a toast
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

/// Main application state
pub struct App {
    pub state: AppState,
    pub market: MarketData,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Help overlay visible
    pub show_help: bool,
    pub login: LoginForm,
    pub board: BoardCursor,
    pub moving: Option<MoveState>,
    pub search_target: SearchTarget,
    /// Query being typed
    pub search_input: String,
    /// Applied board search
    pub board_search: String,
    /// Applied company search
    pub company_query: String,
    pub editor: Option<EditorState>,
    pub settings: SettingsState,
    pub users_cursor: usize,
    pub toast: Option<Toast>,
    /// Last notification turned into a toast
    last_seen: Option<Notification>,
}

impl App {
    pub fn new(state: AppState, config: AppConfig, data_dir: PathBuf) -> Self {
        let theme = Theme::from_config(state.ui.theme, &config.ui);
        let last_seen = state.notifications.last().cloned();
        let mut app = App {
            state,
            market: MarketData::mock(),
            config,
            data_dir,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            show_help: false,
            login: LoginForm::default(),
            board: BoardCursor::default(),
            moving: None,
            search_target: SearchTarget::Board,
            search_input: String::new(),
            board_search: String::new(),
            company_query: String::new(),
            editor: None,
            settings: SettingsState::default(),
            users_cursor: 0,
            toast: None,
            last_seen,
        };
        app.reset_settings_form();
        app
    }

    pub fn view(&self) -> View {
        self.state.ui.active_view
    }

    /// Rebuild the palette when the theme mode changed
    pub fn refresh_theme(&mut self) {
        if self.theme.mode != self.state.ui.theme {
            self.theme = Theme::from_config(self.state.ui.theme, &self.config.ui);
        }
    }

    /// Show the newest notification as a toast and expire old toasts
    pub fn tick(&mut self, now: Instant) {
        let latest = self.state.notifications.last();
        if latest != self.last_seen.as_ref() {
            self.last_seen = latest.cloned();
            self.toast = latest.map(|n| Toast {
                notification: n.clone(),
                shown_at: now,
            });
        }
        let ttl = Duration::from_secs(self.config.ui.toast_seconds);
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= ttl)
        {
            self.toast = None;
        }
    }

    /// Switch views through the permission check. Returns whether the view changed.
    pub fn navigate(&mut self, view: View) -> bool {
        if !self.state.navigate(view) {
            return false;
        }
        match view {
            View::Settings => self.reset_settings_form(),
            View::Users => self.users_cursor = 0,
            View::Kanban => self.clamp_board(),
            _ => {}
        }
        true
    }

    pub fn reset_settings_form(&mut self) {
        self.settings = SettingsState {
            form: self
                .state
                .user()
                .map(ProfileForm::from_user)
                .unwrap_or_default(),
            ..SettingsState::default()
        };
    }

    /// Called after a successful sign-in
    pub fn after_login(&mut self) {
        self.login = LoginForm::default();
        self.board = BoardCursor::default();
        self.board_search.clear();
        self.company_query.clear();
        self.mode = Mode::Navigate;
        self.reset_settings_form();
        self.refresh_theme();
    }

    /// Called after logout or clear cache: back to a clean login screen
    pub fn after_sign_out(&mut self) {
        self.login = LoginForm::default();
        self.editor = None;
        self.moving = None;
        self.mode = Mode::Navigate;
        self.show_help = false;
        self.refresh_theme();
    }

    // -----------------------------------------------------------------------
    // Board
    // -----------------------------------------------------------------------

    pub fn column_tasks(&self, column: usize) -> Vec<&Task> {
        match kanban::columns().get(column) {
            Some(col) => kanban::column_tasks(&self.state, col.status, &self.board_search),
            None => Vec::new(),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.column_tasks(self.board.column)
            .get(self.board.row)
            .copied()
    }

    pub fn selected_task_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    /// Keep the cursor inside the board after the task set changed
    pub fn clamp_board(&mut self) {
        let columns = kanban::columns().len();
        self.board.column = self.board.column.min(columns - 1);
        let len = self.column_tasks(self.board.column).len();
        self.board.row = self.board.row.min(len.saturating_sub(1));
    }

    /// Put the cursor on a task, wherever it is on the board
    pub fn select_task(&mut self, task_id: &str) {
        for column in 0..kanban::columns().len() {
            if let Some(row) = self
                .column_tasks(column)
                .iter()
                .position(|t| t.id == task_id)
            {
                self.board = BoardCursor { column, row };
                return;
            }
        }
        self.clamp_board();
    }

    /// Directory for the JSON export
    pub fn export_dir(&self) -> PathBuf {
        self.config
            .storage
            .export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir.clone())
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::new(data_dir, config.storage.snapshot_file.clone());
    let state = AppState::initialize(Some(storage));
    let mut app = App::new(state, config, data_dir.to_path_buf());
    info!(data_dir = %data_dir.display(), "tui started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Save state before exit
    app.state.save();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("tui stopped");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            app.refresh_theme();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
