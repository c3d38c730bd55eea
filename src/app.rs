use crossterm::event::{KeyCode, KeyEvent};

use crate::model::TrackerState;
use crate::store::json_store::{GoalStore, StoreError};
use crate::ui::components::menu::{Menu, MenuLayout};
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

pub const PROGRESS_ITEMS: [&str; 3] = ["[Settings]", "[Switch Goal]", "[Quit]"];
pub const SETTINGS_ITEMS: [&str; 2] = ["[Save]", "[Discard (Back)]"];
pub const PROGRESS_MENU_SPACING: u16 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Progress,
    Settings,
}

/// Field targeted by one of the settings hotkeys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Target,
    Current,
    Currency,
    Name,
}

impl EditField {
    pub fn from_key(ch: char) -> Option<Self> {
        match ch {
            't' => Some(EditField::Target),
            'c' => Some(EditField::Current),
            'u' => Some(EditField::Currency),
            'g' => Some(EditField::Name),
            _ => None,
        }
    }

    pub fn prompt(self, currency: &str) -> String {
        match self {
            EditField::Target => format!("New Target: {currency} "),
            EditField::Current => format!("New Current: {currency} "),
            EditField::Currency => "New Currency:  ".to_string(),
            EditField::Name => "New Goal Name: ".to_string(),
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, EditField::Target | EditField::Current)
    }
}

pub struct FieldEdit {
    pub field: EditField,
    pub input: LineInput,
}

pub struct App {
    pub screen: AppScreen,
    pub state: TrackerState,
    pub store: GoalStore,
    pub progress_menu: Menu,
    pub settings_menu: Menu,
    pub edit: Option<FieldEdit>,
    /// One-shot message shown under the panel until the next key press.
    pub status: Option<String>,
    pub theme: Theme,
    pub should_quit: bool,
    /// Set when the save file exists but could not be read or moved aside.
    /// Saving is refused so the file on disk is never replaced by defaults.
    pub read_only: bool,
}

impl App {
    pub fn new(store: GoalStore, theme: Theme) -> Self {
        let loaded = load_or_recover(&store);
        Self {
            screen: AppScreen::Progress,
            state: loaded.state,
            store,
            progress_menu: Menu::new(
                &PROGRESS_ITEMS,
                MenuLayout::Horizontal {
                    spacing: PROGRESS_MENU_SPACING,
                },
            ),
            settings_menu: Menu::new(&SETTINGS_ITEMS, MenuLayout::Vertical),
            edit: None,
            status: loaded.status,
            theme,
            should_quit: false,
            read_only: loaded.read_only,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;

        if self.edit.is_some() {
            self.handle_edit_key(key);
            return;
        }

        match self.screen {
            AppScreen::Progress => self.handle_progress_key(key),
            AppScreen::Settings => self.handle_settings_key(key),
        }
    }

    fn handle_progress_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.progress_menu.prev(),
            KeyCode::Down => self.progress_menu.next(),
            KeyCode::Right | KeyCode::Enter => match self.progress_menu.selected {
                0 => self.go_to_settings(),
                1 => self.switch_goal(),
                2 => {
                    log::info!("Quit selected");
                    self.should_quit = true;
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.settings_menu.prev(),
            KeyCode::Down => self.settings_menu.next(),
            KeyCode::Right | KeyCode::Enter => match self.settings_menu.selected {
                0 => self.save(),
                1 => self.discard(),
                _ => {}
            },
            KeyCode::Char(ch) => {
                if let Some(field) = EditField::from_key(ch) {
                    self.edit = Some(FieldEdit {
                        field,
                        input: LineInput::default(),
                    });
                }
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(edit) = self.edit.as_mut() else {
            return;
        };
        match edit.input.handle(key) {
            InputResult::Continue => {}
            InputResult::Cancel => self.edit = None,
            InputResult::Submit => {
                if let Some(edit) = self.edit.take() {
                    self.apply_edit(edit.field, edit.input.value());
                }
            }
        }
    }

    pub fn go_to_settings(&mut self) {
        self.settings_menu.reset();
        self.screen = AppScreen::Settings;
    }

    pub fn switch_goal(&mut self) {
        self.state.switch_goal();
        log::info!(
            "Switched to goal {}/{}",
            self.state.active_index() + 1,
            self.state.goals().len()
        );
    }

    /// Apply submitted prompt text to `field`. `q` or blank input leaves
    /// everything as it was.
    pub fn apply_edit(&mut self, field: EditField, raw: &str) {
        if raw.eq_ignore_ascii_case("q") || raw.trim().is_empty() {
            log::debug!("Edit of {field:?} cancelled");
            return;
        }

        if field.is_numeric() {
            let Some(value) = parse_amount(raw) else {
                log::debug!("Rejected {field:?} input {raw:?}");
                self.status = Some(format!("Not a number: {raw:?}"));
                return;
            };
            let goal = self.state.active_goal_mut();
            if field == EditField::Target {
                goal.target = value;
            } else {
                goal.current = value;
            }
            return;
        }

        match field {
            EditField::Currency => self.state.settings.currency = raw.to_string(),
            EditField::Name => self.state.active_goal_mut().name = raw.to_string(),
            EditField::Target | EditField::Current => {}
        }
    }

    pub fn save(&mut self) {
        if self.read_only {
            log::warn!("Save refused, {} was not loaded", self.store.path().display());
            self.status = Some(format!(
                "Save disabled: {} could not be read",
                self.store.path().display()
            ));
            return;
        }
        match self.store.save(&self.state) {
            Ok(()) => self.screen = AppScreen::Progress,
            Err(e) => {
                log::error!("Save failed: {e}");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    /// Drop unsaved edits by reloading from disk.
    pub fn discard(&mut self) {
        let loaded = load_or_recover(&self.store);
        log::info!("Discarded unsaved changes");
        self.state = loaded.state;
        self.status = loaded.status;
        self.read_only = loaded.read_only;
        self.screen = AppScreen::Progress;
    }
}

/// Parse an amount typed at a prompt. Surrounding whitespace is allowed;
/// NaN and infinities are refused since they cannot be written to JSON.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

struct Loaded {
    state: TrackerState,
    status: Option<String>,
    read_only: bool,
}

/// Load the store, falling back to defaults when the file cannot be used.
/// A malformed file is moved aside first so a later save does not erase it.
/// Any file left in place after a failed load makes the app read-only.
fn load_or_recover(store: &GoalStore) -> Loaded {
    match store.load() {
        Ok(state) => Loaded {
            state,
            status: None,
            read_only: false,
        },
        Err(e @ StoreError::Malformed { .. }) => {
            log::warn!("{e}");
            let (status, read_only) = match store.quarantine() {
                Ok(bak) => (
                    format!(
                        "Unreadable save file moved to {}; starting fresh",
                        bak.display()
                    ),
                    false,
                ),
                Err(qe) => {
                    log::error!("Could not move unreadable save file: {qe}");
                    (
                        format!(
                            "Unreadable save file {}; saving disabled",
                            store.path().display()
                        ),
                        true,
                    )
                }
            };
            Loaded {
                state: TrackerState::default(),
                status: Some(status),
                read_only,
            }
        }
        Err(e) => {
            log::error!("Load failed: {e}");
            Loaded {
                state: TrackerState::default(),
                status: Some(format!("Load failed, saving disabled: {e}")),
                read_only: true,
            }
        }
    }
}
