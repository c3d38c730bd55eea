use std::fs::{self, File};
use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::widgets::Block;
use simplelog::{ConfigBuilder, WriteLogger};

use goal_tracker::app::{App, AppScreen};
use goal_tracker::config::Config;
use goal_tracker::event::{AppEvent, EventHandler};
use goal_tracker::store::json_store::GoalStore;
use goal_tracker::ui::components::progress_view::ProgressView;
use goal_tracker::ui::components::settings_view::SettingsView;
use goal_tracker::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "goal-tracker", version, about = "Terminal tracker for savings goals")]
struct Cli {
    #[arg(short, long, help = "Save file (default: goal.json in the working directory)")]
    file: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

/// Owns the terminal modes for the whole interactive session. Dropping it
/// restores the terminal, whichever way `run_app` exits.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            restore_terminal();
            original_hook(panic_info);
        }));
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn init_logging(config: &Config) {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("goal-tracker");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(dir.join("goal-tracker.log")) {
        let _ = WriteLogger::init(config.log_filter(), log_config, log_file);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config);
    if let Err(e) = &loaded {
        log::warn!("Ignoring unreadable config: {e}");
    }

    let save_path = cli
        .file
        .unwrap_or_else(|| PathBuf::from(&config.save_file));
    let theme_name = cli.theme.unwrap_or_else(|| config.theme.clone());
    let theme = Theme::load(&theme_name).unwrap_or_default();
    log::info!(
        "goal-tracker starting (save file {}, theme {})",
        save_path.display(),
        theme.name
    );

    let mut app = App::new(GoalStore::new(save_path), theme);

    let result = {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        run_app(&mut terminal, &mut app, &EventHandler::new())
    };

    if let Err(err) = result {
        log::error!("Exiting on error: {err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let status = app.status.as_deref();
    match app.screen {
        AppScreen::Progress => frame.render_widget(
            ProgressView::new(&app.state, &app.progress_menu, &app.theme).status(status),
            area,
        ),
        AppScreen::Settings => frame.render_widget(
            SettingsView::new(&app.state, &app.settings_menu, &app.theme)
                .edit(app.edit.as_ref())
                .status(status),
            area,
        ),
    }
}
