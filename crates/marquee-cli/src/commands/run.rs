use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use marquee_core::data::TableData;
use marquee_core::marquee::MarqueeConfigExt;
use marquee_core::AppConfig;
use marquee_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    theme::Theme,
    widgets::{MarqueeTableWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, file: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let data = TableData::parse(file, &content, config.list.header.show)?;
    tracing::info!(
        file = %file.display(),
        rows = data.rows.len(),
        columns = data.column_count(),
        "Table loaded"
    );

    let mut app = App::new(config.clone(), data, Theme::default());

    // Setup terminal; the guard restores it on every exit path from here on
    enable_raw_mode()?;
    let _restore = TerminalRestore;
    let mut stdout = io::stdout();
    let title = format!("Marquee - {}", file.display());
    execute!(stdout, EnterAlternateScreen, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(
        Duration::from_millis(config.ui.tick_rate_ms),
        config.marquee.animation_tick_duration(),
    );

    main_loop(&mut terminal, &mut app, &event_handler)
}

/// Leaves raw mode and the alternate screen when dropped
struct TerminalRestore;

impl Drop for TerminalRestore {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::error!(error = %e, "Failed to disable raw mode");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            tracing::error!(error = %e, "Failed to leave alternate screen");
        }
    }
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Feed the marquee the real time elapsed since the last pass
        let now = Instant::now();
        app.on_tick(now.duration_since(last_tick));
        last_tick = now;

        terminal.draw(|frame| {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            MarqueeTableWidget::render(frame, main_layout[0], app);
            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        // Poll faster while the marquee is moving
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    app.status_message = None;
                    match handle_key_event(key) {
                        Action::Quit => app.should_quit = true,
                        Action::TogglePause => app.toggle_pause(),
                        Action::Restart => app.restart(),
                        Action::None => {}
                    }
                }
                AppEvent::Resize(width, height) => {
                    tracing::debug!(width, height, "Terminal resized");
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
