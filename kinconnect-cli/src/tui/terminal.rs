//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kinconnect_core::KinConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use super::app::{App, Route};
use super::event::{handle_key, handle_mouse, handle_paste, poll_event};
use super::ui::Ui;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI application, starting on `route`
pub fn run(config: &KinConfig, route: Route) -> Result<()> {
    let mut terminal = init_terminal()?;

    let mut app = App::new(config, route);
    let mut ui = Ui::new();
    let tick = Duration::from_millis(config.ui.tick_rate_ms);

    info!(route = %route, "tui started");
    let result = run_loop(&mut terminal, &mut app, &mut ui, tick);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    info!(sent = app.sender.sent().len(), "tui stopped");
    result
}

/// Main event loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    ui: &mut Ui,
    tick: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui.render(frame, app))?;

        if let Some(event) = poll_event(tick)? {
            let result = match event {
                Event::Key(key) => handle_key(app, key),
                Event::Mouse(mouse) => handle_mouse(app, &ui.hits, mouse),
                Event::Paste(text) => handle_paste(app, &text),
                // Terminal resized, will be handled on next draw
                _ => continue,
            };
            app.apply(result);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
