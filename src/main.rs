//! Site widgets - behavior layer of a brochure website
//!
//! Runs the contact page in the terminal: navigation toggle, scroll spy,
//! smooth scrolling, counters, modal, accordion and the validated contact
//! form, driven by keyboard and mouse.

mod app;
mod browser;
mod config;
mod dom;
mod page;
mod site;
mod state;
mod ui;
mod widgets;

use anyhow::Result;
use app::App;
use config::SiteConfig;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_widgets=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = SiteConfig::load()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let size = terminal.size()?;
    let mut app = App::new(config, (size.height, size.width), Instant::now());
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    // One frame per animation tick
    let mut frames = tokio::time::interval(app.config.tick());
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        frames.tick().await;
        let now = Instant::now();

        let term_size = terminal.size()?;
        app.resize((term_size.height, term_size.width), now);

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Drain pending crossterm events without blocking the frame
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.quit();
                        break;
                    }
                    app.handle_key(key, Instant::now());
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse, Instant::now());
                }
                Event::Resize(width, height) => {
                    app.resize((height, width), Instant::now());
                }
                _ => {}
            }
        }

        app.tick(Instant::now());

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
