//! TUI entrypoint: live chart of u, v, w, s over a rolling time window,
//! or a headless report with --headless.
//! Controls: [s] Step, [r] Run/Pause, [+/-] Speed, [q] Quit

mod app;
mod backend;
mod cli;
mod report;
mod ui;

use anyhow::Result;
use app::App;
use backend::CoreBackend;
use clap::Parser;
use cli::Cli;
use ui::draw;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute, terminal,
};
use ratatui::{backend::CrosstermBackend, Terminal};

const CHART_WINDOW: usize = 4_000; // samples kept for the chart

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    // Leave alternate screen and show cursor
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = cli.to_config()?;

    if cli.headless {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let model = cfg.build_checked()?;
        return report::run(model, cfg.t_max, cli.threshold);
    }

    let model = cfg.build_checked()?;

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Ensure terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));

    // App state
    let backend = CoreBackend::from_model(&model, cfg.cell_type.name());
    let mut app = App::new(backend, CHART_WINDOW, cli.speed);
    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    // Event loop
    loop {
        draw(&mut terminal, &app)?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('s') => app.step(),
                    KeyCode::Char('r') => app.toggle_running(),
                    KeyCode::Char('+') => app.faster(),
                    KeyCode::Char('-') => app.slower(),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.running {
                app.step();
            }
            last_tick = Instant::now();
        }
    }

    // Cleanup
    restore_terminal()?;
    Ok(())
}
