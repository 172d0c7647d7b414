mod app;
mod audio;
mod config;
mod event;
mod frame;
mod games;
mod input;
mod physics;
mod render;
mod ui;

use std::fs::File;
use std::io;
use std::time::Instant;

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use env_logger::{Env, Target};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::ArcadeConfig;
use event::{Event, EventHandler};
use frame::FrameDriver;

/// Environment variable naming the log file. Unset means no logging.
const LOG_ENV: &str = "DUOCADE_LOG";

fn init_logging() {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return;
    };
    // stderr would draw over the alternate screen, so logs only go to a file.
    match File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("cannot open log file {}: {}", path.to_string_lossy(), e),
    }
}

fn main() -> io::Result<()> {
    init_logging();

    let config = ArcadeConfig::load().unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        ArcadeConfig::default()
    });
    let seed: u64 = rand::random();
    log::info!("starting duocade (tick {} ms, audio {:?}, seed {})", config.tick_rate_ms, config.audio, seed);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Release events let held movement keys stop exactly when let go.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let event_handler = EventHandler::new(config.tick_rate_ms);
    let mut app = App::new(config, seed);
    let mut driver = FrameDriver::new(Instant::now());

    while driver.is_running() {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        match event_handler.next()? {
            Event::Tick(now) => {
                if let Some(elapsed) = driver.frame(now) {
                    app.on_frame(elapsed);
                }
            }
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            driver.stop();
        }
    }

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
