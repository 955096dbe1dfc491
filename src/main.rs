mod board;
mod board_generation;
mod board_logic;
mod build_info;
mod constants;
mod input;
mod session;
mod ui;

use constants::POLL_INTERVAL_MS;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{AppState, InputResult};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::{GameSession, SessionPhase};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "minefield {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Minefield - Terminal Minesweeper\n");
                println!("Usage: minefield [option]\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'minefield --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = GameSession::new();
    let mut app = AppState::new();

    // Wall-clock timer for the current board: starts when a game
    // begins, freezes at game over.
    let mut game_started: Option<Instant> = None;
    let mut frozen_elapsed: u64 = 0;

    // Main loop
    loop {
        let elapsed_secs = match game_started {
            Some(started) if session.phase() == SessionPhase::Playing => {
                started.elapsed().as_secs()
            }
            Some(_) => frozen_elapsed,
            None => 0,
        };

        terminal.draw(|frame| {
            ui::draw(frame, &session, &app, elapsed_secs);
        })?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                let phase_before = session.phase();
                let mut rng = rand::thread_rng();

                if input::handle_key(key_event, &mut session, &mut app, &mut rng)
                    == InputResult::Quit
                {
                    break;
                }

                // Timer transitions driven by this key
                match (phase_before, session.phase()) {
                    (SessionPhase::Playing, SessionPhase::Playing) => {}
                    (_, SessionPhase::Playing) => {
                        game_started = Some(Instant::now());
                    }
                    (SessionPhase::Playing, _) => {
                        frozen_elapsed = game_started.map(|s| s.elapsed().as_secs()).unwrap_or(0);
                    }
                    _ => {}
                }
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Goodbye!");

    Ok(())
}
