//! Element Tetris terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `element_tetris::term`.
//! One thread: render, wait for a key until the next soft-drop deadline, apply.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use element_tetris::core::{GameSession, GameSnapshot, Grid};
use element_tetris::input::{handle_key_event, should_quit};
use element_tetris::term::{feedback_text, FrameBuffer, GameView, TerminalRenderer, Viewport};
use element_tetris::types::{Command, GameEvent, ShapePolicy};

const APP_NAME: &str = "Element Tetris";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence; the same seed replays the same pieces.
    /// Defaults to the current time.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Piece outlines: `monomino` (one cell per piece) or `tetromino`.
    #[arg(long, default_value = "monomino", value_parser = parse_shapes)]
    shapes: ShapePolicy,
    /// Starting board, rows separated by `/`, bottom-aligned.
    /// Cells are `F`, `W`, `R`, `D`, or `.`/space for empty.
    /// Example: `--board "RRRR.RRRRR/FWFW.WFWFW"`.
    #[arg(short, long, value_parser = parse_board)]
    board: Option<Grid>,
    /// Write debug logs to this file (nothing is logged otherwise).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_shapes(s: &str) -> Result<ShapePolicy, String> {
    ShapePolicy::from_str(s).ok_or_else(|| format!("unknown shape policy `{s}`"))
}

fn parse_board(s: &str) -> Result<Grid, String> {
    s.parse::<Grid>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    // Restore the terminal before printing, or the message is lost on the alternate screen.
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ =
            crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::style::ResetColor);
        let _ = crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::cursor::Show);
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stderr(),
            crossterm::terminal::LeaveAlternateScreen,
        );
        eprint!("{panic_info}\n\n");
    }));

    let seed = args.seed.unwrap_or_else(time_seed);
    let mut builder = GameSession::builder().seed(seed).shape_policy(args.shapes);
    if let Some(grid) = args.board {
        builder = builder.grid(grid);
    }
    let mut session = builder.build();
    info!(seed, shapes = args.shapes.as_str(), "starting");

    let mut term = TerminalRenderer::new();
    term.enter(APP_NAME)?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        score = session.score(),
        lines = session.lines(),
        level = session.level(),
        "quit"
    );
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = GameSnapshot::default();
    let mut events: Vec<GameEvent> = Vec::with_capacity(16);
    let mut feedback: Option<GameEvent> = None;

    let mut next_tick = Instant::now() + tick_interval(session);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into_with_feedback(&snap, feedback, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next soft-drop deadline.
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        events.clear();
                        session.apply_into(command, &mut events);
                        update_feedback(&events, &mut feedback);
                        if command == Command::Restart {
                            next_tick = Instant::now() + tick_interval(session);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Soft-drop timer.
        if Instant::now() >= next_tick {
            if session.playable() {
                events.clear();
                session.apply_into(Command::SoftDrop, &mut events);
                update_feedback(&events, &mut feedback);
            }
            next_tick = Instant::now() + tick_interval(session);
        }
    }
}

fn tick_interval(session: &GameSession) -> Duration {
    Duration::from_millis(u64::from(session.tick_interval_ms()))
}

/// Keep the most recent event worth showing; a new piece lock clears stale text.
fn update_feedback(events: &[GameEvent], feedback: &mut Option<GameEvent>) {
    if events.contains(&GameEvent::PieceLocked) {
        *feedback = None;
    }
    if let Some(&event) = events.iter().rev().find(|e| feedback_text(**e).is_some()) {
        *feedback = Some(event);
    }
}
