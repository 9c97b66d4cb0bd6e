//! Terminal 3D Tetris runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tetris3d-term`.
//! The game itself is driven through a [`Session`] on a manual clock that this
//! loop advances with wall time.
//!
//! Logging goes to the file named by `TETRIS3D_LOG` (nothing is logged when it
//! is unset, since stdout belongs to the game). `RUST_LOG` filters as usual.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tetris3d::core::{GameConfig, ManualClock, Scene, Session};
use tetris3d::input::{handle_key_event, should_quit, Command};
use tetris3d::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris3d::types::TICK_MS;

const ENV_LOG: &str = "TETRIS3D_LOG";

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env().context("invalid game configuration")?;
    info!(?config, "configuration loaded");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        warn!(error = %e, "exited with error");
    }
    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(ENV_LOG) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.to_string_lossy()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tetris3d=info,tetris3d_core=info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut session = Session::new(config, ManualClock::new());

    let mut view = GameView::default();
    let mut scene = Scene::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_size = (0u16, 0u16);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != last_size {
            last_size = (w, h);
            term.invalidate();
        }
        session.scene_into(&mut scene);
        view.render_into(&scene, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(score = session.game().score(), "quit");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        apply_command(&mut session, command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.advance_clock(elapsed.as_millis() as u64);
            session.tick();
        }
    }
}

fn apply_command(session: &mut Session<ManualClock>, command: Command) {
    match command {
        Command::Play(action) => {
            session.enqueue_action(action);
        }
        Command::Start => {
            session.start();
        }
        Command::TogglePause => {
            session.toggle_pause();
        }
        Command::Reset => session.reset(),
        Command::End => {
            session.end();
        }
    }
}
