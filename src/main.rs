use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::{cursor, execute, terminal};
use flappy_dos::input::{self, Command};
use flappy_dos::render::{self, Frame, Screen, SpriteSet};
use flappy_dos::{Options, Session, State, Tuning};
use std::io::{self, IsTerminal, Stdout, stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

fn init_tracing(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("installing tracing subscriber")
}

/// Reason the terminal can't host the game, if any.
fn display_unavailable() -> Option<String> {
    if !stdout().is_terminal() {
        return Some("Error - an interactive terminal is required.".to_string());
    }
    match terminal::size() {
        Ok((cols, rows)) if cols >= MIN_COLS && rows >= MIN_ROWS => None,
        Ok((cols, rows)) => Some(format!(
            "Error - terminal must be at least {MIN_COLS}x{MIN_ROWS}, got {cols}x{rows}."
        )),
        Err(e) => Some(format!("Error - cannot query terminal size: {e}")),
    }
}

fn main() -> Result<()> {
    let opts = Options::parse();
    if let Some(path) = &opts.log_file {
        init_tracing(path)?;
    }

    if let Some(msg) = display_unavailable() {
        tracing::warn!(%msg, "display precondition failed");
        println!("{msg}");
        return Ok(());
    }

    let tuning = match &opts.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let sprites = match &opts.assets {
        Some(dir) => SpriteSet::load(dir)?,
        None => SpriteSet::builtin(&tuning),
    };
    let session = Session::new(tuning, opts.seed);
    let tick = Duration::from_millis(opts.tick_ms.max(1));

    tracing::info!(seed = ?opts.seed, tick_ms = opts.tick_ms, "starting");

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let result = run(&mut out, session, &sprites, tick);
    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "game loop failed");
    }
    let restored = cleanup(&mut out).context("restoring terminal");
    tracing::info!("stopped");
    finish(result, restored)
}

/// The game loop's error wins over a failed terminal restore.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    result.and(restored)
}

fn cleanup(out: &mut Stdout) -> io::Result<()> {
    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

/// Fixed-timestep loop: input, one gameplay tick, render, then sleep out
/// the rest of the tick.
fn run(out: &mut Stdout, mut session: Session, sprites: &SpriteSet, tick: Duration) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let t = session.tuning();
    let mut frame = Frame::new(t.screen_width as usize, t.screen_height as usize);
    let mut screen = Screen::new(cols, rows);

    loop {
        let tick_start = Instant::now();

        while let Some(cmd) = input::poll_command()? {
            match cmd {
                Command::Quit => return Ok(()),
                Command::Reset => session.reset(),
                Command::Press(c) => session.press(c),
                Command::Resize { cols, rows } => {
                    screen.resize(cols, rows);
                    execute!(out, terminal::Clear(terminal::ClearType::All))?;
                }
            }
        }

        if session.state() == State::Playing {
            session.tick();
        }

        render::draw_scene(&mut frame, &session, sprites);
        screen.present(&frame, out)?;

        let elapsed = tick_start.elapsed();
        if elapsed < tick {
            std::thread::sleep(tick - elapsed);
        }
    }
}
