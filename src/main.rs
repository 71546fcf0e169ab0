mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use arcade_shooter::audio::{AudioQueue, Silent, SoundSink};
use arcade_shooter::config::Config;
use arcade_shooter::game::Arcade;
use arcade_shooter::input::{is_quit, KeyTracker};
use arcade_shooter::render::Frame;

const TITLE: &str = "Arcade Shooter";

#[derive(Parser, Debug)]
#[command(name = "arcade_shooter")]
#[command(about = "A tiny terminal arcade shooter")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second (overrides the config file)
    #[arg(long)]
    fps: Option<u32>,

    /// Log file path (overrides the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Tint the background with the cycling hue
    #[arg(long)]
    cycle_background: bool,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(seed) = self.seed {
            cfg.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            cfg.fps = fps;
        }
        if let Some(file) = self.log_file {
            cfg.log.file = file;
        }
        if self.cycle_background {
            cfg.cycle_background = true;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: stdout/stderr belong to the game screen while it runs.
fn init_logging(cfg: &Config) -> Result<()> {
    let file = File::create(&cfg.log.file)
        .with_context(|| format!("create log file {}", cfg.log.file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log.level))
        .with_context(|| format!("bad log level {:?}", cfg.log.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key.  Fixed timestep: one `update` + `draw` per frame,
/// sleeping off whatever is left of the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Arcade,
    rx: &mpsc::Receiver<Event>,
    fps: u32,
) -> Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / fps as f64);
    let mut keys = KeyTracker::for_fps(fps);
    let mut frame = Frame::new();
    let mut tick: u64 = 0;

    loop {
        let frame_start = Instant::now();
        tick += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if is_quit(&ev) {
                return Ok(());
            }
            if let Event::Resize(..) = ev {
                display::clear(out)?;
            }
            keys.observe(&ev, tick);
        }

        game.update(&keys.snapshot(tick));
        game.draw(&mut frame);

        let (cols, rows) = terminal::size()?;
        display::render(out, &frame, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    if let Err(e) = try_main() {
        tracing::error!("fatal: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cfg = Args::parse().into_config()?;
    init_logging(&cfg)?;

    let sounds: Box<dyn SoundSink> = match AudioQueue::start() {
        Ok(queue) => Box::new(queue),
        Err(e) => {
            tracing::warn!("running without sound: {e}");
            Box::new(Silent)
        }
    };
    let mut game = Arcade::new(&cfg, sounds);
    let (w, h) = game.layout(0, 0);
    tracing::info!(width = w, height = h, fps = cfg.fps, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(TITLE))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                tracing::warn!("input thread stopped: {e}");
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx, cfg.fps);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let state = game.state();
    tracing::info!(
        seed = game.seed(),
        score = state.score,
        frames = state.frame,
        "game over"
    );
    if result.is_ok() {
        println!("Score: {}  ({} frames, seed {})", state.score, state.frame, game.seed());
    }
    result
}
