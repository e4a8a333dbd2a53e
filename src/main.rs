//! QR tetris animator (default binary).
//!
//! Encodes the given data as a QR code, carves a bowl into its top edge and
//! plays a tetris program into it. Frames can be previewed live, recorded as
//! an animated GIF and dumped as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use qr_tetris::core::{run, trim, Fanout, FrameCounter, FrameSink, Program, RunConfig};
use qr_tetris::qr;
use qr_tetris::recorder::{FrameLog, GifOptions, GifRecorder};
use qr_tetris::term::{render_ascii, Preview};

/// qr-tetris - drop tetris pieces into a QR code
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data to encode
    #[arg(short, long)]
    data: String,

    /// Seconds per regular frame
    #[arg(short, long, default_value_t = 0.5)]
    interval: f64,

    /// Seconds per drop step
    #[arg(short, long, default_value_t = 0.1)]
    fast_interval: f64,

    /// Write an animated GIF here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Preview the animation in the terminal
    #[arg(short, long)]
    show: bool,

    /// Program text (instructions separated by `;` or newlines), or @FILE
    #[arg(short, long)]
    program: Option<String>,

    /// Error correction level
    #[arg(long, value_enum, default_value_t = EcArg::H)]
    ec_level: EcArg,

    /// Rotate the code a quarter turn before trimming
    #[arg(long, value_enum)]
    turn: Option<Turn>,

    /// Print the trimmed code to stdout
    #[arg(long)]
    ascii: bool,

    /// Write every frame as JSON here
    #[arg(long)]
    frames_json: Option<PathBuf>,

    /// Allow spawning onto occupied or off-grid cells
    #[arg(long)]
    no_spawn_check: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EcArg {
    L,
    M,
    Q,
    H,
}

impl From<EcArg> for qrcode::EcLevel {
    fn from(level: EcArg) -> Self {
        match level {
            EcArg::L => qrcode::EcLevel::L,
            EcArg::M => qrcode::EcLevel::M,
            EcArg::Q => qrcode::EcLevel::Q,
            EcArg::H => qrcode::EcLevel::H,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Turn {
    Cw,
    Ccw,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let program = load_program(args.program.as_deref())?;
    let config = RunConfig::new()
        .with_interval(seconds(args.interval, "--interval")?)
        .with_fast_interval(seconds(args.fast_interval, "--fast-interval")?)
        .with_spawn_check(!args.no_spawn_check);

    let mut grid = qr::encode(&args.data, args.ec_level.into())?;
    if let Some(turn) = args.turn {
        grid = grid.rotated(turn == Turn::Cw);
    }
    let cut = trim(&grid).context("failed to trim QR code")?;
    tracing::info!(
        size = cut.grid.size(),
        start = cut.markers.start,
        finish = cut.markers.finish,
        "trimmed code"
    );
    if args.ascii {
        print!("{}", render_ascii(&cut.grid, 2, true));
    }

    let mut gif = args
        .output
        .as_ref()
        .map(|_| GifRecorder::new(GifOptions::default()));
    let mut log = args.frames_json.as_ref().map(|_| FrameLog::new());
    let mut counter = FrameCounter::default();
    let mut preview = if args.show { Some(Preview::new()) } else { None };

    if let Some(p) = preview.as_mut() {
        p.enter()?;
    }
    let result = {
        let mut sinks = Fanout::new();
        sinks.push(&mut counter);
        if let Some(g) = gif.as_mut() {
            sinks.push(g);
        }
        if let Some(l) = log.as_mut() {
            sinks.push(l);
        }
        if let Some(p) = preview.as_mut() {
            sinks.push(p);
        }
        run(cut.grid, &program, config, &mut sinks as &mut dyn FrameSink)
    };
    // Always try to restore terminal state.
    if let Some(p) = preview.as_mut() {
        let _ = p.exit();
    }
    let (field, summary) = result.context("animation failed")?;

    if let (Some(path), Some(gif)) = (args.output.as_deref(), gif) {
        gif.finish(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if let (Some(path), Some(log)) = (args.frames_json.as_deref(), log) {
        log.write(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    tracing::info!(
        instructions = summary.instructions,
        frames = summary.frames,
        drop_frames = counter.fast_frames,
        locked = field.locked_pieces(),
        seconds = counter.total.as_secs_f64(),
        "done"
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Inline program, `@path` to read one from a file, or the demo
fn load_program(arg: Option<&str>) -> Result<Program> {
    let Some(arg) = arg else {
        tracing::info!("no program given, running the demo");
        return Ok(Program::demo());
    };
    let program = match arg.strip_prefix('@') {
        Some(path) => {
            let source = fs::read_to_string(Path::new(path))
                .with_context(|| format!("failed to read program {path}"))?;
            Program::parse(&source)
        }
        None => Program::parse(arg),
    };
    program.context("invalid program")
}

fn seconds(value: f64, flag: &str) -> Result<Duration> {
    if !value.is_finite() || value < 0.0 {
        bail!("{flag} must be a non-negative number of seconds, got {value}");
    }
    Duration::try_from_secs_f64(value).with_context(|| format!("{flag} is out of range"))
}
