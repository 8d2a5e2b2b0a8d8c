use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use waveview_core::{
    AppConfig, AudioCapture, AudioPlayback, DisplayList, Engine, PcmReader, PcmWriter, Scene,
    ScriptedPlatform, ToneGenerator, WaveviewError,
};

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Live(args) => run_live(args),
        Commands::Config { config } => print_config(config.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(?err, "exiting with failure");
            eprintln!("waveview: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> waveview_core::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_path(path),
        None => Ok(AppConfig::live_defaults()),
    }
}

fn run_live(args: LiveArgs) -> waveview_core::Result<()> {
    let config = load_config(args.config.as_deref())?;
    if args.playback && args.frames.is_none() {
        return Err(WaveviewError::msg("--playback needs a bounded session (--frames)"));
    }
    tracing::info!(
        tone = args.tone,
        frames = args.frames,
        sample_rate = config.audio.sample_rate,
        channels = config.audio.channels,
        buffer_len = config.audio.buffer_len,
        "starting live mode"
    );

    let capture: Box<dyn AudioCapture> = match args.tone {
        Some(frequency) => Box::new(ToneGenerator::new(config.audio.spec(), frequency).paced()),
        None => Box::new(PcmReader::new(io::stdin().lock())),
    };

    let mut platform = ScriptedPlatform::create_window(config.window.width, config.window.height);
    if let Some(path) = &args.events {
        platform = platform.with_script(ScriptedPlatform::load_script(path)?);
    }

    let scene = Scene::standard(&config)?;
    let mut engine = Engine::new(
        scene,
        config.audio.buffer_len,
        capture,
        platform,
        DisplayList::new(),
    )
    .recording(args.record);

    let mut dump = match &args.dump {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let mut frame = 0_u64;
    while args.frames.map_or(true, |limit| frame < limit) {
        engine.tick()?;
        let commands = engine.canvas_mut().drain();
        if let Some(out) = dump.as_mut() {
            for command in &commands {
                serde_json::to_writer(&mut *out, command)?;
                out.write_all(b"\n")?;
            }
        }
        frame += 1;
    }

    if let Some(mut out) = dump {
        out.flush()?;
    }

    let canvas = engine.canvas();
    tracing::info!(
        frames = engine.frames(),
        fills = canvas.fills(),
        strokes = canvas.strokes(),
        recorded_samples = engine.clip_history().map_or(0, <[i16]>::len),
        "session finished"
    );

    if args.playback {
        play_clip(engine.clip_history().unwrap_or_default())?;
    }
    Ok(())
}

fn play_clip(samples: &[i16]) -> waveview_core::Result<()> {
    tracing::info!(samples = samples.len(), "playing back recorded clip");
    let mut sink = PcmWriter::new(io::stdout().lock());
    sink.write(samples)?;
    sink.drain()
}

fn print_config(path: Option<&Path>) -> waveview_core::Result<()> {
    let config = load_config(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Live audio waveform and strip-chart surface", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Capture audio and render it until interrupted.
    Live(LiveArgs),
    /// Print the effective configuration as JSON.
    Config {
        /// Configuration file to validate and print instead of the defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct LiveArgs {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Capture a synthetic sine tone of this frequency instead of reading
    /// raw s16le PCM from stdin.
    #[arg(long)]
    tone: Option<f64>,
    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,
    /// JSON script of window events to replay.
    #[arg(long)]
    events: Option<PathBuf>,
    /// Start with recording switched on.
    #[arg(long)]
    record: bool,
    /// Write every draw command as a line of JSON to this file.
    #[arg(long)]
    dump: Option<PathBuf>,
    /// After the session, write the recorded clip to stdout as raw s16le PCM.
    #[arg(long)]
    playback: bool,
}
