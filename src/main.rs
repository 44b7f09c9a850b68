/// Main application entry point
/// Handles config, logging, terminal setup and the frame loop
use anyhow::{Context, Result};
use ascii_voxel::terminal::{InputState, Screen, CONTROLS};
use ascii_voxel::{Game, GameConfig, Terrain};
use clap::Parser;
use mimalloc::MiMalloc;
use std::fs::File;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Longest physics step; keeps a stalled frame from tunnelling the player
const MAX_DT: f32 = 0.1;

#[derive(Parser, Debug)]
#[command(name = "ascii-voxel", about = "Ray-marched voxel world in the terminal")]
struct Args {
    /// TOML configuration file; defaults are used for missing keys
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render width in characters
    #[arg(long)]
    width: Option<usize>,

    /// Render height in characters
    #[arg(long)]
    height: Option<usize>,

    /// Generate hilly terrain from this seed instead of flat ground
    #[arg(long)]
    seed: Option<u32>,

    /// Cast rays on a single thread
    #[arg(long)]
    single_threaded: bool,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Log destination (stdout is the game screen)
    #[arg(long, default_value = "ascii-voxel.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = load_config(&args)?;
    let mut game = Game::new(config).context("failed to start game")?;

    println!("=== ASCII Voxel ===");
    println!("Controls:");
    for (keys, action) in CONTROLS {
        println!("  {:<6} - {}", keys, action);
    }
    println!();

    let result = run(&mut game, args.frames);
    game.stats().log_summary();
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(seed) = args.seed {
        config.world.terrain = Terrain::Hills {
            seed,
            base_height: 4,
            amplitude: 2.5,
        };
    }
    if args.single_threaded {
        config.render.parallel = false;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(game: &mut Game, frame_limit: Option<u64>) -> Result<()> {
    let highlight = game.renderer().highlight;
    let frame_delay = Duration::from_millis(game.config().frame_delay_ms);
    let mut screen = Screen::new(highlight).context("failed to initialize terminal")?;
    let mut input = InputState::new();

    let mut last_frame = Instant::now();
    let mut frames = 0u64;

    while game.is_running() {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).as_secs_f32().min(MAX_DT);
        last_frame = frame_start;

        let intents = input.poll().context("failed to read keyboard")?;
        let buffer = game.tick(intents, dt);
        screen.draw(buffer).context("failed to draw frame")?;

        frames += 1;
        if frame_limit.is_some_and(|limit| frames >= limit) {
            break;
        }
        if frames % 100 == 0 {
            log::debug!(
                "[Frame] {} frames, last {:.2}ms",
                frames,
                game.stats().last_frame.as_secs_f64() * 1000.0
            );
        }

        thread::sleep(frame_delay.saturating_sub(frame_start.elapsed()));
    }

    Ok(())
}
