//! Hungry Critter entry point
//!
//! Parses the command line, sets up logging and runs the game on the
//! terminal (or, with `--headless`, a short scripted demo run).

use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use hungry_critter::audio::{AudioManager, LogAudio};
use hungry_critter::platform::{
    FrameClock, ManualClock, RecordingRenderer, ScriptedInput, TerminalGuard, TerminalInput,
};
use hungry_critter::renderer::TerminalRenderer;
use hungry_critter::sim::{Direction, TickInput};
use hungry_critter::ui::TitleScreen;
use hungry_critter::{App, ScreenMode, Settings};

#[derive(Parser, Debug)]
#[command(name = "hungry-critter")]
#[command(about = "Eat the berries, dodge the thrown balls")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,
    /// Write logs to this file (the terminal is busy with the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Play a scripted demo of this many ticks without a terminal
    #[arg(long, value_name = "TICKS")]
    headless: Option<usize>,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_settings: bool,
}

fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    let default_level = if args.log_file.is_some() || args.headless.is_some() {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Off
    };
    builder.filter_level(default_level);
    builder.parse_default_env();
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(fps) = args.fps {
        settings.target_fps = fps;
    }
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn run_terminal(settings: Settings) -> Result<()> {
    let arena = Vec2::new(settings.arena_width, settings.arena_height);
    let fps = settings.target_fps;
    let audio = AudioManager::from_settings(&settings, Box::new(LogAudio));

    let guard = TerminalGuard::enter().context("failed to prepare the terminal")?;
    let renderer = TerminalRenderer::for_terminal(stdout(), arena)?;
    let input = TerminalInput::new(renderer.mapping())
        .with_release_events(guard.reports_key_release())
        .with_frame_rate(fps);

    let mut app = App::new(settings, renderer, input, FrameClock::new(), audio);
    if let Err(e) = app.run() {
        log::error!("Game loop failed: {e}");
        return Err(e.into());
    }
    Ok(())
}

/// Click Start, wander around the arena, then quit
fn demo_script(arena: Vec2, ticks: usize) -> ScriptedInput {
    let title = TitleScreen::new(arena);
    let start = title
        .button(ScreenMode::NewGame)
        .map(|b| b.center())
        .unwrap_or(arena / 2.0);

    let mut script = ScriptedInput::new([TickInput::click_at(start)]).then_quit();
    let legs = [
        vec![Direction::Right],
        vec![Direction::Down],
        vec![Direction::Left, Direction::Up],
        vec![],
    ];
    let leg_len = 30;
    let mut left = ticks.saturating_sub(1);
    for leg in legs.iter().cycle() {
        if left == 0 {
            break;
        }
        let len = left.min(leg_len);
        script.repeat(TickInput::holding(leg), len);
        left -= len;
    }
    script
}

fn run_headless(settings: Settings, ticks: usize) -> Result<()> {
    let arena = Vec2::new(settings.arena_width, settings.arena_height);
    let fps = settings.target_fps;
    let audio = AudioManager::from_settings(&settings, Box::new(LogAudio));

    let mut app = App::new(
        settings,
        RecordingRenderer::new(),
        demo_script(arena, ticks),
        ManualClock::at_fps(fps),
        audio,
    );
    app.run()?;

    let scores = app.scores();
    println!(
        "seed {}: {} frames, current {}, last {}, high {}",
        app.seed(),
        app.renderer().frames(),
        scores.current,
        scores.last,
        scores.high
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    log::info!("Hungry Critter starting...");

    let settings = load_settings(&args)?;

    if args.print_settings {
        println!("{}", settings.to_json_pretty()?);
        return Ok(());
    }

    match args.headless {
        Some(ticks) => run_headless(settings, ticks),
        None => run_terminal(settings),
    }
}
