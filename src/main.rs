//! Sprite table command line entry point.
//!
//! Tools for content authors working on the sprite animation table:
//!
//! - `check` validates a sprite data file and prints a summary, or with
//!   `--json` the validated table in the authored format
//! - `show` prints one animation
//! - `play` boots the engine world headless and prints the frame shown at
//!   every tick, the same way the renderer would request them
//! - `boot` prints the payload handed to the engine
//!
//! # Running
//!
//! ```sh
//! cargo run -- play mario walking right --seconds 1 --dt 0.125
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{info, warn};

use spritetable::bootstrap::{self, BootError, animation_schedule, build_world};
use spritetable::components::animation::{CharacterState, animated_sprite};
use spritetable::components::sprite::Sprite;
use spritetable::resources::animationstore::{AnimationStore, SpriteAnimation};
use spritetable::resources::gameconfig::GameConfig;
use spritetable::resources::spritesheet::Direction;
use spritetable::systems::time::update_world_time;

/// Sprite animation table tools
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file (default: ./config.ini, optional).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate sprite data and print a summary.
    Check {
        /// Sprite data file; defaults to the configured one.
        #[arg(long, value_name = "PATH")]
        sprites: Option<PathBuf>,
        /// Print the validated table in the authored JSON format.
        #[arg(long)]
        json: bool,
    },
    /// Print one animation.
    Show {
        character: String,
        action: String,
        direction: Direction,
    },
    /// Play an animation headless and print the frame at each tick.
    Play {
        character: String,
        action: String,
        direction: Direction,
        /// Seconds of playback to simulate.
        #[arg(long, default_value_t = 1.0)]
        seconds: f32,
        /// Frame delta in seconds.
        #[arg(long, default_value_t = 0.0625)]
        dt: f32,
    },
    /// Print the payload handed to the engine.
    Boot,
}

fn load_config(path: Option<&Path>) -> Result<GameConfig, BootError> {
    match path {
        Some(path) => {
            let mut config = GameConfig::with_path(path);
            config.load_from_file().map_err(BootError::Config)?;
            Ok(config)
        }
        None => {
            let mut config = GameConfig::new();
            if let Err(e) = config.load_from_file() {
                warn!("{}; using defaults", e);
            }
            Ok(config)
        }
    }
}

fn print_animation(clip: &SpriteAnimation) {
    if clip.is_static() {
        println!("{} (static)", clip.key());
    } else {
        println!(
            "{} ({} frame(s), {}s per frame, {}s per loop)",
            clip.key(),
            clip.frames().len(),
            clip.frame_duration(),
            clip.cycle_duration()
        );
    }
    for (i, frame) in clip.frames().iter().enumerate() {
        println!("  [{}] {}", i, frame);
    }
}

fn check(
    config: &GameConfig,
    sprites: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let store = match sprites.or_else(|| config.sprites_path()) {
        Some(path) => AnimationStore::load_from_file(&path)?,
        None => AnimationStore::builtin()?,
    };
    if json {
        println!("{}", store.to_sheet().to_json_pretty()?);
        return Ok(());
    }
    println!("sheet: {}", store.image());
    for character in store.characters() {
        println!("{}: {}", character, store.actions(character).join(", "));
    }
    println!("{} animation(s) OK", store.len());
    Ok(())
}

fn play(
    config: &GameConfig,
    state: CharacterState,
    seconds: f32,
    dt: f32,
) -> Result<(), Box<dyn Error>> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(format!("--dt must be positive, got {}", dt).into());
    }

    let mut config = config.clone();
    config.variant = bootstrap::BootVariant::SpriteData;
    let flags = bootstrap::boot(&config)?;
    let mut world = build_world(&flags, config.time_scale);
    let store = world.resource::<AnimationStore>().clone();

    let entity = world.spawn(animated_sprite(&store, state)?).id();
    let mut schedule = animation_schedule();

    let ticks = (seconds.max(0.0) / dt).round() as u64;
    info!("Playing {} tick(s) of {}s", ticks, dt);
    for tick in 0..ticks {
        update_world_time(&mut world, dt);
        schedule.run(&mut world);
        let Some(sprite) = world.get::<Sprite>(entity) else {
            break;
        };
        println!("{:>4} {:>8.4}s {}", tick + 1, (tick + 1) as f32 * dt, sprite.source);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Check { sprites, json } => check(&config, sprites, json),
        Command::Show {
            character,
            action,
            direction,
        } => {
            let store = bootstrap::load_sprites(&config)?;
            print_animation(store.lookup(&character, &action, direction)?);
            Ok(())
        }
        Command::Play {
            character,
            action,
            direction,
            seconds,
            dt,
        } => play(
            &config,
            CharacterState::new(character, action, direction),
            seconds,
            dt,
        ),
        Command::Boot => {
            let flags = bootstrap::boot(&config)?;
            println!("variant: {}", flags.variant());
            println!("characters: {}", flags.characters_path.display());
            if let Some(tileset) = &flags.tileset_path {
                println!("tileset: {}", tileset.display());
            }
            if let Some(store) = &flags.sprites {
                println!("sprites: {} animation(s) on {}", store.len(), store.image());
            }
            Ok(())
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
