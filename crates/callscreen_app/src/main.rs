//! callscreen - inspect and exercise call screen themes
//!
//! # Usage
//!
//! ```bash
//! # Catalog
//! callscreen list
//! callscreen show neon
//!
//! # Custom themes
//! callscreen duplicate sunset
//! callscreen activate custom-0b6f...
//! callscreen delete custom-0b6f...
//!
//! # Dry runs against a fake frame clock
//! callscreen simulate-swipe --distance 140
//! callscreen animate heartbeat --ms 1200
//!
//! # Verbose logging
//! RUST_LOG=debug callscreen list
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use callscreen_animation::{AnimationDriver, AnimationKind};
use callscreen_app::{CallSession, CallscreenConfig};
use callscreen_core::{Event, Target};
use callscreen_gesture::{CallActions, HapticFeedback, HapticKind, Intent};
use callscreen_theme::{
    is_builtin_id, resolve_theme, AnswerStyleType, FileStorage, ThemeStore, VideoFallback,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Inspect and exercise incoming-call themes
#[derive(Parser, Debug)]
#[command(name = "callscreen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./callscreen.toml when present)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding persisted theme state
    #[arg(short = 's', long, global = true, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List built-in and custom themes; `*` marks the active one
    List,
    /// Print a theme, resolved for display, as JSON
    Show { id: String },
    /// Make a theme the active one
    Activate { id: String },
    /// Copy a theme into a new custom theme
    Duplicate { id: String },
    /// Delete a custom theme
    Delete { id: String },
    /// Drag the answer slider and report what the call layer receives
    SimulateSwipe {
        /// Horizontal drag distance in logical px
        #[arg(long, allow_hyphen_values = true)]
        distance: f32,
        /// Theme to use instead of the active one
        #[arg(long)]
        theme: Option<String>,
        /// Give up after this many simulated ms
        #[arg(long, default_value_t = 3000)]
        timeout_ms: u32,
    },
    /// Print sampled motion values for an answer animation
    Animate {
        /// Animation id (pulse, glow, bounce, ...)
        kind: String,
        /// Simulated duration
        #[arg(long, default_value_t = 2000)]
        ms: u32,
        /// Print every n-th frame
        #[arg(long, default_value_t = 6)]
        every: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CallscreenConfig::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let storage_dir = cli
        .storage_dir
        .clone()
        .unwrap_or_else(|| config.storage.dir.clone());

    run(cli.command, &config, &storage_dir)
}

fn open_store(dir: &Path) -> Result<Arc<ThemeStore>> {
    let storage = FileStorage::open(dir)
        .with_context(|| format!("Failed to open storage at {}", dir.display()))?;
    Ok(Arc::new(ThemeStore::load(Arc::new(storage))))
}

fn run(command: Command, config: &CallscreenConfig, storage_dir: &Path) -> Result<()> {
    // `animate` needs no persisted state
    if let Command::Animate { kind, ms, every } = &command {
        return animate(config, kind, *ms, *every);
    }
    let store = open_store(storage_dir)?;

    match command {
        Command::List => {
            let active = store.active_theme().id;
            for theme in store.all_themes() {
                let marker = if theme.id == active { '*' } else { ' ' };
                let origin = if theme.is_custom { "custom" } else { "built-in" };
                println!(
                    "{marker} {:<40} {:<20} {:<9} {}",
                    theme.id,
                    theme.name,
                    theme.answer_style.kind.id(),
                    origin
                );
            }
        }
        Command::Show { id } => {
            let theme = store
                .theme(&id)
                .with_context(|| format!("Unknown theme `{id}`"))?;
            let resolved = resolve_theme(&theme, &VideoFallback::new());
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Command::Activate { id } => {
            if store.theme(&id).is_none() {
                tracing::warn!("`{}` is not a known theme; the default will be shown", id);
            }
            store.set_active_theme(&id);
            println!("active theme: {}", store.active_theme().id);
        }
        Command::Duplicate { id } => {
            let copy = store.duplicate_theme(&id);
            println!("{}\t{}", copy.id, copy.name);
        }
        Command::Delete { id } => {
            if is_builtin_id(&id) {
                anyhow::bail!("`{id}` is a built-in theme and cannot be deleted");
            }
            if !store.delete_custom_theme(&id) {
                anyhow::bail!("No custom theme `{id}`");
            }
            println!("deleted {id}");
        }
        Command::SimulateSwipe {
            distance,
            theme,
            timeout_ms,
        } => simulate_swipe(config, store, distance, theme.as_deref(), timeout_ms)?,
        Command::Animate { .. } => {}
    }
    Ok(())
}

/// Prints intents as the call layer would receive them
struct PrintActions;

impl CallActions for PrintActions {
    fn on_answer(&mut self) {
        println!("intent: answer");
    }

    fn on_decline(&mut self) {
        println!("intent: decline");
    }
}

struct PrintHaptics;

impl HapticFeedback for PrintHaptics {
    fn impact(&mut self, kind: HapticKind) {
        println!("haptic: {:?} ({}ms)", kind, kind.duration_ms());
    }
}

fn simulate_swipe(
    config: &CallscreenConfig,
    store: Arc<ThemeStore>,
    distance: f32,
    theme_id: Option<&str>,
    timeout_ms: u32,
) -> Result<()> {
    let mut theme = match theme_id {
        Some(id) => store
            .theme(id)
            .with_context(|| format!("Unknown theme `{id}`"))?,
        None => store.active_theme(),
    };
    if theme.answer_style.kind != AnswerStyleType::Ios {
        println!(
            "theme `{}` uses {} buttons, simulating with the slider layout",
            theme.id,
            theme.answer_style.kind.id()
        );
        theme.answer_style.kind = AnswerStyleType::Ios;
    }

    let mut session = CallSession::with_theme(
        store,
        theme,
        Box::new(PrintActions),
        Box::new(PrintHaptics),
        config.controller_config(),
    );
    let frame_ms = config.simulation.frame_ms();

    session.handle(&Event::pointer_down(Target::SliderThumb));
    let steps = 8;
    for step in 1..=steps {
        let dx = distance * step as f32 / steps as f32;
        session.handle(&Event::pointer_move(Target::SliderThumb, dx, 0.0));
        session.tick(frame_ms);
    }
    session.handle(&Event::pointer_up(Target::SliderThumb, distance, 0.0));
    println!(
        "released at {:.1}px -> {:?}",
        session.controller().thumb_offset(),
        session.state()
    );

    let mut elapsed = 0.0;
    while elapsed < timeout_ms as f32 && session.emitted().is_none() {
        session.tick(frame_ms);
        elapsed += frame_ms;
        if !session.controller().is_animating() {
            break;
        }
    }

    match session.emitted() {
        Some(Intent::Answer) => println!("answered {elapsed:.0}ms after release"),
        Some(other) => println!("committed {other:?}"),
        None => println!(
            "not answered; thumb at {:.1}px after {elapsed:.0}ms",
            session.controller().thumb_offset()
        ),
    }
    Ok(())
}

fn animate(config: &CallscreenConfig, kind: &str, ms: u32, every: u32) -> Result<()> {
    let kind = AnimationKind::from_id(kind);
    if kind == AnimationKind::None {
        println!("`none` (or an unknown id) holds every value at rest");
    }

    let frame_ms = config.simulation.frame_ms();
    let mut driver = AnimationDriver::with_kind(kind);
    let every = every.max(1);

    println!(
        "{:>7} {:>6} {:>6} {:>6} {:>6} {:>7} {:>7} {:>8} {:>6}",
        "t(ms)", "scale", "sx", "sy", "glow", "bounce", "shake", "rotate", "alpha"
    );
    let mut frame = 0u32;
    let mut t = 0.0;
    while t <= ms as f32 {
        if frame % every == 0 {
            let v = driver.values();
            println!(
                "{:>7.0} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>7.2} {:>7.2} {:>8.2} {:>6.3}",
                t, v.scale, v.scale_x, v.scale_y, v.glow, v.bounce, v.shake, v.rotation, v.opacity
            );
        }
        driver.tick(frame_ms);
        t += frame_ms;
        frame += 1;
    }
    Ok(())
}
