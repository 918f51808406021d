use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tileworld_common::catalog;
use tileworld_input::InputState;
use tileworld_kernel::{World, WorldEvent};
use tileworld_render::{AsciiRenderer, PixelRenderer, RenderView, Renderer};
use tileworld_session::{Session, SessionConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tileworld-cli", about = "CLI tool for tileworld operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the block catalog
    Info,
    /// Print the session config as JSON (defaults, or a file merged over them)
    Config {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Materialize one column and list its blocks, top first
    Column {
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        column: i32,
    },
    /// Run a headless session and print where the actor ended up
    Run {
        /// World seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Horizontal input held for the whole run: -1, 0 or 1
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        walk: i8,
        /// Press jump every N ticks
        #[arg(short, long)]
        jump_every: Option<u64>,
        /// How to draw the final (or, with --realtime, every) frame
        #[arg(short, long, value_enum, default_value_t = RenderMode::Ascii)]
        render: RenderMode,
        /// Pace the simulation against the wall clock
        #[arg(long)]
        realtime: bool,
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenderMode {
    None,
    Ascii,
    Pixels,
}

/// Rows drawn below and above the actor.
const VIEW_BELOW: i32 = 12;
const VIEW_ABOVE: i32 = 8;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("tileworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("blocks:");
            for info in &catalog::CATALOG {
                let [r, g, b] = info.color;
                let (id, name, glyph) = (info.id.0, info.name, info.glyph);
                let loose = if info.loose { " loose" } else { "" };
                let hex = format!("#{r:02x}{g:02x}{b:02x}");
                println!("  {id:>2} {name:<10} '{glyph}' {hex}{loose}");
            }
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Column { seed, column } => {
            let mut world = World::with_seed(seed);
            let col = world.get_column(column).clone();
            println!(
                "column {column} (seed {seed}): surface height {}, {} blocks",
                col.height(),
                col.len()
            );
            for (row, block) in col.iter().collect::<Vec<_>>().into_iter().rev() {
                println!("  {row:>4} {block}");
            }
            for event in world.drain_events() {
                if let WorldEvent::StructurePlaced { kind, origin } = event {
                    println!("  placed {kind:?} from column {origin}");
                }
            }
            println!("materialized {} columns", world.column_count());
        }
        Commands::Run {
            seed,
            ticks,
            walk,
            jump_every,
            render,
            realtime,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                config.world.seed = seed;
            }
            let mut session = Session::new(config).context("failed to start session")?;
            let input_at = |tick: u64| {
                let jump = jump_every.is_some_and(|n| n > 0 && tick % n == 0);
                InputState::new(walk, jump)
            };

            if realtime {
                let frame = Duration::from_secs_f32(session.config().dt());
                let mut last = Instant::now();
                while session.tick_count() < ticks {
                    std::thread::sleep(frame);
                    let now = Instant::now();
                    let elapsed = now.duration_since(last).as_secs_f32();
                    last = now;
                    let tick = session.tick_count();
                    session
                        .advance(elapsed, input_at(tick))
                        .with_context(|| format!("simulation failed near tick {tick}"))?;
                    draw(&mut session, render);
                }
            } else {
                for tick in 0..ticks {
                    session
                        .tick(input_at(tick))
                        .with_context(|| format!("simulation failed at tick {tick}"))?;
                }
                draw(&mut session, render);
            }
            println!("{}", session.summary());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SessionConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

fn draw(session: &mut Session, mode: RenderMode) {
    if mode == RenderMode::None {
        return;
    }
    let actor = *session.actor();
    let radius = session.config().view_radius;
    let view = RenderView::around(
        actor.column(),
        radius,
        (actor.row() - VIEW_BELOW).max(0),
        actor.row() + VIEW_ABOVE,
    )
    .with_actor(actor.position);
    let window = session.visible_columns();

    match mode {
        RenderMode::Ascii => print!("{}", AsciiRenderer::new().render(&window, &view)),
        RenderMode::Pixels => {
            let renderer = PixelRenderer::default();
            let frame = renderer.render(&window, &view);
            let solid = frame.pixels.iter().filter(|&&p| p != renderer.sky).count();
            let (width, height) = (frame.width, frame.height);
            println!("frame {width}x{height}: {solid} non-sky pixels");
        }
        RenderMode::None => {}
    }
}
