use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::Command;

const CLIPPY_ARGS: &[&str] = &[
    "clippy",
    "--workspace",
    "--all-targets",
    "--",
    "-D",
    "warnings",
];

const BENCH_ARGS: &[&str] = &[
    "bench",
    "-p",
    "tileworld-kernel",
    "--bench",
    "bench_materialize",
];

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for tileworld")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc, replay
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Run the kernel benchmarks in release mode
    Bench,
    /// Run the same headless session twice and compare the final summaries
    Replay {
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(short, long, default_value = "600")]
        ticks: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt --check", &["fmt", "--all", "--", "--check"])?;
            cargo("clippy", CLIPPY_ARGS)?;
            cargo("test", &["test", "--workspace"])?;
            cargo("doc", &["doc", "--workspace", "--no-deps"])?;
            replay(42, 600)?;
        }
        Commands::Fmt => cargo("fmt --check", &["fmt", "--all", "--", "--check"])?,
        Commands::Clippy => cargo("clippy", CLIPPY_ARGS)?,
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Doc => cargo("doc", &["doc", "--workspace", "--no-deps"])?,
        Commands::Bench => cargo("bench", BENCH_ARGS)?,
        Commands::Replay { seed, ticks } => replay(seed, ticks)?,
    }

    Ok(())
}

fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {label}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {label} failed");
    }
    Ok(())
}

/// Two runs with the same seed and inputs must end in the same state.
fn replay(seed: u64, ticks: u64) -> Result<()> {
    println!("==> Replaying seed={seed} for {ticks} ticks");
    let seed = seed.to_string();
    let ticks = ticks.to_string();
    let args = [
        "run",
        "-q",
        "-p",
        "tileworld-cli",
        "--",
        "run",
        "--seed",
        seed.as_str(),
        "--ticks",
        ticks.as_str(),
        "--jump-every",
        "45",
        "--render",
        "none",
    ];

    let mut summaries = Vec::with_capacity(2);
    for _ in 0..2 {
        let output = Command::new("cargo")
            .args(args)
            .output()
            .context("failed to launch tileworld-cli")?;
        if !output.status.success() {
            anyhow::bail!(
                "tileworld-cli run failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        let stdout = String::from_utf8(output.stdout).context("invalid UTF-8")?;
        summaries.push(stdout);
    }

    let (first, second) = (summaries[0].trim(), summaries[1].trim());
    if first != second {
        anyhow::bail!("replay diverged:\n  {first}\n  {second}");
    }
    println!("    {first}");
    Ok(())
}
