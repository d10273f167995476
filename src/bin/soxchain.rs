use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use soxchain::{ChainSpec, SystemSox};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "soxchain", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the `sox` argument list for a chain as JSON.
    Args(ArgsArgs),
    /// Run a chain through `sox`.
    Build(BuildArgs),
    /// Play a file through a chain with `play`.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct ArgsArgs {
    /// Chain description JSON.
    #[arg(long)]
    chain: PathBuf,

    /// Input audio path.
    input: PathBuf,

    /// Output audio path.
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Chain description JSON.
    #[arg(long)]
    chain: PathBuf,

    /// Input audio path.
    input: PathBuf,

    /// Output audio path (overwritten if present).
    output: PathBuf,

    /// `sox` binary to run.
    #[arg(long, default_value = "sox")]
    sox: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Chain description JSON.
    #[arg(long)]
    chain: PathBuf,

    /// Input audio path.
    input: PathBuf,

    /// `play` binary to run.
    #[arg(long, default_value = "play")]
    play: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Args(args) => cmd_args(args),
        Command::Build(args) => cmd_build(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn cmd_args(args: ArgsArgs) -> anyhow::Result<()> {
    let tfm = ChainSpec::from_path(&args.chain)?.into_transformer()?;
    let tokens = tfm.args(&args.input, &args.output)?;
    let json = serde_json::to_string(&tokens).context("encode argument list")?;
    println!("{json}");
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let sox = Arc::new(SystemSox {
        sox_bin: args.sox,
        ..SystemSox::default()
    });
    let tfm = ChainSpec::from_path(&args.chain)?
        .into_transformer()?
        .with_engine(sox);
    tfm.build(&args.input, &args.output)
        .with_context(|| format!("build '{}'", args.output.display()))?;
    eprintln!("wrote {}", args.output.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let play = Arc::new(SystemSox {
        play_bin: args.play,
        ..SystemSox::default()
    });
    let tfm = ChainSpec::from_path(&args.chain)?
        .into_transformer()?
        .with_player(play);
    tfm.preview(&args.input)?;
    Ok(())
}
