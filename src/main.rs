//! Skirmish - Entry Point
//!
//! Loads the configuration, builds the world and runs the blocking
//! read-command / run-round loop on the terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skirmish::command::parse_command;
use skirmish::core::config::GameConfig;
use skirmish::core::error::Result;
use skirmish::render::{FrameSink, TerminalSink};
use skirmish::simulation::{Control, TurnEngine};

/// Turn-based grid skirmish in the terminal
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file (defaults to the built-in scenario)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override grid height
    #[arg(long)]
    height: Option<usize>,

    /// Override grid width
    #[arg(long)]
    width: Option<usize>,

    /// Log level for stderr output when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Do not clear the screen between frames
    #[arg(long)]
    no_clear: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("skirmish={}", args.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(height) = args.height {
        config.world.height = height;
    }
    if let Some(width) = args.width {
        config.world.width = width;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let seed = args
        .seed
        .or(config.world.seed)
        .unwrap_or_else(rand::random);
    let mut engine = TurnEngine::from_config(config, seed)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut sink = if args.no_clear {
        TerminalSink::without_clear(stdout.lock())
    } else {
        TerminalSink::new(stdout.lock())
    };

    println!("Game starting... press Enter to continue");
    println!("Commands: up/down/left/right, back, attack <dir>, quit");
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(());
    }

    loop {
        engine.run_round()?;
        sink.present(&engine.status()?, engine.frame())?;

        if engine.is_over() {
            println!("Game over after {} rounds.", engine.round());
            break;
        }

        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        if engine.apply_command(parse_command(&line))? == Control::Quit {
            break;
        }
    }

    Ok(())
}
