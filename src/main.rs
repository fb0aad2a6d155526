use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sketchboard::{Board, Command, Config};

/// Replays a recorded drawing session and exports the canvas as PNG.
#[derive(Parser, Debug)]
#[command(name = "sketchboard", version)]
struct Cli {
    /// JSON array of commands to replay
    session: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "sketch.png")]
    output: PathBuf,

    /// JSON config with canvas size, tool styles and font
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Print the final element list as JSON
    #[arg(long)]
    elements: bool,
}

fn main() -> anyhow::Result<()> {
    sketchboard::init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }

    let text = std::fs::read_to_string(&cli.session)
        .with_context(|| format!("reading session {}", cli.session.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&text)
        .with_context(|| format!("parsing session {}", cli.session.display()))?;
    log::info!("replaying {} commands", commands.len());

    let mut board = Board::new(&config).context("creating board")?;
    board.replay(commands).context("replaying session")?;

    if cli.elements {
        println!("{}", serde_json::to_string_pretty(board.elements())?);
    }
    board
        .save_png(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    Ok(())
}
