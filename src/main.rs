//! # roadnet CLI
//!
//! Compiles an `.osm.pbf` extract into a routable network, or
//! re-runs single stages over an already compiled one.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{error, info};
use roadnet::config::ConfigError;
use roadnet::store::TableStore;
use roadnet::{CompileConfig, Compiler, Stage, Tile};

#[derive(Parser)]
#[command(name = "roadnet")]
#[command(about = "Compiles OpenStreetMap extracts into routable road networks")]
#[command(version)]
struct Cli {
    /// TOML configuration, defaults apply when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Admin polygons (JSON-lines), overrides the configured file
    #[arg(long, global = true)]
    admin: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Runs every stage over an extract
    Compile {
        /// The `.osm.pbf` extract to compile
        input: PathBuf,

        /// Directory receiving the tables
        #[arg(short, long, default_value = "graph")]
        out: PathBuf,
    },
    /// Re-runs a single stage
    Stage {
        stage: Stage,

        #[arg(short, long, default_value = "graph")]
        out: PathBuf,

        /// The extract, required by the `extract` stage only
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Summarises the compiled window of one tile
    Window {
        #[arg(short, long, default_value = "graph")]
        out: PathBuf,

        #[arg(short, long)]
        x: u32,

        #[arg(short, long)]
        y: u32,
    },
}

fn run(cli: Cli) -> roadnet::Result<()> {
    let mut config = match &cli.config {
        Some(path) => CompileConfig::load(path)?,
        None => CompileConfig::default(),
    };

    if let Some(admin) = cli.admin {
        config.admin.polygons = Some(admin);
    }

    match cli.command {
        Command::Compile { input, out } => {
            let compiler = Compiler::new(config, TableStore::create(out)?).with_source(input);
            compiler.run_all()
        }
        Command::Stage { stage, out, input } => {
            let mut compiler = Compiler::new(config, TableStore::create(out)?);
            if let Some(input) = input {
                compiler = compiler.with_source(input);
            }

            compiler.run(stage)
        }
        Command::Window { out, x, y } => {
            let zoom = config.grid()?.zoom();
            let tile = Tile::new(x, y, zoom).ok_or(ConfigError::OutsideGrid { x, y, zoom })?;

            let compiler = Compiler::new(config, TableStore::new(out));
            let (roads, intersections) = compiler
                .window(tile, |window| (window.roads.len(), window.intersections.len()))?;

            info!(
                "Tile {} ({x}, {y}, {zoom}) holds {roads} roads and {intersections} intersections",
                tile.index()
            );
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
