//! gartenhaus CLI - builds the timber-frame garden house
//!
//! Writes the assembled model, an exploded view and a fabrication layout as
//! STL, plus the part inventory as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gartenhaus::{
    arrange_with_config, build_house, build_inventory_with_tolerance, layout_union, CutGraph,
    HouseConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gartenhaus")]
#[command(about = "Parametric timber-frame garden house", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the house and write STL artifacts and the inventory
    Build {
        /// TOML configuration (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Print the part inventory as JSON
    Inventory {
        /// TOML configuration (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration and print the build stages
    Check {
        /// TOML configuration (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the default configuration as TOML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build { config, out } => {
            build(&load_config(config.as_deref())?, &out)?;
        }
        Commands::Inventory { config } => {
            let cfg = load_config(config.as_deref())?;
            let house = build_house(&cfg)?;
            let parts = arrange_with_config(&house.all_parts(), &cfg.layout)?;
            let inventory = build_inventory_with_tolerance(&parts, cfg.layout.inventory_tolerance);
            println!("{}", inventory.to_json_pretty()?);
        }
        Commands::Check { config } => {
            let cfg = load_config(config.as_deref())?;
            cfg.validate()?;
            println!("configuration ok");
            for (i, stage) in CutGraph::standard().stages()?.iter().enumerate() {
                let names: Vec<&str> = stage.iter().map(|k| k.name()).collect();
                println!("stage {i}: {}", names.join(", "));
            }
        }
        Commands::Defaults => {
            print!("{}", HouseConfig::default().to_toml_string()?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    // RUST_LOG directives still apply on top of the default level.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<HouseConfig> {
    match path {
        Some(path) => HouseConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(HouseConfig::default()),
    }
}

fn build(cfg: &HouseConfig, out: &Path) -> Result<()> {
    fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;

    let house = build_house(cfg)?;

    let full = out.join("gartenhaus.stl");
    house.full_model()?.write_stl(&full)?;
    info!(path = %full.display(), "wrote assembled model");

    let exploded = out.join("gartenhaus_exploded.stl");
    house.exploded_model()?.write_stl(&exploded)?;
    info!(path = %exploded.display(), "wrote exploded model");

    let parts = arrange_with_config(&house.all_parts(), &cfg.layout)?;
    let layout = out.join("gartenhaus_parts.stl");
    layout_union(&parts)?.write_stl(&layout)?;
    info!(path = %layout.display(), parts = parts.len(), "wrote fabrication layout");

    let inventory = build_inventory_with_tolerance(&parts, cfg.layout.inventory_tolerance);
    let json = out.join("gartenhaus_inventory.json");
    fs::write(&json, inventory.to_json_pretty()?)
        .with_context(|| format!("failed to write {}", json.display()))?;
    info!(
        path = %json.display(),
        shapes = inventory.len(),
        parts = inventory.total(),
        "wrote inventory"
    );

    Ok(())
}
