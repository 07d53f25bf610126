use anyhow::{Context, Result};
use clap::Parser;
use hoi4army::{BasingStrategy, convert_world};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

mod loader;

/// Convert source armies and navies into destination force hierarchies.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World snapshot (JSON): provinces, adjacency, location mapping, formations
    #[arg(long)]
    world: PathBuf,

    /// Unit type definitions: a script file or a directory of them
    #[arg(long)]
    units: PathBuf,

    /// Unit mapping rules
    #[arg(long)]
    mapping: PathBuf,

    /// Converter configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Adjacency CSV (From;To), replaces the snapshot's adjacency
    #[arg(long)]
    adjacencies: Option<PathBuf>,

    /// Output file (JSON); stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Basing candidate choice (first, seeded, random)
    #[arg(long)]
    basing: Option<BasingStrategy>,

    /// Seed for seeded basing
    #[arg(long)]
    seed: Option<u64>,

    /// Source mod whose unit mapping rule set to use
    #[arg(long = "mod")]
    mod_id: Option<String>,

    /// Practicals scale factor
    #[arg(long)]
    practicals_scale: Option<f64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    log::info!("Starting vic2hoi4...");

    let mut config = loader::load_config(args.config.as_deref())?;
    if let Some(basing) = args.basing {
        config.basing = basing;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
        // A seed on the command line implies seeded basing unless told otherwise
        if args.basing.is_none() {
            config.basing = BasingStrategy::Seeded;
        }
    }
    if let Some(mod_id) = args.mod_id {
        config.mods.insert(0, mod_id);
    }
    if let Some(scale) = args.practicals_scale {
        config.practicals_scale = scale;
    }
    config.validate()?;

    let table = loader::load_mapping_table(&args.units, &args.mapping, &config)?;
    let mut world = loader::load_world(&args.world, args.adjacencies.as_deref())?;

    let report = convert_world(&table, &config, &mut world);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {:?}", path))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.flush()?;
            log::info!("Wrote converted forces to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}
