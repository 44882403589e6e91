//! Command-line front end for the flatgraph engine.
//!
//! Reads JSON fixtures, runs them through [`EntityEngine::cms`] and prints
//! the result as JSON on stdout. Logs go to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flatgraph_engine::{EngineConfig, EntityEngine};
use flatgraph_model::{EntitySchema, EntityStore};
use flatgraph_types::{EntityId, EntityType};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "flatgraph")]
#[command(about = "Normalize and denormalize CMS entity graphs")]
pub struct Args {
    /// Path to engine config (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Flatten a raw entity (or array of entities) into a store
    Normalize {
        /// Entity type of the input
        #[arg(short = 't', long = "type")]
        entity_type: EntityType,

        /// Input file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Rebuild one nested entity from a store file
    Denormalize {
        /// Entity type of the root
        #[arg(short = 't', long = "type")]
        entity_type: EntityType,

        /// Id of the root entity
        #[arg(long)]
        id: EntityId,

        /// Store file as produced by `normalize` (the `entities` object)
        #[arg(short, long)]
        store: PathBuf,
    },

    /// Print the schema catalogue
    Schema {
        /// Only print this type
        #[arg(short = 't', long = "type")]
        entity_type: Option<EntityType>,
    },
}

/// Installs the global log subscriber. Logs are written to stderr so stdout
/// stays machine-readable.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Runs one command and returns the JSON text to print.
pub fn run(args: &Args, stdin: impl Read) -> Result<String> {
    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::default(),
    };
    let engine = EntityEngine::cms().with_config(config);
    info!("Running {:?}", args.command);

    let output = match &args.command {
        Command::Normalize { entity_type, input } => {
            let raw = read_json(input.as_deref(), stdin)?;
            let normalized = engine
                .normalize(*entity_type, &raw)
                .with_context(|| format!("failed to normalize {entity_type}"))?;
            serde_json::to_value(normalized)?
        }
        Command::Denormalize {
            entity_type,
            id,
            store,
        } => {
            let store: EntityStore = serde_json::from_value(read_json(Some(store), stdin)?)
                .with_context(|| format!("{} is not an entity store", store.display()))?;
            debug!("Loaded store with {} entities", store.len());
            engine
                .denormalize_id(*entity_type, id, &store)
                .with_context(|| format!("failed to denormalize {entity_type} {id}"))?
                .unwrap_or(Value::Null)
        }
        Command::Schema { entity_type } => {
            let schemas: Vec<&EntitySchema> = engine
                .registry()
                .schemas()
                .filter(|s| entity_type.is_none_or(|t| s.entity_type == t))
                .collect();
            serde_json::to_value(schemas)?
        }
    };

    let text = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(text)
}

fn read_json(path: Option<&Path>, mut stdin: impl Read) -> Result<Value> {
    let (contents, source) = match path {
        Some(path) => (
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            (buf, "stdin".to_string())
        }
    };
    serde_json::from_str(&contents).with_context(|| format!("{source} is not valid JSON"))
}
