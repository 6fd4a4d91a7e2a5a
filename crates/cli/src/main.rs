//! Administrative CLI for Lattice.

mod spec_file;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use lattice_array::{Array, OpenOptions};
use lattice_core::{ArraySchema, Encryption, EngineBackendConfig, EngineConfig};
use lattice_engine::Context;
use serde::Deserialize;
use spec_file::SchemaSpec;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "latticectl")]
#[command(about = "Administrative CLI for the Lattice array store")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, env = "LATTICE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an array from a declarative schema document
    Create {
        /// Array URI (a directory path for the filesystem engine)
        uri: String,
        /// Schema document (TOML or JSON, chosen by extension)
        #[arg(long)]
        schema: PathBuf,
    },
    /// Open an array read-only and print its schema
    Inspect {
        /// Array URI
        uri: String,
    },
    /// Print the engine build version
    Version,
}

/// CLI configuration, loaded from a TOML file and `LATTICE_*` environment
/// variables.
#[derive(Debug, Default, Deserialize)]
struct CliConfig {
    #[serde(default)]
    engine: EngineBackendConfig,
    #[serde(default)]
    tuning: EngineConfig,
}

fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    figment
        .merge(Env::prefixed("LATTICE_").split("__"))
        .extract()
        .context("failed to load configuration")
}

fn print_schema(uri: &str, schema: &ArraySchema) {
    let kind = if schema.is_sparse() { "sparse" } else { "dense" };
    println!("{uri}: {kind} array");
    println!("  capacity: {}", schema.capacity());
    println!("  dimensions ({}):", schema.domain().ndim());
    for dim in schema.domain().dimensions() {
        let (low, high) = dim.domain();
        println!(
            "    {} [{low}, {high}] tile {} ({})",
            dim.name(),
            dim.tile_extent(),
            dim.datatype()
        );
    }
    println!("  attributes ({}):", schema.attribute_count());
    for attr in schema.attributes() {
        println!("    {} ({})", attr.name(), attr.datatype());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded configuration");
    config.tuning.validate().map_err(anyhow::Error::msg)?;

    let engine = lattice_engine::from_config(&config.engine);
    let ctx = Context::with_engine(engine, config.tuning);

    match cli.command {
        Commands::Create { uri, schema } => {
            let spec = SchemaSpec::load(&schema)
                .with_context(|| format!("failed to load schema from {}", schema.display()))?;
            let schema = spec.build().context("invalid schema document")?;
            Array::create(&uri, &schema, Encryption::None, &ctx)
                .await
                .with_context(|| format!("failed to create array at {uri}"))?;
            println!("created {uri}");
        }
        Commands::Inspect { uri } => {
            let mut array = Array::open(&uri, "r", OpenOptions::default(), &ctx)
                .await
                .with_context(|| format!("failed to open array at {uri}"))?;
            if let Some(schema) = array.schema() {
                print_schema(&uri, schema);
            }
            array.close()?;
        }
        Commands::Version => {
            let (major, minor, patch) = lattice_engine::runtime_version();
            println!("lattice engine {major}.{minor}.{patch}");
        }
    }

    Ok(())
}
