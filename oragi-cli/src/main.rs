//! oragi CLI - provisioning and inspection for the oragi request database
//!
//! - `provision`: create the schema and tables if missing
//! - `inspect`: show the tables present in the schema
//! - `drop`: remove the schema and all its data

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use oragi_db::{
    create_pool, describe_schema, drop_schema, PgPool, SchemaName, Storage, StoreConfig, TableInfo,
};
use tracing::{debug, info, info_span};

mod config;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "oragi",
    author,
    version,
    about = "Provision and inspect the oragi request database"
)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Schema holding the oragi tables (default: discordoragi)
    #[arg(long, env = "ORAGI_SCHEMA", global = true)]
    schema: Option<String>,

    /// Config file (default: ~/.oragi/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the schema and tables if they do not exist
    Provision,

    /// List tables, columns and primary keys in the schema
    Inspect {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drop the schema and every table in it
    Drop {
        /// Confirm the drop
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_path = config::load_dotenv();
    let cli = Cli::parse();

    init_tracing(&TracingConfig { debug: cli.debug })?;
    if let Some(path) = dotenv_path {
        debug!("Loaded .env from {}", path.display());
    }

    let file_cfg = config::load_file(cli.config.as_deref())?;
    let cfg = config::apply_overrides(file_cfg, cli.database_url, cli.schema);

    match cli.command {
        Commands::Provision => run_provision(&cfg).await,
        Commands::Inspect { json } => run_inspect(&cfg, json).await,
        Commands::Drop { yes } => run_drop(&cfg, yes).await,
    }
}

async fn run_provision(cfg: &StoreConfig) -> Result<()> {
    let span = info_span!("storage");
    let storage = Storage::from_config(span, cfg)
        .await
        .context("Failed to provision database")?;

    let tables = describe_schema(storage.pool(), storage.schema()).await?;
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    println!("Schema {} ready: {}", storage.schema(), names.join(", "));

    storage.close().await;
    Ok(())
}

async fn run_inspect(cfg: &StoreConfig, json: bool) -> Result<()> {
    let schema = cfg.schema_name()?;
    let pool = connect(cfg).await?;
    let tables = describe_schema(&pool, &schema).await?;
    pool.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
    } else if tables.is_empty() {
        println!("Schema {} has no tables", schema);
    } else {
        for table in &tables {
            print_table(&schema, table);
        }
    }
    Ok(())
}

async fn run_drop(cfg: &StoreConfig, yes: bool) -> Result<()> {
    let schema = cfg.schema_name()?;
    if !yes {
        bail!("Refusing to drop schema {} without --yes", schema);
    }

    let pool = connect(cfg).await?;
    drop_schema(&pool, &schema).await?;
    pool.close().await;

    info!("Dropped schema {}", schema);
    println!("Schema {} dropped", schema);
    Ok(())
}

async fn connect(cfg: &StoreConfig) -> Result<PgPool> {
    let params = cfg
        .connect_params()
        .ok_or_else(|| anyhow!("No database URL configured (set DATABASE_URL or --database-url)"))?;
    create_pool(&params)
        .await
        .context("Failed to connect to database")
}

fn print_table(schema: &SchemaName, table: &TableInfo) {
    println!("{}.{}", schema, table.name);
    for col in &table.columns {
        let key = if table.primary_key.contains(&col.name) { " [pk]" } else { "" };
        let null = if col.nullable { "" } else { " not null" };
        println!("  {:<10} {}{}{}", col.name, col.data_type, null, key);
    }
}
