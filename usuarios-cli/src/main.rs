//! usuarios - REST CRUD service over one PostgreSQL table
//!
//! Parses flags, loads `.env`, initializes tracing, builds the connection
//! pool, ensures the table exists, and serves until shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use usuarios_server::db::{migrations, PoolConfig};
use usuarios_server::{create_pool, run_server, ServerConfig};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "usuarios",
    author,
    version,
    about = "REST CRUD service exposing the usuarios table as JSON over HTTP"
)]
struct Cli {
    /// Host address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// PostgreSQL connection string (falls back to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = 10)]
    max_connections: u32,

    /// Seconds to wait for a pooled connection before failing
    #[arg(long, default_value_t = 30)]
    pool_timeout: u64,

    /// Seconds before a pooled connection is recycled
    #[arg(long, default_value_t = 1800)]
    pool_recycle: u64,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init(cli.debug)?;

    let database_url = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .context("database URL required: pass --database-url or set DATABASE_URL")?;

    let pool_config = PoolConfig {
        max_connections: cli.max_connections,
        acquire_timeout: Duration::from_secs(cli.pool_timeout),
        max_lifetime: Duration::from_secs(cli.pool_recycle),
    };
    let pool = create_pool(&database_url, &pool_config)
        .await
        .context("failed to connect to PostgreSQL")?;

    migrations::run(&pool)
        .await
        .context("failed to prepare usuarios table")?;

    let bind_addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", cli.host, cli.port))?;

    tracing::info!(%bind_addr, "Starting usuarios service");
    run_server(pool, ServerConfig { bind_addr }).await?;
    Ok(())
}
