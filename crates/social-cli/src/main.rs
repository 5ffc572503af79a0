//! CLI entry point for the social graph menu.
//!
//! Stdout is the interactive surface; logs go to stderr.

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use social_cli::shell::Shell;
use social_core::StoreConfig;
use social_graph::{GraphBackend, GraphStore};

#[derive(Parser)]
#[command(name = "social")]
#[command(about = "Manage people and friendships in a Neo4j graph")]
struct Cli {
    /// Config file prefix (default: social).
    #[arg(short, long, default_value = "social")]
    config: String,

    /// Override the Neo4j bolt URI.
    #[arg(long)]
    uri: Option<String>,

    /// Override the Neo4j user.
    #[arg(long)]
    user: Option<String>,

    /// Override the Neo4j password.
    #[arg(long)]
    password: Option<String>,

    /// Use a throwaway in-memory graph instead of Neo4j.
    #[arg(long)]
    memory: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if cli.memory {
        return run(GraphStore::in_memory()).await;
    }

    let config = resolve_config(&cli)?;
    let store = GraphStore::connect(&config).await?;
    run(store).await
}

async fn run<B: GraphBackend>(store: GraphStore<B>) -> anyhow::Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let result = Shell::new(&store, input, tokio::io::stdout()).run().await;
    store.close();
    Ok(result?)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// File and environment first, then command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = StoreConfig::load(&cli.config)?;
    if let Some(uri) = &cli.uri {
        config.uri = uri.clone();
    }
    if let Some(user) = &cli.user {
        config.user = user.clone();
    }
    if let Some(password) = &cli.password {
        config.password = password.clone();
    }
    Ok(config)
}
