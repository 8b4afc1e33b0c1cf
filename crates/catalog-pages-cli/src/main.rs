mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, STORE_KEY_ENV};

#[derive(Parser)]
#[command(name = "catalog-pages")]
#[command(about = "Generate static-site pages from a store's categories and products")]
struct Cli {
    /// Config file to use instead of ~/.config/catalog-pages/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate markdown pages for every category and product
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Store API endpoint
    #[arg(short = 'e', long)]
    endpoint: Option<String>,
    /// Store key
    #[arg(short = 'k', long)]
    storekey: Option<String>,
    /// Output directory [default: ./output]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Product base path, e.g. product or products. No trailing slash. [default: product]
    #[arg(short = 'p', long)]
    product: Option<String>,
    /// Category base path, e.g. category or categories. No trailing slash. [default: category]
    #[arg(short = 'c', long)]
    category: Option<String>,
}

impl From<GenerateArgs> for Overrides {
    fn from(args: GenerateArgs) -> Self {
        Self {
            endpoint: args.endpoint,
            store_key: args.storekey,
            output: args.output,
            product_base: args.product,
            category_base: args.category,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => {
            let file = config::load_config(cli.config.as_deref())?;
            let settings =
                config::resolve(args.into(), std::env::var(STORE_KEY_ENV).ok(), file)?;
            let today = chrono::Local::now().date_naive();
            commands::generate::run(&settings, today).await?;
            Ok(())
        }
    }
}
