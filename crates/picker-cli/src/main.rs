mod pick;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "picker-cli")]
#[command(about = "Search the product catalog and build discounted product lists")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one page of catalog search results
    Search {
        /// Search term; empty lists the whole catalog
        #[arg(long, default_value = "")]
        term: String,
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Print the normalized page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run a picker session: search, select the first results, and print the
    /// committed product list as JSON
    Pick {
        /// Search term typed into the popup
        #[arg(long, default_value = "")]
        term: String,
        /// Number of results to select
        #[arg(long, default_value_t = 1)]
        take: usize,
        /// Discount applied to every picked row, e.g. "10"
        #[arg(long)]
        discount: Option<String>,
        /// Treat the discount as a fixed amount instead of a percentage
        #[arg(long)]
        fixed: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = picker_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search { term, page, json }) => {
            search::run_search(&config, &term, page, json).await?;
        }
        Some(Commands::Pick {
            term,
            take,
            discount,
            fixed,
        }) => {
            let options = pick::PickOptions {
                term,
                take,
                discount,
                fixed,
            };
            pick::run_pick(&config, &options).await?;
        }
        None => println!("picker-cli: run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
