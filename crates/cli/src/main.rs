//! Threadline CLI - Database migrations and a local cart.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! threadline migrate
//!
//! # Drive a cart kept in a local directory
//! threadline cart add --title "Tee" --price "₹499" --image tee.png
//! threadline cart show
//! threadline cart --store-dir /tmp/cart purchase
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run storefront database migrations
//! - `cart` - Show and change a file-backed cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "threadline")]
#[command(author, version, about = "Threadline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Show and change a local cart
    Cart(commands::cart::CartArgs),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so cart output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threadline_cli=info,threadline_cart=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Cart(args) => print_report(&commands::cart::execute(&args)?),
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_report(report: &str) {
    println!("{report}");
}
