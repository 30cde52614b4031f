//! Vitrine CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! vitrine products
//! vitrine products --category audio
//! vitrine categories
//!
//! # Manage the cart
//! vitrine cart add A-100
//! vitrine cart change A-100 -1
//! vitrine cart remove A-100
//! vitrine cart show
//! vitrine cart clear
//! ```
//!
//! # Commands
//!
//! - `products` - List products, optionally filtered by category
//! - `categories` - List the categories present in the catalog
//! - `cart` - Show or mutate the persisted cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_core::ProductId;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::{ALL_CATEGORIES, AppError, AppState};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine terminal storefront")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show products in this category (`all` for everything)
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,
    },
    /// List catalog categories
    Categories,
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        product_id: ProductId,
    },
    /// Change a line's quantity by a signed amount
    Change {
        /// Product id
        product_id: ProductId,
        /// Amount to add (negative to remove units)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        product_id: ProductId,
    },
    /// Remove every line
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing with `EnvFilter` and Sentry integration.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine_storefront=warn,vitrine_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Sentry must be initialized before the tracing subscriber
    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(output) => {
            print_output(&output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_failure(&e.report());
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}

#[allow(clippy::print_stderr)]
fn print_failure(message: &str) {
    eprintln!("{message}");
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<String, AppError> {
    let mut state = AppState::new(config)?;
    let json = cli.json;

    match cli.command {
        Commands::Products { category } => {
            commands::products::list(&state, &category, json).await
        }
        Commands::Categories => commands::products::categories(&state, json).await,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state, json),
            CartAction::Add { product_id } => {
                commands::cart::add(&mut state, &product_id, json).await
            }
            CartAction::Change { product_id, delta } => {
                commands::cart::change(&mut state, &product_id, delta, json)
            }
            CartAction::Remove { product_id } => {
                commands::cart::remove(&mut state, &product_id, json)
            }
            CartAction::Clear => commands::cart::clear(&mut state, json),
        },
    }
}
