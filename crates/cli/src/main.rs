//! Shopfront CLI - terminal front end for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and log in
//! shopfront signup -n "Ada Lovelace" -e ada@example.com -p secret
//! shopfront login -e ada@example.com -p secret
//!
//! # Browse and buy
//! shopfront products --search mug --max 20
//! shopfront add-to-cart 650a1b2c3d4e5f6a7b8c9d0e
//! shopfront checkout --address "1 Main St"
//! shopfront orders
//!
//! # Manage the catalog (admin accounts only)
//! shopfront admin add -n Mug -p 12.50 -s 10
//! shopfront admin delete 650a1b2c3d4e5f6a7b8c9d0e --yes
//! ```
//!
//! # Commands
//!
//! - `signup`, `login`, `logout`, `whoami`, `open` - Session and navigation
//! - `products`, `add-to-cart`, `cart`, `checkout`, `orders` - Shopping
//! - `local-cart` - Inspect or change the local cart
//! - `admin` - Catalog management

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront_storefront::AppContext;
use shopfront_storefront::config::StorefrontConfig;

mod commands;
mod notifier;

use commands::CliError;
use notifier::TerminalNotifier;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront client")]
struct Cli {
    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the session token
    Logout,
    /// Show the logged-in user and the pages available to them
    Whoami,
    /// Resolve a page path through the route guards
    Open {
        /// Page path, e.g. `/admin`
        path: String,
    },
    /// List products, optionally filtered
    Products {
        /// Case-insensitive match on name or description
        #[arg(short, long, default_value = "")]
        search: String,
        /// Minimum price (inclusive)
        #[arg(long, default_value = "", allow_negative_numbers = true)]
        min: String,
        /// Maximum price (inclusive)
        #[arg(long, default_value = "", allow_negative_numbers = true)]
        max: String,
    },
    /// Add one unit of a product to the server cart
    AddToCart {
        product_id: String,
    },
    /// Show the server cart
    Cart,
    /// Order everything in the server cart
    Checkout {
        #[arg(short, long, default_value = "")]
        address: String,
    },
    /// Show order history
    Orders,
    /// Show the local cart, or apply an action to it
    LocalCart {
        /// One of add, remove, increase, decrease, clear
        action: Option<String>,
        /// Product the action applies to
        product_id: Option<String>,
    },
    /// Manage the product catalog
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List every product with its ID and stock
    List,
    /// Create a product
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long)]
        price: String,
        #[arg(short, long)]
        stock: String,
    },
    /// Change fields of a product; unspecified fields keep their value
    Edit {
        product_id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        stock: Option<String>,
    },
    /// Delete a product
    Delete {
        product_id: String,
    },
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

    tracing::info!("Sentry initialized");
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

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let notifier = TerminalNotifier::new(cli.yes);
    if let Err(e) = run(cli.command, config, &notifier).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(
    command: Commands,
    config: StorefrontConfig,
    notifier: &TerminalNotifier,
) -> Result<(), CliError> {
    let mut ctx = AppContext::open(config)?;

    match command {
        Commands::Signup {
            name,
            email,
            password,
        } => commands::session::signup(&ctx, name, email, password, notifier).await,
        Commands::Login { email, password } => {
            commands::session::login(&mut ctx, email, password, notifier).await
        }
        Commands::Logout => commands::session::logout(&mut ctx),
        Commands::Whoami => commands::session::whoami(&mut ctx),
        Commands::Open { path } => commands::session::open(&mut ctx, &path),
        Commands::Products { search, min, max } => {
            commands::shop::products(&mut ctx, &search, &min, &max, notifier).await
        }
        Commands::AddToCart { product_id } => {
            commands::shop::add_to_cart(&mut ctx, &product_id, notifier).await
        }
        Commands::Cart => commands::shop::cart(&mut ctx, notifier).await,
        Commands::Checkout { address } => {
            commands::shop::checkout(&mut ctx, address, notifier).await
        }
        Commands::Orders => commands::shop::orders(&mut ctx, notifier).await,
        Commands::LocalCart { action, product_id } => {
            commands::shop::local_cart(&mut ctx, action.as_deref(), product_id, notifier).await
        }
        Commands::Admin { action } => match action {
            AdminAction::List => commands::admin::list(&mut ctx).await,
            AdminAction::Add {
                name,
                description,
                price,
                stock,
            } => {
                let form = shopfront_storefront::pages::ProductForm {
                    name,
                    description,
                    price,
                    stock_quantity: stock,
                };
                commands::admin::add(&mut ctx, form, notifier).await
            }
            AdminAction::Edit {
                product_id,
                name,
                description,
                price,
                stock,
            } => {
                let changes = commands::admin::ProductChanges {
                    name,
                    description,
                    price,
                    stock_quantity: stock,
                };
                commands::admin::edit(&mut ctx, &product_id, changes, notifier).await
            }
            AdminAction::Delete { product_id } => {
                commands::admin::delete(&mut ctx, &product_id, notifier).await
            }
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_products_accepts_negative_bounds() {
        let cli = Cli::try_parse_from(["shopfront", "products", "--min", "-5", "--max", "20"]).unwrap();
        let Commands::Products { min, max, .. } = cli.command else {
            panic!("expected products command");
        };
        assert_eq!(min, "-5");
        assert_eq!(max, "20");
    }
}
