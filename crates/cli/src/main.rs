//! Fakestore CLI - browse the catalog, manage the cart, place orders.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! fakestore products list --limit 5
//! fakestore products list --category electronics
//! fakestore products show 3
//! fakestore products categories
//!
//! # Manage the cart (persisted between runs)
//! fakestore cart add 3
//! fakestore cart set 3 4
//! fakestore cart dec 3
//! fakestore cart show
//!
//! # Place an order
//! fakestore checkout --first-name Ada --last-name Lovelace \
//!     --email ada@example.com --address "12 Analytical Row" \
//!     --city London --state LDN --zip "N1 9GU"
//! ```
//!
//! # Commands
//!
//! - `products` - Query the product catalog
//! - `cart` - Inspect and mutate the persisted cart
//! - `checkout` - Turn the cart into an order

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use fakestore_core::ProductId;
use fakestore_storefront::{SortOrder, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "fakestore")]
#[command(author, version, about = "Fakestore catalog, cart and checkout")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart's contents
    Checkout(CheckoutArgs),
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Only the first N products
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only products in this category
        #[arg(short, long, conflicts_with_all = ["limit", "sort"])]
        category: Option<String>,

        /// Order by ID (`asc` or `desc`)
        #[arg(short, long, conflicts_with = "limit")]
        sort: Option<SortOrder>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: ProductId,
    },
    /// List category names
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart
    Show,
    /// Add one unit of a catalog product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set a line's quantity
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity (must be positive)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Add one unit to a line
    Inc {
        /// Product ID
        id: ProductId,
    },
    /// Take one unit from a line (never below 1)
    Dec {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    address: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    #[arg(long)]
    zip: String,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fakestore_cli=info,fakestore_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                limit,
                category,
                sort,
            } => commands::products::list(&config, limit, category.as_deref(), sort).await?,
            ProductsAction::Show { id } => commands::products::show(&config, id).await?,
            ProductsAction::Categories => commands::products::categories(&config).await?,
        },
        Commands::Cart { action } => {
            let mut cart = commands::open_cart(&config);
            match action {
                CartAction::Show => {}
                CartAction::Add { id } => commands::cart::add(&config, &mut cart, id).await?,
                CartAction::Remove { id } => commands::cart::report(cart.remove(id)),
                CartAction::Set { id, quantity } => {
                    commands::cart::report(cart.set_quantity(id, quantity));
                }
                CartAction::Inc { id } => commands::cart::report(cart.increment(id)),
                CartAction::Dec { id } => commands::cart::report(cart.decrement(id)),
                CartAction::Clear => commands::cart::report(cart.clear()),
            }
            commands::cart::print(&cart);
        }
        Commands::Checkout(args) => {
            let mut cart = commands::open_cart(&config);
            commands::checkout::place_order(&mut cart, args.into())?;
        }
    }
    Ok(())
}

impl From<CheckoutArgs> for fakestore_cart::ShippingDetails {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            city: args.city,
            state: args.state,
            zip_code: args.zip,
        }
    }
}
