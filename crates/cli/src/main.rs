//! Delicious Bites CLI - Menu browsing and identity tools.
//!
//! # Usage
//!
//! ```bash
//! # List vegetarian dishes, cheapest first
//! bites-cli menu --dietary vegetarian --sort price-low
//!
//! # Price two Margherita pizzas and a salad for pickup
//! bites-cli quote --item 1=2 --item 3 --pickup
//!
//! # Sign in (password from BITES_PASSWORD or the first line of stdin)
//! BITES_PASSWORD=user123 bites-cli login -e user@example.com
//!
//! # Show or clear the persisted identity
//! bites-cli whoami
//! bites-cli logout
//! ```
//!
//! The CLI shares the server's storage directory (`BITES_STORAGE_DIR`), so a
//! sign-in here is picked up by the storefront on its next start.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use delicious_bites_core::MenuItemId;

mod commands;

use commands::menu::{DietaryArg, SortArg};

#[derive(Parser)]
#[command(name = "bites-cli")]
#[command(author, version, about = "Delicious Bites CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items
    Menu {
        /// Case-insensitive text to find in the name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category name (`All` matches every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Vegetarian filter
        #[arg(short, long, value_enum, default_value_t = DietaryArg::All)]
        dietary: DietaryArg,

        /// Cuisine name (`All` matches every cuisine)
        #[arg(long)]
        cuisine: Option<String>,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
    },
    /// Price a basket of menu items
    Quote {
        /// Menu item ID, optionally with a quantity (`ID` or `ID=QTY`)
        #[arg(short, long = "item", value_parser = commands::quote::parse_line, required = true)]
        items: Vec<(MenuItemId, u32)>,

        /// Collect from the restaurant instead of delivery
        #[arg(long)]
        pickup: bool,
    },
    /// Sign in and persist the identity
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Create an account and persist the identity
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Forget the persisted identity
    Logout,
    /// Show the persisted identity
    Whoami,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let state = commands::open_state().await?;

    match cli.command {
        Commands::Menu {
            search,
            category,
            dietary,
            cuisine,
            sort,
        } => {
            let query = commands::menu::build_query(search, category, dietary, cuisine, sort);
            commands::menu::list(&state, &query).await;
        }
        Commands::Quote { items, pickup } => commands::quote::run(&state, &items, pickup).await?,
        Commands::Login { email } => commands::account::login(&state, &email).await?,
        Commands::Register { name, email } => {
            commands::account::register(&state, &name, &email).await?;
        }
        Commands::Logout => commands::account::logout(&state).await?,
        Commands::Whoami => commands::account::whoami(&state).await,
    }
    Ok(())
}
