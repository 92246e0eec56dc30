//! Sign-shop CLI - product variant and POS tools.
//!
//! # Usage
//!
//! ```bash
//! # Preview the variants a set of variations would produce
//! signshop variants generate variations.json
//!
//! # Check whether variants can be generated and which existing ones are stale
//! signshop variants check variations.json --variants variants.json
//!
//! # Show a product as it would be saved
//! signshop product show 42
//!
//! # Regenerate a product's variants and save
//! signshop product regenerate 42 --save
//!
//! # Set one field or one variant's surcharge
//! signshop product set 42 basePrice 450 --save
//! signshop product set-price 42 --variant 3 --price 25 --save
//!
//! # Append attributes exported from a spreadsheet
//! signshop attributes import 42 rows.json --save
//!
//! # Price 30 units, or a 3ft x 6ft banner, with the tiered discount
//! signshop product quote 42 --quantity 30
//! signshop product quote 42 --variant 1 --width-feet 3 --height-feet 6
//!
//! # Category tree
//! signshop categories
//!
//! # POS helpers
//! signshop customer add --name "Rahim Uddin" --phone 01711223344
//! signshop customer search 01711
//! signshop coupon check EID10
//! signshop order place --customer 12 --items cart.json --coupon EID10 --advance 500
//! ```
//!
//! # Environment Variables
//!
//! - `SIGNSHOP_API_BASE_URL`, `SIGNSHOP_API_TOKEN`, `SIGNSHOP_HTTP_TIMEOUT_SECS`
//! - `SIGNSHOP_LOG_JSON` - emit JSON logs instead of text
//! - `RUST_LOG` - log filter (default: `signshop_admin=info,signshop_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use signshop_core::{
    Amount, CourierId, CustomerId, DeliveryMethod, Measure, OrderOptions, PaymentMethod,
    ProductId,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "signshop")]
#[command(author, version, about = "Sign-shop product and POS tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with variation files offline
    Variants {
        #[command(subcommand)]
        action: VariantsAction,
    },
    /// Load, edit and save products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Import product attributes
    Attributes {
        #[command(subcommand)]
        action: AttributesAction,
    },
    /// Print the category tree
    Categories,
    /// Manage POS customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Look up coupons
    Coupon {
        #[command(subcommand)]
        action: CouponAction,
    },
    /// Place POS orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum VariantsAction {
    /// Print the variants generated from a JSON array of variations
    Generate {
        /// Path to the variations JSON file
        file: PathBuf,
    },
    /// Report whether variants can be generated, and list stale variants
    Check {
        /// Path to the variations JSON file
        file: PathBuf,

        /// Path to a JSON array of existing variants
        #[arg(long)]
        variants: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Print the product as it would be saved
    Show {
        /// Product ID
        id: ProductId,
    },
    /// Regenerate variants from the product's variations
    Regenerate {
        /// Product ID
        id: ProductId,

        /// Save the result
        #[arg(long)]
        save: bool,
    },
    /// Set a basic-info field by its wire name (e.g. `basePrice`)
    Set {
        /// Product ID
        id: ProductId,

        /// Field name
        field: String,

        /// New value, as typed in the form
        value: String,

        /// Save the result
        #[arg(long)]
        save: bool,
    },
    /// Set one variant's additional price
    SetPrice {
        /// Product ID
        id: ProductId,

        /// Variant index (0-based)
        #[arg(long)]
        variant: usize,

        /// Additional price
        #[arg(long)]
        price: String,

        /// Save the result
        #[arg(long)]
        save: bool,
    },
    /// Price an order with the product's tiered discount
    Quote {
        /// Product ID
        id: ProductId,

        /// Variant index (0-based) whose surcharge to add
        #[arg(long)]
        variant: Option<usize>,

        #[command(flatten)]
        measure: MeasureArgs,
    },
}

/// A quantity, or a printed area when any dimension is given.
#[derive(Args)]
struct MeasureArgs {
    /// Number of units
    #[arg(long, default_value_t = 1)]
    quantity: u32,

    #[arg(long)]
    width_feet: Option<Amount>,

    #[arg(long)]
    width_inches: Option<Amount>,

    #[arg(long)]
    height_feet: Option<Amount>,

    #[arg(long)]
    height_inches: Option<Amount>,
}

impl MeasureArgs {
    fn measure(&self) -> Measure {
        let dims = [
            self.width_feet,
            self.width_inches,
            self.height_feet,
            self.height_inches,
        ];
        if dims.iter().all(Option::is_none) {
            return Measure::Quantity(self.quantity);
        }
        Measure::Area {
            width_feet: self.width_feet.unwrap_or_default(),
            width_inches: self.width_inches.unwrap_or_default(),
            height_feet: self.height_feet.unwrap_or_default(),
            height_inches: self.height_inches.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
enum AttributesAction {
    /// Append rows with `Property` and `Description` columns
    Import {
        /// Product ID
        id: ProductId,

        /// Path to a JSON array of spreadsheet rows
        file: PathBuf,

        /// Save the result
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Quick-add a customer
    Add {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Customer phone
        #[arg(short, long)]
        phone: String,
    },
    /// Find customers by name or phone fragment
    Search {
        /// Name or phone fragment
        query: String,
    },
}

#[derive(Subcommand)]
enum CouponAction {
    /// Look up a coupon code and show its discount
    Check {
        /// Coupon code
        code: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Place an order for a stored customer
    Place {
        /// Customer ID
        #[arg(long)]
        customer: CustomerId,

        /// Path to a JSON array of cart lines
        #[arg(long)]
        items: PathBuf,

        /// Coupon code to apply
        #[arg(long)]
        coupon: Option<String>,

        /// Amount paid at the counter
        #[arg(long, default_value = "0")]
        advance: Amount,

        /// `cod-payment` or `online-payment`
        #[arg(long, default_value = "cod-payment")]
        payment: PaymentMethod,

        /// `shop-pickup` or `courier`
        #[arg(long, default_value = "shop-pickup")]
        delivery: DeliveryMethod,

        /// Courier ID, required for courier delivery
        #[arg(long)]
        courier_id: Option<CourierId>,

        #[arg(long)]
        courier_address: Option<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before reading RUST_LOG
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Text logs locally, JSON when `SIGNSHOP_LOG_JSON` is set.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "signshop_admin=info,signshop_cli=info".into());

    let json = std::env::var_os("SIGNSHOP_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Variants { action } => match action {
            VariantsAction::Generate { file } => commands::variants::generate(&file).await?,
            VariantsAction::Check { file, variants } => {
                commands::variants::check(&file, variants.as_deref()).await?;
            }
        },
        Commands::Product { action } => match action {
            ProductAction::Show { id } => commands::product::show(id).await?,
            ProductAction::Regenerate { id, save } => {
                commands::product::regenerate(id, save).await?;
            }
            ProductAction::Set {
                id,
                field,
                value,
                save,
            } => commands::product::set_field(id, &field, value, save).await?,
            ProductAction::SetPrice {
                id,
                variant,
                price,
                save,
            } => commands::product::set_price(id, variant, price, save).await?,
            ProductAction::Quote {
                id,
                variant,
                measure,
            } => commands::product::quote(id, variant, measure.measure()).await?,
        },
        Commands::Attributes { action } => match action {
            AttributesAction::Import { id, file, save } => {
                commands::product::import_attributes(id, &file, save).await?;
            }
        },
        Commands::Categories => commands::catalog::list().await?,
        Commands::Customer { action } => match action {
            CustomerAction::Add { name, phone } => commands::pos::add_customer(&name, &phone).await?,
            CustomerAction::Search { query } => commands::pos::search_customers(&query).await?,
        },
        Commands::Coupon { action } => match action {
            CouponAction::Check { code } => commands::pos::check_coupon(&code).await?,
        },
        Commands::Order { action } => match action {
            OrderAction::Place {
                customer,
                items,
                coupon,
                advance,
                payment,
                delivery,
                courier_id,
                courier_address,
                notes,
            } => {
                let options = OrderOptions {
                    payment_method: payment,
                    delivery_method: delivery,
                    courier_id,
                    courier_address,
                    additional_notes: notes,
                    delivery_date: chrono::Local::now().date_naive(),
                    advance,
                };
                commands::pos::place_order(customer, &items, coupon.as_deref(), &options).await?;
            }
        },
    }
    Ok(())
}
