//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use xetai_types::OutputFormat;

#[derive(Parser)]
#[command(name = "xetai-catalog")]
#[command(version)]
#[command(about = "Commercial vehicle catalog: filter, compare, estimate costs")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Catalog TOML file (overrides config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog products matching filters
    List {
        /// Vehicle type (xe-tai, xe-cau, mooc, dau-keo, xe-dong-lanh)
        #[arg(long = "type", short = 't')]
        vehicle_type: Option<String>,

        /// Brand (case-insensitive substring)
        #[arg(long, short = 'b')]
        brand: Option<String>,

        #[arg(long)]
        min_price: Option<f64>,

        #[arg(long)]
        max_price: Option<f64>,

        /// Minimum payload (t)
        #[arg(long)]
        min_weight: Option<f64>,

        /// Maximum payload (t)
        #[arg(long)]
        max_weight: Option<f64>,

        /// Preset weight band (1-8)
        #[arg(long, conflicts_with_all = ["min_weight", "max_weight"])]
        weight_band: Option<u8>,

        /// Free-text search
        #[arg(long, short = 'q')]
        search: Option<String>,

        /// Catalog query string (e.g. "brand=Hino&minWeight=3.5"); flags override it
        #[arg(long)]
        query: Option<String>,

        /// Export the listing to an Excel file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show a product by id or slug
    Show {
        product: String,
    },

    /// List brands in the catalog
    Brands,

    /// Manage the compare list
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },

    /// Estimate on-road (rolling) cost for a product
    Cost {
        product: String,
    },

    /// Loan amortization schedule
    Loan {
        /// Finance a catalog product
        #[arg(long, short = 'p', conflicts_with = "principal")]
        product: Option<String>,

        /// Finance an explicit amount (VND)
        #[arg(long)]
        principal: Option<u64>,

        /// Annual rate in percent. Uses config value if not specified.
        #[arg(long)]
        rate: Option<f64>,

        /// Term in months. Uses config value if not specified.
        #[arg(long)]
        months: Option<u32>,

        /// Down payment in percent (with --product). Uses config value if not specified.
        #[arg(long)]
        down: Option<f64>,

        /// Print every period instead of a summary
        #[arg(long)]
        schedule: bool,
    },

    /// Browse blog posts
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set compare store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set catalog TOML path
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default loan rate (%/year)
        #[arg(long)]
        set_loan_rate: Option<f64>,

        /// Set default loan term (months)
        #[arg(long)]
        set_loan_months: Option<u32>,

        /// Set default down payment (%)
        #[arg(long)]
        set_down_payment: Option<f64>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum CompareAction {
    /// Add a product (max 3)
    Add { product: String },

    /// Remove a product
    Remove { product: String },

    /// Clear the compare list
    Clear,

    /// Show the compare table
    Show {
        /// Export the table to an Excel file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the share URL for the current list
    Url,

    /// Load the compare list from a share URL
    Open { url: String },
}

#[derive(Subcommand)]
pub enum BlogAction {
    /// List posts, optionally in one category
    List {
        /// Category URL slug (e.g. bao-duong) or key (e.g. maintenance)
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Show a post
    Show {
        /// Category URL slug
        category: String,
        /// Post slug
        slug: String,
    },
}
