//! Command handlers

use std::path::PathBuf;

use crate::cli::{BlogAction, Cli, Commands, CompareAction, OutputFormat};
use crate::output;
use xetai_app::app::CatalogService;
use xetai_app::config::Config;
use xetai_app::export::{export_catalog_to_excel, export_comparison_to_excel};
use xetai_domain::service::{AddOutcome, FilterCriteria};
use xetai_types::{BlogCategory, Error, Result};

/// Filter flags from `list`
struct ListArgs {
    vehicle_type: Option<String>,
    brand: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_weight: Option<f64>,
    max_weight: Option<f64>,
    weight_band: Option<u8>,
    search: Option<String>,
    query: Option<String>,
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::List {
            vehicle_type,
            brand,
            min_price,
            max_price,
            min_weight,
            max_weight,
            weight_band,
            search,
            query,
            output,
        } => {
            let args = ListArgs {
                vehicle_type,
                brand,
                min_price,
                max_price,
                min_weight,
                max_weight,
                weight_band,
                search,
                query,
            };
            cmd_list(&config, args, output, output_format)
        }

        Commands::Show { product } => cmd_show(&config, &product, output_format),

        Commands::Brands => cmd_brands(&config, output_format),

        Commands::Compare { action } => cmd_compare(&config, action, output_format),

        Commands::Cost { product } => cmd_cost(&config, &product, output_format),

        Commands::Loan {
            product,
            principal,
            rate,
            months,
            down,
            schedule,
        } => {
            let rate = rate.unwrap_or(config.loan_rate_percent);
            let months = months.unwrap_or(config.loan_months);
            let down = down.unwrap_or(config.down_payment_percent);
            cmd_loan(&config, product, principal, rate, months, down, schedule, output_format)
        }

        Commands::Blog { action } => cmd_blog(&config, action, output_format),

        Commands::Config {
            show,
            set_store_dir,
            set_catalog,
            set_output,
            set_loan_rate,
            set_loan_months,
            set_down_payment,
            reset,
        } => cmd_config(
            show,
            set_store_dir,
            set_catalog,
            set_output,
            set_loan_rate,
            set_loan_months,
            set_down_payment,
            reset,
        ),
    }
}

fn build_criteria(args: ListArgs) -> Result<FilterCriteria> {
    let mut criteria = args
        .query
        .as_deref()
        .map(FilterCriteria::from_query)
        .unwrap_or_default();

    if let Some(band) = args.weight_band {
        let preset = FilterCriteria::for_weight_category(band)
            .ok_or_else(|| Error::NotFound(format!("weight band {}", band)))?;
        criteria.min_weight = preset.min_weight;
        criteria.max_weight = preset.max_weight;
    }

    if args.vehicle_type.is_some() {
        criteria.vehicle_type = args.vehicle_type;
    }
    if args.brand.is_some() {
        criteria.brand = args.brand;
    }
    if args.min_price.is_some() {
        criteria.min_price = args.min_price;
    }
    if args.max_price.is_some() {
        criteria.max_price = args.max_price;
    }
    if args.min_weight.is_some() {
        criteria.min_weight = args.min_weight;
    }
    if args.max_weight.is_some() {
        criteria.max_weight = args.max_weight;
    }
    if args.search.is_some() {
        criteria.search = args.search;
    }
    Ok(criteria)
}

fn cmd_list(
    config: &Config,
    args: ListArgs,
    export_path: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    let service = CatalogService::open(config)?;
    let criteria = build_criteria(args)?;
    tracing::debug!(query = %criteria.to_query(), "listing products");
    if criteria.has_inverted_bounds() {
        eprintln!("Warning: price or weight bounds are negative or min > max");
    }

    let products = service.search(&criteria);
    output::print_product_list(output_format, &products, &criteria)?;

    if let Some(path) = export_path {
        export_catalog_to_excel(&products, &path)?;
        eprintln!("Exported {} products to {}", products.len(), path.display());
    }
    Ok(())
}

fn cmd_show(config: &Config, key: &str, output_format: OutputFormat) -> Result<()> {
    let service = CatalogService::open(config)?;
    match service.product(key) {
        Some(product) => output::print_product(output_format, product, service.is_in_compare(&product.id)),
        None => Err(Error::NotFound(format!("product {}", key))),
    }
}

fn cmd_brands(config: &Config, output_format: OutputFormat) -> Result<()> {
    let service = CatalogService::open(config)?;
    output::print_brands(output_format, &service.brands())
}

fn cmd_compare(config: &Config, action: CompareAction, output_format: OutputFormat) -> Result<()> {
    let mut service = CatalogService::open(config)?;

    match action {
        CompareAction::Add { product } => {
            let outcome = service.compare_add(&product)?;
            match outcome {
                AddOutcome::Added => println!("{}", outcome.message()),
                AddOutcome::Full | AddOutcome::AlreadyPresent => eprintln!("{}", outcome.message()),
            }
            println!("{}", service.share_url());
        }
        CompareAction::Remove { product } => {
            if service.compare_remove(&product) {
                println!("Đã xóa khỏi danh sách so sánh.");
            } else {
                println!("Xe không có trong danh sách so sánh.");
            }
        }
        CompareAction::Clear => {
            service.compare_clear();
            println!("Đã xóa tất cả xe khỏi danh sách so sánh.");
        }
        CompareAction::Show { output } => {
            output::print_comparison(output_format, service.compare_items())?;
            if let Some(path) = output {
                export_comparison_to_excel(service.compare_items(), &path)?;
                eprintln!("Exported comparison to {}", path.display());
            }
        }
        CompareAction::Url => println!("{}", service.share_url()),
        CompareAction::Open { url } => {
            let outcome = service.open_share_url(&url);
            if !outcome.dropped.is_empty() {
                eprintln!("Bỏ qua mã xe không hợp lệ: {}", outcome.dropped.join(", "));
            }
            if !outcome.replaced {
                eprintln!("Không tìm thấy xe nào trong liên kết; giữ nguyên danh sách hiện tại.");
            }
            output::print_comparison(output_format, service.compare_items())?;
        }
    }
    Ok(())
}

fn cmd_cost(config: &Config, key: &str, output_format: OutputFormat) -> Result<()> {
    let service = CatalogService::open(config)?;
    let breakdown = service.rolling_cost(key)?;
    output::print_cost_breakdown(output_format, &breakdown)
}

#[allow(clippy::too_many_arguments)]
fn cmd_loan(
    config: &Config,
    product: Option<String>,
    principal: Option<u64>,
    rate: f64,
    months: u32,
    down: f64,
    show_periods: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let service = CatalogService::open(config)?;
    let schedule = match (product, principal) {
        (Some(key), _) => service.loan_for_product(&key, down, rate, months)?,
        (None, Some(amount)) => service.loan(amount, rate, months)?,
        (None, None) => {
            return Err(Error::Calculation(
                "specify --product or --principal".to_string(),
            ))
        }
    };
    output::print_loan_schedule(output_format, &schedule, show_periods)
}

fn cmd_blog(config: &Config, action: BlogAction, output_format: OutputFormat) -> Result<()> {
    let service = CatalogService::open(config)?;

    match action {
        BlogAction::List { category } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            output::print_post_list(output_format, &service.blog_posts(category))
        }
        BlogAction::Show { category, slug } => match service.blog_post(&category, &slug) {
            Some(view) => output::print_post(output_format, &view),
            None => Err(Error::NotFound(format!("post /{}/{}", category, slug))),
        },
    }
}

/// Accept a category URL slug (`bao-duong`) or key (`maintenance`)
fn parse_category(value: &str) -> Result<BlogCategory> {
    BlogCategory::from_url_slug(value)
        .or_else(|| BlogCategory::from_key(value))
        .ok_or_else(|| Error::NotFound(format!("blog category {}", value)))
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_store_dir: Option<PathBuf>,
    set_catalog: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_loan_rate: Option<f64>,
    set_loan_months: Option<u32>,
    set_down_payment: Option<f64>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut changed = false;

    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        changed = true;
    }
    if let Some(path) = set_catalog {
        config.catalog_path = Some(path);
        changed = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }
    if let Some(rate) = set_loan_rate {
        config.loan_rate_percent = rate;
        changed = true;
    }
    if let Some(months) = set_loan_months {
        config.loan_months = months;
        changed = true;
    }
    if let Some(down) = set_down_payment {
        config.down_payment_percent = down;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved.");
    }

    if show || !changed {
        print!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ListArgs {
        ListArgs {
            vehicle_type: None,
            brand: None,
            min_price: None,
            max_price: None,
            min_weight: None,
            max_weight: None,
            weight_band: None,
            search: None,
            query: None,
        }
    }

    #[test]
    fn test_flags_override_query() {
        let mut list = args();
        list.query = Some("brand=Hino&type=xe-tai".to_string());
        list.brand = Some("Isuzu".to_string());
        let criteria = build_criteria(list).unwrap();
        assert_eq!(criteria.brand.as_deref(), Some("Isuzu"));
        assert_eq!(criteria.vehicle_type.as_deref(), Some("xe-tai"));
    }

    #[test]
    fn test_parse_category_accepts_slug_or_key() {
        assert_eq!(parse_category("bao-duong").unwrap(), BlogCategory::Maintenance);
        assert_eq!(parse_category("maintenance").unwrap(), BlogCategory::Maintenance);
        assert!(parse_category("khong-co").is_err());
    }

    #[test]
    fn test_weight_band() {
        let mut list = args();
        list.weight_band = Some(8);
        let criteria = build_criteria(list).unwrap();
        assert_eq!(criteria.min_weight, Some(20.0));
        assert_eq!(criteria.max_weight, Some(100.0));

        let mut list = args();
        list.weight_band = Some(0);
        assert!(build_criteria(list).is_err());
    }
}
