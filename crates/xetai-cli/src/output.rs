//! Output formatting module

use serde_json::json;

use xetai_app::app::PostView;
use xetai_app::export::comparison_rows;
use xetai_domain::service::{CostBreakdown, FilterCriteria, LoanSchedule};
use xetai_types::{format_vnd, BlogPost, OutputFormat, Product, Result, VehicleSpecs};

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn print_product_list(
    output_format: OutputFormat,
    products: &[&Product],
    criteria: &FilterCriteria,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(products);
    }

    if !criteria.is_empty() {
        println!("Filter: {}", criteria.to_query());
    }
    if products.is_empty() {
        println!("Không tìm thấy xe phù hợp.");
        return Ok(());
    }

    println!(
        "{:<30} {:<14} {:<16} {:>18} {:>10}",
        "ID", "Loại", "Thương hiệu", "Giá", "Tải trọng"
    );
    println!("{}", "-".repeat(92));
    for product in products {
        let flags = match (product.is_new, product.is_hot) {
            (true, true) => " [mới, hot]",
            (true, false) => " [mới]",
            (false, true) => " [hot]",
            (false, false) => "",
        };
        println!(
            "{:<30} {:<14} {:<16} {:>18} {:>10}{}",
            product.id,
            product.vehicle_type.label(),
            product.brand_label(),
            product.display_price(),
            product.weight_label(),
            flags
        );
    }
    println!("\n{} xe", products.len());
    Ok(())
}

pub fn print_product(output_format: OutputFormat, product: &Product, in_compare: bool) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(product);
    }

    println!("\n{}", product.name);
    println!("{}", "=".repeat(product.name.chars().count()));
    println!("ID:           {}", product.id);
    println!("URL:          {}", product.url_path());
    println!("Loại xe:      {}", product.vehicle_type.label());
    println!("Thương hiệu:  {}", product.brand_label());
    println!("Giá:          {}", product.display_price());
    println!("Tải trọng:    {}", product.weight_label());
    if let Some(dims) = product.dimensions {
        println!("Kích thước:   {}", dims);
    }
    if let Some(image) = product.thumbnail() {
        println!("Ảnh:          {}", image);
    }

    if let Some(ref specs) = product.specs {
        println!("\n--- Thông số ---");
        print_specs(specs);
    }

    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }
    if in_compare {
        println!("\n(Đang trong danh sách so sánh)");
    }
    Ok(())
}

fn print_specs(specs: &VehicleSpecs) {
    match specs {
        VehicleSpecs::Crane {
            lifting_capacity,
            boom_length,
            working_radius,
            boom_sections,
        } => {
            println!("Sức nâng:      {} tấn", lifting_capacity);
            println!("Chiều dài cần: {} m", boom_length);
            if let Some(r) = working_radius {
                println!("Bán kính:      {} m", r);
            }
            if let Some(s) = boom_sections {
                println!("Số đốt cần:    {}", s);
            }
        }
        VehicleSpecs::Trailer {
            axle_count,
            body_type,
            payload,
            tank_volume_m3,
        } => {
            println!("Số trục:       {}", axle_count);
            println!("Kiểu thùng:    {}", body_type);
            if let Some(p) = payload {
                println!("Tải trọng kéo: {} tấn", p);
            }
            if let Some(v) = tank_volume_m3 {
                println!("Dung tích bồn: {} m³", v);
            }
        }
        VehicleSpecs::Tractor {
            engine,
            horsepower,
            fifth_wheel_load,
        } => {
            println!("Động cơ:       {}", engine);
            println!("Công suất:     {} HP", horsepower);
            if let Some(l) = fifth_wheel_load {
                println!("Tải mâm kéo:   {} tấn", l);
            }
        }
        VehicleSpecs::Refrigeration {
            box_volume_m3,
            min_temperature,
            max_temperature,
            cooling_unit,
        } => {
            println!("Thể tích thùng: {} m³", box_volume_m3);
            match max_temperature {
                Some(max) => println!("Nhiệt độ:       {} °C .. {} °C", min_temperature, max),
                None => println!("Nhiệt độ:       {} °C", min_temperature),
            }
            if let Some(unit) = cooling_unit {
                println!("Máy lạnh:       {}", unit);
            }
        }
    }
}

pub fn print_brands(output_format: OutputFormat, brands: &[String]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(brands);
    }
    for brand in brands {
        println!("{}", brand);
    }
    Ok(())
}

pub fn print_comparison(output_format: OutputFormat, products: &[Product]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(products);
    }

    if products.is_empty() {
        println!("Danh sách so sánh trống.");
        return Ok(());
    }

    for (label, cells) in comparison_rows(products) {
        let row: Vec<String> = cells.iter().map(|c| format!("{:<34}", truncate(c, 34))).collect();
        println!("{:<16} {}", label, row.join(" "));
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{}…", cut)
    }
}

pub fn print_cost_breakdown(output_format: OutputFormat, breakdown: &CostBreakdown) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(breakdown);
    }

    println!("\nChi phí lăn bánh");
    println!("================");
    println!("{:<36} {:>18}", "Giá xe", format_vnd(breakdown.base_price));
    for line in &breakdown.items {
        println!("{:<36} {:>18}", line.name, format_vnd(line.amount));
    }
    println!("{}", "-".repeat(55));
    println!("{:<36} {:>18}", "Tổng phí", format_vnd(breakdown.fees_total));
    println!("{:<36} {:>18}", "Tổng cộng", format_vnd(breakdown.total));
    Ok(())
}

pub fn print_loan_schedule(
    output_format: OutputFormat,
    schedule: &LoanSchedule,
    show_periods: bool,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(schedule);
    }

    let terms = &schedule.terms;
    println!("\nDự toán trả góp");
    println!("===============");
    println!("Số tiền vay:     {}", format_vnd(terms.principal));
    println!("Lãi suất:        {:.2}%/năm", terms.annual_rate_percent);
    println!("Thời hạn:        {} tháng", terms.months);
    println!("Trả hàng tháng:  {}", format_vnd(schedule.monthly_payment));
    println!("Tổng lãi:        {}", format_vnd(schedule.total_interest));
    println!("Tổng phải trả:   {}", format_vnd(schedule.total_paid));

    if show_periods {
        println!(
            "\n{:>5} {:>16} {:>16} {:>16} {:>18}",
            "Kỳ", "Gốc", "Lãi", "Phải trả", "Dư nợ"
        );
        for period in &schedule.periods {
            println!(
                "{:>5} {:>16} {:>16} {:>16} {:>18}",
                period.index,
                format_vnd(period.principal),
                format_vnd(period.interest),
                format_vnd(period.payment),
                format_vnd(period.remaining)
            );
        }
    }
    Ok(())
}

pub fn print_post_list(output_format: OutputFormat, posts: &[&BlogPost]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(posts);
    }

    if posts.is_empty() {
        println!("Chưa có bài viết.");
        return Ok(());
    }
    for post in posts {
        println!(
            "{}  {:<22} {}",
            post.publish_date.format("%d/%m/%Y"),
            post.category.label(),
            post.title
        );
        println!("            {}", post.url_path());
    }
    Ok(())
}

pub fn print_post(output_format: OutputFormat, view: &PostView<'_>) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = json!({
            "post": view.post,
            "related": view.related,
            "recommended": view.recommended,
        });
        return print_json(&value);
    }

    let post = view.post;
    println!("\n{}", post.title);
    println!("{}", "=".repeat(post.title.chars().count()));
    println!(
        "{} | {} | {} | {} phút đọc",
        post.category.label(),
        post.author,
        post.publish_date.format("%d/%m/%Y"),
        post.read_time
    );
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    println!("\n{}\n", post.content);

    if !view.related.is_empty() {
        println!("Bài viết liên quan:");
        for p in &view.related {
            println!("  - {} ({})", p.title, p.url_path());
        }
    }
    if !view.recommended.is_empty() {
        println!("Có thể bạn quan tâm:");
        for p in &view.recommended {
            println!("  - {} ({})", p.title, p.url_path());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hino", 10), "Hino");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
