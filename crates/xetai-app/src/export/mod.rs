//! Spreadsheet export and side-by-side comparison rows

mod excel;

pub use excel::{export_catalog_to_excel, export_comparison_to_excel};

use xetai_types::{Product, VehicleSpecs};

/// One attribute row of the comparison table: label plus a cell per product
pub type ComparisonRow = (String, Vec<String>);

/// Attribute rows for comparing products side by side
pub fn comparison_rows(products: &[Product]) -> Vec<ComparisonRow> {
    let row = |label: &str, cell: &dyn Fn(&Product) -> String| -> ComparisonRow {
        (label.to_string(), products.iter().map(cell).collect())
    };

    let mut rows = vec![
        row("Tên xe", &|p| p.name.clone()),
        row("Loại xe", &|p| p.vehicle_type.label().to_string()),
        row("Thương hiệu", &|p| p.brand_label()),
        row("Giá", &|p| p.display_price()),
        row("Tải trọng", &|p| p.weight_label()),
        row("Kích thước", &|p| {
            p.dimensions.map(|d| d.to_string()).unwrap_or_else(|| "—".to_string())
        }),
    ];

    // Spec rows only when at least one product carries them
    let spec_rows: [(&str, fn(&VehicleSpecs) -> Option<String>); 6] = [
        ("Sức nâng", |s| match s {
            VehicleSpecs::Crane { lifting_capacity, .. } => Some(format!("{} tấn", lifting_capacity)),
            _ => None,
        }),
        ("Chiều dài cần", |s| match s {
            VehicleSpecs::Crane { boom_length, .. } => Some(format!("{} m", boom_length)),
            _ => None,
        }),
        ("Số trục", |s| match s {
            VehicleSpecs::Trailer { axle_count, .. } => Some(axle_count.to_string()),
            _ => None,
        }),
        ("Kiểu thùng", |s| match s {
            VehicleSpecs::Trailer { body_type, .. } => Some(body_type.clone()),
            _ => None,
        }),
        ("Công suất", |s| match s {
            VehicleSpecs::Tractor { horsepower, .. } => Some(format!("{} HP", horsepower)),
            _ => None,
        }),
        ("Nhiệt độ thùng", |s| match s {
            VehicleSpecs::Refrigeration { min_temperature, .. } => Some(format!("{} °C", min_temperature)),
            _ => None,
        }),
    ];

    for (label, extract) in spec_rows {
        let cells: Vec<Option<String>> = products
            .iter()
            .map(|p| p.specs.as_ref().and_then(extract))
            .collect();
        if cells.iter().any(Option::is_some) {
            rows.push((
                label.to_string(),
                cells
                    .into_iter()
                    .map(|c| c.unwrap_or_else(|| "—".to_string()))
                    .collect(),
            ));
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use xetai_infra::catalog_loader::CatalogLoader;

    use crate::constants::DEFAULT_CATALOG_TOML;

    #[test]
    fn test_rows_have_one_cell_per_product() {
        let catalog = CatalogLoader::load_from_str(DEFAULT_CATALOG_TOML).unwrap();
        let products = vec![
            catalog.product("soosan-scs524-hyundai-hd210").unwrap().clone(),
            catalog.product("cimc-3-truc-san").unwrap().clone(),
        ];
        let rows = comparison_rows(&products);
        assert!(rows.iter().all(|(_, cells)| cells.len() == 2));

        let lifting = rows.iter().find(|(label, _)| label == "Sức nâng").unwrap();
        assert_eq!(lifting.1, vec!["5 tấn".to_string(), "—".to_string()]);
        assert!(rows.iter().all(|(label, _)| label != "Công suất"));
    }
}
