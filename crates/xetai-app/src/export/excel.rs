//! Excel export functionality

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use xetai_types::{Error, Product, Result};

use super::comparison_rows;

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export a product listing (e.g. a filtered catalog view)
pub fn export_catalog_to_excel(products: &[&Product], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_catalog_sheet(sheet, products)?;

    workbook.save(output_path).map_err(xlsx_err)?;
    Ok(())
}

/// Export the compare selection as a side-by-side table
pub fn export_comparison_to_excel(products: &[Product], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_comparison_sheet(sheet, products)?;

    workbook.save(output_path).map_err(xlsx_err)?;
    Ok(())
}

fn write_catalog_sheet(sheet: &mut Worksheet, products: &[&Product]) -> Result<()> {
    sheet.set_name("Danh mục xe").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    let price_format = Format::new().set_num_format("#,##0");

    let headers = [
        "ID",
        "Tên xe",
        "Loại xe",
        "Thương hiệu",
        "Giá (VND)",
        "Tải trọng (t)",
        "Mô tả",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (row_idx, product) in products.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, &product.id).map_err(xlsx_err)?;
        sheet.write_string(row, 1, &product.name).map_err(xlsx_err)?;
        sheet
            .write_string(row, 2, product.vehicle_type.label())
            .map_err(xlsx_err)?;
        sheet
            .write_string(row, 3, product.brand_label())
            .map_err(xlsx_err)?;
        if product.price > 0 {
            sheet
                .write_number_with_format(row, 4, product.price as f64, &price_format)
                .map_err(xlsx_err)?;
        } else {
            sheet
                .write_string(row, 4, product.display_price())
                .map_err(xlsx_err)?;
        }
        sheet.write_number(row, 5, product.weight).map_err(xlsx_err)?;
        sheet
            .write_string(row, 6, &product.description)
            .map_err(xlsx_err)?;
    }

    sheet.set_column_width(0, 28).map_err(xlsx_err)?;
    sheet.set_column_width(1, 40).map_err(xlsx_err)?;
    sheet.set_column_width(4, 16).map_err(xlsx_err)?;
    sheet.set_column_width(6, 60).map_err(xlsx_err)?;

    Ok(())
}

fn write_comparison_sheet(sheet: &mut Worksheet, products: &[Product]) -> Result<()> {
    sheet.set_name("So sánh xe").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();

    for (row_idx, (label, cells)) in comparison_rows(products).iter().enumerate() {
        let row = row_idx as u32;
        sheet
            .write_string_with_format(row, 0, label, &header_format)
            .map_err(xlsx_err)?;
        for (col_idx, cell) in cells.iter().enumerate() {
            let col = (col_idx + 1) as u16;
            if row_idx == 0 {
                sheet
                    .write_string_with_format(row, col, cell, &header_format)
                    .map_err(xlsx_err)?;
            } else {
                sheet.write_string(row, col, cell).map_err(xlsx_err)?;
            }
        }
    }

    sheet.set_column_width(0, 18).map_err(xlsx_err)?;
    for col in 1..=products.len() {
        sheet.set_column_width(col as u16, 36).map_err(xlsx_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xetai_infra::catalog_loader::CatalogLoader;

    use crate::constants::DEFAULT_CATALOG_TOML;

    #[test]
    fn test_export_files_written() {
        let catalog = CatalogLoader::load_from_str(DEFAULT_CATALOG_TOML).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let listing: Vec<&Product> = catalog.products.iter().collect();
        let catalog_path = dir.path().join("catalog.xlsx");
        export_catalog_to_excel(&listing, &catalog_path).unwrap();
        assert!(catalog_path.exists());

        let compare_path = dir.path().join("compare.xlsx");
        export_comparison_to_excel(&catalog.products[..2], &compare_path).unwrap();
        assert!(compare_path.exists());
    }
}
