//! Reading and writing the catalog `.xlsx` workbook.

use std::io::Cursor;

use bigdecimal::{BigDecimal, ToPrimitive};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::application::catalog_service::CatalogSnapshot;
use crate::domain::catalog::MenuItem;
use crate::domain::errors::DomainError;
use crate::domain::exchange::{
    CatalogWorkbook, CellValue, MenuItemSheetRow, CATEGORIES_SHEET, CATEGORY_HEADER,
    DEPARTMENTS_SHEET, DEPARTMENT_HEADER, EXAMPLE_PREFIX, MENU_ITEMS_SHEET, MENU_ITEM_HEADERS,
};

const CATEGORIES_COLOR: u32 = 0x4472C4;
const DEPARTMENTS_COLOR: u32 = 0x70AD47;
const MENU_ITEMS_COLOR: u32 = 0xED7D31;

const NAME_COLUMN_WIDTH: f64 = 30.0;
const MENU_ITEM_WIDTHS: [f64; 6] = [20.0, 30.0, 15.0, 20.0, 20.0, 50.0];

// ── Reading ──────────────────────────────────────────────────────────────────

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                CellValue::Text(s.clone())
            }
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        }
    }
}

fn cell(range: &Range<Data>, row: u32, col: u32) -> CellValue {
    range
        .get_value((row, col))
        .map(CellValue::from)
        .unwrap_or(CellValue::Empty)
}

/// Zero-based indices of the data rows (everything below the header).
fn data_rows(range: &Range<Data>) -> std::ops::RangeInclusive<u32> {
    1..=range.end().map_or(0, |(last, _)| last)
}

/// Parse an uploaded workbook. Missing sheets read as empty.
pub fn read_catalog_workbook(bytes: Vec<u8>) -> Result<CatalogWorkbook, DomainError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DomainError::InvalidInput(format!("Could not read workbook: {}", e)))?;
    let sheet_names = workbook.sheet_names();

    let mut load = |name: &str| -> Result<Option<Range<Data>>, DomainError> {
        if !sheet_names.iter().any(|s| s == name) {
            return Ok(None);
        }
        workbook
            .worksheet_range(name)
            .map(Some)
            .map_err(|e| DomainError::InvalidInput(format!("Could not read sheet '{}': {}", name, e)))
    };

    let mut parsed = CatalogWorkbook::default();

    if let Some(range) = load(CATEGORIES_SHEET)? {
        parsed.categories = data_rows(&range).map(|r| cell(&range, r, 0)).collect();
    }
    if let Some(range) = load(DEPARTMENTS_SHEET)? {
        parsed.departments = data_rows(&range).map(|r| cell(&range, r, 0)).collect();
    }
    if let Some(range) = load(MENU_ITEMS_SHEET)? {
        parsed.menu_items = data_rows(&range)
            .map(|r| MenuItemSheetRow {
                row: r + 1,
                product_code: cell(&range, r, 0),
                name: cell(&range, r, 1),
                price: cell(&range, r, 2),
                category: cell(&range, r, 3),
                department: cell(&range, r, 4),
                description: cell(&range, r, 5),
            })
            .collect();
    }

    Ok(parsed)
}

// ── Writing ──────────────────────────────────────────────────────────────────

fn header_format(color: u32, centered: bool) -> Format {
    let format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(color));
    if centered {
        format.set_align(FormatAlign::Center)
    } else {
        format
    }
}

fn xlsx_error(e: XlsxError) -> DomainError {
    DomainError::Internal(format!("Failed to write workbook: {}", e))
}

fn write_name_sheet<'a>(
    sheet: &mut Worksheet,
    title: &str,
    header: &str,
    color: u32,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), XlsxError> {
    sheet.set_name(title)?;
    sheet.write_string_with_format(0, 0, header, &header_format(color, false))?;
    sheet.set_column_width(0, NAME_COLUMN_WIDTH)?;
    for (i, name) in names.enumerate() {
        sheet.write_string(i as u32 + 1, 0, name)?;
    }
    Ok(())
}

fn write_menu_sheet(sheet: &mut Worksheet, items: &[MenuItem]) -> Result<(), XlsxError> {
    sheet.set_name(MENU_ITEMS_SHEET)?;
    let format = header_format(MENU_ITEMS_COLOR, true);
    for (col, (header, width)) in MENU_ITEM_HEADERS.iter().zip(MENU_ITEM_WIDTHS).enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
        sheet.set_column_width(col as u16, width)?;
    }
    for (i, item) in items.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &item.product_code)?;
        sheet.write_string(row, 1, &item.name)?;
        sheet.write_number(row, 2, item.price.to_f64().unwrap_or_default())?;
        sheet.write_string(row, 3, &item.category)?;
        sheet.write_string(row, 4, &item.department)?;
        sheet.write_string(row, 5, item.description.as_deref().unwrap_or(""))?;
    }
    Ok(())
}

fn build_workbook(
    categories: &[&str],
    departments: &[&str],
    items: &[MenuItem],
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    write_name_sheet(
        workbook.add_worksheet(),
        CATEGORIES_SHEET,
        CATEGORY_HEADER,
        CATEGORIES_COLOR,
        categories.iter().copied(),
    )?;
    write_name_sheet(
        workbook.add_worksheet(),
        DEPARTMENTS_SHEET,
        DEPARTMENT_HEADER,
        DEPARTMENTS_COLOR,
        departments.iter().copied(),
    )?;
    write_menu_sheet(workbook.add_worksheet(), items)?;
    workbook.save_to_buffer()
}

/// Workbook with the three sheets and one `Example:` row each.
pub fn write_template() -> Result<Vec<u8>, DomainError> {
    let example_category = format!("{} Appetizers", EXAMPLE_PREFIX);
    let example_department = format!("{} Kitchen", EXAMPLE_PREFIX);
    let example_item = MenuItem {
        id: String::new(),
        name: format!("{} Chicken Burger", EXAMPLE_PREFIX),
        product_code: "CB001".to_string(),
        price: BigDecimal::from(299),
        category: "Mains".to_string(),
        department: "Kitchen".to_string(),
        description: Some("Grilled chicken with lettuce and mayo".to_string()),
    };
    build_workbook(
        &[example_category.as_str()],
        &[example_department.as_str()],
        &[example_item],
    )
    .map_err(xlsx_error)
}

/// Full dump of the catalog in the same layout the import reads.
pub fn write_catalog(snapshot: &CatalogSnapshot) -> Result<Vec<u8>, DomainError> {
    let categories: Vec<&str> = snapshot.categories.iter().map(|c| c.name.as_str()).collect();
    let departments: Vec<&str> = snapshot.departments.iter().map(|d| d.name.as_str()).collect();
    build_workbook(&categories, &departments, &snapshot.menu_items).map_err(xlsx_error)
}
