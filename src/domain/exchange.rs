//! Catalog spreadsheet exchange.
//!
//! The workbook has three sheets with a header in row 1 and data from row 2:
//!
//! | Sheet         | Columns                                                      |
//! |---------------|--------------------------------------------------------------|
//! | `Categories`  | A = category name                                            |
//! | `Departments` | A = department name                                          |
//! | `Menu Items`  | A..F = Product Code, Item Name, Price, Category, Department, Description |
//!
//! Cells starting with [`EXAMPLE_PREFIX`] mark template rows and are skipped
//! on import.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Serialize;

use super::catalog::{validate_menu_text, validate_price, NewMenuItem};
use super::errors::DomainError;
use super::limits::{check_len, MAX_NAME_LEN};
use super::ports::CatalogImportSink;

pub const CATEGORIES_SHEET: &str = "Categories";
pub const DEPARTMENTS_SHEET: &str = "Departments";
pub const MENU_ITEMS_SHEET: &str = "Menu Items";

pub const CATEGORY_HEADER: &str = "Category Name";
pub const DEPARTMENT_HEADER: &str = "Department Name";
pub const MENU_ITEM_HEADERS: [&str; 6] = [
    "Product Code",
    "Item Name",
    "Price",
    "Category",
    "Department",
    "Description",
];

pub const EXAMPLE_PREFIX: &str = "Example:";

/// Sheet row number of the first data row (1-based, below the header).
pub const FIRST_DATA_ROW: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Text form of the cell with surrounding whitespace removed.
    ///
    /// Whole numbers lose their fractional part so that a product code typed
    /// as `1001` reads back as `"1001"`, not `"1001.0"`.
    pub fn text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// The cell's name if it is a real entry (not blank, not a template example).
    fn entry(&self) -> Option<String> {
        let text = self.text();
        if text.is_empty() || text.starts_with(EXAMPLE_PREFIX) {
            None
        } else {
            Some(text)
        }
    }

    fn price(&self) -> Result<BigDecimal, String> {
        match self {
            CellValue::Empty => Ok(BigDecimal::from(0)),
            CellValue::Number(n) if n.is_finite() => BigDecimal::from_str(&n.to_string())
                .map_err(|e| format!("Invalid price '{}': {}", n, e)),
            CellValue::Number(n) => Err(format!("Invalid price '{}'", n)),
            CellValue::Text(s) if s.trim().is_empty() => Ok(BigDecimal::from(0)),
            CellValue::Text(s) => BigDecimal::from_str(s.trim())
                .map_err(|_| format!("Invalid price '{}'", s.trim())),
            CellValue::Bool(b) => Err(format!("Invalid price '{}'", b)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemSheetRow {
    /// Sheet row number, used in error messages.
    pub row: u32,
    pub product_code: CellValue,
    pub name: CellValue,
    pub price: CellValue,
    pub category: CellValue,
    pub department: CellValue,
    pub description: CellValue,
}

/// Parsed content of an uploaded catalog workbook. A missing sheet yields an
/// empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogWorkbook {
    pub categories: Vec<CellValue>,
    pub departments: Vec<CellValue>,
    pub menu_items: Vec<MenuItemSheetRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportStats {
    pub categories_added: u32,
    pub departments_added: u32,
    pub items_added: u32,
    pub errors: Vec<String>,
}

enum RowFailure {
    Rejected(String),
    Storage(DomainError),
}

impl From<DomainError> for RowFailure {
    fn from(e: DomainError) -> Self {
        RowFailure::Storage(e)
    }
}

/// Invalid or conflicting data belongs to the row; anything else is a
/// storage failure.
fn classify(e: DomainError) -> RowFailure {
    match e {
        DomainError::InvalidInput(msg) | DomainError::Conflict(msg) => RowFailure::Rejected(msg),
        other => RowFailure::Storage(other),
    }
}

#[derive(Clone, Copy)]
enum NameSheet {
    Categories,
    Departments,
}

impl NameSheet {
    fn title(self) -> &'static str {
        match self {
            NameSheet::Categories => CATEGORIES_SHEET,
            NameSheet::Departments => DEPARTMENTS_SHEET,
        }
    }
}

/// Apply an uploaded workbook to the catalog.
///
/// Categories and departments go in first so that menu rows can reference
/// names added by the same upload. A rejected row is recorded in `errors`
/// and the import carries on; a storage error aborts the whole import.
pub fn reconcile_import<S: CatalogImportSink>(
    sink: &mut S,
    workbook: &CatalogWorkbook,
) -> Result<ImportStats, DomainError> {
    let mut stats = ImportStats::default();

    for (sheet, cells) in [
        (NameSheet::Categories, &workbook.categories),
        (NameSheet::Departments, &workbook.departments),
    ] {
        for (offset, cell) in cells.iter().enumerate() {
            let Some(name) = cell.entry() else { continue };
            match import_name(sink, sheet, &name) {
                Ok(false) => {}
                Ok(true) => match sheet {
                    NameSheet::Categories => stats.categories_added += 1,
                    NameSheet::Departments => stats.departments_added += 1,
                },
                Err(RowFailure::Rejected(reason)) => stats.errors.push(format!(
                    "{} row {}: {}",
                    sheet.title(),
                    FIRST_DATA_ROW as usize + offset,
                    reason
                )),
                Err(RowFailure::Storage(e)) => return Err(e),
            }
        }
    }

    for row in &workbook.menu_items {
        let Some(name) = row.name.entry() else { continue };
        match import_menu_row(sink, row, name) {
            Ok(()) => stats.items_added += 1,
            Err(RowFailure::Rejected(reason)) => {
                stats.errors.push(format!("Row {}: {}", row.row, reason))
            }
            Err(RowFailure::Storage(e)) => return Err(e),
        }
    }

    Ok(stats)
}

/// Returns whether the name was new.
fn import_name<S: CatalogImportSink>(
    sink: &mut S,
    sheet: NameSheet,
    name: &str,
) -> Result<bool, RowFailure> {
    check_len("Name", name, MAX_NAME_LEN).map_err(classify)?;
    let exists = match sheet {
        NameSheet::Categories => sink.category_exists(name)?,
        NameSheet::Departments => sink.department_exists(name)?,
    };
    if exists {
        return Ok(false);
    }
    let added = match sheet {
        NameSheet::Categories => sink.add_category(name),
        NameSheet::Departments => sink.add_department(name),
    };
    added.map_err(classify)?;
    Ok(true)
}

fn import_menu_row<S: CatalogImportSink>(
    sink: &mut S,
    row: &MenuItemSheetRow,
    name: String,
) -> Result<(), RowFailure> {
    let product_code = row.product_code.text();
    if product_code.is_empty() {
        return Err(RowFailure::Rejected("Product code is required".to_string()));
    }
    let category = row.category.text();
    let department = row.department.text();
    validate_menu_text(&product_code, &name, &category, &department).map_err(classify)?;

    if sink.product_code_exists(&product_code)? {
        return Err(RowFailure::Rejected(format!(
            "Product code '{}' already exists",
            product_code
        )));
    }

    if !category.is_empty() && !sink.category_exists(&category)? {
        return Err(RowFailure::Rejected(format!(
            "Category '{}' does not exist",
            category
        )));
    }

    if !department.is_empty() && !sink.department_exists(&department)? {
        return Err(RowFailure::Rejected(format!(
            "Department '{}' does not exist",
            department
        )));
    }

    let price = row.price.price().map_err(RowFailure::Rejected)?;
    validate_price(&price).map_err(classify)?;

    let description = row.description.text();
    sink.add_menu_item(NewMenuItem {
        id: None,
        name,
        product_code,
        price,
        category,
        department,
        description: (!description.is_empty()).then_some(description),
    })
    .map_err(classify)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::domain::catalog::MenuItem;

    /// Catalog held in vectors, in insertion order.
    #[derive(Debug, Default)]
    pub struct MemoryCatalog {
        pub categories: Vec<String>,
        pub departments: Vec<String>,
        pub items: Vec<MenuItem>,
        pub fail_on_insert: bool,
        /// Product code the store refuses, as a database would refuse a
        /// value it cannot hold.
        pub refuse_code: Option<String>,
    }

    impl CatalogImportSink for MemoryCatalog {
        fn category_exists(&mut self, name: &str) -> Result<bool, DomainError> {
            Ok(self.categories.iter().any(|c| c == name))
        }

        fn add_category(&mut self, name: &str) -> Result<(), DomainError> {
            self.categories.push(name.to_string());
            Ok(())
        }

        fn department_exists(&mut self, name: &str) -> Result<bool, DomainError> {
            Ok(self.departments.iter().any(|d| d == name))
        }

        fn add_department(&mut self, name: &str) -> Result<(), DomainError> {
            self.departments.push(name.to_string());
            Ok(())
        }

        fn product_code_exists(&mut self, code: &str) -> Result<bool, DomainError> {
            Ok(self.items.iter().any(|i| i.product_code == code))
        }

        fn add_menu_item(&mut self, item: NewMenuItem) -> Result<(), DomainError> {
            if self.fail_on_insert {
                return Err(DomainError::Internal("connection reset".to_string()));
            }
            if self.refuse_code.as_deref() == Some(item.product_code.as_str()) {
                return Err(DomainError::InvalidInput("numeric field overflow".to_string()));
            }
            self.items.push(MenuItem {
                id: format!("{}", self.items.len() + 1),
                name: item.name,
                product_code: item.product_code,
                price: item.price,
                category: item.category,
                department: item.department,
                description: item.description,
            });
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryCatalog;
    use super::*;

    fn menu_row(row: u32, cells: [&str; 6]) -> MenuItemSheetRow {
        let cell = |s: &str| {
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::from(s)
            }
        };
        MenuItemSheetRow {
            row,
            product_code: cell(cells[0]),
            name: cell(cells[1]),
            price: cell(cells[2]),
            category: cell(cells[3]),
            department: cell(cells[4]),
            description: cell(cells[5]),
        }
    }

    fn seeded() -> MemoryCatalog {
        MemoryCatalog {
            categories: vec!["Mains".to_string()],
            departments: vec!["Kitchen".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn duplicate_category_in_same_sheet_is_added_once() {
        let mut catalog = MemoryCatalog::default();
        let workbook = CatalogWorkbook {
            categories: vec!["Appetizers".into(), "Appetizers".into()],
            ..Default::default()
        };

        let stats = reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(stats.categories_added, 1);
        assert_eq!(catalog.categories, vec!["Appetizers"]);
    }

    #[test]
    fn blank_and_example_entries_are_skipped() {
        let mut catalog = MemoryCatalog::default();
        let workbook = CatalogWorkbook {
            categories: vec![
                CellValue::Empty,
                "Example: Appetizers".into(),
                "   ".into(),
                "  Soups ".into(),
            ],
            departments: vec!["Example: Kitchen".into(), "Bar".into()],
            menu_items: vec![menu_row(2, ["CB001", "Example: Chicken Burger", "299", "", "", ""])],
        };

        let stats = reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(catalog.categories, vec!["Soups"]);
        assert_eq!(catalog.departments, vec!["Bar"]);
        assert_eq!(stats.items_added, 0);
        assert!(stats.errors.is_empty());
    }

    #[test]
    fn existing_names_are_not_counted() {
        let mut catalog = seeded();
        let workbook = CatalogWorkbook {
            categories: vec!["Mains".into(), "Desserts".into()],
            departments: vec!["Kitchen".into()],
            ..Default::default()
        };

        let stats = reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(stats.categories_added, 1);
        assert_eq!(stats.departments_added, 0);
    }

    #[test]
    fn menu_rows_are_partially_imported_with_row_errors() {
        let mut catalog = seeded();
        let workbook = CatalogWorkbook {
            menu_items: vec![
                menu_row(2, ["CB001", "Classic Burger", "259", "Mains", "Kitchen", "Beef"]),
                menu_row(3, ["CB001", "Cheese Burger", "279", "Mains", "Kitchen", ""]),
                menu_row(4, ["FJ001", "Orange Juice", "99", "Mains", "Bar", ""]),
            ],
            ..Default::default()
        };

        let stats = reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(stats.items_added, 1);
        assert_eq!(
            stats.errors,
            vec![
                "Row 3: Product code 'CB001' already exists".to_string(),
                "Row 4: Department 'Bar' does not exist".to_string(),
            ]
        );
        assert_eq!(catalog.items.len(), 1);
        assert_eq!(catalog.items[0].name, "Classic Burger");
        assert_eq!(catalog.items[0].description.as_deref(), Some("Beef"));
    }

    #[test]
    fn validation_order_reports_first_failure_only() {
        let mut catalog = seeded();
        let workbook = CatalogWorkbook {
            menu_items: vec![
                menu_row(2, ["", "No Code", "10", "Nope", "Nope", ""]),
                menu_row(3, ["X1", "Bad Category", "10", "Nope", "Nope", ""]),
                menu_row(4, ["X2", "Bad Price", "ten", "Mains", "Kitchen", ""]),
                menu_row(5, ["X3", "Negative", "-4", "", "", ""]),
            ],
            ..Default::default()
        };

        let stats = reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(stats.items_added, 0);
        assert_eq!(
            stats.errors,
            vec![
                "Row 2: Product code is required".to_string(),
                "Row 3: Category 'Nope' does not exist".to_string(),
                "Row 4: Invalid price 'ten'".to_string(),
                "Row 5: Price must not be negative".to_string(),
            ]
        );
    }

    #[test]
    fn menu_rows_can_reference_names_added_by_the_same_upload() {
        let mut catalog = MemoryCatalog::default();
        let workbook = CatalogWorkbook {
            categories: vec!["Beverages".into()],
            departments: vec!["Bar".into()],
            menu_items: vec![menu_row(2, ["CC007", "Coca Cola", "", "Beverages", "Bar", ""])],
        };

        let stats = reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(stats.items_added, 1);
        assert_eq!(catalog.items[0].price, BigDecimal::from(0));
        assert_eq!(catalog.items[0].description, None);
    }

    #[test]
    fn numeric_cells_are_read_as_text_and_price() {
        let mut catalog = MemoryCatalog::default();
        let workbook = CatalogWorkbook {
            menu_items: vec![MenuItemSheetRow {
                row: 2,
                product_code: CellValue::Number(1001.0),
                name: "Masala Chai".into(),
                price: CellValue::Number(49.5),
                category: CellValue::Empty,
                department: CellValue::Empty,
                description: CellValue::Empty,
            }],
            ..Default::default()
        };

        reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(catalog.items[0].product_code, "1001");
        assert_eq!(catalog.items[0].price, BigDecimal::from_str("49.5").unwrap());
    }

    #[test]
    fn oversized_values_become_row_errors() {
        let mut catalog = seeded();
        let long_code = "X".repeat(65);
        let workbook = CatalogWorkbook {
            categories: vec![CellValue::from("C".repeat(256).as_str()), "Soups".into()],
            menu_items: vec![
                menu_row(2, ["OK1", "Tomato Soup", "120", "Soups", "Kitchen", ""]),
                menu_row(3, [&long_code, "Long Code", "10", "Mains", "Kitchen", ""]),
                menu_row(4, ["BIG1", "Gold Plate", "1e12", "Mains", "Kitchen", ""]),
            ],
            ..Default::default()
        };

        let stats = reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(stats.categories_added, 1);
        assert_eq!(stats.items_added, 1);
        assert_eq!(
            stats.errors,
            vec![
                "Categories row 2: Name must be at most 255 characters".to_string(),
                "Row 3: Product code must be at most 64 characters".to_string(),
                "Row 4: Price must be less than 10000000000".to_string(),
            ]
        );
        assert_eq!(catalog.items[0].product_code, "OK1");
        assert!(catalog.categories.contains(&"Soups".to_string()));
    }

    #[test]
    fn row_refused_by_the_store_does_not_stop_the_import() {
        let mut catalog = MemoryCatalog {
            refuse_code: Some("BAD".to_string()),
            ..seeded()
        };
        let workbook = CatalogWorkbook {
            menu_items: vec![
                menu_row(2, ["BAD", "Odd Row", "10", "Mains", "Kitchen", ""]),
                menu_row(3, ["T1", "Tea", "20", "Mains", "Kitchen", ""]),
            ],
            ..Default::default()
        };

        let stats = reconcile_import(&mut catalog, &workbook).unwrap();

        assert_eq!(stats.items_added, 1);
        assert_eq!(stats.errors, vec!["Row 2: numeric field overflow".to_string()]);
    }

    #[test]
    fn storage_failure_aborts_the_import() {
        let mut catalog = MemoryCatalog {
            fail_on_insert: true,
            ..Default::default()
        };
        let workbook = CatalogWorkbook {
            menu_items: vec![menu_row(2, ["T1", "Tea", "20", "", "", ""])],
            ..Default::default()
        };

        let result = reconcile_import(&mut catalog, &workbook);

        assert!(matches!(result, Err(DomainError::Internal(_))));
    }
}
