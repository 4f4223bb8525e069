use super::catalog::{Category, Department, MenuItem, NewMenuItem};
use super::errors::DomainError;
use super::exchange::{CatalogWorkbook, ImportStats};
use super::invoice::{Invoice, NewInvoice};
use super::order::{OrderLineItem, TableOrder};
use super::settings::{BillConfig, KotConfig, RestaurantSettings};
use super::table::{Table, TableChanges};

pub trait TableRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Table>, DomainError>;
    fn find_by_id(&self, id: &str) -> Result<Option<Table>, DomainError>;
    fn create(&self, table: Table) -> Result<Table, DomainError>;
    fn update(&self, id: &str, changes: TableChanges) -> Result<Option<Table>, DomainError>;
    fn delete(&self, id: &str) -> Result<bool, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<TableOrder>, DomainError>;
    fn find_by_table(&self, table_id: &str) -> Result<Option<TableOrder>, DomainError>;
    /// Open or extend the table's order and mark the table occupied.
    fn add_items(
        &self,
        table_id: &str,
        table_name: &str,
        items: Vec<OrderLineItem>,
    ) -> Result<TableOrder, DomainError>;
    fn mark_sent(&self, table_id: &str) -> Result<Option<TableOrder>, DomainError>;
    /// Drop the table's order, if any, and mark the table available.
    fn complete(&self, table_id: &str) -> Result<(), DomainError>;
}

pub trait InvoiceRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Invoice>, DomainError>;
    fn create(&self, invoice: NewInvoice) -> Result<Invoice, DomainError>;
}

pub trait CatalogRepository: Send + Sync + 'static {
    fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    fn category_exists(&self, name: &str) -> Result<bool, DomainError>;
    fn create_category(&self, name: &str) -> Result<Category, DomainError>;
    /// Rename a category and every menu item that references it.
    fn rename_category(&self, id: &str, name: &str) -> Result<Option<Category>, DomainError>;
    fn find_category(&self, id: &str) -> Result<Option<Category>, DomainError>;
    fn delete_category(&self, id: &str) -> Result<bool, DomainError>;

    fn list_departments(&self) -> Result<Vec<Department>, DomainError>;
    fn department_exists(&self, name: &str) -> Result<bool, DomainError>;
    fn create_department(&self, name: &str) -> Result<Department, DomainError>;
    fn rename_department(&self, id: &str, name: &str)
        -> Result<Option<Department>, DomainError>;
    fn find_department(&self, id: &str) -> Result<Option<Department>, DomainError>;
    fn delete_department(&self, id: &str) -> Result<bool, DomainError>;

    fn list_menu_items(&self) -> Result<Vec<MenuItem>, DomainError>;
    fn find_menu_item(&self, id: &str) -> Result<Option<MenuItem>, DomainError>;
    fn product_code_exists(&self, code: &str) -> Result<bool, DomainError>;
    fn count_items_referencing(
        &self,
        category: Option<&str>,
        department: Option<&str>,
    ) -> Result<i64, DomainError>;
    fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, DomainError>;
    fn save_menu_item(&self, item: MenuItem) -> Result<MenuItem, DomainError>;
    fn delete_menu_item(&self, id: &str) -> Result<bool, DomainError>;

    /// Run an import as a single unit of work; nothing is kept if it fails.
    fn import(&self, workbook: &CatalogWorkbook) -> Result<ImportStats, DomainError>;
}

/// Catalog operations needed while reconciling an uploaded workbook. Names
/// added earlier in the same import must be visible to later lookups.
pub trait CatalogImportSink {
    fn category_exists(&mut self, name: &str) -> Result<bool, DomainError>;
    fn add_category(&mut self, name: &str) -> Result<(), DomainError>;
    fn department_exists(&mut self, name: &str) -> Result<bool, DomainError>;
    fn add_department(&mut self, name: &str) -> Result<(), DomainError>;
    fn product_code_exists(&mut self, code: &str) -> Result<bool, DomainError>;
    fn add_menu_item(&mut self, item: NewMenuItem) -> Result<(), DomainError>;
}

pub trait SettingsRepository: Send + Sync + 'static {
    /// Create any missing singleton row with its default values.
    fn ensure_defaults(&self) -> Result<(), DomainError>;
    fn kot_config(&self) -> Result<Option<KotConfig>, DomainError>;
    fn save_kot_config(&self, config: &KotConfig) -> Result<KotConfig, DomainError>;
    fn bill_config(&self) -> Result<Option<BillConfig>, DomainError>;
    fn save_bill_config(&self, config: &BillConfig) -> Result<BillConfig, DomainError>;
    fn restaurant_settings(&self) -> Result<Option<RestaurantSettings>, DomainError>;
    fn save_restaurant_settings(
        &self,
        settings: &RestaurantSettings,
    ) -> Result<RestaurantSettings, DomainError>;
}
