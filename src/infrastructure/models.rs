use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::catalog::{Category, Department, MenuItem};
use crate::domain::errors::DomainError;
use crate::domain::invoice::Invoice;
use crate::domain::order::{OrderLineItem, TableOrder};
use crate::domain::settings::{BillConfig, KotConfig, RestaurantSettings};
use crate::domain::table::Table;
use crate::schema::{
    bill_config, categories, departments, invoices, kot_config, menu_items, restaurant_settings,
    table_orders, tables,
};

/// Primary key of every singleton settings row.
pub const SINGLETON_ID: i32 = 1;

// ── Tables and orders ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = tables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub seats: i32,
    pub category: String,
    pub status: String,
}

impl TryFrom<TableRow> for Table {
    type Error = DomainError;

    fn try_from(row: TableRow) -> Result<Self, Self::Error> {
        Ok(Table {
            status: row
                .status
                .parse()
                .map_err(|_| DomainError::Internal(format!("Corrupt table status '{}'", row.status)))?,
            id: row.id,
            name: row.name,
            seats: row.seats,
            category: row.category,
        })
    }
}

impl From<&Table> for TableRow {
    fn from(t: &Table) -> Self {
        TableRow {
            id: t.id.clone(),
            name: t.name.clone(),
            seats: t.seats,
            category: t.category.clone(),
            status: t.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = tables)]
pub struct TableChangeset {
    pub name: Option<String>,
    pub seats: Option<i32>,
    pub category: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = table_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TableOrderRow {
    pub id: i32,
    pub table_id: String,
    pub table_name: String,
    pub items: Value,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = table_orders)]
pub struct NewTableOrderRow {
    pub table_id: String,
    pub table_name: String,
    pub items: Value,
    pub start_time: DateTime<Utc>,
}

pub fn decode_items(items: Value) -> Result<Vec<OrderLineItem>, DomainError> {
    serde_json::from_value(items)
        .map_err(|e| DomainError::Internal(format!("Corrupt line items: {}", e)))
}

pub fn encode_items(items: &[OrderLineItem]) -> Result<Value, DomainError> {
    serde_json::to_value(items).map_err(|e| DomainError::Internal(e.to_string()))
}

impl TryFrom<TableOrderRow> for TableOrder {
    type Error = DomainError;

    fn try_from(row: TableOrderRow) -> Result<Self, Self::Error> {
        Ok(TableOrder {
            id: row.id,
            table_id: row.table_id,
            table_name: row.table_name,
            items: decode_items(row.items)?,
            start_time: row.start_time,
        })
    }
}

// ── Invoices ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvoiceRow {
    pub id: String,
    pub bill_number: String,
    pub order_type: String,
    pub table_name: Option<String>,
    pub items: Value,
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub issued_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = DomainError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        Ok(Invoice {
            order_type: row.order_type.parse().map_err(|_| {
                DomainError::Internal(format!("Corrupt order type '{}'", row.order_type))
            })?,
            items: decode_items(row.items)?,
            id: row.id,
            bill_number: row.bill_number,
            table_name: row.table_name,
            subtotal: row.subtotal,
            tax: row.tax,
            total: row.total,
            timestamp: row.issued_at,
        })
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DepartmentRow {
    pub id: String,
    pub name: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct MenuItemRow {
    pub id: String,
    pub name: String,
    pub product_code: String,
    pub price: BigDecimal,
    pub category: String,
    pub department: String,
    pub description: Option<String>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            product_code: row.product_code,
            price: row.price,
            category: row.category,
            department: row.department,
            description: row.description,
        }
    }
}

impl From<MenuItem> for MenuItemRow {
    fn from(item: MenuItem) -> Self {
        MenuItemRow {
            id: item.id,
            name: item.name,
            product_code: item.product_code,
            price: item.price,
            category: item.category,
            department: item.department,
            description: item.description,
        }
    }
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = kot_config)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct KotConfigRow {
    pub id: i32,
    pub print_by_department: bool,
    pub number_of_copies: i32,
    pub selected_printer: Option<String>,
    pub paper_size: Option<String>,
    pub format_type: Option<String>,
}

impl From<KotConfigRow> for KotConfig {
    fn from(row: KotConfigRow) -> Self {
        KotConfig {
            print_by_department: row.print_by_department,
            number_of_copies: row.number_of_copies,
            selected_printer: row.selected_printer,
            paper_size: row.paper_size,
            format_type: row.format_type,
        }
    }
}

impl From<&KotConfig> for KotConfigRow {
    fn from(c: &KotConfig) -> Self {
        KotConfigRow {
            id: SINGLETON_ID,
            print_by_department: c.print_by_department,
            number_of_copies: c.number_of_copies,
            selected_printer: c.selected_printer.clone(),
            paper_size: c.paper_size.clone(),
            format_type: c.format_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = bill_config)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct BillConfigRow {
    pub id: i32,
    pub auto_print_dine_in: bool,
    pub auto_print_takeaway: bool,
    pub number_of_copies: i32,
    pub selected_printer: Option<String>,
    pub paper_size: Option<String>,
    pub format_type: Option<String>,
}

impl From<BillConfigRow> for BillConfig {
    fn from(row: BillConfigRow) -> Self {
        BillConfig {
            auto_print_dine_in: row.auto_print_dine_in,
            auto_print_takeaway: row.auto_print_takeaway,
            number_of_copies: row.number_of_copies,
            selected_printer: row.selected_printer,
            paper_size: row.paper_size,
            format_type: row.format_type,
        }
    }
}

impl From<&BillConfig> for BillConfigRow {
    fn from(c: &BillConfig) -> Self {
        BillConfigRow {
            id: SINGLETON_ID,
            auto_print_dine_in: c.auto_print_dine_in,
            auto_print_takeaway: c.auto_print_takeaway,
            number_of_copies: c.number_of_copies,
            selected_printer: c.selected_printer.clone(),
            paper_size: c.paper_size.clone(),
            format_type: c.format_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = restaurant_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct RestaurantSettingsRow {
    pub id: i32,
    pub restaurant_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub currency: String,
    pub tax_rate: BigDecimal,
}

impl From<RestaurantSettingsRow> for RestaurantSettings {
    fn from(row: RestaurantSettingsRow) -> Self {
        RestaurantSettings {
            restaurant_name: row.restaurant_name,
            address: row.address,
            phone: row.phone,
            email: row.email,
            currency: row.currency,
            tax_rate: row.tax_rate,
        }
    }
}

impl From<&RestaurantSettings> for RestaurantSettingsRow {
    fn from(s: &RestaurantSettings) -> Self {
        RestaurantSettingsRow {
            id: SINGLETON_ID,
            restaurant_name: s.restaurant_name.clone(),
            address: s.address.clone(),
            phone: s.phone.clone(),
            email: s.email.clone(),
            currency: s.currency.clone(),
            tax_rate: s.tax_rate.clone(),
        }
    }
}
