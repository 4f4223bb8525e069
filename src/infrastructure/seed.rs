//! Sample data for a fresh install: a small floor plan and menu.

use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::table::TableStatus;
use crate::schema::{categories, departments, menu_items, tables};

use super::models::{CategoryRow, DepartmentRow, MenuItemRow, TableRow};

const TABLES: [(&str, &str, i32, &str); 8] = [
    ("1", "A1", 2, "General"),
    ("2", "A2", 2, "General"),
    ("3", "B1", 4, "Family"),
    ("4", "B2", 4, "Family"),
    ("5", "M1", 6, "Mandi"),
    ("6", "M2", 6, "Mandi"),
    ("7", "VIP1", 8, "Party Hall"),
    ("8", "C1", 4, "General"),
];

const DEPARTMENTS: [&str; 3] = ["Kitchen", "Bar", "Grill"];

const CATEGORIES: [&str; 5] = ["Mains", "Salads", "Beverages", "Desserts", "Appetizers"];

const MENU: [(&str, &str, i32, &str, &str, &str); 10] = [
    ("CB001", "Classic Burger", 259, "Mains", "Kitchen", "Beef patty with lettuce, tomato, cheese"),
    ("CS002", "Caesar Salad", 199, "Salads", "Kitchen", "Romaine lettuce, croutons, parmesan"),
    ("MP003", "Margherita Pizza", 299, "Mains", "Kitchen", "Fresh mozzarella, basil, tomato sauce"),
    ("FC004", "Fish & Chips", 319, "Mains", "Kitchen", "Beer-battered fish with crispy fries"),
    ("GS005", "Greek Salad", 219, "Salads", "Kitchen", "Feta, olives, cucumber, tomatoes"),
    ("PC006", "Pasta Carbonara", 279, "Mains", "Kitchen", "Creamy sauce with bacon and parmesan"),
    ("CC007", "Coca Cola", 59, "Beverages", "Bar", "330ml can"),
    ("FOJ008", "Fresh Orange Juice", 99, "Beverages", "Bar", "Freshly squeezed"),
    ("CHC009", "Chocolate Cake", 139, "Desserts", "Kitchen", "Rich chocolate layer cake"),
    ("ICS010", "Ice Cream Sundae", 119, "Desserts", "Kitchen", "Vanilla ice cream with toppings"),
];

/// Load the sample floor plan and menu when both are empty. Returns whether
/// anything was written.
pub fn seed_sample_data(pool: &DbPool) -> Result<bool, DomainError> {
    let mut conn = pool.get()?;

    conn.transaction::<_, DomainError, _>(|conn| {
        let table_count: i64 = tables::table.count().get_result(conn)?;
        let item_count: i64 = menu_items::table.count().get_result(conn)?;
        if table_count > 0 || item_count > 0 {
            log::info!("Skipping sample data: database already has tables or menu items");
            return Ok(false);
        }

        let table_rows: Vec<TableRow> = TABLES
            .iter()
            .map(|(id, name, seats, category)| TableRow {
                id: id.to_string(),
                name: name.to_string(),
                seats: *seats,
                category: category.to_string(),
                status: TableStatus::Available.as_str().to_string(),
            })
            .collect();
        diesel::insert_into(tables::table)
            .values(&table_rows)
            .execute(conn)?;

        let department_rows: Vec<DepartmentRow> = DEPARTMENTS
            .iter()
            .enumerate()
            .map(|(i, name)| DepartmentRow {
                id: (i + 1).to_string(),
                name: name.to_string(),
            })
            .collect();
        diesel::insert_into(departments::table)
            .values(&department_rows)
            .on_conflict_do_nothing()
            .execute(conn)?;

        let category_rows: Vec<CategoryRow> = CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, name)| CategoryRow {
                id: (i + 1).to_string(),
                name: name.to_string(),
            })
            .collect();
        diesel::insert_into(categories::table)
            .values(&category_rows)
            .on_conflict_do_nothing()
            .execute(conn)?;

        let item_rows: Vec<MenuItemRow> = MENU
            .iter()
            .enumerate()
            .map(
                |(i, (code, name, price, category, department, description))| MenuItemRow {
                    id: (i + 1).to_string(),
                    name: name.to_string(),
                    product_code: code.to_string(),
                    price: BigDecimal::from(*price),
                    category: category.to_string(),
                    department: department.to_string(),
                    description: Some(description.to_string()),
                },
            )
            .collect();
        diesel::insert_into(menu_items::table)
            .values(&item_rows)
            .execute(conn)?;

        log::info!(
            "Seeded {} tables, {} departments, {} categories and {} menu items",
            table_rows.len(),
            department_rows.len(),
            category_rows.len(),
            item_rows.len()
        );
        Ok(true)
    })
}
