use diesel::dsl::{count_star, exists, select};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{Category, Department, MenuItem, NewMenuItem};
use crate::domain::errors::DomainError;
use crate::domain::exchange::{reconcile_import, CatalogWorkbook, ImportStats};
use crate::domain::ports::{CatalogImportSink, CatalogRepository};
use crate::schema::{categories, departments, menu_items};

use super::models::{CategoryRow, DepartmentRow, MenuItemRow};
use super::row_data_error;

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn category_exists(conn: &mut PgConnection, name: &str) -> Result<bool, DomainError> {
    let found = select(exists(categories::table.filter(categories::name.eq(name))))
        .get_result::<bool>(conn)?;
    Ok(found)
}

fn department_exists(conn: &mut PgConnection, name: &str) -> Result<bool, DomainError> {
    let found = select(exists(departments::table.filter(departments::name.eq(name))))
        .get_result::<bool>(conn)?;
    Ok(found)
}

fn product_code_exists(conn: &mut PgConnection, code: &str) -> Result<bool, DomainError> {
    let found = select(exists(menu_items::table.filter(menu_items::product_code.eq(code))))
        .get_result::<bool>(conn)?;
    Ok(found)
}

fn insert_category(conn: &mut PgConnection, name: &str) -> QueryResult<CategoryRow> {
    diesel::insert_into(categories::table)
        .values(&CategoryRow {
            id: new_id(),
            name: name.to_string(),
        })
        .returning(CategoryRow::as_returning())
        .get_result(conn)
}

fn insert_department(conn: &mut PgConnection, name: &str) -> QueryResult<DepartmentRow> {
    diesel::insert_into(departments::table)
        .values(&DepartmentRow {
            id: new_id(),
            name: name.to_string(),
        })
        .returning(DepartmentRow::as_returning())
        .get_result(conn)
}

fn insert_menu_item(conn: &mut PgConnection, item: NewMenuItem) -> QueryResult<MenuItemRow> {
    let row = MenuItemRow {
        id: item
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_id),
        name: item.name,
        product_code: item.product_code,
        price: item.price,
        category: item.category,
        department: item.department,
        description: item.description,
    };
    diesel::insert_into(menu_items::table)
        .values(&row)
        .returning(MenuItemRow::as_returning())
        .get_result(conn)
}

/// Import sink bound to one open transaction. Each insert runs in its own
/// savepoint so a row the database refuses does not poison the batch.
struct DieselImportSink<'a> {
    conn: &'a mut PgConnection,
}

impl CatalogImportSink for DieselImportSink<'_> {
    fn category_exists(&mut self, name: &str) -> Result<bool, DomainError> {
        category_exists(self.conn, name)
    }

    fn add_category(&mut self, name: &str) -> Result<(), DomainError> {
        self.conn
            .transaction(|conn| insert_category(conn, name))
            .map(|_| ())
            .map_err(row_data_error)
    }

    fn department_exists(&mut self, name: &str) -> Result<bool, DomainError> {
        department_exists(self.conn, name)
    }

    fn add_department(&mut self, name: &str) -> Result<(), DomainError> {
        self.conn
            .transaction(|conn| insert_department(conn, name))
            .map(|_| ())
            .map_err(row_data_error)
    }

    fn product_code_exists(&mut self, code: &str) -> Result<bool, DomainError> {
        product_code_exists(self.conn, code)
    }

    fn add_menu_item(&mut self, item: NewMenuItem) -> Result<(), DomainError> {
        self.conn
            .transaction(|conn| insert_menu_item(conn, item))
            .map(|_| ())
            .map_err(row_data_error)
    }
}

impl CatalogRepository for DieselCatalogRepository {
    // ── Categories ───────────────────────────────────────────────────────────

    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = categories::table
            .select(CategoryRow::as_select())
            .order(categories::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn category_exists(&self, name: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        category_exists(&mut conn, name)
    }

    fn create_category(&self, name: &str) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(insert_category(&mut conn, name).map(Category::from)?)
    }

    fn rename_category(&self, id: &str, name: &str) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let Some(old_name) = categories::table
                .find(id)
                .select(categories::name)
                .for_update()
                .first::<String>(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let row = diesel::update(categories::table.find(id))
                .set(categories::name.eq(name))
                .returning(CategoryRow::as_returning())
                .get_result(conn)?;
            diesel::update(menu_items::table.filter(menu_items::category.eq(&old_name)))
                .set(menu_items::category.eq(name))
                .execute(conn)?;
            Ok(Some(Category::from(row)))
        })
    }

    fn find_category(&self, id: &str) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Category::from))
    }

    fn delete_category(&self, id: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(categories::table.find(id)).execute(&mut conn)? > 0)
    }

    // ── Departments ──────────────────────────────────────────────────────────

    fn list_departments(&self) -> Result<Vec<Department>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = departments::table
            .select(DepartmentRow::as_select())
            .order(departments::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Department::from).collect())
    }

    fn department_exists(&self, name: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        department_exists(&mut conn, name)
    }

    fn create_department(&self, name: &str) -> Result<Department, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(insert_department(&mut conn, name).map(Department::from)?)
    }

    fn rename_department(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Option<Department>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let Some(old_name) = departments::table
                .find(id)
                .select(departments::name)
                .for_update()
                .first::<String>(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let row = diesel::update(departments::table.find(id))
                .set(departments::name.eq(name))
                .returning(DepartmentRow::as_returning())
                .get_result(conn)?;
            diesel::update(menu_items::table.filter(menu_items::department.eq(&old_name)))
                .set(menu_items::department.eq(name))
                .execute(conn)?;
            Ok(Some(Department::from(row)))
        })
    }

    fn find_department(&self, id: &str) -> Result<Option<Department>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = departments::table
            .find(id)
            .select(DepartmentRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Department::from))
    }

    fn delete_department(&self, id: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(departments::table.find(id)).execute(&mut conn)? > 0)
    }

    // ── Menu items ───────────────────────────────────────────────────────────

    fn list_menu_items(&self) -> Result<Vec<MenuItem>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = menu_items::table
            .select(MenuItemRow::as_select())
            .order(menu_items::product_code.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    fn find_menu_item(&self, id: &str) -> Result<Option<MenuItem>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = menu_items::table
            .find(id)
            .select(MenuItemRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(MenuItem::from))
    }

    fn product_code_exists(&self, code: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        product_code_exists(&mut conn, code)
    }

    fn count_items_referencing(
        &self,
        category: Option<&str>,
        department: Option<&str>,
    ) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        let mut query = menu_items::table.select(count_star()).into_boxed();
        if let Some(category) = category {
            query = query.filter(menu_items::category.eq(category));
        }
        if let Some(department) = department {
            query = query.filter(menu_items::department.eq(department));
        }
        Ok(query.get_result(&mut conn)?)
    }

    fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(insert_menu_item(&mut conn, item).map(MenuItem::from)?)
    }

    fn save_menu_item(&self, item: MenuItem) -> Result<MenuItem, DomainError> {
        let mut conn = self.pool.get()?;
        let row = MenuItemRow::from(item);
        let row = diesel::update(menu_items::table.find(&row.id))
            .set(&row)
            .returning(MenuItemRow::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or(DomainError::NotFound("Menu item"))?;
        Ok(MenuItem::from(row))
    }

    fn delete_menu_item(&self, id: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(menu_items::table.find(id)).execute(&mut conn)? > 0)
    }

    // ── Import ───────────────────────────────────────────────────────────────

    fn import(&self, workbook: &CatalogWorkbook) -> Result<ImportStats, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            reconcile_import(&mut DieselImportSink { conn }, workbook)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use diesel::{Connection, PgConnection};

    use super::{DieselCatalogRepository, DieselImportSink};
    use crate::domain::catalog::{MenuItemChanges, NewMenuItem};
    use crate::domain::errors::DomainError;
    use crate::domain::exchange::{CatalogWorkbook, CellValue, MenuItemSheetRow};
    use crate::domain::ports::{CatalogImportSink, CatalogRepository};
    use crate::infrastructure::test_db::setup_db;

    fn burger(code: &str) -> NewMenuItem {
        NewMenuItem {
            id: None,
            name: "Classic Burger".to_string(),
            product_code: code.to_string(),
            price: BigDecimal::from_str("259").expect("decimal"),
            category: "Mains".to_string(),
            department: "Kitchen".to_string(),
            description: None,
        }
    }

    fn row(n: u32, code: &str, name: &str, category: &str) -> MenuItemSheetRow {
        MenuItemSheetRow {
            row: n,
            product_code: code.into(),
            name: name.into(),
            price: CellValue::Number(120.0),
            category: category.into(),
            department: CellValue::Empty,
            description: CellValue::Empty,
        }
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn rename_category_cascades_to_menu_items() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);

        let mains = repo.create_category("Mains").expect("create category");
        repo.create_department("Kitchen").expect("create department");
        repo.create_menu_item(burger("CB001")).expect("create item");

        repo.rename_category(&mains.id, "Main Course")
            .expect("rename")
            .expect("category exists");

        let items = repo.list_menu_items().expect("list");
        assert_eq!(items[0].category, "Main Course");
        assert_eq!(
            repo.count_items_referencing(Some("Mains"), None).expect("count"),
            0
        );
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn duplicate_product_code_is_a_conflict() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);

        repo.create_menu_item(burger("CB001")).expect("create");
        let err = repo.create_menu_item(burger("CB001")).unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn save_clears_description() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);

        let mut item = burger("CB001");
        item.description = Some("Juicy".to_string());
        let item = repo.create_menu_item(item).expect("create");
        let item = item.apply(MenuItemChanges {
            description: Some(None),
            ..Default::default()
        });

        let saved = repo.save_menu_item(item).expect("save");
        assert_eq!(saved.description, None);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn import_partially_succeeds_and_persists() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        repo.create_category("Mains").expect("seed category");

        let workbook = CatalogWorkbook {
            categories: vec!["Appetizers".into(), "Example: Soups".into()],
            departments: vec![],
            menu_items: vec![
                row(2, "A1", "Spring Rolls", "Appetizers"),
                row(3, "A2", "Mystery", "Unknown"),
                row(4, "", "No Code", "Mains"),
            ],
        };

        let stats = repo.import(&workbook).expect("import");

        assert_eq!(stats.categories_added, 1);
        assert_eq!(stats.items_added, 1);
        assert_eq!(
            stats.errors,
            vec![
                "Row 3: Category 'Unknown' does not exist".to_string(),
                "Row 4: Product code is required".to_string(),
            ]
        );
        assert!(repo.product_code_exists("A1").expect("exists"));
        assert!(!repo.category_exists("Example: Soups").expect("exists"));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn oversized_rows_do_not_roll_back_the_import() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let long_code = "X".repeat(65);

        let mut big_price = row(4, "BIG1", "Gold Plate", "Soups");
        big_price.price = CellValue::Number(1e12);
        let workbook = CatalogWorkbook {
            categories: vec!["Soups".into()],
            departments: vec![],
            menu_items: vec![
                row(2, "OK1", "Tomato Soup", "Soups"),
                row(3, &long_code, "Long Code", "Soups"),
                big_price,
            ],
        };

        let stats = repo.import(&workbook).expect("import");

        assert_eq!(stats.items_added, 1);
        assert_eq!(stats.errors.len(), 2);
        assert!(repo.product_code_exists("OK1").expect("exists"));
        assert!(repo.category_exists("Soups").expect("exists"));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn refused_insert_leaves_the_transaction_usable() {
        let (_container, pool) = setup_db().await;
        let mut pooled = pool.get().expect("connection");
        let conn: &mut PgConnection = &mut pooled;

        conn.test_transaction::<_, DomainError, _>(|conn| {
            let mut sink = DieselImportSink { conn };
            let mut unchecked = burger(&"X".repeat(65));
            unchecked.category = String::new();
            unchecked.department = String::new();

            let err = sink.add_menu_item(unchecked).unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));

            let mut valid = burger("OK1");
            valid.category = String::new();
            valid.department = String::new();
            sink.add_menu_item(valid)?;
            assert!(sink.product_code_exists("OK1")?);
            Ok(())
        });
    }
}
