use crate::domain::catalog::{
    normalize_name, validate_menu_text, validate_price, Category, Department, MenuItem,
    MenuItemChanges, NewMenuItem,
};
use crate::domain::errors::DomainError;
use crate::domain::exchange::{CatalogWorkbook, ImportStats};
use crate::domain::ports::CatalogRepository;

/// Everything the spreadsheet export needs, in store order.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub departments: Vec<Department>,
    pub menu_items: Vec<MenuItem>,
}

pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    // ── Categories ───────────────────────────────────────────────────────────

    pub fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.list_categories()
    }

    pub fn create_category(&self, name: &str) -> Result<Category, DomainError> {
        let name = normalize_name(name)?;
        if self.repo.category_exists(&name)? {
            return Err(DomainError::InvalidInput(format!(
                "Category '{}' already exists",
                name
            )));
        }
        self.repo.create_category(&name)
    }

    pub fn rename_category(&self, id: &str, name: &str) -> Result<Category, DomainError> {
        let name = normalize_name(name)?;
        let current = self
            .repo
            .find_category(id)?
            .ok_or(DomainError::NotFound("Category"))?;
        if current.name != name && self.repo.category_exists(&name)? {
            return Err(DomainError::InvalidInput(format!(
                "Category '{}' already exists",
                name
            )));
        }
        self.repo
            .rename_category(id, &name)?
            .ok_or(DomainError::NotFound("Category"))
    }

    pub fn delete_category(&self, id: &str) -> Result<(), DomainError> {
        let category = self
            .repo
            .find_category(id)?
            .ok_or(DomainError::NotFound("Category"))?;
        let in_use = self
            .repo
            .count_items_referencing(Some(&category.name), None)?;
        if in_use > 0 {
            return Err(DomainError::InvalidInput(format!(
                "Category '{}' is used by {} menu item(s)",
                category.name, in_use
            )));
        }
        if !self.repo.delete_category(id)? {
            return Err(DomainError::NotFound("Category"));
        }
        Ok(())
    }

    // ── Departments ──────────────────────────────────────────────────────────

    pub fn list_departments(&self) -> Result<Vec<Department>, DomainError> {
        self.repo.list_departments()
    }

    pub fn create_department(&self, name: &str) -> Result<Department, DomainError> {
        let name = normalize_name(name)?;
        if self.repo.department_exists(&name)? {
            return Err(DomainError::InvalidInput(format!(
                "Department '{}' already exists",
                name
            )));
        }
        self.repo.create_department(&name)
    }

    pub fn rename_department(&self, id: &str, name: &str) -> Result<Department, DomainError> {
        let name = normalize_name(name)?;
        let current = self
            .repo
            .find_department(id)?
            .ok_or(DomainError::NotFound("Department"))?;
        if current.name != name && self.repo.department_exists(&name)? {
            return Err(DomainError::InvalidInput(format!(
                "Department '{}' already exists",
                name
            )));
        }
        self.repo
            .rename_department(id, &name)?
            .ok_or(DomainError::NotFound("Department"))
    }

    pub fn delete_department(&self, id: &str) -> Result<(), DomainError> {
        let department = self
            .repo
            .find_department(id)?
            .ok_or(DomainError::NotFound("Department"))?;
        let in_use = self
            .repo
            .count_items_referencing(None, Some(&department.name))?;
        if in_use > 0 {
            return Err(DomainError::InvalidInput(format!(
                "Department '{}' is used by {} menu item(s)",
                department.name, in_use
            )));
        }
        if !self.repo.delete_department(id)? {
            return Err(DomainError::NotFound("Department"));
        }
        Ok(())
    }

    // ── Menu items ───────────────────────────────────────────────────────────

    pub fn list_menu_items(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.repo.list_menu_items()
    }

    pub fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, DomainError> {
        let item = item.normalized();
        item.validate()?;
        if self.repo.product_code_exists(&item.product_code)? {
            return Err(DomainError::InvalidInput(
                "Product code already exists".to_string(),
            ));
        }
        self.check_references(&item.category, &item.department)?;
        self.repo.create_menu_item(item)
    }

    pub fn update_menu_item(
        &self,
        id: &str,
        changes: MenuItemChanges,
    ) -> Result<MenuItem, DomainError> {
        let current = self
            .repo
            .find_menu_item(id)?
            .ok_or(DomainError::NotFound("Menu item"))?;
        let original_code = current.product_code.clone();
        let updated = current.apply(changes);

        if updated.product_code.is_empty() || updated.name.is_empty() {
            return Err(DomainError::InvalidInput(
                "Product code and name are required".to_string(),
            ));
        }
        validate_menu_text(
            &updated.product_code,
            &updated.name,
            &updated.category,
            &updated.department,
        )?;
        validate_price(&updated.price)?;
        if updated.product_code != original_code
            && self.repo.product_code_exists(&updated.product_code)?
        {
            return Err(DomainError::InvalidInput(
                "Product code already exists".to_string(),
            ));
        }
        self.check_references(&updated.category, &updated.department)?;
        self.repo.save_menu_item(updated)
    }

    pub fn delete_menu_item(&self, id: &str) -> Result<(), DomainError> {
        if self.repo.delete_menu_item(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound("Menu item"))
        }
    }

    // ── Spreadsheet exchange ─────────────────────────────────────────────────

    pub fn export_snapshot(&self) -> Result<CatalogSnapshot, DomainError> {
        Ok(CatalogSnapshot {
            categories: self.repo.list_categories()?,
            departments: self.repo.list_departments()?,
            menu_items: self.repo.list_menu_items()?,
        })
    }

    pub fn import_workbook(&self, workbook: &CatalogWorkbook) -> Result<ImportStats, DomainError> {
        let stats = self.repo.import(workbook)?;
        log::info!(
            "Catalog import: {} categories, {} departments, {} items added, {} row errors",
            stats.categories_added,
            stats.departments_added,
            stats.items_added,
            stats.errors.len()
        );
        Ok(stats)
    }

    /// Empty names are allowed; non-empty ones must exist.
    fn check_references(&self, category: &str, department: &str) -> Result<(), DomainError> {
        if !category.is_empty() && !self.repo.category_exists(category)? {
            return Err(DomainError::InvalidInput(format!(
                "Category '{}' does not exist",
                category
            )));
        }
        if !department.is_empty() && !self.repo.department_exists(department)? {
            return Err(DomainError::InvalidInput(format!(
                "Department '{}' does not exist",
                department
            )));
        }
        Ok(())
    }
}
