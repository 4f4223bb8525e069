use bigdecimal::{BigDecimal, Zero};

use super::errors::DomainError;
use super::limits::{check_amount, check_len, MAX_CODE_LEN, MAX_NAME_LEN};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// Menu entries reference their category and department by name, not by id.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub product_code: String,
    pub price: BigDecimal,
    pub category: String,
    pub department: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub id: Option<String>,
    pub name: String,
    pub product_code: String,
    pub price: BigDecimal,
    pub category: String,
    pub department: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MenuItemChanges {
    pub name: Option<String>,
    pub product_code: Option<String>,
    pub price: Option<BigDecimal>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub description: Option<Option<String>>,
}

impl NewMenuItem {
    /// Trim every text field and drop an empty description.
    pub fn normalized(self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            product_code: self.product_code.trim().to_string(),
            price: self.price,
            category: self.category.trim().to_string(),
            department: self.department.trim().to_string(),
            description: normalize_description(self.description),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.product_code.is_empty() {
            return Err(DomainError::InvalidInput(
                "Product code is required".to_string(),
            ));
        }
        if self.name.is_empty() {
            return Err(DomainError::InvalidInput("Item name is required".to_string()));
        }
        if let Some(id) = &self.id {
            check_len("Id", id, MAX_CODE_LEN)?;
        }
        validate_menu_text(
            &self.product_code,
            &self.name,
            &self.category,
            &self.department,
        )?;
        validate_price(&self.price)
    }
}

impl MenuItem {
    pub fn apply(mut self, changes: MenuItemChanges) -> Self {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(code) = changes.product_code {
            self.product_code = code.trim().to_string();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category) = changes.category {
            self.category = category.trim().to_string();
        }
        if let Some(department) = changes.department {
            self.department = department.trim().to_string();
        }
        if let Some(description) = changes.description {
            self.description = normalize_description(description);
        }
        self
    }
}

pub fn validate_price(price: &BigDecimal) -> Result<(), DomainError> {
    if *price < BigDecimal::zero() {
        return Err(DomainError::InvalidInput(
            "Price must not be negative".to_string(),
        ));
    }
    check_amount("Price", price)
}

pub fn validate_menu_text(
    product_code: &str,
    name: &str,
    category: &str,
    department: &str,
) -> Result<(), DomainError> {
    check_len("Product code", product_code, MAX_CODE_LEN)?;
    check_len("Item name", name, MAX_NAME_LEN)?;
    check_len("Category", category, MAX_NAME_LEN)?;
    check_len("Department", department, MAX_NAME_LEN)
}

/// Catalog names are compared exactly; only surrounding whitespace is dropped.
pub fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("Name is required".to_string()));
    }
    check_len("Name", name, MAX_NAME_LEN)?;
    Ok(name.to_string())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
