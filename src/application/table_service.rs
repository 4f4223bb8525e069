use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::limits::{check_len, MAX_CODE_LEN, MAX_NAME_LEN};
use crate::domain::ports::TableRepository;
use crate::domain::table::{validate_seats, Table, TableChanges, TableStatus};

pub struct NewTable {
    pub id: Option<String>,
    pub name: String,
    pub seats: i32,
    pub category: String,
    pub status: Option<TableStatus>,
}

pub struct TableService<R> {
    repo: R,
}

impl<R: TableRepository> TableService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_tables(&self) -> Result<Vec<Table>, DomainError> {
        self.repo.list()
    }

    pub fn create_table(&self, new: NewTable) -> Result<Table, DomainError> {
        validate_seats(new.seats)?;
        let name = new.name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Table name is required".to_string()));
        }
        let id = new
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let category = new.category.trim();
        check_len("Id", &id, MAX_CODE_LEN)?;
        check_len("Table name", name, MAX_NAME_LEN)?;
        check_len("Category", category, MAX_NAME_LEN)?;

        self.repo.create(Table {
            id,
            name: name.to_string(),
            seats: new.seats,
            category: category.to_string(),
            status: new.status.unwrap_or(TableStatus::Available),
        })
    }

    pub fn update_table(&self, id: &str, changes: TableChanges) -> Result<Table, DomainError> {
        if let Some(seats) = changes.seats {
            validate_seats(seats)?;
        }
        if matches!(&changes.name, Some(name) if name.trim().is_empty()) {
            return Err(DomainError::InvalidInput("Table name is required".to_string()));
        }
        if let Some(name) = &changes.name {
            check_len("Table name", name.trim(), MAX_NAME_LEN)?;
        }
        if let Some(category) = &changes.category {
            check_len("Category", category.trim(), MAX_NAME_LEN)?;
        }
        self.repo
            .update(id, changes)?
            .ok_or(DomainError::NotFound("Table"))
    }

    pub fn delete_table(&self, id: &str) -> Result<(), DomainError> {
        if self.repo.delete(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound("Table"))
        }
    }
}
