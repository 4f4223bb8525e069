use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::TableRepository;
use crate::domain::table::{Table, TableChanges};
use crate::schema::tables;

use super::models::{TableChangeset, TableRow};

pub struct DieselTableRepository {
    pool: DbPool,
}

impl DieselTableRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl TableRepository for DieselTableRepository {
    fn list(&self) -> Result<Vec<Table>, DomainError> {
        let mut conn = self.pool.get()?;
        tables::table
            .select(TableRow::as_select())
            .order((tables::name.asc(), tables::id.asc()))
            .load(&mut conn)?
            .into_iter()
            .map(Table::try_from)
            .collect()
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Table>, DomainError> {
        let mut conn = self.pool.get()?;
        tables::table
            .find(id)
            .select(TableRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Table::try_from)
            .transpose()
    }

    fn create(&self, table: Table) -> Result<Table, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(tables::table)
            .values(&TableRow::from(&table))
            .returning(TableRow::as_returning())
            .get_result(&mut conn)?;
        Table::try_from(row)
    }

    fn update(&self, id: &str, changes: TableChanges) -> Result<Option<Table>, DomainError> {
        let mut conn = self.pool.get()?;
        let changeset = TableChangeset {
            name: changes.name.map(|n| n.trim().to_string()),
            seats: changes.seats,
            category: changes.category.map(|c| c.trim().to_string()),
            status: changes.status.map(|s| s.as_str().to_string()),
        };

        // An empty changeset is rejected by diesel, so just read the row back.
        if changeset.name.is_none()
            && changeset.seats.is_none()
            && changeset.category.is_none()
            && changeset.status.is_none()
        {
            return self.find_by_id(id);
        }

        diesel::update(tables::table.find(id))
            .set(&changeset)
            .returning(TableRow::as_returning())
            .get_result(&mut conn)
            .optional()?
            .map(Table::try_from)
            .transpose()
    }

    fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(tables::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
