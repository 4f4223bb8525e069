use crate::domain::errors::DomainError;
use crate::domain::limits::{check_len, MAX_NAME_LEN};
use crate::domain::order::{validate_line_items, OrderLineItem, TableOrder};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_orders(&self) -> Result<Vec<TableOrder>, DomainError> {
        self.repo.list()
    }

    pub fn get_table_order(&self, table_id: &str) -> Result<Option<TableOrder>, DomainError> {
        self.repo.find_by_table(table_id)
    }

    pub fn add_items(
        &self,
        table_id: &str,
        table_name: &str,
        items: Vec<OrderLineItem>,
    ) -> Result<TableOrder, DomainError> {
        validate_line_items(&items)?;
        if table_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Table name is required".to_string()));
        }
        check_len("Table name", table_name.trim(), MAX_NAME_LEN)?;
        self.repo.add_items(table_id, table_name.trim(), items)
    }

    pub fn mark_sent(&self, table_id: &str) -> Result<TableOrder, DomainError> {
        self.repo
            .mark_sent(table_id)?
            .ok_or(DomainError::NotFound("Order"))
    }

    /// Close the table's order. Recording the invoice is a separate call made
    /// by the client.
    pub fn complete_order(&self, table_id: &str) -> Result<(), DomainError> {
        self.repo.complete(table_id)
    }
}
