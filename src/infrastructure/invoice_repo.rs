use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::ports::InvoiceRepository;
use crate::schema::invoices;

use super::models::{encode_items, InvoiceRow};

pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl InvoiceRepository for DieselInvoiceRepository {
    fn list(&self) -> Result<Vec<Invoice>, DomainError> {
        let mut conn = self.pool.get()?;
        invoices::table
            .select(InvoiceRow::as_select())
            .order(invoices::issued_at.desc())
            .load(&mut conn)?
            .into_iter()
            .map(Invoice::try_from)
            .collect()
    }

    fn create(&self, invoice: NewInvoice) -> Result<Invoice, DomainError> {
        let mut conn = self.pool.get()?;
        let row = InvoiceRow {
            id: invoice
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            bill_number: invoice.bill_number.trim().to_string(),
            order_type: invoice.order_type.as_str().to_string(),
            table_name: invoice.table_name,
            items: encode_items(&invoice.items)?,
            subtotal: invoice.subtotal,
            tax: invoice.tax,
            total: invoice.total,
            issued_at: invoice.timestamp,
        };
        let row = diesel::insert_into(invoices::table)
            .values(&row)
            .returning(InvoiceRow::as_returning())
            .get_result(&mut conn)?;
        Invoice::try_from(row)
    }
}
