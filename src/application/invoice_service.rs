use crate::domain::errors::DomainError;
use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::ports::InvoiceRepository;

pub struct InvoiceService<R> {
    repo: R,
}

impl<R: InvoiceRepository> InvoiceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_invoices(&self) -> Result<Vec<Invoice>, DomainError> {
        self.repo.list()
    }

    pub fn create_invoice(&self, invoice: NewInvoice) -> Result<Invoice, DomainError> {
        invoice.validate()?;
        self.repo.create(invoice)
    }
}
