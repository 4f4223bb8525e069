pub mod catalog_service;
pub mod invoice_service;
pub mod order_service;
pub mod settings_service;
pub mod table_service;
