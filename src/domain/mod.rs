pub mod catalog;
pub mod errors;
pub mod exchange;
pub mod invoice;
pub mod limits;
pub mod order;
pub mod ports;
pub mod settings;
pub mod table;
