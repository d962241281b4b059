pub mod csv_store;
pub mod helpers;
pub mod interfaces;

pub use csv_store::CsvRecordRepository;
pub use helpers::*;
pub use interfaces::{LoadWarning, RecordError, RecordRepository};
