pub mod config;
pub mod ledger;
pub mod logger;
pub mod record;
pub mod render;
pub mod server;
