pub mod config;
pub mod poems;
