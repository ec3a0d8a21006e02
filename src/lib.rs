pub mod config;
pub mod error;
pub mod file_list;
pub mod logging;
pub mod models;
pub mod rename_engine;
pub mod store;
pub mod tui;
