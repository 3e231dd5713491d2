pub mod analysis_core;
pub mod config;
pub mod sqlite_pragma;
