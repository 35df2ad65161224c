pub mod build;
pub mod config_cmd;
pub mod encode;
pub mod file;
pub mod kinds;
pub mod shell;
