//! Persistence for the option record.

pub mod config;

pub use config::{flush_config, load_options, save_options};
