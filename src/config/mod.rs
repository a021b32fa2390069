//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config, load_config_file, resolve_config_path, save_config};
pub use paths::{config_dir, config_file_path, default_daq_database_path};
pub use types::{CatalogConfig, Config, DaqConfig, WeeksConfig};
pub use validate::validate_config;
