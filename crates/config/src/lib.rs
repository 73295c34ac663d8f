//! Configuration and repository layout for hookah
//!
//! This crate loads `hookah.yml`, finds the repository root and resolves
//! every path the engine touches. It also sets up logging for the CLI.

pub mod config;
pub mod layout;
pub mod logging;
pub mod repository;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_SOURCE_DIR};
pub use hookah_core::{Error, Result};
pub use layout::{BACKUP_SUFFIX, Layout};
pub use repository::find_repository_root;
