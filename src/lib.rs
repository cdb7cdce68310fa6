pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod reconcile;
pub mod registry;
pub mod resolve;
pub mod ui;
pub mod workspace;

pub use error::{Result, VersionManagerError};
