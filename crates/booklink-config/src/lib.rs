pub mod config;
pub mod error;
pub mod link;
pub mod site;

pub use config::Config;
pub use error::ConfigError;
pub use link::LinkConfig;
pub use site::{BookConfig, ElementConfig, PageConfig, PageRefConfig};
