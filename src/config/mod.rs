//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → RoutingConfig (immutable)
//!     → handed to Router::with_config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a new Router config
//! - All fields have defaults to allow minimal configs
//! - Only settings of the routing core live here, not route definitions

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{FailurePolicy, RoutingConfig, TableConfig};
