//! Dynamic route compiler and route table for a reverse proxy.

pub mod cluster;
pub mod config;
pub mod observability;
pub mod routing;

pub use cluster::{ClusterHandle, ClusterInfo};
pub use config::RoutingConfig;
pub use routing::{CompiledEntry, NormalizedRule, RouteSource, RouteState, RouteTable, Router};
