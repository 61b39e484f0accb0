//! Backend cluster handles.
//!
//! # Data Flow
//! ```text
//! Cluster management (external)
//!     → ClusterInfo (id + destination set), shared as Arc
//!     → referenced by every CompiledEntry routed to it
//!     → request dispatch reads entry.cluster after a match
//! ```
//!
//! # Design Decisions
//! - Routing only holds references; it never mutates a cluster
//! - Destination set is concurrent so management can update it in place
//! - Cluster identity (`Arc::ptr_eq`) is part of route change detection

pub mod destination;
pub mod info;

pub use destination::Destination;
pub use info::{ClusterHandle, ClusterInfo};
