//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (on every config change):
//!     NormalizedRule[] + ClusterHandle + RouteState
//!     → fingerprint.rs (skip rules whose fingerprint and cluster are unchanged)
//!     → matcher.rs / template.rs (compile host + path matchers)
//!     → policy.rs (resolve authorization / CORS)
//!     → compiler.rs (assemble CompiledEntry, publish into RouteState)
//!     → table.rs (sort by priority, publish immutable RouteTable)
//!
//! Incoming Request (host, path)
//!     → Router::snapshot() (one atomic load)
//!     → RouteTable::find (first matching entry)
//!     → Return: RouteMatch or None
//! ```
//!
//! # Design Decisions
//! - Tables are immutable; a rebuild publishes a whole new one
//! - No regex in hot path (segment matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by priority, lower value first)

pub mod compiler;
pub mod entry;
pub mod error;
pub mod fingerprint;
pub mod matcher;
pub mod policy;
pub mod rule;
pub mod state;
pub mod table;
pub mod template;

pub use compiler::RouteCompiler;
pub use entry::CompiledEntry;
pub use error::{PatternError, PatternErrorKind, PatternSource, RebuildError};
pub use fingerprint::fingerprint;
pub use matcher::{HostMatcher, Matcher, PathMatcher, RouteRequest};
pub use policy::{resolve_authorization, resolve_cors, AuthorizationPolicy, CorsPolicy};
pub use rule::NormalizedRule;
pub use state::{RouteState, RouteStates};
pub use table::{RebuildOutcome, RouteMatch, RouteSource, RouteTable, Router};
