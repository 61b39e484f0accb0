//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Route compilation and table rebuilds produce:
//!     → tracing events (structured fields: rule_id, generation, counts)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → whatever subscriber / recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - The library emits, it never installs a subscriber or exporter
//! - Per-rule events at debug/warn, one info event per published table

pub mod metrics;
