//! Metrics collection.
//!
//! # Metrics
//! - `routing_rebuilds_total` (counter): published route tables
//! - `routing_rules_compiled_total` (counter): rules compiled from scratch
//! - `routing_rules_reused_total` (counter): rules carried over unchanged
//! - `routing_rule_errors_total` (counter): failed rules, by `kind`
//! - `routing_table_entries` (gauge): entries in the live table
//!
//! # Design Decisions
//! - Uses the `metrics` facade; the host process installs the exporter
//! - Without a recorder every call is a no-op

use ::metrics::{counter, gauge};

/// Record the outcome of one published rebuild.
pub fn record_rebuild(compiled: usize, reused: usize, entries: usize) {
    counter!("routing_rebuilds_total").increment(1);
    counter!("routing_rules_compiled_total").increment(compiled as u64);
    counter!("routing_rules_reused_total").increment(reused as u64);
    gauge!("routing_table_entries").set(entries as f64);
}

/// Record one rule that failed during a rebuild.
pub fn record_rule_error(kind: &'static str) {
    counter!("routing_rule_errors_total", "kind" => kind).increment(1);
}
