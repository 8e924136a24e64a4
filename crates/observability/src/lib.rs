//! Structured metric logging: events, gauges and counters as JSON lines.

/// Install the JSON `tracing` subscriber that carries the logger's own
/// diagnostics (dropped records, failed writes) to stderr.
///
/// Only the first call installs anything.
pub fn init() {
    tracing::init();
}

/// Subscriber setup for the logger's diagnostics, filtered by `RUST_LOG`.
pub mod tracing;

/// The structured metric logger.
pub mod logging;

/// Sinks the logger writes lines through.
pub mod printer;

pub use logging::{LoggerConfig, StructuredLogger};
pub use printer::{ChannelPrinter, Printer, StdoutPrinter, TracingPrinter, WriterPrinter};
pub use registrar_core::{Record, RecordError, RecordKind, Tags};
