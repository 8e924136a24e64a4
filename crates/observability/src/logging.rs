//! Structured metric logger.
//!
//! Turns event/gauge/counter calls into one JSON line each and hands the line
//! to the configured [`Printer`]:
//!
//! ```ignore
//! let logger = StructuredLogger::new(
//!     LoggerConfig::default().with_default_tags(Tags::from([("app", "billing")])),
//! );
//!
//! logger.log_counter("invoices_sent", 1, Some(&Tags::from([("region", "eu")])));
//! // {"type":"counter","name":"invoices_sent","delta":1,"tags":{"app":"billing","region":"eu"}}
//! ```
//!
//! ## Tags
//!
//! Every record carries the logger's default tags overlaid with the tags given
//! at the call site; call-site values win on collision. The caller's map is
//! never modified.
//!
//! ## Failures
//!
//! Logging never returns an error. A record that cannot be encoded is dropped
//! and a single `unable to marshal <kind> json: <reason>` line is written to
//! the printer instead (plus a `tracing` warning). There is no retry.
//!
//! ## Concurrency
//!
//! The logger is immutable after construction and can be shared across
//! threads. Keeping lines from concurrent calls intact is the printer's job.

use std::fmt;
use std::sync::Arc;

use registrar_core::{Record, Tags};
use tracing::{debug, warn};

use crate::printer::{Printer, StdoutPrinter};

/// Logger construction options.
#[derive(Clone, Default)]
pub struct LoggerConfig {
    /// Tags applied to every record.
    pub default_tags: Tags,
    /// Where lines go. `None` means standard output.
    pub printer: Option<Arc<dyn Printer>>,
}

impl LoggerConfig {
    pub fn with_default_tags(mut self, default_tags: impl Into<Tags>) -> Self {
        self.default_tags = default_tags.into();
        self
    }

    pub fn with_printer(mut self, printer: impl Printer + 'static) -> Self {
        self.printer = Some(Arc::new(printer));
        self
    }

    /// Use a printer the caller keeps a handle to.
    pub fn with_shared_printer(mut self, printer: Arc<dyn Printer>) -> Self {
        self.printer = Some(printer);
        self
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("default_tags", &self.default_tags)
            .field("printer", &self.printer.as_ref().map(|_| "custom").unwrap_or("stdout"))
            .finish()
    }
}

/// Encodes metric records as JSON lines.
#[derive(Clone)]
pub struct StructuredLogger {
    default_tags: Tags,
    printer: Arc<dyn Printer>,
}

impl StructuredLogger {
    pub fn new(config: LoggerConfig) -> Self {
        let LoggerConfig {
            default_tags,
            printer,
        } = config;

        let printer: Arc<dyn Printer> = match printer {
            Some(printer) => printer,
            None => Arc::new(StdoutPrinter),
        };

        Self {
            default_tags,
            printer,
        }
    }

    pub fn default_tags(&self) -> &Tags {
        &self.default_tags
    }

    /// Log a discrete event.
    pub fn log_event(&self, title: &str, body: &str, tags: Option<&Tags>) {
        self.write(&Record::event(title, body, self.merged(tags)));
    }

    /// Log a gauge reading.
    pub fn log_gauge(&self, name: &str, value: f64, tags: Option<&Tags>) {
        self.write(&Record::gauge(name, value, self.merged(tags)));
    }

    /// Log a counter increment.
    pub fn log_counter(&self, name: &str, delta: u64, tags: Option<&Tags>) {
        self.write(&Record::counter(name, delta, self.merged(tags)));
    }

    /// Log a prebuilt record; its own tags count as call-site tags.
    pub fn log(&self, record: Record) {
        self.write(&record.with_default_tags(&self.default_tags));
    }

    fn merged(&self, tags: Option<&Tags>) -> Tags {
        Tags::merged(&self.default_tags, tags)
    }

    fn write(&self, record: &Record) {
        match record.to_json() {
            Ok(line) => {
                debug!(kind = %record.kind(), "emitting metric record");
                self.printer.printf(format_args!("{line}\n"));
            }
            Err(error) => {
                warn!(kind = %error.kind(), %error, "dropping metric record");
                self.printer.printf(format_args!("{error}\n"));
            }
        }
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("default_tags", &self.default_tags)
            .finish_non_exhaustive()
    }
}
