//! Line sinks the structured logger writes through.
//!
//! A [`Printer`] is the logger's only capability for side effects. It is
//! handed in by the caller and never closed or reconfigured by the logger.
//!
//! Each logger call ends in exactly one `printf` call carrying one complete,
//! newline-terminated line. Whether lines from concurrent callers can
//! interleave is up to the printer; the printers in this module each perform
//! one write per call under a lock.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, mpsc};

use tracing::{info, warn};

/// "Format and write a line" capability.
pub trait Printer: Send + Sync {
    /// Format `args` and write the result. Failures are the printer's to
    /// handle; nothing is returned to the logger.
    fn printf(&self, args: fmt::Arguments<'_>);
}

impl<P: Printer + ?Sized> Printer for Arc<P> {
    fn printf(&self, args: fmt::Arguments<'_>) {
        (**self).printf(args)
    }
}

impl<P: Printer + ?Sized> Printer for Box<P> {
    fn printf(&self, args: fmt::Arguments<'_>) {
        (**self).printf(args)
    }
}

impl<P: Printer + ?Sized> Printer for &P {
    fn printf(&self, args: fmt::Arguments<'_>) {
        (**self).printf(args)
    }
}

/// Writes to the process's standard output. This is the logger's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutPrinter;

impl Printer for StdoutPrinter {
    fn printf(&self, args: fmt::Arguments<'_>) {
        let line = fmt::format(args);
        let mut out = io::stdout().lock();
        if let Err(error) = out.write_all(line.as_bytes()).and_then(|_| out.flush()) {
            warn!(%error, "failed to write metric line to stdout");
        }
    }
}

/// Writes to any `io::Write`, one `write_all` per call.
#[derive(Debug)]
pub struct WriterPrinter<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> Printer for WriterPrinter<W> {
    fn printf(&self, args: fmt::Arguments<'_>) {
        let line = fmt::format(args);

        // A panic mid-write elsewhere leaves at worst a torn line; keep going.
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Err(error) = writer.write_all(line.as_bytes()).and_then(|_| writer.flush()) {
            warn!(%error, "failed to write metric line");
        }
    }
}

/// Sends every formatted line over a channel.
///
/// Handy for tests and for handing lines to a dedicated writer thread.
#[derive(Debug, Clone)]
pub struct ChannelPrinter {
    sender: mpsc::Sender<String>,
}

impl ChannelPrinter {
    /// Create a printer and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl Printer for ChannelPrinter {
    fn printf(&self, args: fmt::Arguments<'_>) {
        // Receiver gone means nobody is listening any more.
        let _ = self.sender.send(fmt::format(args));
    }
}

/// Forwards lines into the `tracing` pipeline as `info` events with target
/// `metrics`, trailing newline stripped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPrinter;

impl Printer for TracingPrinter {
    fn printf(&self, args: fmt::Arguments<'_>) {
        let line = fmt::format(args);
        info!(target: "metrics", "{}", line.trim_end_matches('\n'));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_printer_sends_one_message_per_call() {
        let (printer, rx) = ChannelPrinter::new();

        printer.printf(format_args!("{}\n", "first"));
        printer.printf(format_args!("{}-{}\n", "second", 2));

        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["first\n", "second-2\n"]);
    }

    #[test]
    fn channel_printer_tolerates_dropped_receiver() {
        let (printer, rx) = ChannelPrinter::new();
        drop(rx);

        printer.printf(format_args!("ignored\n"));
    }

    #[test]
    fn writer_printer_appends_lines() {
        let printer = WriterPrinter::new(Vec::new());

        printer.printf(format_args!("{}\n", "a"));
        printer.printf(format_args!("{}\n", "b"));

        assert_eq!(printer.into_inner(), b"a\nb\n");
    }

    #[test]
    fn shared_printers_forward_to_the_inner_printer() {
        let (printer, rx) = ChannelPrinter::new();
        let shared: Arc<dyn Printer> = Arc::new(printer);

        shared.printf(format_args!("via arc\n"));
        (&shared).printf(format_args!("via ref\n"));

        assert_eq!(rx.try_iter().count(), 2);
    }
}
