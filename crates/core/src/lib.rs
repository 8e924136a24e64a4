//! `registrar-core` — metric record building blocks.
//!
//! This crate contains the **pure** pieces of the registrar (no IO): tag maps,
//! the three record shapes and their JSON line encoding. Writing lines
//! somewhere is the job of `registrar-observability`.

pub mod error;
pub mod record;
pub mod tags;

pub use error::{RecordError, RecordResult};
pub use record::{Record, RecordKind};
pub use tags::Tags;
