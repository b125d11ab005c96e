//! fhirview library crate
//!
//! Exposes the client, record assembly, rendering, and export modules so
//! they can be unit tested; the binary entrypoint is in `main.rs`.

pub mod client;
pub mod config;
pub mod export;
pub mod record;
pub mod render;
