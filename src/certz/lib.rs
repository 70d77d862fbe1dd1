//! # Certz Architecture
//!
//! Certz resolves a student identifier to the certificate file for that student. It joins
//! two independently maintained sources: a roster spreadsheet, whose rows carry an
//! identifier and a reference number, and a certificate archive, whose entry names embed
//! that reference number somewhere in the file name.
//!
//! Like any good library it is UI-agnostic: the CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, writes downloads       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the RecordIndex and the archive location            │
//! │  - Returns structured Result<CmdResult>                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - lookup, certificate, manifest, status, config, init      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - loader: grid → RecordSet       index: lookups, reloads   │
//! │  - reference: Record → Reference  resolver: Reference → file│
//! │  - source/: TableSource backends  archive/: container types │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The resolution pipeline
//!
//! 1. [`loader::DatasetLoader`] turns the roster grid into a [`model::RecordSet`],
//!    normalizing header aliases ("Student Id" → "Student ID", "Reference No" →
//!    "Reference Number", ...). Loading is all-or-nothing.
//! 2. [`index::RecordIndex`] answers `lookup(identifier)`: trimmed, case-sensitive,
//!    first match wins. An empty index is reloaded once per lookup.
//! 3. [`reference::derive_reference`] picks the reference from the record, dropping the
//!    `.0` that spreadsheets leave on integer-like numbers.
//! 4. [`resolver::resolve_certificate`] scans the archive manifest for the first entry
//!    whose name contains the reference and returns its bytes, a download name and a
//!    mimetype.
//!
//! Every failure along the way is its own [`error::CertzError`] variant. "No such
//! student", "no reference on the record", "no matching certificate" and "archive
//! unreadable" are never folded into one another or into an empty success.
//!
//! ## No I/O assumptions in the core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per user-facing operation
//! - [`model`]: `Column`, `Scalar`, `Record`, `RecordSet`
//! - [`loader`], [`index`], [`reference`], [`resolver`]: the pipeline
//! - [`source`]: Roster backends (spreadsheets, memory)
//! - [`archive`]: Certificate containers (zip, tar.gz, memory)
//! - [`config`]: `config.json` handling
//! - [`init`]: Context setup for clients
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod archive;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod loader;
pub mod model;
pub mod reference;
pub mod resolver;
pub mod source;

#[doc(hidden)]
pub mod test_utils;
