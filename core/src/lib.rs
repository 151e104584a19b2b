//! Domain core for the todo service.
//!
//! # Overview
//! Defines the wire-level todo types, the input validation they carry, and
//! the error taxonomy shared across the service. Nothing in this crate
//! touches the network or the database — the server crate owns all I/O and
//! the persisted document mapping.
//!
//! # Design
//! - `Todo` is the externally visible shape: the identifier is the hex
//!   string form of the storage key, never the key itself.
//! - `TodoInput` is the single request-body type for create and update;
//!   `completed` defaults to `false` so POST bodies may omit it.
//! - Validation passes the title through exactly as received — no trimming.
//! - `TodoError` separates bad input (caller's fault) from storage failures
//!   (our fault); the server maps that split onto 400 vs 500.

pub mod error;
pub mod types;

pub use error::TodoError;
pub use types::{Todo, TodoInput};
