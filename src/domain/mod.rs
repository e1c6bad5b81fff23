//! Domain layer for the taskboard system
//!
//! Models, port traits and errors. Nothing in here performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, ErrorKind, FieldError};
