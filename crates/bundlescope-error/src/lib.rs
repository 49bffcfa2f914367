//! # bundlescope-error
//!
//! Unified error handling for bundlescope.
//!
//! - **ErrorKind**: what went wrong (e.g. `MissingGraphRoot`, `DeserializationFailed`)
//! - **Error context**: operation name plus key/value pairs to locate the cause
//! - **Error source**: underlying errors are wrapped, never leaked as raw types
//!
//! ## Usage
//!
//! ```rust
//! use bundlescope_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::MissingGraphRoot, "entry produced no modules")
//!         .with_operation("graph::build_entry_graph")
//!         .with_context("entry", "/app/src/main.js"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `bundlescope_error::Result<T>`
//! - External errors are wrapped with `set_source(err)` at the call site
//! - Same error handled once, callers further up only append context

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the bundlescope Error
pub type Result<T> = std::result::Result<T, Error>;
