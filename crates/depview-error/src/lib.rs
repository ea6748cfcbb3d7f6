//! # depview-error
//!
//! Unified error handling for depview.
//!
//! - **ErrorKind**: what went wrong (e.g. `InvalidFormat`, `ExportFailed`)
//! - **Operation + context**: which stage failed and on what input
//! - **Source**: the wrapped underlying error, if any
//!
//! ```rust
//! use depview_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidFormat, "missing solution header")
//!         .with_operation("loader::load")
//!         .with_context("path", "App.sln"))
//! }
//! ```
//!
//! Every fallible function returns `depview_error::Result<T>`. External errors
//! are wrapped with `set_source(err)`; callers further up only append context.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the depview Error
pub type Result<T> = std::result::Result<T, Error>;
