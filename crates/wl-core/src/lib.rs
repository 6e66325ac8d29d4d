//! wl-core: shared foundation for the walras workspace.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact good/agent identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

pub use error::{WlError, WlResult};
pub use ids::*;
pub use numeric::*;
