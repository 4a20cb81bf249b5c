//! # NFA Common
//!
//! Shared model for NetFlow Analyzer IP groups.
//!
//! * **[`ipgroup`]**: address specifications, between relations and the
//!   per-group [`ipgroup::Membership`] aggregate.
//! * **[`error`]**: the error taxonomy raised by the model and the wire codec.
//! * **[`config`]**: runtime switches shared by the front ends.

pub mod config;
pub mod error;
pub mod ipgroup;

pub use error::{IpGroupError, Result};
