//! # NFA Core
//!
//! Talks to the NetFlow Analyzer IP group API.
//!
//! * **[`codec`]**: translates the service's positional records to and from
//!   [`nfa_common::ipgroup::Membership`].
//! * **[`api`]**: endpoint paths and the serde shapes of list responses.
//! * **[`transport`]**: the port an authenticated HTTP session plugs into.
//! * **[`client`]**: list/add/modify/delete calls built on the two above.

pub mod api;
pub mod client;
pub mod codec;
pub mod error;
pub mod transport;

pub use client::{ClientOptions, IpGroupClient};
pub use error::{ClientError, Result};
pub use transport::Transport;
