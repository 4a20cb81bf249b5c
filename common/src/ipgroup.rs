//! # IP Group Model
//!
//! Value types describing which traffic an IP group matches.
//!
//! ## Contents
//! * [`address::AddressSpec`]: a single host, CIDR network or address range.
//! * [`between::BetweenRelation`]: traffic flowing between two specifications.
//! * [`membership::Membership`]: the aggregate owning either an ordered member
//!   list or exactly one between relation.

pub mod address;
pub mod between;
pub mod membership;

pub use address::{AddressKind, AddressSpec};
pub use between::BetweenRelation;
pub use membership::{DeviceScope, GroupState, Member, Membership, MembershipKind, MembershipStatus};
