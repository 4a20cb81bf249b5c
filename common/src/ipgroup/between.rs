//! # Between Relations
//!
//! A group may be defined as "traffic between A and B" instead of an
//! include/exclude list. The endpoints are ordered and may be of different
//! kinds (a host paired with a network, a network with a range, ...).

use std::fmt;

use crate::ipgroup::address::AddressSpec;

/// Asymmetric pairing of two address specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetweenRelation {
    a: AddressSpec,
    b: AddressSpec,
}

impl BetweenRelation {
    pub fn new(a: AddressSpec, b: AddressSpec) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> &AddressSpec {
        &self.a
    }

    pub fn b(&self) -> &AddressSpec {
        &self.b
    }

    /// The `ToIPType` value the service expects: B's kind label, lower-cased.
    pub fn to_ip_type(&self) -> String {
        self.b.kind_label().to_ascii_lowercase()
    }
}

impl fmt::Display for BetweenRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}
