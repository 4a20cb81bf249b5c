//! Errors raised while building or decoding IP group memberships.

use std::net::Ipv4Addr;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IpGroupError>;

/// Everything that can go wrong inside the membership model and its codec.
///
/// None of these are transient: retrying the same call yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IpGroupError {
    /// Malformed octets, netmask or prefix length.
    #[error("invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Range whose start lies above its end.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: Ipv4Addr, end: Ipv4Addr },

    /// A value of one address kind was supplied where another was expected.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Conflicting list/between mutation on a membership.
    #[error("invalid membership state: {0}")]
    InvalidState(&'static str),

    /// A wire record that does not match any known layout.
    #[error("cannot decode record {record:?}: {reason}")]
    Decode { record: Vec<String>, reason: String },
}

impl IpGroupError {
    pub fn invalid_address(input: &str, reason: impl ToString) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn decode<S: AsRef<str>>(record: &[S], reason: impl ToString) -> Self {
        Self::Decode {
            record: record.iter().map(|t| t.as_ref().to_string()).collect(),
            reason: reason.to_string(),
        }
    }
}
