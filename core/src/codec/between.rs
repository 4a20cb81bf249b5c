//! # Between Records
//!
//! A between group is reported as one record holding both endpoints:
//!
//! ```text
//! [kindA, "Between", kindB, ...A-fields..., ...B-fields...]
//!  0      1          2      3
//! ```
//!
//! The record is not delimited between A's and B's data, so its length
//! varies with both kinds (5 to 7 tokens). A's fields start right after the
//! header; B's fields are located from the end of the record using the
//! arity implied by B's kind.

use tracing::trace;

use nfa_common::error::{IpGroupError, Result};
use nfa_common::ipgroup::BetweenRelation;

use super::{BETWEEN_TOKEN, decode_spec, parse_kind};

const HEADER_LEN: usize = 3;

pub(crate) fn decode_between(tokens: &[&str]) -> Result<BetweenRelation> {
    let [label_a, marker, label_b, ..] = tokens else {
        return Err(IpGroupError::decode(tokens, "between record is too short"));
    };

    if !marker.trim().eq_ignore_ascii_case(BETWEEN_TOKEN) {
        return Err(IpGroupError::decode(
            tokens,
            "between marker must follow the first kind label",
        ));
    }

    let kind_a = parse_kind(tokens, label_a)?;
    let kind_b = parse_kind(tokens, label_b)?;

    let expected = HEADER_LEN + kind_a.arity() + kind_b.arity();
    if tokens.len() != expected {
        return Err(IpGroupError::decode(
            tokens,
            format!(
                "{kind_a} to {kind_b} expects {expected} tokens, found {}",
                tokens.len()
            ),
        ));
    }

    let a_fields = &tokens[HEADER_LEN..HEADER_LEN + kind_a.arity()];
    let b_fields = &tokens[tokens.len() - kind_b.arity()..];
    trace!(?a_fields, ?b_fields, "splitting between record");

    let a = decode_spec(kind_a, a_fields).map_err(|reason| IpGroupError::decode(tokens, reason))?;
    let b = decode_spec(kind_b, b_fields).map_err(|reason| IpGroupError::decode(tokens, reason))?;

    Ok(BetweenRelation::new(a, b))
}
