//! # Wire Codec
//!
//! The service describes a group's addresses as a list of positional string
//! arrays. The first token names the address kind, the second carries the
//! status, and the rest are kind-specific:
//!
//! ```text
//! ["IPAddress", "Include", "8.8.8.8"]
//! ["IPNetwork", "Exclude", "10.0.0.0", "255.0.0.0"]
//! ["IPRange",   "Include", "1.1.1.1 to 1.1.1.8", "255.255.255.0"]
//! ```
//!
//! A group defined as traffic between two endpoints is a single record
//! instead, see [`between`].
//!
//! Outbound, a [`Membership`] is flattened into the parallel form strings
//! held by [`payload::WireFields`].

use tracing::{debug, warn};

use nfa_common::error::{IpGroupError, Result};
use nfa_common::ipgroup::{AddressKind, AddressSpec, Membership, MembershipKind, MembershipStatus};

pub mod between;
pub mod payload;

pub use payload::{IpGroupPayload, WireFields};

/// One positional record as exchanged with the service.
pub type Record = Vec<String>;

pub(crate) const BETWEEN_TOKEN: &str = "between";

/// Decodes a group's records into a fresh, unnamed [`Membership`].
pub fn decode<R, S>(records: &[R]) -> Result<Membership>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    decode_into(Membership::default(), records)
}

/// Decodes records into `membership`, which carries the group's metadata.
///
/// The first malformed record aborts the whole group; the partially filled
/// membership is dropped and never returned.
pub fn decode_into<R, S>(mut membership: Membership, records: &[R]) -> Result<Membership>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    for record in records {
        let tokens: Vec<&str> = record.as_ref().iter().map(|t| t.as_ref()).collect();

        if let Err(e) = decode_record(&mut membership, &tokens) {
            warn!(group = %membership.name, error = %e, "aborting group decode");
            return Err(e);
        }
    }

    debug!(
        group = %membership.name,
        records = records.len(),
        "decoded ip group"
    );
    Ok(membership)
}

/// Flattens a membership into the parallel form strings.
///
/// Never fails: the membership's shape was validated when it was mutated.
pub fn encode(membership: &Membership) -> WireFields {
    let fields = match membership.kind() {
        MembershipKind::Empty => WireFields {
            status: Some(String::new()),
            ..WireFields::default()
        },
        MembershipKind::List(members) => WireFields {
            status: Some(join(members.iter().map(|m| m.status.label()), ",")),
            ip_data: join(members.iter().map(|m| m.spec.api_format()), "-"),
            ip_type: join(members.iter().map(|m| lower_label(&m.spec)), ","),
            to_ip_type: None,
        },
        MembershipKind::Between(relation) => WireFields {
            status: None,
            ip_data: join([relation.a().api_format(), relation.b().api_format()], "-"),
            ip_type: join([lower_label(relation.a()), lower_label(relation.b())], ","),
            to_ip_type: Some(relation.to_ip_type()),
        },
    };

    debug!(group = %membership.name, ip_type = %fields.ip_type, "encoded ip group");
    fields
}

fn decode_record(membership: &mut Membership, tokens: &[&str]) -> Result<()> {
    if tokens.iter().any(|t| t.trim().eq_ignore_ascii_case(BETWEEN_TOKEN)) {
        let relation = between::decode_between(tokens)?;
        return membership
            .set_between(relation)
            .map_err(|e| IpGroupError::decode(tokens, e));
    }

    let (spec, status) = decode_member(tokens)?;
    membership
        .add_member(spec, status)
        .map_err(|e| IpGroupError::decode(tokens, e))
}

fn decode_member(tokens: &[&str]) -> Result<(AddressSpec, MembershipStatus)> {
    let [label, status, fields @ ..] = tokens else {
        return Err(IpGroupError::decode(tokens, "record is too short"));
    };

    let kind = parse_kind(tokens, label)?;
    let status = MembershipStatus::from_label(status)
        .ok_or_else(|| IpGroupError::decode(tokens, format!("unknown status '{status}'")))?;
    let spec = decode_spec(kind, fields).map_err(|reason| IpGroupError::decode(tokens, reason))?;

    Ok((spec, status))
}

pub(crate) fn parse_kind(tokens: &[&str], label: &str) -> Result<AddressKind> {
    AddressKind::from_label(label)
        .ok_or_else(|| IpGroupError::decode(tokens, format!("unknown address kind '{label}'")))
}

/// Builds a specification from exactly `kind.arity()` data tokens.
pub(crate) fn decode_spec(kind: AddressKind, fields: &[&str]) -> std::result::Result<AddressSpec, String> {
    if fields.len() != kind.arity() {
        return Err(format!(
            "{kind} expects {} field(s), found {}",
            kind.arity(),
            fields.len()
        ));
    }

    let spec = match (kind, fields) {
        (AddressKind::Host, [addr]) => AddressSpec::parse_host(addr),
        (AddressKind::Network, [addr, netmask]) => {
            AddressSpec::parse_network_with_mask(addr, netmask)
        }
        (AddressKind::Range, [span, netmask]) => {
            let (start, end) = split_span(span)?;
            AddressSpec::parse_range(start, end, netmask)
        }
        _ => return Err(format!("{kind} fields do not match its layout")),
    };

    spec.map_err(|e| e.to_string())
}

/// Splits the service's `"<start> to <end>"` range token.
fn split_span(span: &str) -> std::result::Result<(&str, &str), String> {
    match span.split_whitespace().collect::<Vec<&str>>()[..] {
        [start, sep, end] if sep.eq_ignore_ascii_case("to") => Ok((start, end)),
        _ => Err(format!("range '{span}' is not of the form '<start> to <end>'")),
    }
}

fn lower_label(spec: &AddressSpec) -> String {
    spec.kind_label().to_ascii_lowercase()
}

fn join<I, T>(parts: I, sep: &str) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    parts
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<String>>()
        .join(sep)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
