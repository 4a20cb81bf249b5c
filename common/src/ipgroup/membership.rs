//! # Group Membership
//!
//! The per-group aggregate. A group is either an ordered include/exclude list
//! or a single between relation; the shape is fixed by the first mutation.
//!
//! ```text
//!            add_member              add_member
//!   Empty ───────────────► List ◄──────────────┐
//!     │                      └─────────────────┘
//!     │ set_between
//!     └────────────► Between   (terminal)
//! ```

use std::fmt;

use tracing::trace;

use crate::error::{IpGroupError, Result};
use crate::ipgroup::address::AddressSpec;
use crate::ipgroup::between::BetweenRelation;

/// Whether a list entry adds or removes its addresses from the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipStatus {
    Include,
    Exclude,
}

impl MembershipStatus {
    pub fn label(self) -> &'static str {
        match self {
            MembershipStatus::Include => "Include",
            MembershipStatus::Exclude => "Exclude",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("include") {
            Some(MembershipStatus::Include)
        } else if label.eq_ignore_ascii_case("exclude") {
            Some(MembershipStatus::Exclude)
        } else {
            None
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub spec: AddressSpec,
    pub status: MembershipStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MembershipKind {
    #[default]
    Empty,
    List(Vec<Member>),
    Between(BetweenRelation),
}

/// Devices whose interfaces the group applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeviceScope {
    #[default]
    AllInterfaces,
    Interfaces(Vec<String>),
}

impl DeviceScope {
    const ALL: &'static str = "-1";

    /// The `DevList` form value.
    pub fn to_wire(&self) -> String {
        match self {
            DeviceScope::AllInterfaces => Self::ALL.to_string(),
            DeviceScope::Interfaces(ids) => ids.join(","),
        }
    }

    pub fn from_wire(value: &str) -> Self {
        let ids: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != Self::ALL)
            .map(String::from)
            .collect();

        if ids.is_empty() {
            DeviceScope::AllInterfaces
        } else {
            DeviceScope::Interfaces(ids)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupState {
    #[default]
    Enabled,
    Disabled,
}

impl GroupState {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("disabled") {
            GroupState::Disabled
        } else {
            GroupState::Enabled
        }
    }
}

/// One IP group as the caller sees it.
///
/// Metadata fields are public; the address definition is only reachable
/// through [`Membership::add_member`] and [`Membership::set_between`] so its
/// shape invariant cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub name: String,
    pub description: String,
    pub speed_bps: u64,
    pub device_scope: DeviceScope,
    /// Display names of the scoped devices as the service reports them
    /// (`Asso_Device`). Empty for groups built locally.
    pub device_names: String,
    /// Server-assigned identifier, `None` until the group has been created.
    pub id: Option<String>,
    pub app: String,
    pub dscp: String,
    pub state: GroupState,
    kind: MembershipKind,
}

impl Default for Membership {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            speed_bps: 0,
            device_scope: DeviceScope::default(),
            device_names: String::new(),
            id: None,
            app: String::from("All"),
            dscp: String::from("All"),
            state: GroupState::default(),
            kind: MembershipKind::Empty,
        }
    }
}

impl Membership {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_speed(mut self, speed_bps: u64) -> Self {
        self.speed_bps = speed_bps;
        self
    }

    pub fn with_device_scope(mut self, device_scope: DeviceScope) -> Self {
        self.device_scope = device_scope;
        self
    }

    pub fn kind(&self) -> &MembershipKind {
        &self.kind
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, MembershipKind::Empty)
    }

    /// List entries in insertion order; empty for between groups.
    pub fn members(&self) -> &[Member] {
        match &self.kind {
            MembershipKind::List(members) => members,
            _ => &[],
        }
    }

    pub fn between(&self) -> Option<&BetweenRelation> {
        match &self.kind {
            MembershipKind::Between(relation) => Some(relation),
            _ => None,
        }
    }

    /// Appends a list entry, turning an empty group into a list group.
    pub fn add_member(&mut self, spec: AddressSpec, status: MembershipStatus) -> Result<()> {
        match &mut self.kind {
            MembershipKind::Between(_) => {
                return Err(IpGroupError::InvalidState(
                    "membership already defined as a between relation",
                ));
            }
            MembershipKind::List(members) => members.push(Member { spec, status }),
            MembershipKind::Empty => {
                self.kind = MembershipKind::List(vec![Member { spec, status }]);
            }
        }

        trace!(group = %self.name, %spec, %status, "member appended");
        Ok(())
    }

    /// Defines the group as a between relation. Only valid on an empty group.
    pub fn set_between(&mut self, relation: BetweenRelation) -> Result<()> {
        match self.kind {
            MembershipKind::Between(_) => Err(IpGroupError::InvalidState(
                "membership already contains a between clause",
            )),
            MembershipKind::List(_) => Err(IpGroupError::InvalidState(
                "membership already defined as an include/exclude list",
            )),
            MembershipKind::Empty => {
                trace!(group = %self.name, %relation, "between relation set");
                self.kind = MembershipKind::Between(relation);
                Ok(())
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
