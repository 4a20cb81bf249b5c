use crate::terminal::colors;
use colored::*;
use nfa_common::ipgroup::{
    AddressSpec, DeviceScope, GroupState, Membership, MembershipKind, MembershipStatus,
};

pub type Detail = (String, ColoredString);

pub fn spec_to_colored(spec: &AddressSpec) -> ColoredString {
    format!("{} ({})", spec, spec.kind_label()).color(colors::IPV4_ADDR)
}

pub fn status_to_key(status: MembershipStatus) -> String {
    status.label().to_string()
}

pub fn format_speed(speed_bps: u64) -> ColoredString {
    const UNITS: [&str; 4] = ["bps", "Kbps", "Mbps", "Gbps"];

    let mut value: f64 = speed_bps as f64;
    let mut unit: usize = 0;
    while value >= 1000.0 && unit + 1 < UNITS.len() {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", speed_bps, UNITS[0]).normal()
    } else {
        format!("{:.2} {}", value, UNITS[unit]).normal()
    }
}

fn scope_to_colored(scope: &DeviceScope) -> ColoredString {
    match scope {
        DeviceScope::AllInterfaces => "all interfaces".dimmed(),
        DeviceScope::Interfaces(ids) => ids.join(", ").normal(),
    }
}

/// Key/value rows describing a group, metadata first.
pub fn membership_to_details(group: &Membership) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    if let Some(id) = &group.id {
        details.push((String::from("ID"), id.color(colors::ACCENT)));
    }
    if !group.description.is_empty() {
        details.push((String::from("Desc"), group.description.normal()));
    }
    if group.state == GroupState::Disabled {
        details.push((String::from("State"), "disabled".yellow()));
    }
    details.push((String::from("Speed"), format_speed(group.speed_bps)));
    let devices = if group.device_names.is_empty() {
        scope_to_colored(&group.device_scope)
    } else {
        group.device_names.normal()
    };
    details.push((String::from("Devices"), devices));

    match group.kind() {
        MembershipKind::Empty => details.push((String::from("Addrs"), "none".dimmed())),
        MembershipKind::List(members) => {
            for member in members {
                let color = match member.status {
                    MembershipStatus::Include => colors::INCLUDE,
                    MembershipStatus::Exclude => colors::EXCLUDE,
                };
                let key: String = status_to_key(member.status);
                let value = format!("{} {}", "●".color(color), spec_to_colored(&member.spec));
                details.push((key, value.normal()));
            }
        }
        MembershipKind::Between(relation) => {
            let value = format!(
                "{} {} {}",
                spec_to_colored(relation.a()),
                "<->".color(colors::SEPARATOR),
                spec_to_colored(relation.b())
            );
            details.push((String::from("Between"), value.normal()));
        }
    }

    details
}
