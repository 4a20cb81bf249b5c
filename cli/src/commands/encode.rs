use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::terminal::{format, print};
use nfa_common::config::Config;
use nfa_common::ipgroup::{AddressSpec, BetweenRelation, DeviceScope, Membership, MembershipStatus};
use nfa_core::codec::IpGroupPayload;

#[derive(Args)]
pub struct EncodeArgs {
    /// Group name
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Speed in bits per second
    #[arg(long, default_value_t = 0)]
    pub speed: u64,

    /// Address to include (host, CIDR or start-end/netmask)
    #[arg(short, long)]
    pub include: Vec<AddressSpec>,

    /// Address to exclude (host, CIDR or start-end/netmask)
    #[arg(short, long)]
    pub exclude: Vec<AddressSpec>,

    /// Define the group as traffic between two endpoints
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    pub between: Option<Vec<AddressSpec>>,

    /// Comma-separated device IDs, all interfaces when omitted
    #[arg(long, value_delimiter = ',')]
    pub devices: Vec<String>,
}

pub fn encode(args: EncodeArgs, cfg: &Config) -> anyhow::Result<()> {
    let group: Membership = build_group(args)?;
    let payload: IpGroupPayload = IpGroupPayload::from_membership(&group);

    if cfg.quiet < 2 {
        print::tree_head(0, &group.name);
        print::as_tree_one_level(format::membership_to_details(&group));
        print::print("");
    }

    print::header("form payload", cfg.quiet);
    let form = payload.to_form();
    let width: usize = form.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in &form {
        print::aligned_line(key, value, width);
    }

    print::header("wire records", cfg.quiet);
    for record in payload.fields.to_records()? {
        print::print_status(serde_json::to_string(&record)?);
    }

    info!("encoded {} form field(s)", form.len());
    Ok(())
}

fn build_group(args: EncodeArgs) -> anyhow::Result<Membership> {
    let scope = if args.devices.is_empty() {
        DeviceScope::AllInterfaces
    } else {
        DeviceScope::Interfaces(args.devices)
    };

    let mut group = Membership::new(args.name)
        .with_description(args.description)
        .with_speed(args.speed)
        .with_device_scope(scope);

    for spec in args.include {
        group.add_member(spec, MembershipStatus::Include)?;
    }
    for spec in args.exclude {
        group.add_member(spec, MembershipStatus::Exclude)?;
    }

    if let Some(endpoints) = args.between {
        let [a, b] = endpoints[..] else {
            anyhow::bail!("--between takes exactly two address specifications");
        };
        group
            .set_between(BetweenRelation::new(a, b))
            .context("--between cannot be combined with --include/--exclude")?;
    }

    if group.is_empty() {
        anyhow::bail!("nothing to encode: pass --include, --exclude or --between");
    }
    Ok(group)
}
