use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use tracing::info;

use crate::terminal::{format, print};
use nfa_common::config::Config;
use nfa_common::ipgroup::Membership;
use nfa_core::api::{self, IpGroupList};

pub fn decode(file: &Path, cfg: &Config) -> anyhow::Result<()> {
    let raw: String =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let value: Value = serde_json::from_str(&raw).context("parsing listIPGroup response")?;
    api::check_api_error(&value)?;

    let groups: Vec<Membership> = IpGroupList::from_value(value)?.into_memberships()?;

    if groups.is_empty() {
        print::no_results();
        return Ok(());
    }

    print_groups(&groups, cfg);
    info!("{} ip group(s) decoded from {}", groups.len(), file.display());
    Ok(())
}

fn print_groups(groups: &[Membership], cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    for (idx, group) in groups.iter().enumerate() {
        print::tree_head(idx, &group.name);
        print::as_tree_one_level(format::membership_to_details(group));
        if idx + 1 != groups.len() {
            print::print("");
        }
    }
}
