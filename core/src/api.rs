//! # API Shapes
//!
//! Endpoint paths and the serde view of `listIPGroup` responses.
//!
//! The service is loose with scalar types (speed and IDs arrive as either
//! strings or numbers), so those fields go through [`string_or_number`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use nfa_common::ipgroup::{DeviceScope, GroupState, Membership};

use crate::codec::{self, Record};
use crate::error::{ClientError, Result};

pub const LIST_IP_GROUP_URI: &str = "/api/json/nfaipgroup/listIPGroup";
pub const ADD_IP_GROUP_URI: &str = "/api/json/nfaipgroup/addIPGroup";
pub const MODIFY_IP_GROUP_URI: &str = "/api/json/nfaipgroup/modifyIPGroup";
pub const DELETE_IP_GROUP_URI: &str = "/api/json/nfaipgroup/deleteIPGroup";

#[derive(Debug, Clone, Deserialize)]
pub struct IpGroupList {
    #[serde(rename = "IPGroup_List", default)]
    pub groups: Vec<RawIpGroup>,
}

/// One entry of `IPGroup_List`, exactly as the service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIpGroup {
    #[serde(default = "default_all")]
    pub app: String,
    #[serde(default = "default_all")]
    pub dscp: String,
    pub base: RawGroupBase,
    #[serde(rename = "Asso_Device", default)]
    pub associated_devices: Value,
    #[serde(rename = "Asso_Dev_id", default)]
    pub associated_device_ids: Value,
    #[serde(default)]
    pub ip: Vec<Record>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGroupBase {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub speed: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "ID", default, deserialize_with = "string_or_number")]
    pub id: String,
}

impl RawIpGroup {
    /// Decodes the group's records into a membership carrying its metadata.
    pub fn into_membership(self) -> Result<Membership> {
        let speed_bps = parse_speed(&self.base.speed)?;
        let id = Some(self.base.id).filter(|id| !id.is_empty());

        let mut membership = Membership::new(self.base.name)
            .with_description(self.base.description)
            .with_speed(speed_bps)
            .with_device_scope(device_scope(&self.associated_device_ids));
        membership.device_names = device_names(&self.associated_devices);
        membership.id = id;
        membership.app = self.app;
        membership.dscp = self.dscp;
        membership.state = GroupState::from_label(&self.base.status);

        Ok(codec::decode_into(membership, &self.ip)?)
    }
}

impl IpGroupList {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decodes every group. One malformed group fails the whole listing.
    pub fn into_memberships(self) -> Result<Vec<Membership>> {
        self.groups
            .into_iter()
            .map(RawIpGroup::into_membership)
            .collect()
    }
}

/// Maps an `{"error": {"code": .., "message": ..}}` body onto [`ClientError::Api`].
pub fn check_api_error(value: &Value) -> Result<()> {
    let Some(error) = value.get("error").filter(|e| !e.is_null()) else {
        return Ok(());
    };

    let field = |key: &str| match error.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Err(ClientError::Api {
        code: field("code"),
        message: field("message"),
    })
}

/// Flattens `Asso_Device`, which arrives as a string or a list of names.
fn device_names(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect::<Vec<String>>()
            .join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Interprets `Asso_Dev_id`: `-1` (number or string) means every interface.
fn device_scope(value: &Value) -> DeviceScope {
    match value {
        Value::String(s) => DeviceScope::from_wire(s),
        Value::Number(n) => DeviceScope::from_wire(&n.to_string()),
        Value::Array(items) => {
            let ids: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            DeviceScope::from_wire(&ids.join(","))
        }
        _ => DeviceScope::AllInterfaces,
    }
}

fn parse_speed(speed: &str) -> Result<u64> {
    let speed = speed.trim();
    if speed.is_empty() {
        return Ok(0);
    }

    if let Ok(bps) = speed.parse::<u64>() {
        return Ok(bps);
    }

    match speed.parse::<f64>() {
        Ok(bps) if bps.is_finite() && bps >= 0.0 && bps < u64::MAX as f64 => Ok(bps as u64),
        _ => Err(ClientError::Unexpected(format!(
            "unparseable group speed '{speed}'"
        ))),
    }
}

fn default_all() -> String {
    String::from("All")
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or a number, found {other}"
        ))),
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
