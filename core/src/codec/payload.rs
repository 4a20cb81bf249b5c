//! Outbound form payloads for `addIPGroup` / `modifyIPGroup`.

use nfa_common::error::{IpGroupError, Result};
use nfa_common::ipgroup::{AddressKind, Membership};

use super::{BETWEEN_TOKEN, Record, encode};

/// The parallel strings describing a group's addresses.
///
/// Entry `i` of `status`, `ip_data` and `ip_type` all refer to the same list
/// member. Between groups carry no status and set `to_ip_type` instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WireFields {
    /// Comma-joined `Include`/`Exclude` labels.
    pub status: Option<String>,
    /// Hyphen-joined `api_format` strings.
    pub ip_data: String,
    /// Comma-joined, lower-cased kind labels.
    pub ip_type: String,
    /// Lower-cased kind label of endpoint B.
    pub to_ip_type: Option<String>,
}

impl WireFields {
    /// Rebuilds the positional records these strings were flattened from.
    pub fn to_records(&self) -> Result<Vec<Record>> {
        let types = split_list(&self.ip_type, ',');
        let data = split_list(&self.ip_data, '-');

        if let Some(to_ip_type) = &self.to_ip_type {
            return self.between_record(to_ip_type, &types, &data).map(|r| vec![r]);
        }

        let statuses = split_list(self.status.as_deref().unwrap_or_default(), ',');
        if types.len() != data.len() || types.len() != statuses.len() {
            return Err(self.reject(format!(
                "{} type(s), {} data entry(ies) and {} status(es) do not line up",
                types.len(),
                data.len(),
                statuses.len()
            )));
        }

        types
            .iter()
            .zip(&data)
            .zip(&statuses)
            .map(|((ip_type, entry), status)| -> Result<Record> {
                let mut record: Record = vec![self.canonical_label(ip_type)?, status.to_string()];
                record.extend(entry.split(',').map(String::from));
                Ok(record)
            })
            .collect()
    }

    fn between_record(&self, to_ip_type: &str, types: &[&str], data: &[&str]) -> Result<Record> {
        let ([type_a, type_b], [data_a, data_b]) = (types, data) else {
            return Err(self.reject("a between group needs exactly two endpoints"));
        };

        let kind_b = self.kind(type_b)?;
        let declared = self.kind(to_ip_type)?;
        if declared != kind_b {
            return Err(IpGroupError::TypeMismatch {
                expected: declared.label(),
                found: kind_b.label(),
            });
        }

        let mut record: Record = vec![
            self.canonical_label(type_a)?,
            capitalize(BETWEEN_TOKEN),
            kind_b.label().to_string(),
        ];
        record.extend(data_a.split(',').map(String::from));
        record.extend(data_b.split(',').map(String::from));
        Ok(record)
    }

    fn kind(&self, ip_type: &str) -> Result<AddressKind> {
        AddressKind::from_label(ip_type)
            .ok_or_else(|| self.reject(format!("unknown IPType '{ip_type}'")))
    }

    fn canonical_label(&self, ip_type: &str) -> Result<String> {
        self.kind(ip_type).map(|kind| kind.label().to_string())
    }

    fn reject(&self, reason: impl ToString) -> IpGroupError {
        let mut record = vec![self.ip_type.as_str(), self.ip_data.as_str()];
        record.extend(self.status.as_deref());
        record.extend(self.to_ip_type.as_deref());
        IpGroupError::decode(&record, reason)
    }
}

/// Everything the service needs to create or update a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpGroupPayload {
    pub group_name: String,
    pub description: String,
    pub speed: u64,
    pub dev_list: String,
    pub fields: WireFields,
}

impl IpGroupPayload {
    pub fn from_membership(membership: &Membership) -> Self {
        Self {
            group_name: membership.name.clone(),
            description: membership.description.clone(),
            speed: membership.speed_bps,
            dev_list: membership.device_scope.to_wire(),
            fields: encode(membership),
        }
    }

    /// Form fields in the order the web UI submits them. Absent
    /// `status`/`ToIPType` values are left out.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("GroupName", self.group_name.clone()),
            ("Desc", self.description.clone()),
            ("speed", self.speed.to_string()),
            ("DevList", self.dev_list.clone()),
        ];

        if let Some(status) = &self.fields.status {
            form.push(("status", status.clone()));
        }
        form.push(("IPData", self.fields.ip_data.clone()));
        form.push(("IPType", self.fields.ip_type.clone()));
        if let Some(to_ip_type) = &self.fields.to_ip_type {
            form.push(("ToIPType", to_ip_type.clone()));
        }

        form
    }
}

fn split_list(value: &str, sep: char) -> Vec<&str> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(sep).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
