//! # IP Group Client
//!
//! Implements the IP group use cases on top of a [`Transport`]:
//! 1. **List**: fetch `listIPGroup` and decode every group.
//! 2. **Add / Modify**: encode a [`Membership`] into the form payload and POST it.
//! 3. **Delete**: POST the group name.

use serde_json::Value;
use tracing::{debug, info};

use nfa_common::IpGroupError;
use nfa_common::ipgroup::Membership;

use crate::api::{self, IpGroupList};
use crate::codec::IpGroupPayload;
use crate::error::Result;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Appended to every request as `apiKey`.
    pub api_key: String,
}

pub struct IpGroupClient {
    transport: Box<dyn Transport>,
    options: ClientOptions,
}

impl IpGroupClient {
    pub fn new(transport: Box<dyn Transport>, options: ClientOptions) -> Self {
        Self { transport, options }
    }

    /// Fetches and decodes every IP group known to the service.
    pub async fn list_ip_groups(&self) -> Result<Vec<Membership>> {
        let query = self.authorized(Vec::new());
        let response = self.transport.get(api::LIST_IP_GROUP_URI, &query).await?;
        api::check_api_error(&response)?;

        let groups = IpGroupList::from_value(response)?.into_memberships()?;
        info!(count = groups.len(), "listed ip groups");
        Ok(groups)
    }

    pub async fn add_ip_group(&self, group: &Membership) -> Result<Value> {
        info!(group = %group.name, "adding ip group");
        self.submit(api::ADD_IP_GROUP_URI, group).await
    }

    /// Replaces the server-side definition of the group with the same name.
    pub async fn modify_ip_group(&self, group: &Membership) -> Result<Value> {
        info!(group = %group.name, "modifying ip group");
        self.submit(api::MODIFY_IP_GROUP_URI, group).await
    }

    pub async fn delete_ip_group(&self, name: &str) -> Result<Value> {
        info!(group = %name, "deleting ip group");
        let form = self.authorized(vec![("GroupName", name.to_string())]);
        self.post_checked(api::DELETE_IP_GROUP_URI, &form).await
    }

    async fn submit(&self, path: &str, group: &Membership) -> Result<Value> {
        if group.is_empty() {
            return Err(IpGroupError::InvalidState("ip group defines no addresses").into());
        }

        let payload = IpGroupPayload::from_membership(group);
        debug!(?payload, "submitting ip group");
        let form = self.authorized(payload.to_form());
        self.post_checked(path, &form).await
    }

    async fn post_checked(&self, path: &str, form: &[(&'static str, String)]) -> Result<Value> {
        let response = self.transport.post(path, form).await?;
        api::check_api_error(&response)?;
        Ok(response)
    }

    fn authorized(&self, mut fields: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        fields.push(("apiKey", self.options.api_key.clone()));
        fields
    }
}
