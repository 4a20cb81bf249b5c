use nfa_common::IpGroupError;
use nfa_common::ipgroup::{BetweenRelation, DeviceScope, Membership, MembershipStatus};
use nfa_core::api::{ADD_IP_GROUP_URI, DELETE_IP_GROUP_URI, LIST_IP_GROUP_URI, MODIFY_IP_GROUP_URI};
use nfa_core::{ClientError, ClientOptions, IpGroupClient};
use serde_json::{Value, json};

use crate::utils::ScriptedTransport;

const API_KEY: &str = "d8a5c1f0e3";

fn client(transport: &ScriptedTransport) -> IpGroupClient {
    IpGroupClient::new(
        Box::new(transport.clone()),
        ClientOptions {
            api_key: API_KEY.to_string(),
        },
    )
}

fn office() -> Membership {
    let mut group = Membership::new("Unit Testing Group")
        .with_description("Unit Testing Description")
        .with_speed(5_000_000)
        .with_device_scope(DeviceScope::Interfaces(vec!["2500033".into()]));
    group
        .add_member("8.8.8.8".parse().unwrap(), MembershipStatus::Include)
        .unwrap();
    group
        .add_member("10.0.0.0/8".parse().unwrap(), MembershipStatus::Exclude)
        .unwrap();
    group
}

#[tokio::test]
async fn list_decodes_every_group() {
    let transport = ScriptedTransport::default().reply(json!({
        "IPGroup_List": [{
            "app": "All",
            "dscp": "All",
            "base": { "Name": "office", "desc": "", "speed": "0", "status": "Enabled", "ID": "2500033" },
            "Asso_Dev_id": "-1",
            "ip": [
                ["IPNetwork", "Include", "192.168.0.0", "255.255.0.0"],
                ["IPAddress", "Exclude", "192.168.1.1"]
            ]
        }]
    }));

    let groups = client(&transport).list_ip_groups().await.unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members()[0].spec.to_string(), "192.168.0.0/16");
    assert_eq!(groups[0].members()[1].status, MembershipStatus::Exclude);

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert_eq!(calls[0].path, LIST_IP_GROUP_URI);
    assert_eq!(calls[0].field("apiKey"), Some(API_KEY));
}

#[tokio::test]
async fn add_posts_encoded_form() {
    let transport = ScriptedTransport::default().reply(json!({ "message": "IPGroup added successfully" }));

    let response = client(&transport).add_ip_group(&office()).await.unwrap();
    assert_eq!(response["message"], "IPGroup added successfully");

    let call = &transport.calls()[0];
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, ADD_IP_GROUP_URI);
    assert_eq!(call.field("GroupName"), Some("Unit Testing Group"));
    assert_eq!(call.field("speed"), Some("5000000"));
    assert_eq!(call.field("DevList"), Some("2500033"));
    assert_eq!(call.field("status"), Some("Include,Exclude"));
    assert_eq!(call.field("IPData"), Some("8.8.8.8-10.0.0.0,255.0.0.0"));
    assert_eq!(call.field("IPType"), Some("ipaddress,ipnetwork"));
    assert_eq!(call.field("ToIPType"), None);
    assert_eq!(call.fields.last().map(|(k, _)| *k), Some("apiKey"));
}

#[tokio::test]
async fn modify_between_group_omits_status() {
    let transport = ScriptedTransport::default().reply(json!({ "message": "IPGroup modified successfully" }));

    let mut group = Membership::new("uplink");
    group
        .set_between(BetweenRelation::new(
            "5.6.7.8".parse().unwrap(),
            "50.50.20.0/21".parse().unwrap(),
        ))
        .unwrap();

    client(&transport).modify_ip_group(&group).await.unwrap();

    let call = &transport.calls()[0];
    assert_eq!(call.path, MODIFY_IP_GROUP_URI);
    assert_eq!(call.field("status"), None);
    assert_eq!(call.field("IPType"), Some("ipaddress,ipnetwork"));
    assert_eq!(call.field("ToIPType"), Some("ipnetwork"));
    assert_eq!(call.field("DevList"), Some("-1"));
}

#[tokio::test]
async fn empty_group_is_never_sent() {
    let transport = ScriptedTransport::default();

    let err = client(&transport)
        .add_ip_group(&Membership::new("empty"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::IpGroup(IpGroupError::InvalidState(_))));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn api_error_body_is_surfaced() {
    let transport = ScriptedTransport::default().reply(json!({
        "error": { "code": "5000", "message": "IP Group name already exists" }
    }));

    let err = client(&transport).add_ip_group(&office()).await.unwrap_err();
    match err {
        ClientError::Api { code, message } => {
            assert_eq!(code, "5000");
            assert_eq!(message, "IP Group name already exists");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_is_wrapped() {
    let transport = ScriptedTransport::default().fail("connection refused");

    let err = client(&transport).list_ip_groups().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn delete_accepts_text_response() {
    let transport = ScriptedTransport::default().reply(Value::String("Deleted Successfully".into()));

    let response = client(&transport).delete_ip_group("office").await.unwrap();
    assert_eq!(response, Value::String("Deleted Successfully".into()));

    let call = &transport.calls()[0];
    assert_eq!(call.path, DELETE_IP_GROUP_URI);
    assert_eq!(
        call.fields,
        vec![("GroupName", "office".to_string()), ("apiKey", API_KEY.to_string())]
    );
}

#[tokio::test]
async fn malformed_listing_fails_whole_call() {
    let transport = ScriptedTransport::default().reply(json!({
        "IPGroup_List": [{
            "base": { "Name": "broken" },
            "ip": [["IPNetwork", "Include", "10.0.0.0"]]
        }]
    }));

    let err = client(&transport).list_ip_groups().await.unwrap_err();
    assert!(matches!(err, ClientError::IpGroup(IpGroupError::Decode { .. })));
}
