use nfa_common::ipgroup::{AddressKind, Membership, MembershipKind, MembershipStatus};
use nfa_core::codec::{self, IpGroupPayload, Record};

fn records(raw: &[&[&str]]) -> Vec<Record> {
    raw.iter()
        .map(|r| r.iter().map(|t| t.to_string()).collect())
        .collect()
}

/// Records reported by the service survive decode, encode and reconstruction.
#[test]
fn listing_records_survive_round_trip() {
    let listed = records(&[
        &["IPAddress", "Include", "8.8.8.8"],
        &["IPNetwork", "Exclude", "10.0.0.0", "255.0.0.0"],
        &["IPRange", "Include", "1.1.1.1 to 1.1.1.8", "255.255.255.0"],
        &["IPAddress", "Exclude", "8.8.4.4"],
    ]);

    let group: Membership = codec::decode(&listed).unwrap();
    assert_eq!(group.members().len(), 4);

    let rebuilt = codec::encode(&group).to_records().unwrap();
    assert_eq!(rebuilt, listed);
}

#[test]
fn between_record_survives_round_trip() {
    let listed = records(&[&[
        "IPRange",
        "Between",
        "IPNetwork",
        "10.0.0.1 to 10.0.0.9",
        "255.255.255.0",
        "172.16.0.0",
        "255.240.0.0",
    ]]);

    let group = codec::decode(&listed).unwrap();
    let MembershipKind::Between(relation) = group.kind() else {
        panic!("expected a between group");
    };
    assert_eq!(relation.a().kind(), AddressKind::Range);
    assert_eq!(relation.b().to_string(), "172.16.0.0/12");

    let payload = IpGroupPayload::from_membership(&group);
    assert_eq!(payload.fields.to_records().unwrap(), listed);
}

#[test]
fn lower_case_labels_are_accepted() {
    let group = codec::decode(&[["ipaddress", "include", "8.8.8.8"]]).unwrap();
    assert_eq!(group.members()[0].status, MembershipStatus::Include);
    assert_eq!(codec::encode(&group).status.as_deref(), Some("Include"));
}
