use super::*;
use serde_json::json;

#[test]
fn urls_are_normalised_with_trailing_slash() {
    let endpoint = ResourceEndpoint::new("/company-setup/branches/");
    assert_eq!(endpoint.collection, "company-setup/branches");
    assert_eq!(endpoint.collection_url(), "/company-setup/branches/");
    assert_eq!(endpoint.item_url(&RecordId::Int(7)), "/company-setup/branches/7/");
}

#[test]
fn item_url_with_text_id() {
    let endpoint = ResourceEndpoint::new("company-Setup/designations");
    assert_eq!(endpoint.item_url(&RecordId::from("d-9")), "/company-Setup/designations/d-9/");
}

#[test]
fn empty_collection_is_root() {
    assert_eq!(ResourceEndpoint::new("/").collection_url(), "/");
}

#[test]
fn to_record_copies_custom_primary_key() {
    let endpoint = ResourceEndpoint::new("policies").with_id_field("policy_id");
    let record = endpoint.to_record(json!({"policy_id": 12, "title": "Leave"})).unwrap();
    assert_eq!(record.id(), RecordId::Int(12));
    assert_eq!(record.display("title"), "Leave");
}

#[test]
fn to_record_keeps_existing_id() {
    let endpoint = ResourceEndpoint::new("policies").with_id_field("policy_id");
    let record = endpoint.to_record(json!({"id": 1, "policy_id": 12})).unwrap();
    assert_eq!(record.id(), RecordId::Int(1));
}

#[test]
fn to_records_accepts_array_and_results_envelope() {
    let endpoint = ResourceEndpoint::new("branches");
    let bare = endpoint.to_records(json!([{"id": 1}, {"id": 2}])).unwrap();
    assert_eq!(bare.len(), 2);
    let paged = endpoint.to_records(json!({"count": 1, "results": [{"id": 3}]})).unwrap();
    assert_eq!(paged[0].id(), RecordId::Int(3));
}

#[test]
fn to_records_skips_rows_without_id() {
    let endpoint = ResourceEndpoint::new("branches");
    let records = endpoint.to_records(json!([{"id": 1}, {"name": "orphan"}, "junk"])).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn to_records_rejects_scalars_and_bare_objects() {
    let endpoint = ResourceEndpoint::new("branches");
    assert_eq!(endpoint.to_records(json!(5)), Err(RecordError::NotAList("number")));
    assert_eq!(endpoint.to_records(json!({"detail": "x"})), Err(RecordError::NotAList("object")));
}

#[test]
fn remote_options_builds_source_endpoint() {
    let remote = RemoteOptions::new("department", "/company-Setup-fkf/parent-departments/", "id", "name");
    assert_eq!(remote.source.collection_url(), "/company-Setup-fkf/parent-departments/");
}
