use super::*;
use crate::field::{FieldDescriptor, SelectOption};
use crate::record::FileRef;
use serde_json::json;

fn claim_schema() -> FieldSchema {
    FieldSchema::new(vec![
        FieldDescriptor::date("ClaimDate", "Claim Date"),
        FieldDescriptor::text("Employee", "Employee"),
        FieldDescriptor::number("Amount", "Amount"),
        FieldDescriptor::select("Status", "Status", SelectOption::same(&["Pending", "Approved", "Rejected"])),
        FieldDescriptor::rich_text("Description", "Description"),
        FieldDescriptor::file("File", "File"),
    ])
    .unwrap()
}

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

// =============================================================
// Seeding
// =============================================================

#[test]
fn seed_uses_empty_string_and_null_for_missing_values() {
    let draft = FormDraft::seed(&claim_schema(), &Map::new());
    assert_eq!(
        Value::Object(draft.to_payload()),
        json!({
            "ClaimDate": "",
            "Employee": "",
            "Amount": "",
            "Status": "",
            "Description": "",
            "File": null
        })
    );
}

#[test]
fn seed_takes_initial_values_and_ignores_extra_keys() {
    let initial = obj(json!({"id": 4, "Employee": "Dana", "Amount": 120, "Unrelated": true}));
    let draft = FormDraft::seed(&claim_schema(), &initial);
    assert_eq!(draft.get("Employee"), Some(&FieldValue::text("Dana")));
    assert_eq!(draft.get("Amount"), Some(&FieldValue::Number(120.0)));
    assert_eq!(draft.get("ClaimDate"), Some(&FieldValue::text("")));
    assert!(draft.get("Unrelated").is_none());
    assert!(draft.get("id").is_none());
}

#[test]
fn seed_treats_null_initial_as_absent() {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("Status", "Status").with_initial(FieldValue::text("Pending")),
    ])
    .unwrap();
    let draft = FormDraft::seed(&schema, &obj(json!({"Status": null})));
    assert_eq!(draft.get("Status"), Some(&FieldValue::text("Pending")));
}

#[test]
fn submit_without_changes_round_trips_seeded_draft() {
    let initial = obj(json!({
        "ClaimDate": "2025-07-28",
        "Employee": "Dana",
        "Amount": 120,
        "Status": "Approved",
        "Description": "**Taxi** to client site",
        "File": {"name": "receipt.pdf", "size": 2048, "mime": "application/pdf"}
    }));
    let form = FormState::new(claim_schema(), &initial);
    assert_eq!(form.submit(), Some(initial));
}

// =============================================================
// Field changes
// =============================================================

#[test]
fn set_updates_value_and_rejects_unknown_field() {
    let mut form = FormState::new(claim_schema(), &Map::new());
    form.set("Employee", FieldValue::text("Lee")).unwrap();
    assert_eq!(form.value("Employee"), FieldValue::text("Lee"));
    assert_eq!(
        form.set("Nope", FieldValue::text("x")),
        Err(DraftError::UnknownField("Nope".to_owned()))
    );
}

#[test]
fn placeholder_can_never_be_submitted_for_select() {
    let mut form = FormState::new(claim_schema(), &Map::new());
    form.set("Status", FieldValue::text("Approved")).unwrap();
    let err = form.set("Status", FieldValue::text("Select an option")).unwrap_err();
    assert!(matches!(err, DraftError::Rejected { .. }));
    assert_eq!(form.submit().unwrap()["Status"], json!("Approved"));
}

#[test]
fn file_field_holds_reference_and_can_be_cleared() {
    let mut form = FormState::new(claim_schema(), &Map::new());
    let file = FileRef { name: "scan.png".to_owned(), size: 10, mime: "image/png".to_owned() };
    form.set("File", FieldValue::File(file)).unwrap();
    assert_eq!(form.submit().unwrap()["File"]["name"], json!("scan.png"));
    form.set("File", FieldValue::Null).unwrap();
    assert_eq!(form.submit().unwrap()["File"], Value::Null);
}

#[test]
fn submit_is_blocked_while_loading() {
    let mut form = FormState::new(claim_schema(), &Map::new());
    form.loading = true;
    assert_eq!(form.submit(), None);
    form.loading = false;
    assert!(form.submit().is_some());
}

#[test]
fn reseed_replaces_draft() {
    let mut form = FormState::new(claim_schema(), &Map::new());
    form.set("Employee", FieldValue::text("Lee")).unwrap();
    form.reseed(&obj(json!({"Employee": "Sam"})));
    assert_eq!(form.value("Employee"), FieldValue::text("Sam"));
}

#[test]
fn missing_required_skips_optional_file() {
    let mut form = FormState::new(claim_schema(), &Map::new());
    assert_eq!(form.missing_required(), vec!["ClaimDate", "Employee", "Amount", "Status", "Description"]);
    form.set("Employee", FieldValue::text("Lee")).unwrap();
    assert!(!form.missing_required().contains(&"Employee"));
    assert!(!form.missing_required().contains(&"File"));
}

// =============================================================
// Numeric coercion
// =============================================================

#[test]
fn coerce_numbers_converts_only_number_fields() {
    let payload = obj(json!({"Amount": " 42.50 ", "Employee": "7"}));
    let coerced = coerce_numbers(&claim_schema(), payload);
    assert_eq!(coerced["Amount"], json!(42.5));
    assert_eq!(coerced["Employee"], json!("7"));
}

#[test]
fn coerce_numbers_empty_becomes_null_and_garbage_is_kept() {
    let coerced = coerce_numbers(&claim_schema(), obj(json!({"Amount": ""})));
    assert_eq!(coerced["Amount"], Value::Null);
    let coerced = coerce_numbers(&claim_schema(), obj(json!({"Amount": "12abc"})));
    assert_eq!(coerced["Amount"], json!("12abc"));
    let coerced = coerce_numbers(&claim_schema(), obj(json!({"Amount": "3"})));
    assert_eq!(coerced["Amount"], json!(3));
}

#[test]
fn submit_without_changes_keeps_seeded_json_types() {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("active", "Active"),
        FieldDescriptor::text("tags", "Tags"),
    ])
    .unwrap();
    let form = FormState::new(schema, &obj(json!({"active": true, "tags": ["a", "b"]})));
    let payload = form.submit().unwrap();
    assert_eq!(payload["active"], json!(true));
    assert_eq!(payload["tags"], json!(["a", "b"]));
}

#[test]
fn set_schema_keeps_typed_values() {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("name", "Name"),
        FieldDescriptor::select_remote("department", "Department"),
    ])
    .unwrap();
    let mut form = FormState::new(schema.clone(), &Map::new());
    form.set("name", FieldValue::text("Analyst")).unwrap();

    let loaded = schema.with_options("department", SelectOption::same(&["HR", "Finance"])).unwrap();
    form.set_schema(loaded);
    assert_eq!(form.value("name"), FieldValue::text("Analyst"));
    form.set("department", FieldValue::text("Finance")).unwrap();
    assert_eq!(form.submit().unwrap()["department"], json!("Finance"));
}
