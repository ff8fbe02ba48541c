use super::*;
use crate::field::FieldDescriptor;
use crate::store::{MemoryStore, RecordStore, execute};
use crate::table::ColumnDescriptor;
use serde_json::json;

fn name_schema() -> FieldSchema {
    FieldSchema::new(vec![FieldDescriptor::text("name", "Name")]).unwrap()
}

fn rows(value: Value) -> Vec<Record> {
    value.as_array().unwrap().iter().cloned().map(|v| Record::from_json(v).unwrap()).collect()
}

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn local(fixtures: Value) -> ResourceCoordinator {
    let spec = ResourceSpec::new("things", "Thing", name_schema(), vec![ColumnDescriptor::new("name", "Name")])
        .with_fixtures(rows(fixtures));
    ResourceCoordinator::new(spec)
}

fn remote(fixtures: Value) -> ResourceCoordinator {
    let spec = ResourceSpec::new("things", "Thing", name_schema(), vec![ColumnDescriptor::new("name", "Name")])
        .with_endpoint(ResourceEndpoint::new("things"))
        .with_fixtures(rows(fixtures));
    let mut coordinator = ResourceCoordinator::new(spec);
    let snapshot = coordinator.records().to_vec();
    coordinator.replace_all(snapshot);
    coordinator
}

fn as_json(coordinator: &ResourceCoordinator) -> Value {
    Value::Array(coordinator.records().iter().cloned().map(Record::into_json).collect())
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn add_appends_with_next_id() {
    let mut c = local(json!([{"id": 1, "name": "A"}]));
    c.open_add().unwrap();
    let mutation = c.submit(obj(json!({"name": "B"}))).unwrap();
    assert!(mutation.settled);
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]));
    assert_eq!(c.phase(), &Phase::Idle);
}

#[test]
fn edit_merges_in_place_preserving_order() {
    let mut c = local(json!([{"id": 1, "name": "A"}]));
    c.open_edit(&RecordId::Int(1)).unwrap();
    assert_eq!(c.draft_initial(), obj(json!({"id": 1, "name": "A"})));
    c.submit(obj(json!({"name": "Z"}))).unwrap();
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "Z"}]));
}

#[test]
fn delete_removes_row() {
    let mut c = local(json!([{"id": 1}, {"id": 2}]));
    let mutation = c.delete(&RecordId::Int(1)).unwrap();
    assert_eq!(mutation.request, StoreRequest::Delete { id: RecordId::Int(1) });
    assert_eq!(as_json(&c), json!([{"id": 2}]));
}

#[test]
fn delete_unknown_id_is_noop() {
    let mut c = local(json!([{"id": 1}, {"id": 2}]));
    assert!(c.delete(&RecordId::Int(9)).is_none());
    assert_eq!(as_json(&c), json!([{"id": 1}, {"id": 2}]));
}

#[test]
fn add_after_gap_uses_max_plus_one() {
    let mut c = local(json!([{"id": 1}, {"id": 2}, {"id": 3}]));
    c.delete(&RecordId::Int(2));
    c.open_add().unwrap();
    c.submit(obj(json!({"name": "New"}))).unwrap();
    let ids: Vec<_> = c.records().iter().map(Record::id).collect();
    assert_eq!(ids, vec![RecordId::Int(1), RecordId::Int(3), RecordId::Int(4)]);
}

#[test]
fn next_local_id_ignores_text_ids() {
    assert_eq!(next_local_id(&[]), RecordId::Int(1));
    let records = rows(json!([{"id": "abc"}, {"id": 7}]));
    assert_eq!(next_local_id(&records), RecordId::Int(8));
}

// =============================================================
// Phases
// =============================================================

#[test]
fn cancel_returns_to_idle_without_changes() {
    let mut c = local(json!([{"id": 1, "name": "A"}]));
    c.open_edit(&RecordId::Int(1)).unwrap();
    assert!(c.modal_open());
    assert_eq!(c.modal_title(), "Edit Thing");
    c.cancel().unwrap();
    assert_eq!(c.phase(), &Phase::Idle);
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "A"}]));
}

#[test]
fn open_edit_unknown_id_fails() {
    let mut c = local(json!([]));
    assert_eq!(c.open_edit(&RecordId::Int(3)), Err(CoordinatorError::UnknownRecord(RecordId::Int(3))));
    assert_eq!(c.phase(), &Phase::Idle);
}

#[test]
fn submit_without_open_form_fails() {
    let mut c = local(json!([]));
    assert_eq!(c.submit(Map::new()), Err(CoordinatorError::NotDrafting));
}

#[test]
fn submit_coerces_number_fields() {
    let schema = FieldSchema::new(vec![FieldDescriptor::number("amount", "Amount")]).unwrap();
    let mut c = ResourceCoordinator::new(ResourceSpec::new("claims", "Claim", schema, Vec::new()));
    c.open_add().unwrap();
    let mutation = c.submit(obj(json!({"amount": "12.5"}))).unwrap();
    assert_eq!(mutation.request, StoreRequest::Create { payload: obj(json!({"amount": 12.5})) });
    assert_eq!(c.records()[0].get("amount"), Some(&json!(12.5)));
}

#[test]
fn remote_resource_starts_stale_until_snapshot() {
    let spec = ResourceSpec::new("things", "Thing", name_schema(), Vec::new()).with_endpoint(ResourceEndpoint::new("t"));
    let mut c = ResourceCoordinator::new(spec);
    assert!(c.is_stale());
    c.replace_all(rows(json!([{"id": 1}])));
    assert!(!c.is_stale());
    assert!(!local(json!([])).is_stale());
}

#[test]
fn submitting_blocks_other_transitions() {
    let mut c = remote(json!([{"id": 1, "name": "A"}]));
    c.open_add().unwrap();
    let mutation = c.submit(obj(json!({"name": "B"}))).unwrap();
    assert!(!mutation.settled);
    assert_eq!(c.phase(), &Phase::Submitting { op: mutation.op_id });
    assert_eq!(c.modal_title(), "Add Thing");
    assert_eq!(c.cancel(), Err(CoordinatorError::Busy));
    assert_eq!(c.open_add(), Err(CoordinatorError::Busy));
    assert_eq!(c.submit(Map::new()), Err(CoordinatorError::Busy));
}

// =============================================================
// Outcomes
// =============================================================

#[test]
fn confirmed_create_adopts_server_id() {
    let mut c = remote(json!([{"id": 1, "name": "A"}]));
    c.open_add().unwrap();
    let mutation = c.submit(obj(json!({"name": "B"}))).unwrap();
    assert_eq!(c.records()[1].id(), RecordId::Int(2));

    let server = Record::from_json(json!({"id": 41, "name": "B", "created": "2025-07-28"})).unwrap();
    let settlement = c.resolve(mutation.op_id, Outcome::Confirmed(Some(server))).unwrap();
    assert_eq!(settlement.kind, OpKind::Create);
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "A"}, {"id": 41, "name": "B", "created": "2025-07-28"}]));
    assert_eq!(c.phase(), &Phase::Idle);
    assert_eq!(c.pending_count(), 0);
}

#[test]
fn confirmed_without_body_keeps_optimistic_row() {
    let mut c = remote(json!([{"id": 1, "name": "A"}]));
    c.open_edit(&RecordId::Int(1)).unwrap();
    let mutation = c.submit(obj(json!({"name": "Z"}))).unwrap();
    c.resolve(mutation.op_id, Outcome::Confirmed(None));
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "Z"}]));
    assert_eq!(c.phase(), &Phase::Idle);
    assert!(!c.is_stale());
}

#[test]
fn create_confirmed_without_body_marks_stale() {
    let mut c = remote(json!([{"id": 1, "name": "A"}]));
    c.open_add().unwrap();
    let mutation = c.submit(obj(json!({"name": "B"}))).unwrap();
    c.resolve(mutation.op_id, Outcome::Confirmed(None));
    assert!(c.is_stale());
    assert_eq!(c.phase(), &Phase::Idle);
    assert_eq!(c.records().len(), 2);
}

#[test]
fn rejected_create_removes_row_and_keeps_form_open() {
    let mut c = remote(json!([{"id": 1, "name": "A"}]));
    c.open_add().unwrap();
    let mutation = c.submit(obj(json!({"name": "B"}))).unwrap();
    let settlement = c.resolve(mutation.op_id, Outcome::Rejected("name taken".into())).unwrap();
    assert_eq!(settlement.outcome, Outcome::Rejected("name taken".into()));
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "A"}]));
    assert_eq!(c.phase(), &Phase::AddDraft);
}

#[test]
fn rejected_update_restores_snapshot() {
    let mut c = remote(json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]));
    c.open_edit(&RecordId::Int(2)).unwrap();
    let mutation = c.submit(obj(json!({"name": "Q", "extra": true}))).unwrap();
    c.resolve(mutation.op_id, Outcome::Rejected("forbidden".into()));
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]));
    assert_eq!(c.phase(), &Phase::EditDraft(RecordId::Int(2)));
}

#[test]
fn rejected_delete_reinserts_at_original_index() {
    let mut c = remote(json!([{"id": 1}, {"id": 2}, {"id": 3}]));
    let mutation = c.delete(&RecordId::Int(2)).unwrap();
    assert_eq!(as_json(&c), json!([{"id": 1}, {"id": 3}]));
    let settlement = c.resolve(mutation.op_id, Outcome::Rejected("in use".into())).unwrap();
    assert_eq!(settlement.kind, OpKind::Delete);
    assert_eq!(as_json(&c), json!([{"id": 1}, {"id": 2}, {"id": 3}]));
}

#[test]
fn rejected_delete_after_other_deletes_clamps_index() {
    let mut c = remote(json!([{"id": 1}, {"id": 2}, {"id": 3}]));
    let last = c.delete(&RecordId::Int(3)).unwrap();
    c.delete(&RecordId::Int(1)).unwrap();
    c.delete(&RecordId::Int(2)).unwrap();
    c.resolve(last.op_id, Outcome::Rejected("nope".into()));
    assert_eq!(as_json(&c), json!([{"id": 3}]));
}

#[test]
fn unknown_outcome_keeps_change_and_marks_stale() {
    let mut c = remote(json!([{"id": 1, "name": "A"}]));
    c.open_add().unwrap();
    let mutation = c.submit(obj(json!({"name": "B"}))).unwrap();
    c.resolve(mutation.op_id, Outcome::Unknown);
    assert_eq!(c.records().len(), 2);
    assert!(c.is_stale());
    assert_eq!(c.phase(), &Phase::Idle);

    c.replace_all(rows(json!([{"id": 1, "name": "A"}, {"id": 9, "name": "B"}])));
    assert!(!c.is_stale());
}

#[test]
fn resolving_unknown_or_settled_op_is_ignored() {
    let mut c = remote(json!([{"id": 1}]));
    assert!(c.resolve(Uuid::new_v4(), Outcome::Rejected("late".into())).is_none());
    let mutation = c.delete(&RecordId::Int(1)).unwrap();
    assert!(c.resolve(mutation.op_id, Outcome::Confirmed(None)).is_some());
    assert!(c.resolve(mutation.op_id, Outcome::Rejected("again".into())).is_none());
    assert!(c.records().is_empty());
}

#[test]
fn replace_all_drops_pending_ops_for_vanished_rows() {
    let mut c = remote(json!([{"id": 1, "name": "A"}]));
    c.open_add().unwrap();
    let create = c.submit(obj(json!({"name": "B"}))).unwrap();
    c.replace_all(rows(json!([{"id": 1, "name": "A"}])));
    assert_eq!(c.pending_count(), 0);
    assert_eq!(c.phase(), &Phase::Idle);
    assert!(c.resolve(create.op_id, Outcome::Rejected("late".into())).is_none());
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "A"}]));
}

#[test]
fn outcome_from_store_result() {
    let ok: Result<Option<Record>, StoreError> = Ok(None);
    assert_eq!(Outcome::from(ok), Outcome::Confirmed(None));
    let timeout: Result<Option<Record>, StoreError> = Err(StoreError::Timeout);
    assert_eq!(Outcome::from(timeout), Outcome::Unknown);
    let denied: Result<Option<Record>, StoreError> = Err(StoreError::Unauthorized);
    assert!(matches!(Outcome::from(denied), Outcome::Rejected(_)));
}

// =============================================================
// End to end against a store
// =============================================================

#[tokio::test]
async fn round_trip_through_memory_store() {
    let store = MemoryStore::new(rows(json!([{"id": 1, "name": "A"}, {"id": 5, "name": "E"}])));
    let mut c = remote(json!([]));
    c.replace_all(store.list().await.unwrap());

    c.open_add().unwrap();
    let mutation = c.submit(obj(json!({"name": "F"}))).unwrap();
    let outcome = Outcome::from(execute(&store, &mutation.request).await);
    c.resolve(mutation.op_id, outcome);
    assert_eq!(c.records().to_vec(), store.snapshot());

    store.fail_next(StoreError::Status { status: 409, message: "referenced".into() });
    let mutation = c.delete(&RecordId::Int(5)).unwrap();
    let outcome = Outcome::from(execute(&store, &mutation.request).await);
    c.resolve(mutation.op_id, outcome);
    assert_eq!(c.records().to_vec(), store.snapshot());
}

#[tokio::test]
async fn delete_already_gone_on_server_stays_deleted() {
    let store = MemoryStore::new(rows(json!([{"id": 1, "name": "A"}])));
    let mut c = remote(json!([]));
    c.replace_all(rows(json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}])));

    let mutation = c.delete(&RecordId::Int(2)).unwrap();
    let outcome = Outcome::from(execute(&store, &mutation.request).await);
    assert_eq!(outcome, Outcome::Confirmed(None));
    c.resolve(mutation.op_id, outcome);
    assert_eq!(as_json(&c), json!([{"id": 1, "name": "A"}]));
}
