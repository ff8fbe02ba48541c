use super::*;

use crud::{FieldKind, ResourceCoordinator};

use crate::util::command::match_command;

#[test]
fn every_resource_schema_builds() {
    let all = resources().unwrap();
    assert_eq!(all.len(), 11);
    for spec in &all {
        assert!(!spec.schema.is_empty(), "{} has no fields", spec.key);
        assert!(!spec.columns.is_empty(), "{} has no columns", spec.key);
    }
}

#[test]
fn resource_keys_are_unique() {
    let all = resources().unwrap();
    let mut keys: Vec<&str> = all.iter().map(|r| r.key.as_str()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), all.len());
}

#[test]
fn only_designations_are_remote() {
    let remote: Vec<String> = resources().unwrap().into_iter().filter(|r| !r.is_local()).map(|r| r.key).collect();
    assert_eq!(remote, vec!["designations".to_owned()]);
}

#[test]
fn designations_load_departments_and_allow_edit() {
    let spec = find("designations").unwrap();
    assert!(spec.actions.edit);
    assert!(spec.confirm_delete);
    assert_eq!(spec.remote_options.len(), 1);
    assert_eq!(spec.remote_options[0].field_id, "department");
    assert_eq!(spec.endpoint.unwrap().collection_url(), "/company-Setup/designations/");
    assert_eq!(spec.schema.pending_remote().collect::<Vec<_>>(), vec!["department"]);
}

#[test]
fn company_policy_department_has_custom_placeholder() {
    let spec = find("company-policies").unwrap();
    let field = spec.schema.get("Department").unwrap();
    assert_eq!(field.kind, FieldKind::Select);
    assert_eq!(field.options[0].label, "--------- (Select Department)");
    assert!(field.options[0].disabled);
    assert_eq!(field.options.len(), 4);
}

#[test]
fn fixture_ids_are_unique_per_resource() {
    for spec in resources().unwrap() {
        let coordinator = ResourceCoordinator::new(spec.clone());
        let mut ids: Vec<String> = coordinator.records().iter().map(|r| r.id().to_string()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before, "{}", spec.key);
    }
}

#[test]
fn expense_receipt_shows_name_and_size() {
    let spec = find("expense-claims").unwrap();
    let row = &spec.fixtures[0];
    let receipt = spec.columns.iter().find(|c| c.accessor == "File").unwrap();
    assert_eq!(receipt.cell(row), "taxi.pdf (1.5 KB)");
    let date = spec.columns.iter().find(|c| c.accessor == "ClaimDate").unwrap();
    assert_eq!(date.cell(row), "28 Jul 2025");
}

#[test]
fn training_description_column_is_plain_text() {
    let spec = find("trainings").unwrap();
    let column = spec.columns.iter().find(|c| c.accessor == "Description").unwrap();
    let cell = column.cell(&spec.fixtures[0]);
    assert!(!cell.contains('#'));
    assert!(!cell.contains('*'));
    assert!(cell.contains("Welcome"));
}

#[test]
fn unknown_key_is_none() {
    assert!(find("payroll").is_none());
}

#[test]
fn command_routes_reach_resources() {
    let routes = command_routes();
    assert_eq!(match_command("go to leave requests", &routes), Some("/r/leave-requests"));
    assert_eq!(match_command("open expense claims", &routes), Some("/r/expense-claims"));
    assert_eq!(match_command("please show the dashboard", &routes), Some("/"));
    assert_eq!(match_command("create designation", &routes), Some("/r/designations"));
    assert_eq!(match_command("xyzzy", &routes), None);
}

#[test]
fn every_resource_has_a_command_route() {
    let routes = command_routes();
    for spec in resources().unwrap() {
        let path = resource_path(&spec.key);
        assert!(routes.iter().any(|r| r.path == path), "{} unreachable", spec.key);
    }
}
