//! Resource catalog: every CRUD screen the dashboard offers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ResourcePage` looks its resource up here by route key and renders it
//! generically. Adding a screen means adding one `ResourceSpec` below; the
//! dashboard cards and the command bar are derived from the same list.
//!
//! Designations live on the backend. Everything else is a browser-only
//! resource seeded with sample rows.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde_json::{Value, json};

use crud::format::{format_bytes, format_date};
use crud::{
    ColumnDescriptor, FieldDescriptor, FieldSchema, Record, RecordId, RemoteOptions, ResourceEndpoint, ResourceSpec,
    RowActions, SchemaError, SelectOption,
};

use crate::util::command::CommandRoute;
use crate::util::markdown::markdown_to_plain;

/// Route prefix for resource pages, e.g. `/r/branches`.
pub const RESOURCE_PREFIX: &str = "/r";

/// Path of the page for `key`.
#[must_use]
pub fn resource_path(key: &str) -> String {
    format!("{RESOURCE_PREFIX}/{key}")
}

/// All resources in dashboard order.
///
/// # Errors
///
/// Returns the first schema that fails validation.
pub fn resources() -> Result<Vec<ResourceSpec>, SchemaError> {
    Ok(vec![
        branches()?,
        sub_companies()?,
        working_days()?,
        company_standards()?,
        company_policies()?,
        designations()?,
        contests()?,
        trainings()?,
        expense_claims()?,
        leave_requests()?,
        whistle_reports()?,
    ])
}

/// Look a resource up by route key.
///
/// Returns `None` for unknown keys and for schemas that fail to build (the
/// error is logged).
#[must_use]
pub fn find(key: &str) -> Option<ResourceSpec> {
    match resources() {
        Ok(all) => all.into_iter().find(|r| r.key == key),
        Err(e) => {
            leptos::logging::error!("resource catalog is invalid: {e}");
            None
        }
    }
}

/// Destinations for the command bar: the dashboard plus every resource.
#[must_use]
pub fn command_routes() -> Vec<CommandRoute> {
    let mut routes = vec![CommandRoute::new("/", &["dashboard", "home"])];
    for (key, phrases) in COMMAND_PHRASES {
        routes.push(CommandRoute::new(&resource_path(key), phrases));
    }
    routes
}

/// Spoken/typed names per resource key. More specific phrases come first so
/// that containment matching prefers them.
const COMMAND_PHRASES: [(&str, &[&str]); 11] = [
    ("leave-requests", &["leave requests", "leave request", "leave"]),
    ("expense-claims", &["expense claims", "expense claim", "expenses"]),
    ("company-policies", &["company policies", "company policy", "policies"]),
    ("company-standards", &["company standards", "standards", "currency", "tax"]),
    ("sub-companies", &["sub companies", "sub company", "subsidiaries"]),
    ("working-days", &["working days", "working hours", "work schedule"]),
    ("designations", &["designations", "designation", "create designation", "job titles"]),
    ("trainings", &["create training", "trainings", "training"]),
    ("contests", &["contests", "contest", "competition"]),
    ("whistle-reports", &["whistle blowing", "whistle", "report misconduct"]),
    ("branches", &["branches", "branch", "offices"]),
];

// =============================================================
// Company setup
// =============================================================

fn branches() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("branchName", "Branch Name"),
        FieldDescriptor::text("location", "Location"),
        FieldDescriptor::text("contactNumber", "Contact Number"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("branchName", "Branch Name"),
        ColumnDescriptor::new("location", "Location"),
        ColumnDescriptor::new("contactNumber", "Contact Number"),
    ];
    Ok(ResourceSpec::new("branches", "Branch", schema, columns).with_fixtures(vec![
        fixture(1, json!({"branchName": "Head Office", "location": "Lahore", "contactNumber": "042-111-222"})),
        fixture(2, json!({"branchName": "North Branch", "location": "Islamabad", "contactNumber": "051-333-444"})),
    ]))
}

fn sub_companies() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("name", "Name"),
        FieldDescriptor::email("email", "Email"),
        FieldDescriptor::text("website", "Website"),
        FieldDescriptor::text("phoneNumber", "Phone Number"),
        FieldDescriptor::text("workingTime", "Working Time"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("name", "Name"),
        ColumnDescriptor::new("email", "Email"),
        ColumnDescriptor::new("website", "Website"),
        ColumnDescriptor::new("phoneNumber", "Phone Number"),
        ColumnDescriptor::new("workingTime", "Working Time"),
    ];
    Ok(ResourceSpec::new("sub-companies", "Sub Company", schema, columns).with_fixtures(vec![fixture(
        1,
        json!({
            "name": "Tech Solutions",
            "email": "info@techsolutions.com",
            "website": "techsolutions.com",
            "phoneNumber": "0300-1234567",
            "workingTime": "9 AM - 6 PM",
        }),
    )]))
}

fn working_days() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("DayName", "Day Name"),
        FieldDescriptor::time("StartTime", "Start Time"),
        FieldDescriptor::time("EndTime", "End Time"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("DayName", "Day"),
        ColumnDescriptor::new("StartTime", "Start Time"),
        ColumnDescriptor::new("EndTime", "End Time"),
    ];
    Ok(ResourceSpec::new("working-days", "Working Day", schema, columns).with_fixtures(vec![
        fixture(1, json!({"DayName": "Monday", "StartTime": "09:00", "EndTime": "17:00"})),
        fixture(2, json!({"DayName": "Tuesday", "StartTime": "09:00", "EndTime": "17:00"})),
    ]))
}

fn company_standards() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("Currency", "Currency"),
        FieldDescriptor::text("TaxID", "Tax ID"),
        FieldDescriptor::number("TaxPercentage", "Tax Percentage"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("Currency", "Currency"),
        ColumnDescriptor::new("TaxID", "Tax ID"),
        ColumnDescriptor::computed("TaxPercentage", "Tax %", |row| {
            let raw = row.display("TaxPercentage");
            if raw.is_empty() { raw } else { format!("{raw}%") }
        }),
    ];
    Ok(ResourceSpec::new("company-standards", "Company Standard", schema, columns)
        .with_fixtures(vec![fixture(1, json!({"Currency": "PKR", "TaxID": "NTN-4455", "TaxPercentage": 17}))]))
}

fn company_policies() -> Result<ResourceSpec, SchemaError> {
    let departments = vec![
        SelectOption::new("chase", "Chase Perks"),
        SelectOption::new("paul", "Paul Jenson"),
        SelectOption::new("stella", "Stella Nicholson"),
    ];
    let mut department = FieldDescriptor::select("Department", "Department", departments);
    if let Some(first) = department.options.first_mut() {
        first.label = "--------- (Select Department)".to_owned();
    }
    let schema = FieldSchema::new(vec![
        department,
        FieldDescriptor::text("PolicyFieldName", "Policy Field Name"),
        FieldDescriptor::text("CompanyDescription", "Company Description"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("Department", "Department"),
        ColumnDescriptor::new("PolicyFieldName", "Policy"),
        ColumnDescriptor::new("CompanyDescription", "Description"),
    ];
    Ok(ResourceSpec::new("company-policies", "Company Policy", schema, columns)
        .with_confirm_delete()
        .with_fixtures(vec![fixture(
            1,
            json!({"Department": "chase", "PolicyFieldName": "Remote Work", "CompanyDescription": "Two days per week"}),
        )]))
}

/// Backend-managed designations with departments loaded from the server.
fn designations() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("name", "Designation Name"),
        FieldDescriptor::select_remote("department", "Department"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("id", "ID"),
        ColumnDescriptor::new("name", "Designation"),
        ColumnDescriptor::new("department_name", "Department"),
        ColumnDescriptor::new("parent_name", "Reports To"),
    ];
    Ok(ResourceSpec::new("designations", "Designation", schema, columns)
        .with_endpoint(ResourceEndpoint::new("company-Setup/designations"))
        .with_remote_options(RemoteOptions::new("department", "company-Setup-fkf/parent-departments", "id", "name"))
        .with_actions(RowActions::edit_and_delete())
        .with_confirm_delete())
}

// =============================================================
// Engagement
// =============================================================

fn contests() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("Company", "Company"),
        FieldDescriptor::text("name", "Contest Name"),
        FieldDescriptor::text("Objective", "Objective"),
        FieldDescriptor::rich_text("Description", "Description"),
        FieldDescriptor::text("AssignTo", "Assign To"),
        FieldDescriptor::select("Department", "Department", SelectOption::same(&["IT", "Finance"])),
        FieldDescriptor::date("LaunchDate", "Launch Date"),
        FieldDescriptor::date("DueDate", "Due Date"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("name", "Contest"),
        ColumnDescriptor::new("Company", "Company"),
        ColumnDescriptor::new("Department", "Department"),
        ColumnDescriptor::new("AssignTo", "Assigned To"),
        date_column("LaunchDate", "Launch Date"),
        date_column("DueDate", "Due Date"),
    ];
    Ok(ResourceSpec::new("contests", "Contest", schema, columns).with_fixtures(vec![fixture(
        1,
        json!({
            "Company": "HCIMS",
            "name": "Best Idea 2025",
            "Objective": "Process improvement",
            "Description": "Submit one **concrete** improvement.",
            "AssignTo": "All staff",
            "Department": "IT",
            "LaunchDate": "2025-07-01",
            "DueDate": "2025-07-31",
        }),
    )]))
}

fn trainings() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("title", "Title"),
        FieldDescriptor::text("videoUrl", "Video URL").with_help("Link to the hosted training video"),
        FieldDescriptor::rich_text("Description", "Description"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("title", "Title"),
        ColumnDescriptor::new("videoUrl", "Video"),
        ColumnDescriptor::computed("Description", "Description", |row| {
            markdown_to_plain(&row.display("Description"))
        }),
    ];
    Ok(ResourceSpec::new("trainings", "Training", schema, columns).with_fixtures(vec![fixture(
        1,
        json!({
            "title": "Onboarding",
            "videoUrl": "https://videos.example.com/onboarding",
            "Description": "# Welcome\nCompany *culture* and tools.",
        }),
    )]))
}

fn whistle_reports() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("Subject", "Subject"),
        FieldDescriptor::rich_text("Description", "Description"),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("Subject", "Subject"),
        ColumnDescriptor::computed("Description", "Description", |row| {
            markdown_to_plain(&row.display("Description"))
        }),
    ];
    Ok(ResourceSpec::new("whistle-reports", "Whistle Report", schema, columns)
        .with_actions(RowActions::none()))
}

// =============================================================
// Requests
// =============================================================

fn expense_claims() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::date("ClaimDate", "Claim Date"),
        FieldDescriptor::text("Employee", "Employee"),
        FieldDescriptor::text("Department", "Department"),
        FieldDescriptor::text("Designation", "Designation"),
        FieldDescriptor::text("Description", "Description"),
        FieldDescriptor::number("Amount", "Amount"),
        FieldDescriptor::text("Status", "Status"),
        FieldDescriptor::file("File", "Receipt"),
        FieldDescriptor::text("Remarks", "Remarks").optional(),
    ])?;
    let columns = vec![
        date_column("ClaimDate", "Claim Date"),
        ColumnDescriptor::new("Employee", "Employee"),
        ColumnDescriptor::new("Department", "Department"),
        ColumnDescriptor::new("Amount", "Amount"),
        ColumnDescriptor::new("Status", "Status"),
        ColumnDescriptor::computed("File", "Receipt", receipt_cell),
    ];
    Ok(ResourceSpec::new("expense-claims", "Expense Claim", schema, columns)
        .with_actions(RowActions::edit_and_delete())
        .with_fixtures(vec![fixture(
            1,
            json!({
                "ClaimDate": "2025-07-28",
                "Employee": "Ayesha Khan",
                "Department": "Finance",
                "Designation": "Accountant",
                "Description": "Client visit taxi",
                "Amount": 2500,
                "Status": "Pending",
                "File": {"name": "taxi.pdf", "size": 1536, "mime": "application/pdf"},
                "Remarks": "",
            }),
        )]))
}

fn leave_requests() -> Result<ResourceSpec, SchemaError> {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::text("Employee", "Employee"),
        FieldDescriptor::select("Department", "Department", SelectOption::same(&["IT", "Finance", "HR"])),
        FieldDescriptor::text("Designation", "Designation"),
        FieldDescriptor::date("StartDate", "Start Date"),
        FieldDescriptor::date("EndDate", "End Date"),
        FieldDescriptor::number("TotalDays", "Total Days"),
        FieldDescriptor::select("Status", "Status", SelectOption::same(&["Pending", "Approved", "Rejected"]))
            .with_initial(crud::FieldValue::text("Pending")),
    ])?;
    let columns = vec![
        ColumnDescriptor::new("Employee", "Employee"),
        ColumnDescriptor::new("Department", "Department"),
        date_column("StartDate", "From"),
        date_column("EndDate", "To"),
        ColumnDescriptor::new("TotalDays", "Days"),
        ColumnDescriptor::new("Status", "Status"),
    ];
    Ok(ResourceSpec::new("leave-requests", "Leave Request", schema, columns)
        .with_actions(RowActions::edit_and_delete())
        .with_confirm_delete()
        .with_fixtures(vec![fixture(
            1,
            json!({
                "Employee": "Bilal Ahmed",
                "Department": "IT",
                "Designation": "Developer",
                "StartDate": "2025-08-04",
                "EndDate": "2025-08-06",
                "TotalDays": 3,
                "Status": "Approved",
            }),
        )]))
}

// =============================================================
// Helpers
// =============================================================

fn date_column(accessor: &'static str, title: &str) -> ColumnDescriptor {
    ColumnDescriptor::computed(accessor, title, move |row| format_date(&row.display(accessor)))
}

/// `taxi.pdf (1.5 KB)` for an attached file, empty otherwise.
fn receipt_cell(row: &Record) -> String {
    let Some(Value::Object(file)) = row.get("File") else {
        return String::new();
    };
    let name = file.get("name").and_then(Value::as_str).unwrap_or_default();
    match file.get("size").and_then(Value::as_u64) {
        Some(size) => format!("{name} ({})", format_bytes(size)),
        None => name.to_owned(),
    }
}

fn fixture(id: i64, fields: Value) -> Record {
    match fields {
        Value::Object(map) => Record::with_fields(RecordId::Int(id), &map),
        _ => Record::new(RecordId::Int(id)),
    }
}
