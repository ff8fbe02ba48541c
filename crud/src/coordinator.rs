//! Generic resource coordinator: one add/edit/delete state machine for every
//! HR entity page.
//!
//! SYSTEM CONTEXT
//! ==============
//! A page builds a `ResourceSpec` once and owns one `ResourceCoordinator` for
//! its mounted lifetime. User actions go in (`open_add`, `open_edit`,
//! `submit`, `delete`, `cancel`); `Mutation`s come out and are handed to a
//! `RecordStore`. The store's answer comes back through `resolve`.
//!
//! DESIGN
//! ======
//! Every change is applied to the local row list immediately and remembered as
//! a pending operation holding what is needed to undo it. Resolution settles
//! it three ways:
//!
//! - confirmed: keep, adopting the server's copy of the row when one is sent;
//!   a create confirmed without a row flags the list stale
//! - rejected: restore the pre-mutation snapshot
//! - unknown: keep, but flag the list stale so the page refetches
//!
//! Local ids for optimistic inserts are `max(numeric id) + 1`, never the row
//! count, so an id freed by a delete is not handed out twice.
//!
//! ```text
//!           open_add             submit
//!   Idle ───────────▶ AddDraft ─────────▶ Submitting ──confirmed/unknown──▶ Idle
//!    │  ◀───cancel───              ▲            │
//!    │                             └─rejected───┘
//!    └── open_edit(id) ─▶ EditDraft(id) ──▶ (same)
//! ```

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod coordinator_test;

use std::collections::HashMap;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::draft::coerce_numbers;
use crate::endpoint::{RemoteOptions, ResourceEndpoint};
use crate::field::FieldSchema;
use crate::record::{Record, RecordId};
use crate::store::{StoreError, StoreRequest};
use crate::table::{ColumnDescriptor, RowActions};

// =============================================================
// Resource description
// =============================================================

/// Everything a generic CRUD page needs to know about one entity type.
#[derive(Debug, Clone)]
pub struct ResourceSpec {
    /// Route segment, e.g. `branches`.
    pub key: String,
    /// Singular display name, used in titles and notifications.
    pub heading: String,
    pub schema: FieldSchema,
    pub columns: Vec<ColumnDescriptor>,
    pub actions: RowActions,
    /// `None` for resources that only live in the browser.
    pub endpoint: Option<ResourceEndpoint>,
    pub remote_options: Vec<RemoteOptions>,
    /// Ask before deleting a row.
    pub confirm_delete: bool,
    /// Rows shown before the first fetch, or forever for local resources.
    pub fixtures: Vec<Record>,
}

impl ResourceSpec {
    #[must_use]
    pub fn new(key: &str, heading: &str, schema: FieldSchema, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            key: key.to_owned(),
            heading: heading.to_owned(),
            schema,
            columns,
            actions: RowActions::default(),
            endpoint: None,
            remote_options: Vec::new(),
            confirm_delete: false,
            fixtures: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: ResourceEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: RowActions) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub fn with_remote_options(mut self, remote: RemoteOptions) -> Self {
        self.remote_options.push(remote);
        self
    }

    #[must_use]
    pub fn with_confirm_delete(mut self) -> Self {
        self.confirm_delete = true;
        self
    }

    #[must_use]
    pub fn with_fixtures(mut self, fixtures: Vec<Record>) -> Self {
        self.fixtures = fixtures;
        self
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.endpoint.is_none()
    }
}

// =============================================================
// Operations and outcomes
// =============================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    #[error("no record with id {0}")]
    UnknownRecord(RecordId),
    #[error("a submission is already in flight")]
    Busy,
    #[error("no form is open")]
    NotDrafting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AddDraft,
    EditDraft(RecordId),
    Submitting { op: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Create,
    Update,
    Delete,
}

impl OpKind {
    /// Past-tense verb for notifications.
    #[must_use]
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "added",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// How the backend answered one mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Applied. Carries the stored row when the backend echoed it.
    Confirmed(Option<Record>),
    /// Refused; the reason is shown to the user.
    Rejected(String),
    /// No answer (timeout or dropped connection).
    Unknown,
}

impl From<Result<Option<Record>, StoreError>> for Outcome {
    fn from(result: Result<Option<Record>, StoreError>) -> Self {
        match result {
            Ok(record) => Self::Confirmed(record),
            Err(e) => e.outcome(),
        }
    }
}

/// A change applied locally that still has to reach the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub op_id: Uuid,
    pub kind: OpKind,
    pub request: StoreRequest,
    /// Already settled locally; nothing to send.
    pub settled: bool,
}

/// What `resolve` did with an outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub kind: OpKind,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
enum Undo {
    Create { id: RecordId },
    Update { previous: Record },
    Delete { index: usize, row: Record },
}

#[derive(Debug, Clone)]
struct Pending {
    kind: OpKind,
    undo: Undo,
    /// Draft phase to return to on rejection, for submissions from the modal.
    draft: Option<Phase>,
}

// =============================================================
// Coordinator
// =============================================================

#[derive(Debug)]
pub struct ResourceCoordinator {
    spec: ResourceSpec,
    records: Vec<Record>,
    phase: Phase,
    pending: HashMap<Uuid, Pending>,
    stale: bool,
}

impl ResourceCoordinator {
    /// Start with the spec's fixtures. Remote resources are stale until the
    /// first `replace_all`.
    #[must_use]
    pub fn new(spec: ResourceSpec) -> Self {
        let records = spec.fixtures.clone();
        let stale = !spec.is_local();
        Self { spec, records, phase: Phase::Idle, pending: HashMap::new(), stale }
    }

    #[must_use]
    pub fn spec(&self) -> &ResourceSpec {
        &self.spec
    }

    /// Swap in a schema with loaded remote options.
    pub fn set_schema(&mut self, schema: FieldSchema) {
        self.spec.schema = schema;
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    #[must_use]
    pub fn modal_open(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Modal heading for the current draft.
    #[must_use]
    pub fn modal_title(&self) -> String {
        let verb = match self.draft_phase() {
            Some(Phase::EditDraft(_)) => "Edit",
            _ => "Add",
        };
        format!("{verb} {}", self.spec.heading)
    }

    /// Values the form should be seeded with for the current draft.
    #[must_use]
    pub fn draft_initial(&self) -> Map<String, Value> {
        match self.draft_phase() {
            Some(Phase::EditDraft(id)) => self.find(id).map(|r| r.as_map().clone()).unwrap_or_default(),
            _ => Map::new(),
        }
    }

    /// Open the add form.
    ///
    /// # Errors
    ///
    /// `Busy` while a submission is in flight.
    pub fn open_add(&mut self) -> Result<(), CoordinatorError> {
        self.ensure_not_submitting()?;
        self.phase = Phase::AddDraft;
        Ok(())
    }

    /// Open the edit form for `id`.
    ///
    /// # Errors
    ///
    /// `Busy` while a submission is in flight, `UnknownRecord` for ids not in
    /// the list.
    pub fn open_edit(&mut self, id: &RecordId) -> Result<(), CoordinatorError> {
        self.ensure_not_submitting()?;
        if self.find(id).is_none() {
            return Err(CoordinatorError::UnknownRecord(id.clone()));
        }
        self.phase = Phase::EditDraft(id.clone());
        Ok(())
    }

    /// Close the form without side effects.
    ///
    /// # Errors
    ///
    /// `Busy` while a submission is in flight.
    pub fn cancel(&mut self) -> Result<(), CoordinatorError> {
        self.ensure_not_submitting()?;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Apply the submitted form optimistically.
    ///
    /// # Errors
    ///
    /// `Busy` while another submission is in flight, `NotDrafting` when no form
    /// is open, and `UnknownRecord` when the edited row vanished meanwhile.
    pub fn submit(&mut self, payload: Map<String, Value>) -> Result<Mutation, CoordinatorError> {
        self.ensure_not_submitting()?;
        let payload = coerce_numbers(&self.spec.schema, payload);
        let op_id = Uuid::new_v4();
        let draft = self.phase.clone();

        let (kind, undo, request) = match &draft {
            Phase::AddDraft => {
                let id = next_local_id(&self.records);
                self.records.push(Record::with_fields(id.clone(), &payload));
                (OpKind::Create, Undo::Create { id }, StoreRequest::Create { payload })
            }
            Phase::EditDraft(id) => {
                let row = self
                    .records
                    .iter_mut()
                    .find(|r| r.id() == *id)
                    .ok_or_else(|| CoordinatorError::UnknownRecord(id.clone()))?;
                let previous = row.clone();
                row.merge(&payload);
                (OpKind::Update, Undo::Update { previous }, StoreRequest::Update { id: id.clone(), payload })
            }
            Phase::Idle | Phase::Submitting { .. } => return Err(CoordinatorError::NotDrafting),
        };

        tracing::debug!(resource = %self.spec.key, %op_id, verb = request.verb(), "optimistic submit");
        if self.spec.is_local() {
            self.phase = Phase::Idle;
            return Ok(Mutation { op_id, kind, request, settled: true });
        }
        self.pending.insert(op_id, Pending { kind, undo, draft: Some(draft) });
        self.phase = Phase::Submitting { op: op_id };
        Ok(Mutation { op_id, kind, request, settled: false })
    }

    /// Remove a row optimistically. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &RecordId) -> Option<Mutation> {
        let index = self.records.iter().position(|r| r.id() == *id)?;
        let row = self.records.remove(index);
        let op_id = Uuid::new_v4();
        let request = StoreRequest::Delete { id: id.clone() };
        tracing::debug!(resource = %self.spec.key, %op_id, %id, "optimistic delete");
        if self.spec.is_local() {
            return Some(Mutation { op_id, kind: OpKind::Delete, request, settled: true });
        }
        self.pending.insert(op_id, Pending { kind: OpKind::Delete, undo: Undo::Delete { index, row }, draft: None });
        Some(Mutation { op_id, kind: OpKind::Delete, request, settled: false })
    }

    /// Settle a pending operation. Returns `None` for ids that are not (or no
    /// longer) pending, e.g. a late answer after `replace_all`.
    pub fn resolve(&mut self, op_id: Uuid, outcome: Outcome) -> Option<Settlement> {
        let Some(pending) = self.pending.remove(&op_id) else {
            tracing::debug!(resource = %self.spec.key, %op_id, "ignoring outcome for unknown op");
            return None;
        };
        let submitting = self.phase == Phase::Submitting { op: op_id };

        match &outcome {
            Outcome::Confirmed(server) => {
                match server {
                    Some(server) => self.adopt(&pending.undo, server.clone()),
                    // The local id was never issued by the server; only a
                    // refetch can tell us the real one.
                    None if pending.kind == OpKind::Create => self.stale = true,
                    None => {}
                }
                if submitting {
                    self.phase = Phase::Idle;
                }
            }
            Outcome::Rejected(reason) => {
                tracing::warn!(resource = %self.spec.key, %op_id, %reason, "mutation rejected, rolling back");
                self.rollback(pending.undo);
                if submitting {
                    self.phase = pending.draft.unwrap_or(Phase::Idle);
                }
            }
            Outcome::Unknown => {
                tracing::warn!(resource = %self.spec.key, %op_id, "mutation outcome unknown, marking stale");
                self.stale = true;
                if submitting {
                    self.phase = Phase::Idle;
                }
            }
        }
        Some(Settlement { kind: pending.kind, outcome })
    }

    /// Install a fresh server snapshot and forget pending operations whose
    /// rows it no longer matches.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
        self.stale = false;
        let records = &self.records;
        self.pending.retain(|_, p| match &p.undo {
            Undo::Create { id } => records.iter().any(|r| r.id() == *id),
            Undo::Update { previous } => records.iter().any(|r| r.id() == previous.id()),
            Undo::Delete { row, .. } => records.iter().all(|r| r.id() != row.id()),
        });
        if let Phase::Submitting { op } = self.phase {
            if !self.pending.contains_key(&op) {
                self.phase = Phase::Idle;
            }
        }
        if let Phase::EditDraft(id) = &self.phase {
            if self.find(id).is_none() {
                self.phase = Phase::Idle;
            }
        }
    }

    fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == *id)
    }

    fn ensure_not_submitting(&self) -> Result<(), CoordinatorError> {
        if self.is_submitting() {
            return Err(CoordinatorError::Busy);
        }
        Ok(())
    }

    /// The draft phase behind the current state, looking through an
    /// in-flight submission.
    fn draft_phase(&self) -> Option<&Phase> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Submitting { op } => self.pending.get(op).and_then(|p| p.draft.as_ref()),
            draft => Some(draft),
        }
    }

    fn adopt(&mut self, undo: &Undo, server: Record) {
        let local_id = match undo {
            Undo::Create { id } => id.clone(),
            Undo::Update { previous } => previous.id(),
            Undo::Delete { .. } => return,
        };
        if let Some(row) = self.records.iter_mut().find(|r| r.id() == local_id) {
            *row = server;
        }
    }

    fn rollback(&mut self, undo: Undo) {
        match undo {
            Undo::Create { id } => self.records.retain(|r| r.id() != id),
            Undo::Update { previous } => {
                let id = previous.id();
                if let Some(row) = self.records.iter_mut().find(|r| r.id() == id) {
                    *row = previous;
                }
            }
            Undo::Delete { index, row } => {
                let index = index.min(self.records.len());
                self.records.insert(index, row);
            }
        }
    }
}

/// Next id for an optimistic insert: one past the largest numeric id, or 1.
#[must_use]
pub fn next_local_id(records: &[Record]) -> RecordId {
    let max = records.iter().filter_map(|r| r.id().as_int()).max().unwrap_or(0);
    RecordId::Int(max.saturating_add(1))
}
