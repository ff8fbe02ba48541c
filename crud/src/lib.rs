//! Schema-driven CRUD core for the HCIMS admin dashboard.
//!
//! This crate owns everything the dashboard's form/table screens need that is
//! not tied to a UI framework: field schemas and their validation, the form
//! draft, table columns and client-side pagination, and the generic resource
//! coordinator that applies optimistic mutations and reconciles them with the
//! remote REST backend. The `client` crate renders these types with Leptos;
//! nothing here touches the DOM.
//!
//! DESIGN
//! ======
//! Pages never mutate their record list directly. They describe a resource
//! once (`ResourceSpec`), drive a `ResourceCoordinator`, and hand each
//! resulting `Mutation` to a `RecordStore`. The store's answer is fed back as
//! an `Outcome`, which either keeps, reverts, or flags the optimistic change.

pub mod coordinator;
pub mod draft;
pub mod endpoint;
pub mod field;
pub mod format;
pub mod lifetime;
pub mod record;
pub mod store;
pub mod table;

pub use coordinator::{
    CoordinatorError, Mutation, OpKind, Outcome, Phase, ResourceCoordinator, ResourceSpec, Settlement, next_local_id,
};
pub use draft::{DraftError, FormDraft, FormState};
pub use endpoint::{RemoteOptions, ResourceEndpoint};
pub use field::{FieldDescriptor, FieldKind, FieldSchema, SchemaError, SelectOption};
pub use lifetime::{MountScope, ScopeGuard};
pub use record::{FieldValue, FileRef, Record, RecordError, RecordId};
pub use store::{MemoryStore, RecordStore, StoreError, StoreRequest, execute};
pub use table::{AddTrigger, ColumnDescriptor, PAGE_SIZES, Pagination, RowAction, RowActions};
