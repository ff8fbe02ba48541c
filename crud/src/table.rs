//! Table model: columns, per-row actions and client-side pagination.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::fmt;
use std::sync::Arc;

use crate::record::Record;

/// Page-size menu offered under every table.
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 50, 100];

/// Computes the display text of a cell from its whole row.
pub type CellRenderer = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// One table column.
#[derive(Clone)]
pub struct ColumnDescriptor {
    pub accessor: String,
    pub title: String,
    pub render: Option<CellRenderer>,
}

impl ColumnDescriptor {
    #[must_use]
    pub fn new(accessor: impl Into<String>, title: impl Into<String>) -> Self {
        Self { accessor: accessor.into(), title: title.into(), render: None }
    }

    /// Column whose text is computed from the row instead of read from
    /// `accessor`.
    #[must_use]
    pub fn computed(
        accessor: impl Into<String>,
        title: impl Into<String>,
        render: impl Fn(&Record) -> String + Send + Sync + 'static,
    ) -> Self {
        Self { accessor: accessor.into(), title: title.into(), render: Some(Arc::new(render)) }
    }

    #[must_use]
    pub fn cell(&self, row: &Record) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.display(&self.accessor),
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("accessor", &self.accessor)
            .field("title", &self.title)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl PartialEq for ColumnDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.accessor == other.accessor
            && self.title == other.title
            && match (&self.render, &other.render) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

/// Action offered in the injected "Actions" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

impl RowAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

/// Which row actions a page opts into. Delete only by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActions {
    pub edit: bool,
    pub delete: bool,
}

impl Default for RowActions {
    fn default() -> Self {
        Self { edit: false, delete: true }
    }
}

impl RowActions {
    #[must_use]
    pub fn edit_and_delete() -> Self {
        Self { edit: true, delete: true }
    }

    #[must_use]
    pub fn none() -> Self {
        Self { edit: false, delete: false }
    }

    /// Enabled actions in display order.
    #[must_use]
    pub fn enabled(self) -> Vec<RowAction> {
        let mut out = Vec::with_capacity(2);
        if self.edit {
            out.push(RowAction::Edit);
        }
        if self.delete {
            out.push(RowAction::Delete);
        }
        out
    }

    /// The actions column is shown only when something is enabled.
    #[must_use]
    pub fn has_column(self) -> bool {
        self.edit || self.delete
    }
}

/// Client-side pagination over an in-memory row list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, page_size: PAGE_SIZES[0] }
    }
}

impl Pagination {
    /// Number of reachable pages; an empty table still has one page.
    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Half-open row index range shown on the current page.
    #[must_use]
    pub fn visible_range(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.page.saturating_sub(1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    #[must_use]
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.visible_range(rows.len())]
    }

    /// Move to `page`, clamped into `1..=page_count(total)`.
    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, self.page_count(total));
    }

    /// Switch page size and go back to the first page. Sizes outside the
    /// menu are ignored; returns whether the size changed.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZES.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page = 1;
        true
    }

    /// Keep the current page valid after the row count shrank.
    pub fn clamp_to(&mut self, total: usize) {
        self.page = self.page.clamp(1, self.page_count(total));
    }

    /// Footer text, e.g. `Showing 11 to 20 of 42 entries`.
    #[must_use]
    pub fn summary(&self, total: usize) -> String {
        let range = self.visible_range(total);
        let from = if range.is_empty() { 0 } else { range.start + 1 };
        format!("Showing {from} to {} of {total} entries", range.end)
    }
}

/// Who opens the add modal when the header button is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddTrigger {
    /// The table flips its own modal-open state.
    #[default]
    Internal,
    /// The caller supplied a handler and controls the modal itself.
    External,
}

impl AddTrigger {
    /// Apply a header-button press. Returns `true` when the caller's handler
    /// must run instead of the table opening its modal.
    pub fn press(self, modal_open: &mut bool) -> bool {
        match self {
            Self::Internal => {
                *modal_open = true;
                false
            }
            Self::External => true,
        }
    }
}
