//! Edit-session state for interactive front ends
//!
//! Tracks which expense, if any, the entry form is currently editing. The
//! aggregation and filtering functions never see this; only submission
//! consults it.

use crate::models::{Expense, ExpenseId};

/// Which record the next submission applies to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    editing: Option<ExpenseId>,
}

impl EditSession {
    /// A session in create mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to editing `expense`
    pub fn begin_edit(&mut self, expense: &Expense) {
        self.editing = Some(expense.id.clone());
    }

    /// Return to create mode
    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Id of the record being edited
    pub fn editing(&self) -> Option<&ExpenseId> {
        self.editing.as_ref()
    }

    /// Return to create mode if `id` is the record being edited
    pub fn forget(&mut self, id: &ExpenseId) {
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        }
    }
}
