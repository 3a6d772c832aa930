//! Session State
//!
//! Everything a user builds up (todos, expenses, cleaned notes) lives here,
//! in memory, for as long as their session does. Nothing is persisted.

pub mod finance;
mod store;
pub mod todos;

pub use finance::{EXPENSE_CATEGORIES, ExpenseLedger, ExpenseRow};
pub use store::{SessionStore, SharedSession};
pub use todos::{TodoItem, TodoList};

/// Per-user state
#[derive(Debug, Default)]
pub struct Session {
    pub todos: TodoList,
    pub expenses: ExpenseLedger,
    /// Last output of the notes cleaner, kept for PDF export
    pub cleaned_notes: Option<String>,
    /// One-shot confirmation shown on the next page view
    pub flash: Option<String>,
}
