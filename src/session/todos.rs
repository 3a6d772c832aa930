//! Todo list kept for the lifetime of a session.

use crate::error::{AppError, AppResult};
use crate::export::{self, ExportFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub text: String,
    pub done: bool,
}

/// Ordered todo items; position is the only identity
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new open item. Blank text is rejected.
    pub fn add(&mut self, text: &str) -> AppResult<&TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Enter a task to add."));
        }
        self.items.push(TodoItem {
            text: text.to_string(),
            done: false,
        });
        tracing::debug!("Todo added, {} item(s) now", self.items.len());
        Ok(&self.items[self.items.len() - 1])
    }

    /// Flip the done flag of the item at `index` and return its new state.
    pub fn toggle(&mut self, index: usize) -> AppResult<bool> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| AppError::validation(format!("No task #{} (list has {len}).", index + 1)))?;
        item.done = !item.done;
        Ok(item.done)
    }

    /// Drop every completed item, returning how many went.
    pub fn remove_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.done);
        before - self.items.len()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn completed(&self) -> usize {
        self.items.iter().filter(|i| i.done).count()
    }

    /// Plain-text download of the whole list.
    pub fn export(&self) -> ExportFile {
        ExportFile::text("todo_list.txt", export::text::todo_list(&self.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_appends_open_item() {
        let mut list = TodoList::new();
        let item = list.add("  Finish project report ").unwrap();
        assert_eq!(item.text, "Finish project report");
        assert!(!item.done);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut list = TodoList::new();
        let err = list.add("   ").unwrap_err();
        assert!(err.is_validation());
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut list = TodoList::new();
        list.add("one").unwrap();
        assert!(list.toggle(1).unwrap_err().is_validation());
    }

    #[test]
    fn test_remove_completed() {
        let mut list = TodoList::new();
        list.add("a").unwrap();
        list.add("b").unwrap();
        list.add("c").unwrap();
        list.toggle(0).unwrap();
        list.toggle(2).unwrap();

        assert_eq!(list.completed(), 2);
        assert_eq!(list.remove_completed(), 2);
        assert_eq!(list.items(), &[TodoItem { text: "b".into(), done: false }]);
    }

    #[test]
    fn test_export_empty_list_is_empty_file() {
        let file = TodoList::new().export();
        assert_eq!(file.file_name, "todo_list.txt");
        assert!(file.bytes.is_empty());
    }

    proptest! {
        #[test]
        fn prop_add_grows_by_one(texts in prop::collection::vec("[a-z]{1,12}", 0..20), next in "[a-z]{1,12}") {
            let mut list = TodoList::new();
            for t in &texts {
                list.add(t).unwrap();
            }
            let before = list.len();
            list.add(&next).unwrap();
            prop_assert_eq!(list.len(), before + 1);
            prop_assert!(!list.items()[before].done);
        }

        #[test]
        fn prop_double_toggle_is_identity(flags in prop::collection::vec(any::<bool>(), 1..20), pick in any::<prop::sample::Index>()) {
            let mut list = TodoList::new();
            for (i, done) in flags.iter().enumerate() {
                list.add(&format!("task {i}")).unwrap();
                if *done {
                    list.toggle(i).unwrap();
                }
            }
            let original = list.items().to_vec();
            let index = pick.index(flags.len());
            list.toggle(index).unwrap();
            list.toggle(index).unwrap();
            prop_assert_eq!(list.items(), original.as_slice());
        }
    }
}
