use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    Result,
    diagram::{Diagram, ElementId},
    history::Command,
};

/// One executed command as listed by the history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub label: String,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Entry {
    record: HistoryRecord,
    before: Diagram,
    after: Diagram,
}

/// Linear undo/redo history over diagram snapshots.
///
/// Every executed command stores the snapshot it started from and the one it
/// produced; undo and redo swap between them.
#[derive(Debug, Clone)]
pub struct CommandStack {
    current: Diagram,
    undo: VecDeque<Entry>,
    redo: Vec<Entry>,
    /// max undoable entries, 0 for unbounded
    limit: usize,
}

impl CommandStack {
    pub fn new(
        diagram: Diagram,
        limit: usize,
    ) -> Self {
        Self {
            current: diagram,
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    pub fn current(&self) -> &Diagram {
        &self.current
    }

    /// Run `command` against the current snapshot as one history entry.
    ///
    /// A failing command leaves the snapshot and both stacks unchanged.
    pub fn execute(
        &mut self,
        command: &dyn Command,
    ) -> Result<ElementId> {
        let (next, id) = command.execute(&self.current)?;
        let record = HistoryRecord {
            label: command.label(),
            executed_at: Utc::now(),
        };
        debug!("execute: {}", record.label);

        let before = std::mem::replace(&mut self.current, next);
        self.undo.push_back(Entry {
            record,
            before,
            after: self.current.clone(),
        });
        if self.limit > 0 && self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();

        Ok(id)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Revert the latest entry; false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo.pop_back() else {
            return false;
        };
        debug!("undo: {}", entry.record.label);
        self.current = entry.before.clone();
        self.redo.push(entry);
        true
    }

    /// Re-apply the latest undone entry; false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo.pop() else {
            return false;
        };
        debug!("redo: {}", entry.record.label);
        self.current = entry.after.clone();
        self.undo.push_back(entry);
        true
    }

    /// Undoable entries, oldest first.
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.undo.iter().map(|e| e.record.clone()).collect()
    }

    /// Drop all entries and start over from `diagram`.
    pub fn reset(
        &mut self,
        diagram: Diagram,
    ) {
        self.current = diagram;
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        diagram::ElementType,
        history::{CreateShapeCommand, UpdatePropertiesCommand},
        modeling::PropertyUpdate,
    };

    fn rename(
        id: &str,
        name: &str,
    ) -> UpdatePropertiesCommand {
        UpdatePropertiesCommand::new(id, PropertyUpdate::Name(Some(name.to_string())))
    }

    fn name(stack: &CommandStack) -> Option<String> {
        stack.current().element("Process_1").unwrap().attributes.name.clone()
    }

    #[test]
    fn test_undo_redo_swap_snapshots() {
        let mut stack = CommandStack::new(Diagram::new("Process_1"), 0);
        let initial = stack.current().clone();

        stack.execute(&rename("Process_1", "a")).unwrap();
        stack.execute(&rename("Process_1", "b")).unwrap();
        assert_eq!(name(&stack).as_deref(), Some("b"));

        assert!(stack.undo());
        assert_eq!(name(&stack).as_deref(), Some("a"));
        assert!(stack.undo());
        assert_eq!(stack.current(), &initial);
        assert!(!stack.undo());

        assert!(stack.redo());
        assert!(stack.redo());
        assert_eq!(name(&stack).as_deref(), Some("b"));
        assert!(!stack.redo());
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut stack = CommandStack::new(Diagram::new("Process_1"), 0);
        stack.execute(&rename("Process_1", "a")).unwrap();
        stack.undo();
        assert!(stack.can_redo());

        stack.execute(&rename("Process_1", "c")).unwrap();
        assert!(!stack.can_redo());
        assert_eq!(stack.history().len(), 1);
    }

    #[test]
    fn test_failed_command_leaves_no_entry() {
        let mut stack = CommandStack::new(Diagram::new("Process_1"), 0);
        assert!(stack.execute(&rename("Task_9", "a")).is_err());
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_limit_discards_oldest() {
        let mut stack = CommandStack::new(Diagram::new("Process_1"), 2);
        for i in 0..3 {
            stack.execute(&CreateShapeCommand::new(ElementType::Task, "Process_1")).unwrap();
            stack.execute(&rename("Process_1", &i.to_string())).unwrap();
        }

        let history = stack.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].label, "update name of Process_1");
        assert!(history[0].label.starts_with("create Task in Process_1"));
        assert!(history[0].executed_at <= history[1].executed_at);

        assert!(stack.undo());
        assert!(stack.undo());
        assert!(!stack.undo());
        assert_eq!(stack.current().element("Process_1").unwrap().children.len(), 2);
    }
}
