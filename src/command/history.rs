use log::debug;

use super::Command;
use crate::document::Document;

/// Manages the history of recorded commands for undo/redo functionality.
///
/// History is linear: recording a new command discards everything that could be redone.
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a command whose effect has already been applied to the document
    pub fn push(&mut self, command: Command) {
        debug!("Recording {} command", command.name());
        self.redo_stack.clear();
        self.undo_stack.push(command);
    }

    /// Undo the last recorded command. Returns false if there was nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        debug!("Undoing {} command", command.name());
        command.undo(document);
        self.redo_stack.push(command);
        true
    }

    /// Redo the last undone command. Returns false if there was nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        debug!("Redoing {} command", command.name());
        command.execute(document);
        self.undo_stack.push(command);
        true
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drops both stacks without applying anything
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;
    use egui::{Color32, pos2};

    fn stroke(document: &mut Document) -> Command {
        let segments = vec![
            Line::new(pos2(0.0, 0.0), pos2(5.0, 5.0), Color32::BLACK, 2.0),
            Line::new(pos2(5.0, 5.0), pos2(9.0, 5.0), Color32::BLACK, 2.0),
        ];
        document.lines_mut().extend(&segments);
        Command::VectorStroke { segments }
    }

    #[test]
    fn empty_history_is_a_no_op() {
        let mut document = Document::new(10, 10);
        let mut history = CommandHistory::new();
        assert!(!history.undo(&mut document));
        assert!(!history.redo(&mut document));
    }

    #[test]
    fn undo_then_redo() {
        let mut document = Document::new(10, 10);
        let mut history = CommandHistory::new();
        let command = stroke(&mut document);
        history.push(command);
        let after = document.lines().clone();

        assert!(history.undo(&mut document));
        assert!(document.lines().is_empty());
        assert!(history.can_redo());

        assert!(history.redo(&mut document));
        assert_eq!(document.lines(), &after);
        assert!(!history.can_redo());
    }

    #[test]
    fn push_truncates_redo() {
        let mut document = Document::new(10, 10);
        let mut history = CommandHistory::new();
        let first = stroke(&mut document);
        history.push(first);
        history.undo(&mut document);

        let second = stroke(&mut document);
        history.push(second);
        assert_eq!(history.redo_len(), 0);
        assert!(!history.redo(&mut document));
        assert_eq!(document.lines().len(), 2);
    }

    #[test]
    fn clear_applies_nothing() {
        let mut document = Document::new(10, 10);
        let mut history = CommandHistory::new();
        let command = stroke(&mut document);
        history.push(command);
        history.clear();
        assert!(!history.can_undo());
        assert_eq!(document.lines().len(), 2);
    }
}
