//! Drag-and-drop between columns.
//!
//! A card puts its id on the session as text when the drag starts; the column
//! it is released over turns that text back into a move.

use crate::task::{Status, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    source: TaskId,
    payload: String,
    over: Option<Status>,
}

impl DragSession {
    pub fn start(id: TaskId) -> Self {
        Self {
            source: id,
            payload: id.to_string(),
            over: None,
        }
    }

    /// The card currently marked as dragging.
    pub fn dragging(&self) -> TaskId {
        self.source
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Column currently highlighted as a drop target.
    pub fn highlighted(&self) -> Option<&Status> {
        self.over.as_ref()
    }

    pub fn over(&mut self, column: Status) {
        self.over = Some(column);
    }

    /// Clears the highlight unless the pointer is still inside the column,
    /// which happens when it only crossed onto one of the column's cards.
    pub fn leave(&mut self, still_inside: bool) {
        if !still_inside {
            self.over = None;
        }
    }

    /// Ends the drag over `column`, yielding the payload and target status.
    pub fn drop_on(mut self, column: Status) -> (String, Status) {
        self.over = None;
        (self.payload, column)
    }
}
