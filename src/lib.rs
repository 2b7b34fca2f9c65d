//! A four-column kanban board for the terminal.
//!
//! Tasks live in a [`KanbanBoard`] that persists the whole collection through a
//! [`Storage`] collaborator after every change. Rendering goes through a pure
//! [`BoardView`] so the board logic can be exercised without a terminal.

pub mod app;
pub mod config;
pub mod drag;
pub mod error;
pub mod form;
pub mod kanban_board;
pub mod keymap;
pub mod storage;
pub mod task;
pub mod ui;
pub mod view;

pub use error::{BoardError, StorageError};
pub use kanban_board::{Confirm, KanbanBoard};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use task::{Priority, Status, Task, TaskId};
pub use view::{BoardView, TaskCounts};
