//! The task board: the task collection, the id counter and the modal's edit
//! target. Every mutation writes the full collection back to storage.

use crate::error::{BoardError, BoardResult};
use crate::form::TaskForm;
use crate::storage::{load_tasks, save_tasks, Storage};
use crate::task::{Status, Task, TaskId};
use crate::view::{render_tasks, BoardView, TaskCounts};
use chrono::Utc;
use tracing::{debug, error, info, warn};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug)]
pub struct KanbanBoard<S: Storage> {
    tasks: Vec<Task>,
    next_id: Option<TaskId>,
    editing: Option<TaskId>,
    form: TaskForm,
    modal_open: bool,
    storage: S,
}

impl<S: Storage> KanbanBoard<S> {
    /// Loads the persisted collection (or the seed tasks) from `storage`.
    pub fn new(storage: S) -> Self {
        let tasks = load_tasks(&storage);
        let next_id = next_task_id(&tasks);
        match next_id {
            Some(next_id) => debug!(next_id, "board initialized"),
            None => error!("stored ids reach {}, new tasks cannot be created", TaskId::MAX),
        }
        Self {
            tasks,
            next_id,
            editing: None,
            form: TaskForm::default(),
            modal_open: false,
            storage,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The id the next created task gets, `None` once ids are exhausted.
    pub fn next_id(&self) -> Option<TaskId> {
        self.next_id
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn modal_title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Add New Task"
        }
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Opens the modal, editing `task` when given and creating otherwise.
    pub fn open_modal(&mut self, task: Option<TaskId>) {
        let found = task
            .and_then(|id| self.get_task(id))
            .map(|t| (TaskForm::from_task(t), t.id));
        match found {
            Some((form, id)) => {
                self.form = form;
                self.editing = Some(id);
            }
            None => {
                if let Some(id) = task {
                    warn!(id, "cannot edit missing task, opening empty form");
                }
                self.form.reset();
                self.editing = None;
            }
        }
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.form.reset();
        self.editing = None;
    }

    /// Applies the form to the collection. On an empty title nothing changes
    /// and the modal stays open.
    pub fn save_task(&mut self) -> BoardResult<TaskId> {
        let draft = self.form.draft();
        if draft.title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }

        let id = match self.editing {
            Some(id) => {
                let task = self
                    .tasks
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or(BoardError::TaskNotFound(id))?;
                task.title = draft.title;
                task.description = draft.description;
                task.priority = draft.priority;
                task.assignee = draft.assignee;
                task.status = draft.status;
                info!(id, "task updated");
                id
            }
            None => {
                let id = self.next_id.ok_or(BoardError::IdsExhausted)?;
                self.next_id = id.checked_add(1);
                self.tasks.push(Task {
                    id,
                    title: draft.title,
                    description: draft.description,
                    priority: draft.priority,
                    assignee: draft.assignee,
                    status: draft.status,
                    created_at: Utc::now(),
                });
                info!(id, "task created");
                id
            }
        };

        self.persist();
        self.close_modal();
        Ok(id)
    }

    /// Removes the task after `confirm` approves. Returns whether anything was removed.
    pub fn delete_task(&mut self, id: TaskId, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(id, "delete declined");
            return false;
        }
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!(id, "delete of unknown task ignored");
            return false;
        }
        info!(id, "task deleted");
        self.persist();
        true
    }

    /// Moves a task to `status`. Returns false, writing nothing, when the task
    /// is missing or already there.
    pub fn move_task(&mut self, id: TaskId, status: Status) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "move of unknown task ignored");
            return false;
        };
        if task.status == status {
            return false;
        }
        info!(id, from = %task.status, to = %status, "task moved");
        task.status = status;
        self.persist();
        true
    }

    /// Same as [`move_task`](Self::move_task) for an id carried as drag text.
    pub fn move_task_from_payload(&mut self, payload: &str, status: Status) -> bool {
        match parse_payload(payload) {
            Some(id) => self.move_task(id, status),
            None => {
                warn!(payload, "ignoring drop with invalid task id");
                false
            }
        }
    }

    pub fn render(&self) -> BoardView {
        render_tasks(&self.tasks, None)
    }

    pub fn task_counts(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.tasks)
    }

    fn persist(&mut self) {
        if let Err(err) = save_tasks(&mut self.storage, &self.tasks) {
            error!("Error saving tasks: {err}");
        }
    }
}

pub fn parse_payload(payload: &str) -> Option<TaskId> {
    payload.trim().parse().ok()
}

fn next_task_id(tasks: &[Task]) -> Option<TaskId> {
    match tasks.iter().map(|t| t.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
