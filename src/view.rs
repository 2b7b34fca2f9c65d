//! Render instructions derived from the task collection.
//!
//! Nothing here touches the terminal; `ui` draws whatever this produces.

use crate::task::{Priority, Status, Task, TaskId};

pub const EMPTY_COLUMN_TEXT: &str = "No tasks yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub review: usize,
    pub done: usize,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            *counts.slot_mut(&task.status.column()) += 1;
        }
        counts
    }

    pub fn get(&self, status: &Status) -> usize {
        match status.column() {
            Status::InProgress => self.in_progress,
            Status::Review => self.review,
            Status::Done => self.done,
            _ => self.todo,
        }
    }

    fn slot_mut(&mut self, column: &Status) -> &mut usize {
        match column {
            Status::InProgress => &mut self.in_progress,
            Status::Review => &mut self.review,
            Status::Done => &mut self.done,
            _ => &mut self.todo,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.review + self.done
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub priority_label: String,
    pub assignee: String,
    pub draggable: bool,
    pub drag_payload: String,
    pub dragging: bool,
}

impl CardView {
    fn new(task: &Task, dragging: Option<TaskId>) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority.clone(),
            priority_label: task.priority.label(),
            assignee: task.assignee_display().to_string(),
            draggable: true,
            drag_payload: task.id.to_string(),
            dragging: dragging == Some(task.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnBody {
    Empty,
    Cards(Vec<CardView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub status: Status,
    pub heading: &'static str,
    pub count: usize,
    pub body: ColumnBody,
}

impl ColumnView {
    pub fn cards(&self) -> &[CardView] {
        match &self.body {
            ColumnBody::Cards(cards) => cards,
            ColumnBody::Empty => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    pub counts: TaskCounts,
}

impl BoardView {
    pub fn column(&self, status: &Status) -> &ColumnView {
        &self.columns[status.column_index()]
    }
}

/// Groups tasks into the four columns, keeping collection order within each.
pub fn render_tasks(tasks: &[Task], dragging: Option<TaskId>) -> BoardView {
    let counts = TaskCounts::from_tasks(tasks);
    let columns = Status::COLUMNS
        .iter()
        .map(|status| {
            let cards: Vec<CardView> = tasks
                .iter()
                .filter(|t| t.status.column() == *status)
                .map(|t| CardView::new(t, dragging))
                .collect();
            ColumnView {
                status: status.clone(),
                heading: status.heading(),
                count: cards.len(),
                body: if cards.is_empty() {
                    ColumnBody::Empty
                } else {
                    ColumnBody::Cards(cards)
                },
            }
        })
        .collect();

    BoardView { columns, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::seed_tasks;
    use chrono::Utc;

    #[test]
    fn seed_groups_in_collection_order() {
        let view = render_tasks(&seed_tasks(Utc::now()), None);
        let todo: Vec<TaskId> = view
            .column(&Status::Todo)
            .cards()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(todo, vec![3, 5]);
        assert_eq!(view.counts.total(), 5);
        assert_eq!(view.column(&Status::Done).count, 1);
    }

    #[test]
    fn unknown_status_renders_as_todo() {
        let mut tasks = seed_tasks(Utc::now());
        tasks[0].status = Status::Unknown("archived".into());
        let view = render_tasks(&tasks, None);
        assert_eq!(view.column(&Status::Todo).count, 3);
        assert_eq!(view.column(&Status::Done).body, ColumnBody::Empty);
        assert_eq!(view.counts.done, 0);
    }

    #[test]
    fn cards_carry_display_fields() {
        let mut tasks = seed_tasks(Utc::now());
        tasks[1].assignee = None;
        let view = render_tasks(&tasks, Some(2));
        let card = &view.column(&Status::InProgress).cards()[0];
        assert_eq!(card.assignee, "Unassigned");
        assert_eq!(card.priority_label, "Medium");
        assert_eq!(card.drag_payload, "2");
        assert!(card.draggable && card.dragging);
    }

    #[test]
    fn empty_board_shows_placeholders() {
        let view = render_tasks(&[], None);
        assert!(view.columns.iter().all(|c| c.body == ColumnBody::Empty));
        assert_eq!(view.counts, TaskCounts::default());
    }
}
