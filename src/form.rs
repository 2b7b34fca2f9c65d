use crate::task::{Priority, Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Priority,
    Assignee,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Assignee,
        FormField::Status,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::Assignee => "Assignee",
            FormField::Status => "Status",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Title | FormField::Description | FormField::Assignee
        )
    }

    fn offset(self, step: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ALL[(index + step).rem_euclid(len) as usize]
    }
}

/// Values held by the task modal while it is open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub status: Status,
    pub focus: FormField,
}

/// Trimmed form values, ready to become or update a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub status: Status,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority.clone(),
            assignee: task.assignee.clone().unwrap_or_default(),
            status: task.status.clone(),
            focus: FormField::Title,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.offset(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.offset(-1);
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Description => self.description.clone(),
            FormField::Priority => self.priority.label(),
            FormField::Assignee => self.assignee.clone(),
            FormField::Status => self.status.heading().to_string(),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Assignee => Some(&mut self.assignee),
            FormField::Priority | FormField::Status => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(text) = self.text_mut() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    /// Cycles the focused choice field; text fields are left alone.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            FormField::Priority => {
                self.priority = if forward {
                    self.priority.next()
                } else {
                    self.priority.prev()
                }
            }
            FormField::Status => {
                self.status = if forward {
                    self.status.next()
                } else {
                    self.status.prev()
                }
            }
            _ => {}
        }
    }

    pub fn draft(&self) -> TaskDraft {
        let optional = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        TaskDraft {
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            priority: self.priority.clone(),
            assignee: optional(&self.assignee),
            status: self.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_and_drops_blank_optionals() {
        let form = TaskForm {
            title: "  Write tests ".into(),
            description: "   ".into(),
            assignee: " Ana ".into(),
            ..TaskForm::default()
        };
        let draft = form.draft();
        assert_eq!(draft.title, "Write tests");
        assert_eq!(draft.description, None);
        assert_eq!(draft.assignee.as_deref(), Some("Ana"));
    }

    #[test]
    fn typing_only_touches_text_fields() {
        let mut form = TaskForm::default();
        form.insert_char('a');
        form.focus = FormField::Priority;
        form.insert_char('b');
        form.cycle_choice(true);
        assert_eq!(form.title, "a");
        assert_eq!(form.priority, Priority::High);
    }

    #[test]
    fn focus_wraps() {
        let mut form = TaskForm::default();
        form.focus_prev();
        assert_eq!(form.focus, FormField::Status);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
    }
}
