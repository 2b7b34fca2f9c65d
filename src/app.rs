//! Event loop binding terminal input to the board.

use crate::drag::DragSession;
use crate::error::BoardError;
use crate::kanban_board::{KanbanBoard, DELETE_PROMPT};
use crate::keymap::{self, Action};
use crate::storage::Storage;
use crate::task::{Status, TaskId};
use crate::ui::{self, Screen};
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use tracing::{debug, warn};

/// UI state that is not part of the board: selection, drag, dialogs.
#[derive(Debug, Default)]
pub struct App {
    selected_column: usize,
    selected_card: usize,
    drag: Option<DragSession>,
    pending_delete: Option<TaskId>,
    notice: Option<String>,
    area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn pending_delete(&self) -> Option<TaskId> {
        self.pending_delete
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn selection(&self) -> (usize, usize) {
        (self.selected_column, self.selected_card)
    }

    /// Sets the area used to resolve mouse positions; the run loop keeps it
    /// in sync with the last drawn frame.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn selected_task<S: Storage>(&self, board: &KanbanBoard<S>) -> Option<TaskId> {
        ui::selected_task(&board.render(), Some(self.selection()))
    }

    pub fn draw<S: Storage>(&self, f: &mut ratatui::Frame, board: &KanbanBoard<S>) {
        let dragging = self.drag.as_ref().map(|d| d.dragging());
        let view = crate::view::render_tasks(board.tasks(), dragging);
        let modal = board
            .is_modal_open()
            .then(|| (board.modal_title(), board.form()));
        let screen = Screen {
            board: &view,
            selected: Some(self.selection()),
            drop_target: self.drag.as_ref().and_then(|d| d.highlighted()),
            modal,
            confirm: self.pending_delete.map(|_| DELETE_PROMPT),
            notice: self.notice.as_deref(),
        };
        ui::draw(f, &screen);
    }

    pub fn handle_event<S: Storage>(&mut self, board: &mut KanbanBoard<S>, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(board, key),
            Event::Mouse(mouse) => self.handle_mouse(board, mouse),
            _ => {}
        }
    }

    pub fn handle_key<S: Storage>(&mut self, board: &mut KanbanBoard<S>, key: KeyEvent) {
        if let Some(id) = self.pending_delete {
            if let Some(action) = keymap::confirm_action(&key) {
                self.pending_delete = None;
                let approved = action == Action::Confirm;
                board.delete_task(id, &mut |_: &str| approved);
                self.clamp_selection(board);
            }
            return;
        }

        if board.is_modal_open() {
            if let Some(action) = keymap::modal_action(&key) {
                self.handle_modal_action(board, action);
            }
            return;
        }

        if let Some(action) = keymap::board_action(&key) {
            self.handle_board_action(board, action);
        }
    }

    fn handle_modal_action<S: Storage>(&mut self, board: &mut KanbanBoard<S>, action: Action) {
        match action {
            Action::NewTask => {
                board.open_modal(None);
                self.notice = None;
            }
            Action::Cancel => {
                board.close_modal();
                self.notice = None;
            }
            Action::NextField => board.form_mut().focus_next(),
            Action::PrevField => board.form_mut().focus_prev(),
            Action::Left => board.form_mut().cycle_choice(false),
            Action::Right => board.form_mut().cycle_choice(true),
            Action::Backspace => board.form_mut().backspace(),
            Action::Input(c) => board.form_mut().insert_char(c),
            Action::Submit => self.submit(board),
            _ => {}
        }
    }

    fn submit<S: Storage>(&mut self, board: &mut KanbanBoard<S>) {
        match board.save_task() {
            Ok(id) => {
                self.notice = None;
                self.select_task(board, id);
            }
            Err(BoardError::EmptyTitle) => {
                self.notice = Some(BoardError::EmptyTitle.to_string());
            }
            Err(err) => {
                warn!("could not save task: {err}");
                self.notice = Some(err.to_string());
                board.close_modal();
            }
        }
    }

    fn handle_board_action<S: Storage>(&mut self, board: &mut KanbanBoard<S>, action: Action) {
        self.notice = None;
        match action {
            Action::Quit => self.should_quit = true,
            Action::NewTask => board.open_modal(None),
            Action::Cancel => board.close_modal(),
            Action::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
                self.clamp_selection(board);
            }
            Action::Right => {
                self.selected_column = (self.selected_column + 1).min(Status::COLUMNS.len() - 1);
                self.clamp_selection(board);
            }
            Action::Up => self.selected_card = self.selected_card.saturating_sub(1),
            Action::Down => {
                self.selected_card += 1;
                self.clamp_selection(board);
            }
            Action::Edit => {
                if let Some(id) = self.selected_task(board) {
                    board.open_modal(Some(id));
                }
            }
            Action::Delete => self.pending_delete = self.selected_task(board),
            Action::MoveLeft | Action::MoveRight => {
                let Some(id) = self.selected_task(board) else {
                    return;
                };
                let target = if action == Action::MoveLeft {
                    self.selected_column.saturating_sub(1)
                } else {
                    (self.selected_column + 1).min(Status::COLUMNS.len() - 1)
                };
                if board.move_task(id, Status::COLUMNS[target].clone()) {
                    self.select_task(board, id);
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse<S: Storage>(&mut self, board: &mut KanbanBoard<S>, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        let layout = ui::board_layout(self.area);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.pending_delete.is_some() {
                    return;
                }
                if board.is_modal_open() {
                    if !ui::contains(ui::modal_area(self.area), x, y) {
                        board.close_modal();
                        self.notice = None;
                    }
                    return;
                }

                let view = board.render();
                let hit = ui::card_at(&view, &layout, Some(self.selection()), x, y);
                let Some((column, card, rect)) = hit else {
                    return;
                };
                self.selected_column = column;
                self.selected_card = card;
                let id = view.columns[column].cards()[card].id;

                let (edit, delete) = ui::card_action_areas(rect);
                if ui::contains(edit, x, y) {
                    board.open_modal(Some(id));
                } else if ui::contains(delete, x, y) {
                    self.pending_delete = Some(id);
                } else {
                    debug!(id, "drag started");
                    self.drag = Some(DragSession::start(id));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(drag) = self.drag.as_mut() else {
                    return;
                };
                let under = ui::column_at(&layout, x, y);
                let still_inside = under.is_some() && drag.highlighted() == under.as_ref();
                drag.leave(still_inside);
                if let Some(column) = under {
                    drag.over(column);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.take() else {
                    return;
                };
                let id = drag.dragging();
                // A press and release without any drag-over is a plain click.
                if drag.highlighted().is_none() {
                    return;
                }
                if let Some(column) = ui::column_at(&layout, x, y) {
                    let (payload, status) = drag.drop_on(column);
                    if board.move_task_from_payload(&payload, status) {
                        self.select_task(board, id);
                    }
                }
            }
            _ => {}
        }
    }

    fn select_task<S: Storage>(&mut self, board: &KanbanBoard<S>, id: TaskId) {
        let view = board.render();
        for (c, column) in view.columns.iter().enumerate() {
            if let Some(i) = column.cards().iter().position(|card| card.id == id) {
                self.selected_column = c;
                self.selected_card = i;
                return;
            }
        }
    }

    fn clamp_selection<S: Storage>(&mut self, board: &KanbanBoard<S>) {
        let count = board.render().columns[self.selected_column].count;
        self.selected_card = self.selected_card.min(count.saturating_sub(1));
    }
}

pub fn run_app<B: Backend, S: Storage>(
    terminal: &mut Terminal<B>,
    board: &mut KanbanBoard<S>,
) -> io::Result<()> {
    let mut app = App::new();
    loop {
        let frame = terminal.draw(|f| app.draw(f, board))?;
        app.set_area(frame.area);

        app.handle_event(board, event::read()?);
        if app.should_quit() {
            return Ok(());
        }
    }
}
