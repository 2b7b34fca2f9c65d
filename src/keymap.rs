use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means, independent of where it is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NewTask,
    Cancel,
    Quit,
    Left,
    Right,
    Up,
    Down,
    MoveLeft,
    MoveRight,
    Edit,
    Delete,
    Confirm,
    Decline,
    NextField,
    PrevField,
    Submit,
    Backspace,
    Input(char),
}

/// Ctrl+N on Linux/Windows, Cmd+N (reported as Super) on macOS.
pub fn is_new_task_chord(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('n') | KeyCode::Char('N'))
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

/// Shortcuts that apply everywhere, modal open or not.
pub fn global_action(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_new_task_chord(key) {
        return Some(Action::NewTask);
    }
    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

pub fn board_action(key: &KeyEvent) -> Option<Action> {
    if let Some(action) = global_action(key) {
        return Some(action);
    }
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Left if shift => Some(Action::MoveLeft),
        KeyCode::Right if shift => Some(Action::MoveRight),
        KeyCode::Char('H') => Some(Action::MoveLeft),
        KeyCode::Char('L') => Some(Action::MoveRight),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Right),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Enter | KeyCode::Char('e') => Some(Action::Edit),
        KeyCode::Delete | KeyCode::Char('d') => Some(Action::Delete),
        KeyCode::Char('a') => Some(Action::NewTask),
        _ => None,
    }
}

pub fn confirm_action(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Decline),
        _ => None,
    }
}

pub fn modal_action(key: &KeyEvent) -> Option<Action> {
    if let Some(action) = global_action(key) {
        return Some(action);
    }
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Input(c))
        }
        _ => None,
    }
}
