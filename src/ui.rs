use crate::form::{FormField, TaskForm};
use crate::task::{Priority, Status, TaskId};
use crate::view::{BoardView, CardView, ColumnBody, ColumnView, EMPTY_COLUMN_TEXT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const CARD_ACTIONS: &str = " ✎ ✕ ";
const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 14;

/// Everything a frame needs, borrowed from the app for one draw.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub board: &'a BoardView,
    pub selected: Option<(usize, usize)>,
    pub drop_target: Option<&'a Status>,
    pub modal: Option<(&'static str, &'a TaskForm)>,
    pub confirm: Option<&'a str>,
    pub notice: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub header: Rect,
    pub columns: [Rect; 4],
    pub footer: Rect,
}

pub fn board_layout(area: Rect) -> BoardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(rows[1]);

    BoardLayout {
        header: rows[0],
        columns: [chunks[0], chunks[1], chunks[2], chunks[3]],
        footer: rows[2],
    }
}

pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn column_inner(column: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(column)
}

fn card_height(card: &CardView) -> u16 {
    if card.description.is_some() {
        5
    } else {
        4
    }
}

/// Card positions inside a column, scrolled so `selected` is visible.
pub fn card_rects(
    column: Rect,
    cards: &[CardView],
    selected: Option<usize>,
) -> Vec<(usize, Rect)> {
    let inner = column_inner(column);
    let mut start = 0;
    if let Some(selected) = selected.filter(|s| *s < cards.len()) {
        while start < selected {
            let needed: u16 = cards[start..=selected].iter().map(card_height).sum();
            if needed <= inner.height {
                break;
            }
            start += 1;
        }
    }

    let mut rects = Vec::new();
    let mut y = inner.y;
    for (index, card) in cards.iter().enumerate().skip(start) {
        let height = card_height(card);
        if y + height > inner.y + inner.height {
            break;
        }
        rects.push((index, Rect::new(inner.x, y, inner.width, height)));
        y += height;
    }
    rects
}

/// Click targets for a card's edit and delete affordances on its top border.
pub fn card_action_areas(card: Rect) -> (Rect, Rect) {
    let right = card.x + card.width;
    let edit = Rect::new(right.saturating_sub(5), card.y, 1, 1);
    let delete = Rect::new(right.saturating_sub(3), card.y, 1, 1);
    (edit, delete)
}

pub fn card_at(
    board: &BoardView,
    layout: &BoardLayout,
    selected: Option<(usize, usize)>,
    x: u16,
    y: u16,
) -> Option<(usize, usize, Rect)> {
    layout.columns.iter().enumerate().find_map(|(col, rect)| {
        let sel = selected.filter(|(c, _)| *c == col).map(|(_, i)| i);
        card_rects(*rect, board.columns[col].cards(), sel)
            .into_iter()
            .find(|(_, card)| contains(*card, x, y))
            .map(|(index, card)| (col, index, card))
    })
}

pub fn column_at(layout: &BoardLayout, x: u16, y: u16) -> Option<Status> {
    layout
        .columns
        .iter()
        .position(|rect| contains(*rect, x, y))
        .map(|i| Status::COLUMNS[i].clone())
}

pub fn modal_area(area: Rect) -> Rect {
    centered(area, MODAL_WIDTH, MODAL_HEIGHT)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn priority_color(priority: &Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
        Priority::Unknown(_) => Color::Gray,
    }
}

pub fn draw(f: &mut Frame, screen: &Screen) {
    let layout = board_layout(f.area());

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Task Board", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  {} tasks", screen.board.counts.total())),
        ])),
        layout.header,
    );

    for (i, column) in screen.board.columns.iter().enumerate() {
        let selected = screen.selected.filter(|(c, _)| *c == i).map(|(_, card)| card);
        let focused = screen.selected.map_or(false, |(c, _)| c == i);
        let highlighted = screen.drop_target == Some(&column.status);
        draw_column(f, layout.columns[i], column, selected, focused, highlighted);
    }

    let footer = match screen.notice {
        Some(notice) => Line::from(Span::styled(notice, Style::default().fg(Color::Red))),
        None => Line::from(
            "Ctrl+N new  e edit  d delete  Shift+←/→ move  drag cards with the mouse  q quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(Paragraph::new(footer), layout.footer);

    if let Some((title, form)) = screen.modal {
        draw_modal(f, title, form);
    }
    if let Some(message) = screen.confirm {
        draw_confirm(f, message);
    }
}

fn draw_column(
    f: &mut Frame,
    area: Rect,
    column: &ColumnView,
    selected: Option<usize>,
    focused: bool,
    highlighted: bool,
) {
    let border_style = if highlighted {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(format!("{} ({})", column.heading, column.count))
        .borders(Borders::ALL)
        .border_style(border_style);
    f.render_widget(block, area);

    match &column.body {
        ColumnBody::Empty => {
            let inner = column_inner(area);
            f.render_widget(
                Paragraph::new(EMPTY_COLUMN_TEXT)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                inner,
            );
        }
        ColumnBody::Cards(cards) => {
            for (index, rect) in card_rects(area, cards, selected) {
                draw_card(f, rect, &cards[index], selected == Some(index));
            }
        }
    }
}

fn draw_card(f: &mut Frame, area: Rect, card: &CardView, selected: bool) {
    let mut border_style = Style::default().fg(priority_color(&card.priority));
    if card.dragging {
        border_style = border_style.add_modifier(Modifier::DIM);
    }
    if selected {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("#{}", card.id))
        .title(Line::from(CARD_ACTIONS).right_aligned());

    let mut lines = vec![Line::from(Span::styled(
        card.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(description) = &card.description {
        lines.push(Line::from(Span::styled(
            description.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(
            card.priority_label.as_str(),
            Style::default().fg(priority_color(&card.priority)),
        ),
        Span::raw("  "),
        Span::raw(card.assignee.as_str()),
    ]));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_modal(f: &mut Frame, title: &str, form: &TaskForm) {
    let area = modal_area(f.area());
    f.render_widget(Clear, area);

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .flat_map(|field| {
            let focused = form.focus == *field;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value = if field.is_text() {
                let cursor = if focused { "_" } else { "" };
                format!("{}{}", form.value(*field), cursor)
            } else {
                format!("< {} >", form.value(*field))
            };
            [
                Line::from(vec![
                    Span::styled(format!("{:<12}", field.label()), label_style),
                    Span::raw(value),
                ]),
                Line::from(""),
            ]
        })
        .chain(std::iter::once(
            Line::from("Enter save  Esc cancel  Tab next field")
                .style(Style::default().fg(Color::DarkGray)),
        ))
        .collect();

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}

fn draw_confirm(f: &mut Frame, message: &str) {
    let area = centered(f.area(), (message.len() as u16).saturating_add(4), 5);
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(vec![Line::from(message), Line::from("y / n")])
            .alignment(Alignment::Center)
            .block(Block::default().title("Confirm").borders(Borders::ALL)),
        area,
    );
}

pub fn selected_task(board: &BoardView, selected: Option<(usize, usize)>) -> Option<TaskId> {
    let (column, card) = selected?;
    board.columns.get(column)?.cards().get(card).map(|c| c.id)
}
