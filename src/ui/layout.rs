use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::keyboard::layout::{ROW_ORDER, Row};

/// Screen areas of the host form: header, the field, the typer panel, footer.
pub struct AppLayout {
    pub header: Rect,
    pub field: Rect,
    pub typer: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            field: vertical[1],
            typer: vertical[2],
            footer: vertical[3],
        }
    }
}

/// One line per visible row, in row order.
pub fn row_areas(inner: Rect, visible: &[Row]) -> Vec<(Row, Rect)> {
    let rows: Vec<Row> = ROW_ORDER.iter().copied().filter(|r| visible.contains(r)).collect();
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let y = inner.y + (i as u16) * 2;
        if y >= inner.y + inner.height {
            break;
        }
        out.push((row, Rect::new(inner.x, y, inner.width, 1)));
    }
    out
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}
