use std::collections::{HashMap, HashSet};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::keyboard::display::decode_entities;
use crate::keyboard::layout::{BUTTONS, ROW_ORDER, Row};
use crate::render::RenderSurface;
use crate::ui::layout::row_areas;
use crate::ui::theme::Theme;

/// Rendering surface for the terminal: records what the typer pushes so the
/// widget can draw it on the next frame.
#[derive(Clone, Debug, Default)]
pub struct ScreenModel {
    pub rows: HashMap<Row, Vec<char>>,
    pub highlights: HashMap<Row, usize>,
    pub visible: HashSet<Row>,
    pub active: Option<Row>,
    pub buffer: String,
    pub current: String,
    /// Value handed back to the host field on close, not yet consumed.
    pub returned_value: Option<String>,
    pub field_focused: bool,
}

impl ScreenModel {
    pub fn new() -> Self {
        Self {
            field_focused: true,
            ..Self::default()
        }
    }

    /// Take the value the typer handed back, if any.
    pub fn take_returned_value(&mut self) -> Option<String> {
        self.returned_value.take()
    }

    pub fn visible_rows(&self) -> Vec<Row> {
        ROW_ORDER.iter().copied().filter(|r| self.visible.contains(r)).collect()
    }
}

impl RenderSurface for ScreenModel {
    fn render(&mut self, row: Row, glyphs: &[char]) {
        self.rows.insert(row, glyphs.to_vec());
    }

    fn highlight(&mut self, row: Row, index: usize) {
        self.highlights.insert(row, index);
    }

    fn activate_row(&mut self, row: Row) {
        self.active = Some(row);
    }

    fn show_row(&mut self, row: Row) {
        self.visible.insert(row);
    }

    fn hide_row(&mut self, row: Row) {
        self.visible.remove(&row);
    }

    fn display_text(&mut self, encoded_buffer: &str, encoded_current: &str) {
        self.buffer = decode_entities(encoded_buffer);
        self.current = decode_entities(encoded_current);
    }

    fn focus_host_field(&mut self, value: &str) {
        self.returned_value = Some(value.to_string());
        self.field_focused = true;
    }

    fn blur_host_field(&mut self) {
        self.field_focused = false;
    }
}

/// Indices to draw for a wrapping carousel of `len` items with `selected`
/// centred in `slots` positions. Repeats items when the row is short.
pub fn carousel_window(len: usize, selected: usize, slots: usize) -> Vec<usize> {
    if len == 0 || slots == 0 {
        return Vec::new();
    }
    let half = (slots / 2) as i64;
    (0..slots as i64)
        .map(|i| (selected as i64 - half + i).rem_euclid(len as i64) as usize)
        .collect()
}

const KEY_WIDTH: u16 = 3;

pub struct TyperView<'a> {
    screen: &'a ScreenModel,
    theme: &'a Theme,
}

impl<'a> TyperView<'a> {
    pub fn new(screen: &'a ScreenModel, theme: &'a Theme) -> Self {
        Self { screen, theme }
    }

    fn render_label(&self, row: Row, area: Rect, buf: &mut Buffer) -> Rect {
        let colors = &self.theme.colors;
        let active = self.screen.active == Some(row);
        let marker = if active { ">" } else { " " };
        let style = if active {
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.muted())
        };
        buf.set_string(area.x, area.y, format!("{marker}{:<10}", row.as_str()), style);
        Rect::new(area.x + 11, area.y, area.width.saturating_sub(11), 1)
    }

    fn render_carousel(&self, row: Row, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some(glyphs) = self.screen.rows.get(&row) else {
            return;
        };
        let selected = self.screen.highlights.get(&row).copied().unwrap_or(0);
        let active = self.screen.active == Some(row);
        // The secondary row is a plain list, not a carousel
        let indices: Vec<usize> = if row == Row::Secondary {
            (0..glyphs.len()).collect()
        } else {
            carousel_window(glyphs.len(), selected, (area.width / KEY_WIDTH) as usize)
        };
        let centre = indices.len() / 2;

        for (slot, &idx) in indices.iter().enumerate() {
            let x = area.x + slot as u16 * KEY_WIDTH;
            if x + KEY_WIDTH > area.x + area.width {
                break;
            }
            let is_selected = if row == Row::Secondary { idx == selected } else { slot == centre };
            let style = if is_selected && active {
                Style::default().fg(colors.bg()).bg(colors.selected_key())
            } else if is_selected {
                Style::default().fg(colors.fg()).bg(colors.accent_dim())
            } else {
                Style::default().fg(colors.fg())
            };
            buf.set_string(x, area.y, format!(" {} ", glyphs[idx]), style);
        }
    }

    fn render_value(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let text_style = Style::default().fg(colors.text_value());
        let width = area.width as usize;
        let text: String = {
            let chars: Vec<char> = self.screen.buffer.chars().collect();
            let keep = width.saturating_sub(1);
            chars[chars.len().saturating_sub(keep)..].iter().collect()
        };
        buf.set_string(area.x, area.y, &text, text_style);
        let cursor_x = area.x + text.chars().count() as u16;
        if cursor_x < area.x + area.width {
            buf.set_string(
                cursor_x,
                area.y,
                &self.screen.current,
                Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg()),
            );
        }
    }

    fn render_buttons(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let active = self.screen.active == Some(Row::Buttons);
        let selected = self.screen.highlights.get(&Row::Buttons).copied().unwrap_or(0);
        let mut x = area.x;
        for (i, button) in BUTTONS.iter().enumerate() {
            let label = format!("[ {} ]", button.label());
            let style = if active && i == selected {
                Style::default().fg(colors.bg()).bg(colors.selected_key())
            } else {
                Style::default().fg(colors.fg())
            };
            if x + label.len() as u16 > area.x + area.width {
                break;
            }
            buf.set_string(x, area.y, &label, style);
            x += label.len() as u16 + 1;
        }
    }
}

impl Widget for TyperView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Typer ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 20 {
            return;
        }

        for (row, line) in row_areas(inner, &self.screen.visible_rows()) {
            let content = self.render_label(row, line, buf);
            match row {
                Row::Buttons => self.render_buttons(content, buf),
                Row::Value => self.render_value(content, buf),
                _ => self.render_carousel(row, content, buf),
            }
        }
    }
}
