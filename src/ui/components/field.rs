use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// The host form field the typer edits on behalf of.
pub struct FieldView<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FieldView<'a> {
    pub fn new(label: &'a str, value: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            focused,
            theme,
        }
    }
}

impl Widget for FieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));

        let mut spans = vec![Span::styled(self.value, Style::default().fg(colors.fg()))];
        if self.focused {
            spans.push(Span::styled(
                " ",
                Style::default()
                    .bg(colors.text_cursor_bg())
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
