use crate::keyboard::layout::Row;

/// Output side of the typer. Implementations draw; they never decide selection.
///
/// The session pushes its whole visible state after every command, so
/// implementations may treat each call as idempotent.
pub trait RenderSurface {
    /// Redraw a character row from its display glyphs (case already applied).
    fn render(&mut self, row: Row, glyphs: &[char]);

    /// Mark `index` as the selected item of `row`.
    fn highlight(&mut self, row: Row, index: usize);

    /// Mark `row` as the one receiving directional input.
    fn activate_row(&mut self, row: Row);

    fn show_row(&mut self, row: Row);
    fn hide_row(&mut self, row: Row);

    /// Accumulated text and pending character, both as numeric display tokens.
    fn display_text(&mut self, encoded_buffer: &str, encoded_current: &str);

    /// Hand focus (and the resulting text) back to the originating field.
    fn focus_host_field(&mut self, value: &str);

    fn blur_host_field(&mut self);
}

/// Surface that draws nothing, for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn render(&mut self, _row: Row, _glyphs: &[char]) {}
    fn highlight(&mut self, _row: Row, _index: usize) {}
    fn activate_row(&mut self, _row: Row) {}
    fn show_row(&mut self, _row: Row) {}
    fn hide_row(&mut self, _row: Row) {}
    fn display_text(&mut self, _encoded_buffer: &str, _encoded_current: &str) {}
    fn focus_host_field(&mut self, _value: &str) {}
    fn blur_host_field(&mut self) {}
}
