use std::collections::{HashMap, HashSet};

use typer::{RenderSurface, Row};

/// Surface that records the last state pushed for each row plus every
/// host-field call, so tests can assert on what a real view would show.
#[derive(Default, Debug, Clone)]
pub struct MockSurface {
    pub rows: HashMap<Row, Vec<char>>,
    pub highlights: HashMap<Row, usize>,
    pub visible: HashSet<Row>,
    pub active: Option<Row>,
    pub encoded_buffer: String,
    pub encoded_current: String,
    pub focused: Vec<String>,
    pub blurs: usize,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self, row: Row) -> bool {
        self.visible.contains(&row)
    }

    pub fn glyphs(&self, row: Row) -> &[char] {
        self.rows.get(&row).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl RenderSurface for MockSurface {
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
        self.encoded_buffer = encoded_buffer.to_string();
        self.encoded_current = encoded_current.to_string();
    }

    fn focus_host_field(&mut self, value: &str) {
        self.focused.push(value.to_string());
    }

    fn blur_host_field(&mut self) {
        self.blurs += 1;
    }
}
