use std::collections::{HashMap, HashSet};

use crate::keyboard::layout::{BUTTONS, Row};
use crate::keyboard::model::KeyboardDefinition;

/// The character most recently typed from a character row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LastChosen {
    pub row: Row,
    pub index: usize,
}

/// Cursor position across rows plus row visibility.
///
/// Pure index arithmetic; never touches the keyboard or text beyond reading
/// row lengths.
#[derive(Clone, Debug)]
pub struct SelectionState {
    pub active_row: Row,
    index_by_row: HashMap<Row, usize>,
    pub last_chosen: Option<LastChosen>,
    pub secondary_visible: bool,
    hidden_rows: HashSet<Row>,
}

impl SelectionState {
    pub fn new(hidden_rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            active_row: Row::Value,
            index_by_row: HashMap::new(),
            last_chosen: None,
            secondary_visible: false,
            hidden_rows: hidden_rows.into_iter().collect(),
        }
    }

    pub fn index(&self, row: Row) -> usize {
        self.index_by_row.get(&row).copied().unwrap_or(0)
    }

    pub fn set_index(&mut self, row: Row, index: usize) {
        self.index_by_row.insert(row, index);
    }

    pub fn active_index(&self) -> usize {
        self.index(self.active_row)
    }

    pub fn set_hidden(&mut self, row: Row, hidden: bool) {
        if hidden {
            self.hidden_rows.insert(row);
        } else {
            self.hidden_rows.remove(&row);
        }
    }

    pub fn is_hidden(&self, row: Row) -> bool {
        self.hidden_rows.contains(&row)
    }

    /// Whether the row is currently shown. The secondary row additionally
    /// needs its own reveal.
    pub fn is_visible(&self, row: Row) -> bool {
        if self.is_hidden(row) {
            return false;
        }
        row != Row::Secondary || self.secondary_visible
    }

    /// First eligible row in `dir` from the active row, or `None` at the boundary.
    ///
    /// Hidden rows and empty character rows are skipped; the secondary row is
    /// only reachable when leaving `alpha`.
    pub fn next_row(&self, dir: i32, keyboard: &KeyboardDefinition) -> Option<Row> {
        let from = self.active_row;
        let mut candidate = from.step(dir);
        while let Some(row) = candidate {
            let skip = !self.is_visible(row)
                || (row == Row::Secondary && from != Row::Alpha)
                || (row.is_character_row() && keyboard.len(row) == 0);
            if !skip {
                return Some(row);
            }
            candidate = row.step(dir);
        }
        None
    }

    /// Pull every stored index back into its row after the keyboard changed.
    pub fn clamp_indices(&mut self, keyboard: &KeyboardDefinition) {
        for (row, index) in self.index_by_row.iter_mut() {
            let len = match row {
                Row::Buttons => BUTTONS.len(),
                Row::Value => 0,
                _ => keyboard.len(*row),
            };
            if *index >= len {
                *index = 0;
            }
        }
    }
}

/// Carousel step with wraparound in both directions. `None` for an empty row.
pub fn wrap_index(current: usize, dir: i32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = (current as i64 + i64::from(dir)).rem_euclid(len as i64);
    Some(next as usize)
}
