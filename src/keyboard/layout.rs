use std::fmt;

use serde::{Deserialize, Serialize};

/// One horizontal section of the typer, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Row {
    Buttons,
    Value,
    Alpha,
    Secondary,
    Nums,
    Symbols,
}

/// Row order shared by vertical navigation and rendering.
pub const ROW_ORDER: [Row; 6] = [
    Row::Buttons,
    Row::Value,
    Row::Alpha,
    Row::Secondary,
    Row::Nums,
    Row::Symbols,
];

/// Rows whose items come from the keyboard definition.
pub const CHARACTER_ROWS: [Row; 4] = [Row::Alpha, Row::Secondary, Row::Nums, Row::Symbols];

impl Row {
    pub fn position(self) -> usize {
        match self {
            Row::Buttons => 0,
            Row::Value => 1,
            Row::Alpha => 2,
            Row::Secondary => 3,
            Row::Nums => 4,
            Row::Symbols => 5,
        }
    }

    pub fn at(position: usize) -> Option<Row> {
        ROW_ORDER.get(position).copied()
    }

    /// Neighbour in `dir` (+1 down, -1 up), or `None` past either end.
    pub fn step(self, dir: i32) -> Option<Row> {
        let next = self.position() as i64 + i64::from(dir.signum());
        usize::try_from(next).ok().and_then(Row::at)
    }

    pub fn is_character_row(self) -> bool {
        CHARACTER_ROWS.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Row::Buttons => "buttons",
            Row::Value => "value",
            Row::Alpha => "alpha",
            Row::Secondary => "secondary",
            Row::Nums => "nums",
            Row::Symbols => "symbols",
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two buttons of the `buttons` row, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Accept,
    Cancel,
}

pub const BUTTONS: [Button; 2] = [Button::Accept, Button::Cancel];

impl Button {
    pub fn at(index: usize) -> Button {
        BUTTONS[index % BUTTONS.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::Accept => "Ok",
            Button::Cancel => "Cancel",
        }
    }
}
