use std::time::Instant;

use crate::callbacks::TyperEvent;
use crate::keyboard::display::{PLACEHOLDER, apply_case, encode_str, entity_encode, lower_of};
use crate::keyboard::layout::{BUTTONS, Button, ROW_ORDER, Row};
use crate::keyboard::model::{GlyphEntry, KeyboardDefinition};
use crate::render::RenderSurface;
use crate::session::secondary::{RevealRequest, SecondaryCountdown, SecondaryPolicy};
use crate::session::selection::{LastChosen, SelectionState, wrap_index};
use crate::session::text::{AppendOutcome, Casing, TextBuffer};

/// Result of a confirm on the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Nothing,
    Typed(char),
    Accept,
    Cancel,
}

/// Everything that lives between open and close: the keyboard copy (with the
/// derived secondary row), cursor, text and reveal countdown.
#[derive(Debug)]
pub struct TyperSession {
    keyboard: KeyboardDefinition,
    selection: SelectionState,
    text: TextBuffer,
    countdown: SecondaryCountdown,
    capitalize: bool,
    initial: String,
    now: Instant,
    outbox: Vec<TyperEvent>,
}

impl TyperSession {
    pub fn new(
        initial: &str,
        keyboard: KeyboardDefinition,
        max_length: usize,
        casing: Casing,
        secondary: SecondaryPolicy,
        hidden_rows: impl IntoIterator<Item = Row>,
        now: Instant,
    ) -> Self {
        let text = TextBuffer::new(initial, max_length, casing);
        let capitalize = text.should_capitalize_next();
        let mut session = Self {
            keyboard,
            selection: SelectionState::new(hidden_rows),
            text,
            countdown: SecondaryCountdown::new(secondary),
            capitalize,
            initial: initial.to_string(),
            now,
            outbox: Vec::new(),
        };
        session.keyboard.secondary.clear();
        session.select_row(Row::Value);
        session
    }

    // --- Accessors ---

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn initial_text(&self) -> &str {
        &self.initial
    }

    pub fn active_row(&self) -> Row {
        self.selection.active_row
    }

    pub fn index(&self, row: Row) -> usize {
        self.selection.index(row)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn keyboard(&self) -> &KeyboardDefinition {
        &self.keyboard
    }

    pub fn capitalize(&self) -> bool {
        self.capitalize
    }

    pub fn countdown(&self) -> &SecondaryCountdown {
        &self.countdown
    }

    pub fn last_chosen(&self) -> Option<LastChosen> {
        self.selection.last_chosen
    }

    pub fn secondary_visible(&self) -> bool {
        self.selection.secondary_visible
    }

    pub fn targeted_button(&self) -> Option<Button> {
        (self.selection.active_row == Row::Buttons)
            .then(|| Button::at(self.selection.index(Row::Buttons)))
    }

    /// Events produced since the last drain, in order.
    pub fn take_events(&mut self) -> Vec<TyperEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Timestamp used for countdowns started by the next operations.
    pub fn set_now(&mut self, now: Instant) {
        self.now = now;
    }

    // --- Character lookup ---

    /// Selected character of the active row, case-applied except on the secondary row.
    pub fn selected_character(&self) -> Option<char> {
        let row = self.selection.active_row;
        let glyph = self.keyboard.glyph_at(row, self.selection.index(row))?;
        let capitalize = self.capitalize && row != Row::Secondary;
        Some(apply_case(glyph.primary(), capitalize))
    }

    /// Display glyphs for a row: primaries, upper-cased when capitalizing
    /// (the secondary row is shown as derived).
    pub fn display_glyphs(&self, row: Row) -> Vec<char> {
        let capitalize = self.capitalize && row != Row::Secondary;
        self.keyboard
            .row(row)
            .iter()
            .map(|g| apply_case(g.primary(), capitalize))
            .collect()
    }

    // --- Transitions ---

    /// Make `row` the active row. The buttons row always starts on accept.
    pub fn select_row(&mut self, row: Row) {
        if self.selection.active_row != row {
            tracing::debug!(from = %self.selection.active_row, to = %row, "row selected");
        }
        self.selection.active_row = row;
        if row == Row::Buttons {
            self.selection.set_index(Row::Buttons, 0);
        }
        self.update_secondary_row();
    }

    /// Set the index of `row`. Out-of-range indices are ignored.
    pub fn select_character(&mut self, row: Row, index: usize) -> bool {
        if index >= self.keyboard.len(row) {
            return false;
        }
        self.selection.set_index(row, index);
        if row == self.selection.active_row && row != Row::Secondary {
            self.update_secondary_row();
        }
        true
    }

    pub fn move_horizontal(&mut self, dir: i32) {
        let row = self.selection.active_row;
        match row {
            Row::Value => {
                if dir < 0 {
                    self.text.delete_last();
                } else if dir > 0 {
                    self.append(" ");
                }
                self.refresh_capitalization();
            }
            Row::Buttons => {
                if let Some(next) = wrap_index(self.selection.index(row), dir, BUTTONS.len()) {
                    self.selection.set_index(row, next);
                }
            }
            _ => {
                if let Some(next) = wrap_index(self.selection.index(row), dir, self.keyboard.len(row)) {
                    self.select_character(row, next);
                }
            }
        }
    }

    /// Move to the next eligible row in `dir`; a no-op at the boundary.
    pub fn move_vertical(&mut self, dir: i32) {
        if let Some(row) = self.selection.next_row(dir, &self.keyboard) {
            self.select_row(row);
        }
    }

    pub fn choose_action(&mut self) -> ConfirmOutcome {
        let row = self.selection.active_row;
        match row {
            Row::Buttons => match Button::at(self.selection.index(row)) {
                Button::Accept => ConfirmOutcome::Accept,
                Button::Cancel => ConfirmOutcome::Cancel,
            },
            Row::Value => ConfirmOutcome::Nothing,
            _ => {
                let Some(ch) = self.selected_character() else {
                    return ConfirmOutcome::Nothing;
                };
                let index = self.selection.index(row);
                if self.push_char(ch) == AppendOutcome::Appended {
                    self.selection.last_chosen = Some(LastChosen { row, index });
                }
                self.refresh_capitalization();
                // Confirming a variant keeps the secondary row and its selection
                if self.selection.active_row != Row::Secondary {
                    self.update_secondary_row();
                }
                ConfirmOutcome::Typed(ch)
            }
        }
    }

    fn push_char(&mut self, ch: char) -> AppendOutcome {
        let mut buf = [0u8; 4];
        self.append(ch.encode_utf8(&mut buf))
    }

    /// Append through the text buffer. Reaching the max length forces the value row.
    pub fn append(&mut self, s: &str) -> AppendOutcome {
        let outcome = self.text.append(s);
        if !outcome.changed() {
            return outcome;
        }
        if outcome == AppendOutcome::Clamped {
            tracing::debug!(max_length = self.text.max_length(), "text clamped to max length");
            self.select_row(Row::Value);
        }
        self.selection.last_chosen = None;
        self.refresh_capitalization();
        self.outbox.push(TyperEvent::TextChanged(self.text.as_str().to_string()));
        outcome
    }

    fn refresh_capitalization(&mut self) {
        self.capitalize = self.text.should_capitalize_next();
    }

    /// Rebuild the secondary row from the selected alpha glyph and decide its
    /// visibility under the reveal policy.
    pub fn update_secondary_row(&mut self) {
        if !self.countdown.is_enabled() {
            return;
        }
        self.selection.set_index(Row::Secondary, 0);

        match self.selection.active_row {
            Row::Alpha => {
                if self.countdown.is_delayed() && self.selection.secondary_visible {
                    self.selection.secondary_visible = false;
                }
                let glyph = self
                    .keyboard
                    .glyph_at(Row::Alpha, self.selection.index(Row::Alpha))
                    .cloned();
                self.keyboard.secondary = match glyph {
                    Some(glyph) => secondary_glyphs(&glyph, self.capitalize),
                    None => Vec::new(),
                };
            }
            Row::Secondary => {}
            _ => {
                self.keyboard.secondary.clear();
                self.selection.secondary_visible = false;
                self.countdown.cancel();
                return;
            }
        }

        if self.keyboard.secondary.is_empty() {
            self.selection.secondary_visible = false;
            self.countdown.cancel();
            return;
        }

        match self.countdown.request(self.now) {
            RevealRequest::ShowNow => self.selection.secondary_visible = true,
            RevealRequest::Scheduled(_) | RevealRequest::Ignore => {}
        }
    }

    /// Advance the reveal countdown. Returns true when the secondary row was revealed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.now = now;
        if !self.countdown.poll(now) {
            return false;
        }
        let reveal = !self.keyboard.secondary.is_empty()
            && matches!(self.selection.active_row, Row::Alpha | Row::Secondary);
        if reveal && !self.selection.secondary_visible {
            tracing::debug!("secondary row revealed");
            self.selection.secondary_visible = true;
            return true;
        }
        false
    }

    /// Swap in a new keyboard, keeping indices in range.
    pub fn replace_keyboard(&mut self, mut keyboard: KeyboardDefinition) {
        keyboard.secondary = std::mem::take(&mut self.keyboard.secondary);
        self.keyboard = keyboard;
        self.selection.clamp_indices(&self.keyboard);
        self.update_secondary_row();
    }

    pub fn set_row_hidden(&mut self, row: Row, hidden: bool) {
        self.selection.set_hidden(row, hidden);
    }

    /// Cancel any pending reveal and hand back the final text.
    pub fn finish(mut self) -> String {
        self.countdown.cancel();
        self.text.into_string()
    }

    // --- Rendering ---

    /// Push the full visible state to the surface.
    pub fn present(&self, surface: &mut dyn RenderSurface) {
        for row in ROW_ORDER {
            if row.is_character_row() {
                let glyphs = self.display_glyphs(row);
                surface.render(row, &glyphs);
                if !glyphs.is_empty() {
                    surface.highlight(row, self.selection.index(row));
                }
            }
            if self.selection.is_visible(row) {
                surface.show_row(row);
            } else {
                surface.hide_row(row);
            }
        }
        if self.selection.active_row == Row::Buttons {
            surface.highlight(Row::Buttons, self.selection.index(Row::Buttons));
        }
        surface.activate_row(self.selection.active_row);

        let current = self.selected_character().unwrap_or(PLACEHOLDER);
        surface.display_text(&encode_str(self.text.as_str()), &entity_encode(current));
    }
}

/// Case pair of the primary followed by the case-paired alternates.
fn secondary_glyphs(glyph: &GlyphEntry, capitalize: bool) -> Vec<GlyphEntry> {
    let lower = lower_of(glyph.primary());
    let upper = apply_case(lower, true);
    let mut chars = if capitalize {
        vec![upper, lower]
    } else {
        vec![lower, upper]
    };
    chars.dedup();
    chars.extend(glyph.variants());
    chars.into_iter().map(GlyphEntry::Single).collect()
}
