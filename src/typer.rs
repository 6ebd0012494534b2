use std::time::{Duration, Instant};

use crate::callbacks::{CallbackRegistry, EventKind, TyperEvent};
use crate::error::{Result, TyperError};
use crate::keyboard::layout::Row;
use crate::keyboard::model::KeyboardDefinition;
use crate::render::RenderSurface;
use crate::session::input::Command;
use crate::session::secondary::SecondaryPolicy;
use crate::session::state::{ConfirmOutcome, TyperSession};
use crate::session::text::Casing;

/// Validated configuration bundle for a typer.
#[derive(Clone, Debug)]
pub struct TyperOptions {
    /// Maximum number of characters; 0 means unbounded.
    pub max_length: usize,
    pub casing: Casing,
    pub keyboard: KeyboardDefinition,
    pub secondary: SecondaryPolicy,
    pub hidden_rows: Vec<Row>,
}

impl Default for TyperOptions {
    fn default() -> Self {
        Self {
            max_length: 0,
            casing: Casing::SentenceUpper,
            keyboard: KeyboardDefinition::latin(),
            secondary: SecondaryPolicy::Delayed(Duration::from_millis(1500)),
            hidden_rows: Vec::new(),
        }
    }
}

impl TyperOptions {
    /// Delayed secondary reveal after `seconds`, which must be positive and finite.
    pub fn secondary_delay(seconds: f64) -> Result<SecondaryPolicy> {
        if seconds <= 0.0 {
            return Err(TyperError::InvalidSecondaryDelay(seconds));
        }
        Duration::try_from_secs_f64(seconds)
            .map(SecondaryPolicy::Delayed)
            .map_err(|_| TyperError::InvalidSecondaryDelay(seconds))
    }
}

/// The on-screen keyboard: owns subscriptions across open/close cycles and the
/// session while open, and turns confirm/cancel into lifecycle events.
#[derive(Debug)]
pub struct Typer {
    options: TyperOptions,
    callbacks: CallbackRegistry,
    session: Option<TyperSession>,
    host_field: bool,
    last_value: String,
}

impl Typer {
    pub fn new(options: TyperOptions) -> Self {
        Self {
            options,
            callbacks: CallbackRegistry::new(),
            session: None,
            host_field: false,
            last_value: String::new(),
        }
    }

    pub fn options(&self) -> &TyperOptions {
        &self.options
    }

    /// Replace the options used by the next open.
    pub fn set_options(&mut self, options: TyperOptions) {
        self.options = options;
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&TyperSession> {
        self.session.as_ref()
    }

    /// Current text while open, otherwise the text at the last close.
    pub fn value(&self) -> &str {
        match &self.session {
            Some(session) => session.text(),
            None => &self.last_value,
        }
    }

    /// Open with an optional initial value. Reopening discards the current session.
    pub fn open(&mut self, initial: Option<&str>, surface: &mut dyn RenderSurface) {
        self.open_at(initial, Instant::now(), surface);
    }

    pub fn open_at(&mut self, initial: Option<&str>, now: Instant, surface: &mut dyn RenderSurface) {
        if let Some(stale) = self.session.take() {
            stale.finish();
        }
        let initial = initial.unwrap_or_default();
        tracing::info!(
            initial_len = initial.chars().count(),
            max_length = self.options.max_length,
            casing = self.options.casing.as_str(),
            "typer opened"
        );
        let session = TyperSession::new(
            initial,
            self.options.keyboard.clone(),
            self.options.max_length,
            self.options.casing,
            self.options.secondary,
            self.options.hidden_rows.iter().copied(),
            now,
        );
        session.present(surface);
        self.session = Some(session);
    }

    /// Open on behalf of a host field: the field is blurred now and refocused on close.
    pub fn open_for_field(&mut self, value: &str, surface: &mut dyn RenderSurface) {
        surface.blur_host_field();
        self.host_field = true;
        self.open(Some(value), surface);
    }

    /// Replace the keyboard. An open session rebuilds its rows immediately.
    pub fn update_keyboard(&mut self, keyboard: KeyboardDefinition) {
        if let Some(session) = self.session.as_mut() {
            session.replace_keyboard(keyboard.clone());
        }
        self.options.keyboard = keyboard;
    }

    pub fn set_row_hidden(&mut self, row: Row, hidden: bool) {
        self.options.hidden_rows.retain(|r| *r != row);
        if hidden {
            self.options.hidden_rows.push(row);
        }
        if let Some(session) = self.session.as_mut() {
            session.set_row_hidden(row, hidden);
        }
    }

    /// Redraw the open session, if any.
    pub fn present(&self, surface: &mut dyn RenderSurface) {
        if let Some(session) = &self.session {
            session.present(surface);
        }
    }

    pub fn handle(&mut self, command: Command, surface: &mut dyn RenderSurface) {
        self.handle_at(command, Instant::now(), surface);
    }

    /// Apply one command. Ignored while closed.
    pub fn handle_at(&mut self, command: Command, now: Instant, surface: &mut dyn RenderSurface) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.set_now(now);

        let outcome = match command {
            Command::Left => {
                session.move_horizontal(-1);
                ConfirmOutcome::Nothing
            }
            Command::Right => {
                session.move_horizontal(1);
                ConfirmOutcome::Nothing
            }
            Command::Up => {
                session.move_vertical(-1);
                ConfirmOutcome::Nothing
            }
            Command::Down => {
                session.move_vertical(1);
                ConfirmOutcome::Nothing
            }
            Command::Confirm => session.choose_action(),
            Command::Cancel => ConfirmOutcome::Cancel,
        };

        for event in session.take_events() {
            self.callbacks.fire(&event);
        }

        match outcome {
            ConfirmOutcome::Accept => self.accept(surface),
            ConfirmOutcome::Cancel => self.cancel(surface),
            ConfirmOutcome::Nothing | ConfirmOutcome::Typed(_) => self.present(surface),
        }
    }

    /// Drive the secondary reveal countdown. Returns true when the surface was redrawn.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn RenderSurface) -> bool {
        let revealed = self.session.as_mut().is_some_and(|s| s.tick(now));
        if revealed {
            self.present(surface);
        }
        revealed
    }

    fn accept(&mut self, surface: &mut dyn RenderSurface) {
        let text = self.value().to_string();
        tracing::info!(len = text.chars().count(), "typer accepted");
        self.callbacks.fire(&TyperEvent::Done(text.clone()));
        self.callbacks.fire(&TyperEvent::Closed { canceled: false });
        self.close(Some(&text), surface);
    }

    fn cancel(&mut self, surface: &mut dyn RenderSurface) {
        tracing::info!("typer canceled");
        self.callbacks.fire(&TyperEvent::Canceled);
        self.callbacks.fire(&TyperEvent::Closed { canceled: true });
        self.close(None, surface);
    }

    /// Discard the session and return focus to the host field, handing it
    /// `committed` or, when canceled, the value it had at open.
    fn close(&mut self, committed: Option<&str>, surface: &mut dyn RenderSurface) {
        let Some(session) = self.session.take() else {
            return;
        };
        let initial = session.initial_text().to_string();
        self.last_value = session.finish();
        if self.host_field {
            surface.focus_host_field(committed.unwrap_or(&initial));
            self.host_field = false;
        }
    }

    // --- Subscriptions ---

    pub fn register(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&TyperEvent) -> anyhow::Result<()> + 'static,
    ) -> &mut Self {
        self.callbacks.register(kind, handler);
        self
    }

    pub fn on_done(&mut self, mut f: impl FnMut(&str) -> anyhow::Result<()> + 'static) -> &mut Self {
        self.register(EventKind::Done, move |event| match event {
            TyperEvent::Done(text) => f(text.as_str()),
            _ => Ok(()),
        })
    }

    pub fn on_canceled(&mut self, mut f: impl FnMut() -> anyhow::Result<()> + 'static) -> &mut Self {
        self.register(EventKind::Canceled, move |_| f())
    }

    pub fn on_text_changed(
        &mut self,
        mut f: impl FnMut(&str) -> anyhow::Result<()> + 'static,
    ) -> &mut Self {
        self.register(EventKind::TextChanged, move |event| match event {
            TyperEvent::TextChanged(text) => f(text.as_str()),
            _ => Ok(()),
        })
    }

    pub fn on_closed(&mut self, mut f: impl FnMut(bool) -> anyhow::Result<()> + 'static) -> &mut Self {
        self.register(EventKind::Closed, move |event| match event {
            TyperEvent::Closed { canceled } => f(*canceled),
            _ => Ok(()),
        })
    }
}

impl Default for Typer {
    fn default() -> Self {
        Self::new(TyperOptions::default())
    }
}
