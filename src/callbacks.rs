use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

/// Lifecycle event kinds a host can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Done,
    Canceled,
    TextChanged,
    Closed,
}

/// An event together with its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TyperEvent {
    /// Accepted; carries the final text.
    Done(String),
    Canceled,
    /// Fired after every successful append.
    TextChanged(String),
    /// Fired once on any close.
    Closed { canceled: bool },
}

impl TyperEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TyperEvent::Done(_) => EventKind::Done,
            TyperEvent::Canceled => EventKind::Canceled,
            TyperEvent::TextChanged(_) => EventKind::TextChanged,
            TyperEvent::Closed { .. } => EventKind::Closed,
        }
    }
}

/// A subscriber. Its calling context is whatever the closure captures.
pub type Handler = Box<dyn FnMut(&TyperEvent) -> anyhow::Result<()>>;

/// Ordered subscribers per event kind. Registration order is invocation order.
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: HashMap<EventKind, Vec<Handler>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&TyperEvent) -> anyhow::Result<()> + 'static,
    ) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Invoke every handler for the event's kind.
    ///
    /// A handler that errors or panics is logged and skipped; the rest still run.
    /// Returns the number of handlers that failed.
    pub fn fire(&mut self, event: &TyperEvent) -> usize {
        let Some(handlers) = self.handlers.get_mut(&event.kind()) else {
            return 0;
        };
        let mut failures = 0;
        for (i, handler) in handlers.iter_mut().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failures += 1;
                    tracing::warn!(kind = ?event.kind(), handler = i, error = %err, "callback failed");
                }
                Err(_) => {
                    failures += 1;
                    tracing::warn!(kind = ?event.kind(), handler = i, "callback panicked");
                }
            }
        }
        failures
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&EventKind, usize> =
            self.handlers.iter().map(|(k, v)| (k, v.len())).collect();
        f.debug_struct("CallbackRegistry").field("handlers", &counts).finish()
    }
}
