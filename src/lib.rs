//! On-screen carousel keyboard for composing text with directional input
//! (left/right/up/down/confirm/cancel), for remote-control style devices.
//!
//! The core is a pure state machine: [`Typer`] owns subscriptions and the open
//! [`session::state::TyperSession`]; drawing goes through [`RenderSurface`].

pub mod callbacks;
pub mod config;
pub mod error;
pub mod event;
pub mod keyboard;
pub mod logging;
pub mod render;
pub mod session;
pub mod typer;
pub mod ui;

pub use crate::callbacks::{CallbackRegistry, EventKind, TyperEvent};
pub use crate::error::TyperError;
pub use crate::keyboard::layout::{Button, Row};
pub use crate::keyboard::model::{GlyphEntry, KeyboardDefinition};
pub use crate::render::{NullSurface, RenderSurface};
pub use crate::session::input::Command;
pub use crate::session::secondary::SecondaryPolicy;
pub use crate::session::text::Casing;
pub use crate::typer::{Typer, TyperOptions};
