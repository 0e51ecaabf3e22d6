//! Application state and the events it reports.
//!
//! [`App`] is the single owner of mutable game state. Hosts call its
//! handlers on input, call [`App::advance`] as time passes, and read
//! [`App::snapshot`] and [`App::drain_events`] to render.

pub mod event;
pub mod state;

pub use event::GameEvent;
pub use state::{App, Snapshot};
