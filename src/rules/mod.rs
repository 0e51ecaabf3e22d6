//! Round rules: the match engine and the session clock.
//!
//! `Session` decides what a press does and whether a pair matches.
//! `SessionClock` gates how long the round lasts. Neither schedules
//! anything; the application state drives them from its timer queue.

pub mod clock;
pub mod session;

pub use clock::{ClockTick, SessionClock};
pub use session::{IgnoreReason, MatchPhase, PressOutcome, Resolution, Session};
