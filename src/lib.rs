//! A library to force a display into a given resolution, color depth and refresh rate.
//!
//! Modes are picked by a small selector (exact, closest or highest match) from the list a
//! display reports, and applied through a platform backend without asking the display manager
//! whether the mode is supported. This is meant for recovering a usable picture on machines
//! that booted with the monitor off or behind a KVM switch.

mod backend;
mod config;
mod display;
pub mod platforms;
pub mod selector;
mod session;
mod types;

pub use backend::*;
pub use config::*;
pub use display::*;
pub use selector::{MatchPolicy, SelectError, Selection};
pub use session::*;
pub use types::*;
