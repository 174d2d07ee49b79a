//! Display backend abstraction
//!
//! The platform capabilities the tool relies on: listing displays, listing their modes and
//! applying a mode. Everything else is built on top of this trait so it can run against
//! synthetic displays.

use core::fmt;

use thiserror::Error;

use crate::types::{DisplayMode, Mode};

/// Error type for display backends
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Cannot get displays ({0})")]
    Enumeration(i32),
    #[error("Display {0} is invalid")]
    InvalidDisplay(DisplayId),
    #[error("Mode switch failed ({0})")]
    ApplyFailed(i32),
    #[error("Display configuration is not supported on this platform")]
    Unsupported,
}

type Result<T = ()> = std::result::Result<T, BackendError>;

/// Platform identifier of a display
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayId(pub u32);

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// What happens to mirroring when a mode is applied
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MirrorPolicy {
    /// Leave mirroring as it is
    #[default]
    Unchanged,
    /// Mirror the display onto the main display
    Enable,
    /// Stop mirroring the display
    Disable,
}

/// Central trait for display operations
pub trait DisplayBackend {
    /// Platform handle of a mode, handed back to `apply_mode`
    type Handle;

    /// Lists the online displays
    fn list_displays(&self) -> Result<Vec<DisplayId>>;

    /// Returns the main display, the source of mirroring
    fn main_display(&self) -> DisplayId;

    /// Reads the mode a display currently shows
    fn current_mode(&self, display: DisplayId) -> Result<Mode>;

    /// Lists every mode a display reports, in platform order
    fn list_modes(&self, display: DisplayId) -> Result<Vec<DisplayMode<Self::Handle>>>;

    /// Applies `mode` and the mirror policy to a display in one configuration transaction
    fn apply_mode(
        &self,
        display: DisplayId,
        mode: &DisplayMode<Self::Handle>,
        mirror: MirrorPolicy,
    ) -> Result;

    /// Gets the backend name
    fn backend_name(&self) -> &'static str;
}
