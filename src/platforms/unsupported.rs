use crate::{BackendError, DisplayBackend, DisplayId, DisplayMode, MirrorPolicy, Mode};

/// Backend for platforms without a display configuration API; every call fails
#[derive(Debug, Default, Copy, Clone)]
pub struct UnsupportedBackend;

impl DisplayBackend for UnsupportedBackend {
    type Handle = ();

    fn list_displays(&self) -> Result<Vec<DisplayId>, BackendError> {
        Err(BackendError::Unsupported)
    }

    fn main_display(&self) -> DisplayId {
        DisplayId(0)
    }

    fn current_mode(&self, _display: DisplayId) -> Result<Mode, BackendError> {
        Err(BackendError::Unsupported)
    }

    fn list_modes(&self, _display: DisplayId) -> Result<Vec<DisplayMode>, BackendError> {
        Err(BackendError::Unsupported)
    }

    fn apply_mode(
        &self,
        _display: DisplayId,
        _mode: &DisplayMode,
        _mirror: MirrorPolicy,
    ) -> Result<(), BackendError> {
        Err(BackendError::Unsupported)
    }

    fn backend_name(&self) -> &'static str {
        "unsupported"
    }
}
