//! An in-memory backend with synthetic displays.
//!
//! Nothing here touches real hardware: modes are whatever the backend was built with, and
//! applied changes are only recorded. Useful for tests and for dry runs of a configuration.

use std::cell::RefCell;

use crate::{BackendError, DisplayBackend, DisplayId, DisplayMode, MirrorPolicy, Mode};

/// A change recorded by `MemoryBackend::apply_mode`
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedChange {
    pub display: DisplayId,
    pub mode: Mode,
    pub mirror: MirrorPolicy,
    /// The display now mirrored, if mirroring was enabled
    pub mirror_of: Option<DisplayId>,
}

#[derive(Debug, Clone)]
struct MemoryDisplay {
    id: DisplayId,
    current: Option<Mode>,
    modes: Option<Vec<(Mode, bool)>>,
    apply_error: Option<i32>,
}

/// Backend serving displays and modes from memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    displays: Vec<MemoryDisplay>,
    enumeration_error: Option<i32>,
    applied: RefCell<Vec<AppliedChange>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a display reporting `modes` as `(mode, usable)` pairs.
    ///
    /// The first mode is its current mode.
    pub fn with_display(
        mut self,
        id: DisplayId,
        modes: impl IntoIterator<Item = (Mode, bool)>,
    ) -> Self {
        let modes: Vec<_> = modes.into_iter().collect();
        self.displays.push(MemoryDisplay {
            id,
            current: modes.first().map(|(mode, _)| *mode),
            modes: Some(modes),
            apply_error: None,
        });
        self
    }

    /// Adds a display whose current mode and mode list cannot be read
    pub fn with_unreadable_display(mut self, id: DisplayId) -> Self {
        self.displays.push(MemoryDisplay {
            id,
            current: None,
            modes: None,
            apply_error: None,
        });
        self
    }

    /// Makes every mode change on display `id` fail with `code`
    pub fn with_apply_error(mut self, id: DisplayId, code: i32) -> Self {
        for display in self.displays.iter_mut().filter(|d| d.id == id) {
            display.apply_error = Some(code);
        }
        self
    }

    /// Makes display enumeration fail with `code`
    pub fn with_enumeration_error(mut self, code: i32) -> Self {
        self.enumeration_error = Some(code);
        self
    }

    /// Returns the changes applied so far, oldest first
    pub fn applied(&self) -> Vec<AppliedChange> {
        self.applied.borrow().clone()
    }

    fn display(&self, id: DisplayId) -> Result<&MemoryDisplay, BackendError> {
        self.displays
            .iter()
            .find(|display| display.id == id)
            .ok_or(BackendError::InvalidDisplay(id))
    }
}

impl DisplayBackend for MemoryBackend {
    /// Index of the mode in the display's list
    type Handle = usize;

    fn list_displays(&self) -> Result<Vec<DisplayId>, BackendError> {
        if let Some(code) = self.enumeration_error {
            return Err(BackendError::Enumeration(code));
        }
        Ok(self.displays.iter().map(|display| display.id).collect())
    }

    fn main_display(&self) -> DisplayId {
        self.displays
            .first()
            .map_or(DisplayId(0), |display| display.id)
    }

    fn current_mode(&self, display: DisplayId) -> Result<Mode, BackendError> {
        self.display(display)?
            .current
            .ok_or(BackendError::InvalidDisplay(display))
    }

    fn list_modes(&self, display: DisplayId) -> Result<Vec<DisplayMode<usize>>, BackendError> {
        let modes = self
            .display(display)?
            .modes
            .as_ref()
            .ok_or(BackendError::InvalidDisplay(display))?;

        Ok(modes
            .iter()
            .enumerate()
            .map(|(index, (mode, usable))| DisplayMode::new(*mode, *usable, index))
            .collect())
    }

    fn apply_mode(
        &self,
        display: DisplayId,
        mode: &DisplayMode<usize>,
        mirror: MirrorPolicy,
    ) -> Result<(), BackendError> {
        let entry = self.display(display)?;
        if let Some(code) = entry.apply_error {
            return Err(BackendError::ApplyFailed(code));
        }

        let main = self.main_display();
        let mirror_of = match mirror {
            MirrorPolicy::Enable if display != main => Some(main),
            _ => None,
        };

        self.applied.borrow_mut().push(AppliedChange {
            display,
            mode: mode.mode,
            mirror,
            mirror_of,
        });
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
