use core::fmt;

use thiserror::Error;

use crate::{
    backend::{BackendError, DisplayBackend, DisplayId, MirrorPolicy},
    types::{DisplayMode, Mode},
};

/// Error type for the display module
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Display {0} reports no modes")]
    NoModes(DisplayId),
}

type Result<T = ()> = std::result::Result<T, DisplayError>;

/// A struct that represents a display (index)
pub struct Display<'a, 'b, B: DisplayBackend> {
    /// The index of the display in the display set
    index: usize,
    /// The display set containing this display
    display_set: &'a DisplaySet<'b, B>,
}

impl<B: DisplayBackend> Display<'_, '_, B> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> DisplayId {
        self.display_set.displays[self.index]
    }

    pub fn is_main(&self) -> bool {
        self.display_set.main_display == self.id()
    }

    /// Reads the mode the display currently shows
    pub fn current_mode(&self) -> Result<Mode> {
        Ok(self.display_set.backend.current_mode(self.id())?)
    }

    /// Lists the modes of the display; an empty list means the display is unusable
    pub fn modes(&self) -> Result<Vec<DisplayMode<B::Handle>>> {
        let modes = self.display_set.backend.list_modes(self.id())?;
        if modes.is_empty() {
            return Err(DisplayError::NoModes(self.id()));
        }
        log::trace!("Display {} reports {} modes", self.id(), modes.len());
        Ok(modes)
    }

    /// Applies `mode` to the display and commits it permanently
    pub fn apply(&self, mode: &DisplayMode<B::Handle>, mirror: MirrorPolicy) -> Result {
        self.display_set
            .backend
            .apply_mode(self.id(), mode, mirror)?;
        Ok(())
    }
}

/// A struct that represents the online displays of a backend
pub struct DisplaySet<'b, B: DisplayBackend> {
    backend: &'b B,
    /// The displays in this set
    displays: Vec<DisplayId>,
    /// The main display
    main_display: DisplayId,
}

impl<'b, B: DisplayBackend> DisplaySet<'b, B> {
    /// Iterates over the displays in this set
    pub fn displays(&self) -> impl ExactSizeIterator<Item = Display<'_, 'b, B>> {
        (0..self.displays.len()).map(|index| Display {
            index,
            display_set: self,
        })
    }

    /// Returns display for the given `index`
    pub fn get(&self, index: usize) -> Option<Display<'_, 'b, B>> {
        if index >= self.displays.len() {
            return None;
        }
        Some(Display {
            index,
            display_set: self,
        })
    }

    pub fn len(&self) -> usize {
        self.displays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }

    pub fn main_display(&self) -> DisplayId {
        self.main_display
    }
}

impl<B: DisplayBackend> fmt::Display for DisplaySet<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DisplaySet {{ backend: {}, displays: [", self.backend.backend_name())?;
        for (i, display) in self.displays.iter().enumerate() {
            if i > 0 {
                writeln!(f, ", ")?;
            }
            write!(f, "    {} (main: {})", display, *display == self.main_display)?;
        }
        write!(f, "\n] }}")
    }
}

/// Returns the online displays of `backend`.
pub fn query_displays<B: DisplayBackend>(backend: &B) -> Result<DisplaySet<'_, B>> {
    let displays = backend.list_displays()?;
    let main_display = backend.main_display();

    for (i, display) in displays.iter().enumerate() {
        log::debug!(
            "Display {}: {} (main={})",
            i,
            display,
            *display == main_display
        );
    }

    Ok(DisplaySet {
        backend,
        displays,
        main_display,
    })
}
