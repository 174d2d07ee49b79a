use std::ptr;

use core_graphics::base::CGError;
use core_graphics::display::{CGConfigureOption, CGDirectDisplayID, CGDisplay, CGDisplayMode};

use crate::{BackendError, BitDepth, DisplayBackend, DisplayId, DisplayMode, MirrorPolicy, Mode};

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    /// Active, mirrored and sleeping displays, unlike `CGGetActiveDisplayList`
    fn CGGetOnlineDisplayList(
        max_displays: u32,
        online_displays: *mut CGDirectDisplayID,
        display_count: *mut u32,
    ) -> CGError;
}

/// Upper bound of displays queried from CoreGraphics
const MAX_DISPLAYS: usize = 32;
const NULL_DISPLAY: CGDirectDisplayID = 0;
const DISPLAY_NO_ERR: CGError = 0;

/// Backend on top of the CoreGraphics display configuration API
#[derive(Debug, Default, Copy, Clone)]
pub struct CoreGraphicsBackend;

/// Reads the values of a CoreGraphics mode
fn mode_from_cg(mode: &CGDisplayMode) -> Mode {
    let bits_per_pixel = BitDepth::from_pixel_encoding(&mode.pixel_encoding().to_string())
        .map_or(0, |depth| depth.bits());

    Mode {
        width: mode.width() as u32,
        height: mode.height() as u32,
        bits_per_pixel,
        refresh: mode.refresh_rate(),
    }
}

impl DisplayBackend for CoreGraphicsBackend {
    type Handle = CGDisplayMode;

    /// Lists active, mirrored and sleeping displays
    fn list_displays(&self) -> Result<Vec<DisplayId>, BackendError> {
        let mut displays = [NULL_DISPLAY; MAX_DISPLAYS];
        let mut count: u32 = 0;

        // SAFETY: the buffer holds MAX_DISPLAYS ids and CoreGraphics writes at most that many
        let err = unsafe {
            CGGetOnlineDisplayList(MAX_DISPLAYS as u32, displays.as_mut_ptr(), &mut count)
        };
        if err != DISPLAY_NO_ERR {
            return Err(BackendError::Enumeration(err));
        }

        Ok(displays
            .iter()
            .take(count as usize)
            .map(|&id| DisplayId(id))
            .collect())
    }

    fn main_display(&self) -> DisplayId {
        DisplayId(CGDisplay::main().id)
    }

    fn current_mode(&self, display: DisplayId) -> Result<Mode, BackendError> {
        CGDisplay::new(display.0)
            .display_mode()
            .map(|mode| mode_from_cg(&mode))
            .ok_or(BackendError::InvalidDisplay(display))
    }

    /// Lists every mode, including the ones the display manager would not offer
    fn list_modes(
        &self,
        display: DisplayId,
    ) -> Result<Vec<DisplayMode<CGDisplayMode>>, BackendError> {
        let modes = CGDisplayMode::all_display_modes(display.0, ptr::null())
            .ok_or(BackendError::InvalidDisplay(display))?;

        Ok(modes
            .into_iter()
            .map(|mode| {
                let usable = mode.mode_id() != 0;
                DisplayMode::new(mode_from_cg(&mode), usable, mode)
            })
            .collect())
    }

    fn apply_mode(
        &self,
        display: DisplayId,
        mode: &DisplayMode<CGDisplayMode>,
        mirror: MirrorPolicy,
    ) -> Result<(), BackendError> {
        let cg_display = CGDisplay::new(display.0);
        let config = cg_display
            .begin_configuration()
            .map_err(BackendError::ApplyFailed)?;

        let switched = cg_display.configure_display_with_display_mode(&config, &mode.handle);

        let mirrored = match mirror {
            MirrorPolicy::Unchanged => Ok(()),
            MirrorPolicy::Disable => cg_display
                .configure_display_mirror_of_display(&config, &CGDisplay::new(NULL_DISPLAY)),
            MirrorPolicy::Enable => {
                let main = CGDisplay::main();
                if main.id == display.0 {
                    Ok(())
                } else {
                    cg_display.configure_display_mirror_of_display(&config, &main)
                }
            }
        };
        if let Err(err) = mirrored {
            log::warn!("Failed to configure mirroring of display {} ({})", display, err);
        }

        // the mirror setting is committed even when the mode switch was rejected
        cg_display
            .complete_configuration(&config, CGConfigureOption::ConfigurePermanently)
            .map_err(BackendError::ApplyFailed)?;

        match switched {
            Ok(()) => {
                log::debug!("Successfully applied {} to display {}", mode.mode, display);
                Ok(())
            }
            Err(err) => Err(BackendError::ApplyFailed(err)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "CoreGraphics"
    }
}
