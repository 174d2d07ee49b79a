use core::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One resolution, color depth and timing combination of a display
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Mode {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    /// Refresh rate in hertz, 0 when the platform does not specify one
    pub refresh: f64,
}

impl Mode {
    /// Creates a new mode
    pub fn new(width: u32, height: u32, bits_per_pixel: u32, refresh: f64) -> Self {
        Self {
            width,
            height,
            bits_per_pixel,
            refresh,
        }
    }
}

impl AsRef<Mode> for Mode {
    fn as_ref(&self) -> &Mode {
        self
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.width, self.height, self.bits_per_pixel, self.refresh
        )
    }
}

/// A mode as reported by a display, together with the platform handle needed to apply it
#[derive(Debug, Clone)]
pub struct DisplayMode<H = ()> {
    pub mode: Mode,
    /// Whether the platform considers the mode usable for a desktop session
    pub usable: bool,
    pub handle: H,
}

impl<H> DisplayMode<H> {
    pub fn new(mode: Mode, usable: bool, handle: H) -> Self {
        Self {
            mode,
            usable,
            handle,
        }
    }
}

impl<H> AsRef<Mode> for DisplayMode<H> {
    fn as_ref(&self) -> &Mode {
        &self.mode
    }
}

impl<H> fmt::Display for DisplayMode<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usable = if self.usable { "Usable" } else { "Nonusable" };
        write!(f, "{} {}", self.mode, usable)
    }
}

/// Bit depth / pixel format
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BitDepth {
    Bpp8 = 8,
    Bpp16 = 16,
    #[default]
    Bpp32 = 32,
}

// IOGraphicsTypes pixel encodings
const IO_32BIT_DIRECT_PIXELS: &str = "--------RRRRRRRRGGGGGGGGBBBBBBBB";
const IO_16BIT_DIRECT_PIXELS: &str = "-RRRRRGGGGGBBBBB";
const IO_8BIT_INDEXED_PIXELS: &str = "PPPPPPPP";

impl BitDepth {
    /// Maps an IOKit pixel encoding string to a bit depth
    pub fn from_pixel_encoding(encoding: &str) -> Option<Self> {
        if encoding.eq_ignore_ascii_case(IO_32BIT_DIRECT_PIXELS) {
            Some(BitDepth::Bpp32)
        } else if encoding.eq_ignore_ascii_case(IO_16BIT_DIRECT_PIXELS) {
            Some(BitDepth::Bpp16)
        } else if encoding.eq_ignore_ascii_case(IO_8BIT_INDEXED_PIXELS) {
            Some(BitDepth::Bpp8)
        } else {
            None
        }
    }

    pub fn bits(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bpp", self.bits())
    }
}

/// Errors that occur while parsing a bit depth from a string
#[derive(Error, Debug)]
pub enum ParseBitDepthError {
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
    #[error("Invalid bit depth {0}. Allowed values: 8, 16, 32")]
    Unsupported(u32),
}

impl FromStr for BitDepth {
    type Err = ParseBitDepthError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().parse::<u32>()? {
            8 => Ok(BitDepth::Bpp8),
            16 => Ok(BitDepth::Bpp16),
            32 => Ok(BitDepth::Bpp32),
            other => Err(ParseBitDepthError::Unsupported(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_encodings_map_to_depths() {
        assert_eq!(
            BitDepth::from_pixel_encoding("--------RRRRRRRRGGGGGGGGBBBBBBBB"),
            Some(BitDepth::Bpp32)
        );
        assert_eq!(
            BitDepth::from_pixel_encoding("-rrrrrgggggbbbbb"),
            Some(BitDepth::Bpp16)
        );
        assert_eq!(
            BitDepth::from_pixel_encoding("PPPPPPPP"),
            Some(BitDepth::Bpp8)
        );
        assert_eq!(
            BitDepth::from_pixel_encoding("--RRRRRRRRRRGGGGGGGGGGBBBBBBBBBB"),
            None
        );
    }

    #[test]
    fn bit_depth_rejects_unknown_values() {
        assert_eq!("16".parse::<BitDepth>().ok(), Some(BitDepth::Bpp16));
        assert!(matches!(
            "24".parse::<BitDepth>(),
            Err(ParseBitDepthError::Unsupported(24))
        ));
        assert!(matches!(
            "deep".parse::<BitDepth>(),
            Err(ParseBitDepthError::IntError(_))
        ));
    }

    #[test]
    fn listing_line_carries_usable_flag() {
        let mode = DisplayMode::new(Mode::new(1920, 1080, 32, 59.94), false, ());
        assert_eq!(mode.to_string(), "1920 1080 32 59.94 Nonusable");
        let mode = DisplayMode::new(Mode::new(1024, 768, 32, 75.0), true, ());
        assert_eq!(mode.to_string(), "1024 768 32 75 Usable");
    }
}
