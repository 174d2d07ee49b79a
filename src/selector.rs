//! Picks a mode out of the list a display reports.
//!
//! Selection is a single pass over the modes in enumeration order. Nothing is retained
//! between calls, so every function here is pure over its inputs.

use core::fmt;
use std::slice;

use thiserror::Error;

use crate::types::{DisplayMode, Mode};

/// Error type for the selector module
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("Display reports no modes")]
    NoModes,
    #[error("No matching mode found")]
    NoMatch,
}

type Result<T> = std::result::Result<T, SelectError>;

/// How a mode is picked from the list of a display
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// First mode with the target's width, height and bits per pixel
    Exact,
    /// Nearest mode by resolution distance, then depth and refresh rate
    Closest,
    /// Nearest mode to the per-field maxima of all modes
    Highest,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::Exact => write!(f, "Exact"),
            MatchPolicy::Closest => write!(f, "Closest"),
            MatchPolicy::Highest => write!(f, "Highest"),
        }
    }
}

/// The outcome of a selection
#[derive(Debug)]
pub struct Selection<'a, M> {
    pub policy: MatchPolicy,
    /// The target the mode was matched against; synthesized for `MatchPolicy::Highest`
    pub target: Mode,
    pub mode: &'a M,
}

impl<M: AsRef<Mode>> Selection<'_, M> {
    /// Whether the chosen mode equals the target in all four fields
    pub fn is_exact(&self) -> bool {
        let mode: &Mode = self.mode.as_ref();
        *mode == self.target
    }
}

/// Selects a mode from `modes` with the given `policy`
pub fn select<'a, M: AsRef<Mode>>(
    policy: MatchPolicy,
    target: &Mode,
    modes: &'a [M],
) -> Result<Selection<'a, M>> {
    let (target, mode) = match policy {
        MatchPolicy::Exact => (*target, exact(target, modes)?),
        MatchPolicy::Closest => (*target, closest(target, modes)?),
        MatchPolicy::Highest => {
            let highest = highest_target(modes)?;
            (highest, closest(&highest, modes)?)
        }
    };

    Ok(Selection {
        policy,
        target,
        mode,
    })
}

/// Returns the first mode whose width, height and bits per pixel equal the target's.
///
/// The refresh rate is not compared.
pub fn exact<'a, M: AsRef<Mode>>(target: &Mode, modes: &'a [M]) -> Result<&'a M> {
    if modes.is_empty() {
        return Err(SelectError::NoModes);
    }

    modes
        .iter()
        .find(|candidate| {
            let mode: &Mode = candidate.as_ref();
            mode.width == target.width
                && mode.height == target.height
                && mode.bits_per_pixel == target.bits_per_pixel
        })
        .ok_or(SelectError::NoMatch)
}

/// Absolute per-field distance of a mode from a target
#[derive(Debug, Copy, Clone)]
struct Deltas {
    width: u32,
    height: u32,
    bits_per_pixel: u32,
    refresh: f64,
}

impl Deltas {
    fn between(mode: &Mode, target: &Mode) -> Self {
        Self {
            width: mode.width.abs_diff(target.width),
            height: mode.height.abs_diff(target.height),
            bits_per_pixel: mode.bits_per_pixel.abs_diff(target.bits_per_pixel),
            refresh: (mode.refresh - target.refresh).abs(),
        }
    }

    fn resolution_distance(&self) -> u64 {
        u64::from(self.width) + u64::from(self.height)
    }

    /// Whether a candidate with these deltas replaces the running best `current`
    fn replaces(&self, current: &Deltas) -> bool {
        if self.width == current.width && self.height == current.height {
            self.bits_per_pixel <= current.bits_per_pixel && self.refresh <= current.refresh
        } else {
            // a tie on the summed distance also replaces the current best
            self.resolution_distance() <= current.resolution_distance()
        }
    }
}

/// Returns the mode nearest to the target.
///
/// Modes are scanned in order while keeping a running best. A later mode with the same width
/// and height deltas wins when neither its depth nor its refresh delta is worse. Otherwise a
/// later mode wins when its summed width and height delta is not larger than the best's.
pub fn closest<'a, M: AsRef<Mode>>(target: &Mode, modes: &'a [M]) -> Result<&'a M> {
    let mut best: Option<(&'a M, Deltas)> = None;

    for candidate in modes {
        let deltas = Deltas::between(candidate.as_ref(), target);
        let replace = match &best {
            None => true,
            Some((_, current)) => deltas.replaces(current),
        };
        if replace {
            best = Some((candidate, deltas));
        }
    }

    best.map(|(mode, _)| mode).ok_or(SelectError::NoModes)
}

/// Builds a target out of the maximum width, height, bits per pixel and refresh rate.
///
/// Each maximum is taken independently, so the result need not be one of `modes`.
pub fn highest_target<M: AsRef<Mode>>(modes: &[M]) -> Result<Mode> {
    if modes.is_empty() {
        return Err(SelectError::NoModes);
    }

    Ok(modes.iter().fold(Mode::default(), |highest, candidate| {
        let mode: &Mode = candidate.as_ref();
        Mode {
            width: highest.width.max(mode.width),
            height: highest.height.max(mode.height),
            bits_per_pixel: highest.bits_per_pixel.max(mode.bits_per_pixel),
            refresh: highest.refresh.max(mode.refresh),
        }
    }))
}

/// Returns the mode nearest to the per-field maxima of `modes`
pub fn highest<'a, M: AsRef<Mode>>(modes: &'a [M]) -> Result<&'a M> {
    let target = highest_target(modes)?;
    closest(&target, modes)
}

/// Iterates over every mode in enumeration order, without selecting any
pub fn list_all<H>(modes: &[DisplayMode<H>]) -> Result<slice::Iter<'_, DisplayMode<H>>> {
    if modes.is_empty() {
        return Err(SelectError::NoModes);
    }
    Ok(modes.iter())
}
