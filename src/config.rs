//! The immutable configuration of one run, built once from the command line

use thiserror::Error;

use crate::{
    backend::MirrorPolicy,
    selector::MatchPolicy,
    types::{BitDepth, Mode, ParseBitDepthError},
};

/// Target used when no values are given
pub const DEFAULT_TARGET: Mode = Mode {
    width: 1024,
    height: 768,
    bits_per_pixel: 32,
    refresh: 75.0,
};

/// Errors that occur while building a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Expected WIDTH HEIGHT BPP REFRESH, got {0} value(s)")]
    PositionalCount(usize),
    #[error("Invalid {name} `{value}`")]
    Integer {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid refresh rate `{value}`")]
    Refresh {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Invalid bits per pixel")]
    BitDepth(#[from] ParseBitDepthError),
}

type Result<T> = std::result::Result<T, ConfigError>;

/// Parses the legacy positional form `WIDTH HEIGHT BPP REFRESH`.
///
/// No values yields `None`; any count other than 0 or 4 is an error.
pub fn parse_positional<S: AsRef<str>>(values: &[S]) -> Result<Option<Mode>> {
    let [width, height, bpp, refresh]: [&str; 4] = match values {
        [] => return Ok(None),
        [width, height, bpp, refresh] => {
            [width.as_ref(), height.as_ref(), bpp.as_ref(), refresh.as_ref()]
        }
        _ => return Err(ConfigError::PositionalCount(values.len())),
    };

    let parse_int = |name: &'static str, value: &str| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|source| ConfigError::Integer {
                name,
                value: value.to_string(),
                source,
            })
    };

    Ok(Some(Mode {
        width: parse_int("width", width)?,
        height: parse_int("height", height)?,
        bits_per_pixel: bpp.parse::<BitDepth>()?.bits(),
        refresh: refresh
            .trim()
            .parse()
            .map_err(|source| ConfigError::Refresh {
                value: refresh.to_string(),
                source,
            })?,
    }))
}

/// Individually set target fields, each taking precedence over the positional form
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct TargetOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bit_depth: Option<BitDepth>,
    pub refresh: Option<f64>,
}

impl TargetOverrides {
    /// Resolves the target: defaults, then the positional form, then the overrides
    pub fn resolve(&self, positional: Option<Mode>) -> Mode {
        let base = positional.unwrap_or(DEFAULT_TARGET);
        Mode {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            bits_per_pixel: self.bit_depth.map_or(base.bits_per_pixel, |b| b.bits()),
            refresh: self.refresh.unwrap_or(base.refresh),
        }
    }
}

/// What a run does for each display
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Print every mode, change nothing
    ListAll,
    /// Pick one mode with the policy and apply it unless disabled
    Select(MatchPolicy),
}

/// The action requested on the command line
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Request {
    ListAll,
    #[default]
    Closest,
    Exact,
    /// Show the highest mode without changing anything
    ShowHighest,
    /// Show the highest mode and apply it
    SetHighest,
}

impl Request {
    pub fn operation(self) -> Operation {
        match self {
            Request::ListAll => Operation::ListAll,
            Request::Closest => Operation::Select(MatchPolicy::Closest),
            Request::Exact => Operation::Select(MatchPolicy::Exact),
            Request::ShowHighest | Request::SetHighest => {
                Operation::Select(MatchPolicy::Highest)
            }
        }
    }

    /// Whether the request changes display settings by itself
    pub fn changes_display(self) -> bool {
        !matches!(self, Request::ListAll | Request::ShowHighest)
    }
}

/// Contains everything a run needs to know
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub target: Mode,
    pub operation: Operation,
    /// Whether the selected mode is applied
    pub apply: bool,
    pub mirror: MirrorPolicy,
    /// Only list modes usable for a desktop session
    pub usable_only: bool,
    pub verbose: bool,
}

impl Config {
    /// Builds a configuration for `request` against `target`
    pub fn new(target: Mode, request: Request, no_change: bool) -> Self {
        Self {
            target,
            operation: request.operation(),
            apply: request.changes_display() && !no_change,
            mirror: MirrorPolicy::Unchanged,
            usable_only: false,
            verbose: false,
        }
    }

    pub fn with_mirror(mut self, mirror: MirrorPolicy) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_usable_only(mut self, usable_only: bool) -> Self {
        self.usable_only = usable_only;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET, Request::default(), false)
    }
}
