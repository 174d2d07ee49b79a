//! Runs the configured operation over every online display, one display at a time.
//!
//! Result lines are written to the given writer, diagnostics go to the logger. A display that
//! cannot be read is skipped; the run continues with the next one.

use std::io::{self, Write};

use thiserror::Error;

use crate::{
    backend::{DisplayBackend, DisplayId},
    config::{Config, Operation},
    display::{Display, DisplayError, query_displays},
    selector::{self, MatchPolicy, SelectError},
    types::{DisplayMode, Mode},
};

const DISPLAY_RULE: &str = "------------------------------------";
const CLOSING_RULE: &str = "-----------------------------------";

/// Error type for the session module
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("Failed to write output")]
    Output(#[from] io::Error),
}

type Result<T = ()> = std::result::Result<T, SessionError>;

/// What happened to each display during a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Number of online displays found
    pub displays: usize,
    /// Displays that could not be read and were skipped
    pub invalid: Vec<DisplayId>,
    /// Displays without a mode matching the policy
    pub no_match: Vec<DisplayId>,
    pub applied: Vec<DisplayId>,
    pub apply_failed: Vec<DisplayId>,
}

impl Report {
    /// Process exit code: 1 when any display was invalid, 0 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.invalid.is_empty() { 0 } else { 1 }
    }
}

/// Runs `config` against every display of `backend`.
///
/// Fails only when the displays cannot be enumerated or the output cannot be written.
pub fn run<B: DisplayBackend, W: Write>(
    backend: &B,
    config: &Config,
    out: &mut W,
) -> Result<Report> {
    let target = &config.target;
    if config.verbose {
        writeln!(
            out,
            "Width: {} Height: {} BitsPerPixel: {} Refresh rate: {}",
            target.width, target.height, target.bits_per_pixel, target.refresh
        )?;
    }

    let display_set = query_displays(backend)?;
    log::debug!("Discovered displays:\n{}", display_set);

    if config.verbose {
        writeln!(out, "{} online display(s) found", display_set.len())?;
    }

    let mut report = Report {
        displays: display_set.len(),
        ..Default::default()
    };

    for display in display_set.displays() {
        process_display(&display, config, out, &mut report)?;
    }

    Ok(report)
}

fn process_display<B: DisplayBackend, W: Write>(
    display: &Display<'_, '_, B>,
    config: &Config,
    out: &mut W,
    report: &mut Report,
) -> Result {
    let id = display.id();
    log::debug!("Processing display {} (main={})", id, display.is_main());
    if config.verbose && config.operation != Operation::ListAll {
        writeln!(out, "{DISPLAY_RULE}")?;
    }

    let readable = display
        .current_mode()
        .and_then(|current| Ok((current, display.modes()?)));
    let (current, modes) = match readable {
        Ok(readable) => readable,
        Err(err) => {
            log::error!("Display {} is invalid: {}", id, err);
            report.invalid.push(id);
            return Ok(());
        }
    };

    if config.verbose {
        writeln!(out, "Display {}", id)?;
        writeln!(out, "Current mode: {}", current)?;
    }

    match config.operation {
        Operation::ListAll => list_modes(&modes, config, out),
        Operation::Select(policy) => select_mode(display, &modes, policy, config, out, report),
    }
}

fn list_modes<H, W: Write>(modes: &[DisplayMode<H>], config: &Config, out: &mut W) -> Result {
    if config.verbose {
        writeln!(out, "------ All modes for display ------")?;
    }
    for mode in selector::list_all(modes)?.filter(|mode| mode.usable || !config.usable_only) {
        writeln!(out, "{}", mode)?;
    }
    if config.verbose {
        writeln!(out, "{CLOSING_RULE}")?;
    }
    Ok(())
}

fn banner(policy: MatchPolicy) -> &'static str {
    match policy {
        MatchPolicy::Exact => "------ Exact mode for display -----",
        MatchPolicy::Closest => "----- Closest mode for display ----",
        MatchPolicy::Highest => "----- Highest mode for display ----",
    }
}

fn select_mode<B: DisplayBackend, W: Write>(
    display: &Display<'_, '_, B>,
    modes: &[DisplayMode<B::Handle>],
    policy: MatchPolicy,
    config: &Config,
    out: &mut W,
    report: &mut Report,
) -> Result {
    let id = display.id();
    if config.verbose {
        writeln!(out, "{}", banner(policy))?;
    }

    let selection = match selector::select(policy, &config.target, modes) {
        Ok(selection) => selection,
        Err(SelectError::NoMatch) => {
            log::warn!("No {} match for display {}", policy, id);
            writeln!(out, "{}", Mode::default())?;
            if config.verbose {
                writeln!(out, "{CLOSING_RULE}")?;
            }
            report.no_match.push(id);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if config.verbose && policy == MatchPolicy::Highest {
        let highest = &selection.target;
        writeln!(
            out,
            "Highest mode for display: {} x {}, {} Bits Per Pixel, {} Hz",
            highest.width, highest.height, highest.bits_per_pixel, highest.refresh
        )?;
    }
    writeln!(out, "{}", selection.mode.mode)?;
    if config.verbose {
        if policy != MatchPolicy::Exact && !selection.is_exact() {
            writeln!(out, "Not an exact match")?;
        }
        writeln!(out, "{CLOSING_RULE}")?;
    }

    if !config.apply {
        log::debug!("Leaving display {} unchanged", id);
        return Ok(());
    }

    match display.apply(selection.mode, config.mirror) {
        Ok(()) => {
            log::info!("Display {} set to {}", id, selection.mode.mode);
            report.applied.push(id);
        }
        Err(err) => {
            log::error!("Failed to configure display {}: {}", id, err);
            writeln!(out, "{}", err)?;
            report.apply_failed.push(id);
        }
    }

    Ok(())
}
