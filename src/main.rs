//! The CLI interface for setdisplay
//!
//! Use the `--help` flag to see the available options.
use std::io;

use color_eyre::eyre::Result;
use setdisplay::{
    BitDepth, Config, MirrorPolicy, Request, TargetOverrides, parse_positional, platforms, run,
};
use structopt::{
    StructOpt,
    clap::{ArgGroup, Error, ErrorKind},
};

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "setdisplay",
    about = "Forces a display resolution, even when the display manager says it is not possible.",
    after_help = "No values default to 1024 768 32 75. Values set with flags override the positional ones.",
    group = ArgGroup::with_name("policy"),
    group = ArgGroup::with_name("mirroring")
)]
struct Opts {
    /// Width in pixels
    #[structopt(short = "w", long)]
    width: Option<u32>,
    /// Height in pixels
    #[structopt(short = "h", long)]
    height: Option<u32>,
    /// Bits per pixel (8, 16 or 32)
    #[structopt(short = "b", long = "bpp")]
    bpp: Option<BitDepth>,
    /// Refresh rate in Hz
    #[structopt(short = "r", long)]
    refresh: Option<f64>,
    /// Show all modes of each display (resolution not changed)
    #[structopt(short = "a", long, group = "policy")]
    all: bool,
    /// Select the closest mode (default)
    #[structopt(short = "c", long, group = "policy")]
    closest: bool,
    /// Select the exact mode, ignoring the refresh rate
    #[structopt(short = "x", long, group = "policy")]
    exact: bool,
    /// Show the highest possible mode (resolution not changed)
    #[structopt(short = "z", long = "show-highest", group = "policy")]
    show_highest: bool,
    /// Show and set the highest possible mode
    #[structopt(short = "y", long = "set-highest", group = "policy")]
    set_highest: bool,
    /// Do not change the resolution
    #[structopt(short = "n", long = "no-change")]
    no_change: bool,
    /// Mirror every other display onto the main display
    #[structopt(short = "M", long = "mirror", group = "mirroring")]
    mirror: bool,
    /// Turn mirroring off
    #[structopt(short = "m", long = "no-mirror", group = "mirroring")]
    no_mirror: bool,
    /// With --all, only list modes usable for the desktop
    #[structopt(short = "u", long = "usable-only")]
    usable_only: bool,
    /// Output debug info
    #[structopt(short, long)]
    verbose: bool,
    /// Legacy target: WIDTH HEIGHT BPP REFRESH
    #[structopt(name = "MODE")]
    legacy: Vec<String>,
}

impl Opts {
    fn request(&self) -> Request {
        if self.all {
            Request::ListAll
        } else if self.exact {
            Request::Exact
        } else if self.show_highest {
            Request::ShowHighest
        } else if self.set_highest {
            Request::SetHighest
        } else if self.closest {
            Request::Closest
        } else {
            Request::default()
        }
    }

    fn mirror_policy(&self) -> MirrorPolicy {
        if self.mirror {
            MirrorPolicy::Enable
        } else if self.no_mirror {
            MirrorPolicy::Disable
        } else {
            MirrorPolicy::Unchanged
        }
    }

    /// Builds the run configuration, exiting with a usage error on invalid values
    fn config(&self) -> Config {
        let positional = parse_positional(&self.legacy).unwrap_or_else(|err| {
            Error::with_description(&err.to_string(), ErrorKind::WrongNumberOfValues).exit()
        });

        let overrides = TargetOverrides {
            width: self.width,
            height: self.height,
            bit_depth: self.bpp,
            refresh: self.refresh,
        };

        Config::new(overrides.resolve(positional), self.request(), self.no_change)
            .with_mirror(self.mirror_policy())
            .with_usable_only(self.usable_only)
            .with_verbose(self.verbose)
    }
}

/// Entry point for `setdisplay`.
fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    let log_level = if opts.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    )
    .init();

    log::debug!("Parsed Opts:\n{:#?}", opts);

    let config = opts.config();
    log::debug!("Configuration:\n{:#?}", config);

    let backend = platforms::native();
    let report = run(&backend, &config, &mut io::stdout().lock())?;
    log::debug!("Report:\n{:#?}", report);

    if report.exit_code() != 0 {
        log::error!("{} display(s) could not be read", report.invalid.len());
        std::process::exit(report.exit_code());
    }

    Ok(())
}
