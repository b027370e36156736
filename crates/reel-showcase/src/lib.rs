#![forbid(unsafe_code)]

//! Headless carousel demo.
//!
//! Runs a [`CarouselDriver`] over [`data::PROJECTS`] on real time: a frame
//! timer feeds `Frame` messages, the driver's autoplay decides when to
//! advance, and every emitted event is printed as a text frame.

pub mod data;
pub mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reel_core::{BoundaryPolicy, CarouselConfig, CarouselConfigError, CarouselPhase};
use reel_runtime::{
    CarouselDriver, CarouselMsg, Every, MonotonicClock, Subscription, Subscriptions, SystemClock,
};

/// Subscription ID of the frame timer.
const FRAME_ID: u64 = 0x4652_414D; // "FRAM"
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Give up if the timer thread goes quiet for this long.
const STALL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(
    name = "reel-showcase",
    about = "Print the featured-projects carousel as it auto-advances",
    version
)]
pub struct Cli {
    /// Boundary policy: clamp, wrap, or preview.
    #[arg(long)]
    pub policy: Option<BoundaryPolicy>,

    /// Carousel config file (TOML). Flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Auto-advance interval in milliseconds.
    #[arg(long = "interval-ms")]
    pub interval_ms: Option<u64>,

    /// Loop forward through a duplicate of the first slide (wrap policy only).
    #[arg(long)]
    pub seamless: bool,

    /// Stop after printing this many frames.
    #[arg(long, default_value_t = 12)]
    pub frames: usize,

    /// Maximum line width of a printed frame.
    #[arg(long, default_value_t = 60)]
    pub width: usize,
}

/// Failure running the demo.
#[derive(Debug)]
pub enum ShowcaseError {
    /// Bad or unreadable configuration.
    Config(CarouselConfigError),
    /// Writing output failed.
    Io(io::Error),
    /// The frame timer stopped delivering.
    Stalled,
}

impl std::fmt::Display for ShowcaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Io(e) => write!(f, "output error: {e}"),
            Self::Stalled => write!(f, "frame timer stalled"),
        }
    }
}

impl std::error::Error for ShowcaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Stalled => None,
        }
    }
}

impl From<CarouselConfigError> for ShowcaseError {
    fn from(e: CarouselConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for ShowcaseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl ShowcaseError {
    /// Process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) | Self::Stalled => 1,
        }
    }
}

/// Resolve the carousel config from the file (if any) plus flag overrides.
///
/// Autoplay is always on: without it the demo would print nothing.
pub fn resolve_config(cli: &Cli) -> Result<CarouselConfig, ShowcaseError> {
    let mut config = match &cli.config {
        Some(path) => CarouselConfig::from_toml_file(path)?,
        None => CarouselConfig::featured_projects(),
    };
    if let Some(policy) = cli.policy {
        config = config.with_boundary_policy(policy);
    }
    if let Some(ms) = cli.interval_ms {
        config = config.with_auto_advance_interval(Duration::from_millis(ms));
    }
    if cli.seamless {
        config = config.with_loop_seamlessly(true);
    }
    Ok(config.with_auto_advance(true).validated()?)
}

/// Run the demo, writing frames to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), ShowcaseError> {
    let config = resolve_config(cli)?;
    tracing::info!(
        message = "showcase.start",
        policy = config.boundary_policy.as_str(),
        interval_ms = config.auto_advance_interval.as_millis() as u64,
        seamless = config.loop_seamlessly,
        frames = cli.frames
    );

    let mut driver = CarouselDriver::new(data::PROJECTS.to_vec(), config);
    let clock = SystemClock::new();
    let mut subs = Subscriptions::new();
    let timers: Vec<Box<dyn Subscription<CarouselMsg>>> = vec![Box::new(Every::with_id(
        FRAME_ID,
        FRAME_INTERVAL,
        || CarouselMsg::Frame,
    ))];
    subs.reconcile(timers);

    let mut printed = 0;
    while printed < cli.frames {
        let msg = subs.recv_timeout(STALL_TIMEOUT).ok_or(ShowcaseError::Stalled)?;
        for event in driver.update(msg, clock.now_mono()) {
            if printed == cli.frames {
                break;
            }
            writeln!(out, "{}\n", render::frame(driver.carousel(), &event, cli.width))?;
            printed += 1;
        }
        if at_rest_on_last(&driver) {
            tracing::info!(message = "showcase.end_of_list", index = driver.carousel().index());
            break;
        }
    }
    out.flush()?;
    subs.stop_all();
    tracing::info!(message = "showcase.done", printed);
    Ok(())
}

/// Autoplay can never move this carousel again.
fn at_rest_on_last<T>(driver: &CarouselDriver<T>) -> bool {
    let carousel = driver.carousel();
    carousel.phase() == CarouselPhase::Idle && !carousel.can_go_next()
}
