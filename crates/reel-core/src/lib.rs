#![forbid(unsafe_code)]

//! Core: carousel index management.
//!
//! # Role in reel
//! `reel-core` owns the one piece of logic every carousel shares: which item
//! is active, how that changes on click, timer tick, or drag, and what
//! happens at the ends of the list. It performs no I/O and owns no timers.
//!
//! # Primary responsibilities
//! - **Carousel**: index state and the idle / dragging / resetting machine.
//! - **BoundaryPolicy**: clamp, wrap-around, and preview-siblings index spaces.
//! - **Drag evaluation**: distance/velocity thresholds and release-velocity
//!   estimation.
//! - **CarouselConfig**: construction-time options, presets, TOML/JSON loading.
//!
//! # How it fits in the system
//! `reel-runtime` supplies the collaborators (clock, auto-advance timer,
//! message driver) and calls into this crate. Renderers read
//! [`Carousel::index`], [`Carousel::active`] and [`Carousel::motion`].
//!
//! # Crate features
//!
//! - `config`: serde derives plus `from_toml_*` / `from_json_*` loaders.
//! - `tracing`: `debug!` events for every index transition.

pub mod carousel;
pub mod config;
pub mod drag;
pub mod policy;

pub use carousel::{Carousel, CarouselPhase, DragOutcome, Motion, Siblings};
pub use config::{CarouselConfig, CarouselConfigError};
pub use drag::{DragDecision, DragSample, DragThresholds, VelocityTracker};
pub use policy::BoundaryPolicy;
