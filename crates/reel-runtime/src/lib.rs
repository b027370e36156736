#![forbid(unsafe_code)]

//! Runtime: the collaborators that drive a carousel.
//!
//! `reel-core` decides *what* happens on `next`, `tick`, or a drag. This
//! crate decides *when*: it owns clocks, the auto-advance timer with hover
//! pause, background timer threads, and a message-driven host
//! ([`CarouselDriver`]) that ties them together.
//!
//! # Key components
//!
//! - [`clock`]: [`MonotonicClock`] with real and deterministic implementations.
//! - [`autoplay`]: interval scheduling with hover pause and manual-override restart.
//! - [`subscription`]: `Every`-style timers running on background threads.
//! - [`driver`]: [`CarouselDriver`], mapping [`CarouselMsg`] to [`CarouselEvent`].

pub mod autoplay;
pub mod clock;
pub mod driver;
pub mod subscription;

pub use autoplay::Autoplay;
pub use clock::{DeterministicClock, MonotonicClock, SystemClock};
pub use driver::{CarouselDriver, CarouselEvent, CarouselMsg, DEFAULT_TRANSITION, DriverConfig};
pub use subscription::{Every, MockSubscription, StopSignal, StopTrigger, SubId, Subscription, Subscriptions};

pub use reel_core;
