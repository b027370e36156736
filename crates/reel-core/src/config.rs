#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! A [`CarouselConfig`] is fixed at construction time. It can be built in
//! code, taken from one of the presets, or (with the `config` feature)
//! loaded from TOML or JSON.
//!
//! ```toml
//! # reel.toml
//! boundary_policy = "wrap_around"
//! auto_advance = true
//! auto_advance_interval_ms = 4000
//! loop_seamlessly = true
//! drag_distance_threshold = 8.0
//! drag_velocity_threshold = 500.0
//! ```
//!
//! ```rust,ignore
//! let config = CarouselConfig::from_toml_file("reel.toml")?.validated()?;
//! ```
//!
//! Missing fields take the values of [`CarouselConfig::default`].

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::drag::DragThresholds;
use crate::policy::BoundaryPolicy;

/// Default auto-advance period.
pub const DEFAULT_AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(5000);
/// Default minimum drag distance (logical pixels) to commit a transition.
pub const DEFAULT_DRAG_DISTANCE_THRESHOLD: f32 = 8.0;
/// Default fling velocity (logical pixels / second) that commits regardless of distance.
pub const DEFAULT_DRAG_VELOCITY_THRESHOLD: f32 = 500.0;
/// Default grace window after a seamless-loop reset before input is accepted.
pub const DEFAULT_RESET_GRACE: Duration = Duration::from_millis(50);

/// Construction-time options for a [`Carousel`](crate::carousel::Carousel).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CarouselConfig {
    /// Behavior at the first and last position.
    pub boundary_policy: BoundaryPolicy,

    /// Whether [`tick`](crate::carousel::Carousel::tick) has any effect.
    pub auto_advance: bool,

    /// Timer period used by whoever calls `tick`. Informational for the
    /// controller itself.
    #[cfg_attr(
        feature = "config",
        serde(rename = "auto_advance_interval_ms", with = "millis")
    )]
    pub auto_advance_interval: Duration,

    /// Append a duplicate of the first item and reset onto the real one
    /// after reaching it. Requires [`BoundaryPolicy::WrapAround`].
    pub loop_seamlessly: bool,

    /// Minimum absolute displacement (exclusive) to commit a drag.
    pub drag_distance_threshold: f32,

    /// Minimum absolute velocity (exclusive) to commit a drag regardless of distance.
    pub drag_velocity_threshold: f32,

    /// How long navigation stays suspended after a seamless-loop reset.
    #[cfg_attr(feature = "config", serde(rename = "reset_grace_ms", with = "millis"))]
    pub reset_grace: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            boundary_policy: BoundaryPolicy::Clamp,
            auto_advance: false,
            auto_advance_interval: DEFAULT_AUTO_ADVANCE_INTERVAL,
            loop_seamlessly: false,
            drag_distance_threshold: DEFAULT_DRAG_DISTANCE_THRESHOLD,
            drag_velocity_threshold: DEFAULT_DRAG_VELOCITY_THRESHOLD,
            reset_grace: DEFAULT_RESET_GRACE,
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

impl CarouselConfig {
    /// One project at a time with arrow buttons that stop at the ends.
    #[must_use]
    pub fn featured_projects() -> Self {
        Self::default()
    }

    /// Three reviews visible, the middle one active, no wrapping.
    #[must_use]
    pub fn reviews() -> Self {
        Self::default().with_boundary_policy(BoundaryPolicy::PreviewSiblings)
    }

    /// Continuously auto-advancing strip that loops without a visible jump.
    #[must_use]
    pub fn showcase_loop() -> Self {
        Self::default()
            .with_boundary_policy(BoundaryPolicy::WrapAround)
            .with_auto_advance(true)
            .with_loop_seamlessly(true)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

impl CarouselConfig {
    /// Set the boundary policy.
    #[must_use]
    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }

    /// Enable or disable auto-advance.
    #[must_use]
    pub fn with_auto_advance(mut self, enabled: bool) -> Self {
        self.auto_advance = enabled;
        self
    }

    /// Set the auto-advance period.
    #[must_use]
    pub fn with_auto_advance_interval(mut self, interval: Duration) -> Self {
        self.auto_advance_interval = interval;
        self
    }

    /// Enable or disable the duplicate-item seamless loop.
    #[must_use]
    pub fn with_loop_seamlessly(mut self, enabled: bool) -> Self {
        self.loop_seamlessly = enabled;
        self
    }

    /// Set the drag distance threshold (logical pixels).
    #[must_use]
    pub fn with_drag_distance_threshold(mut self, px: f32) -> Self {
        self.drag_distance_threshold = px;
        self
    }

    /// Set the drag velocity threshold (logical pixels / second).
    #[must_use]
    pub fn with_drag_velocity_threshold(mut self, px_per_sec: f32) -> Self {
        self.drag_velocity_threshold = px_per_sec;
        self
    }

    /// Set the post-reset grace window.
    #[must_use]
    pub fn with_reset_grace(mut self, grace: Duration) -> Self {
        self.reset_grace = grace;
        self
    }

    /// Drag thresholds as a standalone value.
    #[must_use]
    pub fn drag_thresholds(&self) -> DragThresholds {
        DragThresholds::new(self.drag_distance_threshold, self.drag_velocity_threshold)
    }
}

// ---------------------------------------------------------------------------
// Loading and validation
// ---------------------------------------------------------------------------

impl CarouselConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, CarouselConfigError> {
        toml::from_str(s).map_err(CarouselConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, CarouselConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CarouselConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, CarouselConfigError> {
        serde_json::from_str(s).map_err(CarouselConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CarouselConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CarouselConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.drag_distance_threshold.is_finite() || self.drag_distance_threshold < 0.0 {
            errors.push(format!(
                "drag_distance_threshold must be finite and >= 0, got {}",
                self.drag_distance_threshold
            ));
        }
        if !self.drag_velocity_threshold.is_finite() || self.drag_velocity_threshold < 0.0 {
            errors.push(format!(
                "drag_velocity_threshold must be finite and >= 0, got {}",
                self.drag_velocity_threshold
            ));
        }
        if self.auto_advance && self.auto_advance_interval.is_zero() {
            errors.push("auto_advance_interval must be > 0 when auto_advance is on".into());
        }
        if self.loop_seamlessly && self.boundary_policy != BoundaryPolicy::WrapAround {
            errors.push(format!(
                "loop_seamlessly requires boundary_policy = wrap_around, got {}",
                self.boundary_policy
            ));
        }

        errors
    }

    /// Consume the config, returning it only if [`validate`](Self::validate) is clean.
    pub fn validated(self) -> Result<Self, CarouselConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(CarouselConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a carousel configuration.
#[derive(Debug)]
pub enum CarouselConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for CarouselConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for CarouselConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

#[cfg(feature = "config")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
