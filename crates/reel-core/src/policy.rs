#![forbid(unsafe_code)]

//! Boundary policies: what happens when navigation runs off either end.
//!
//! A [`BoundaryPolicy`] is a pure function table over `(index, len)`. It owns
//! no state; the [`Carousel`](crate::carousel::Carousel) stores the index and
//! asks the policy how to move it.
//!
//! # Index spaces
//!
//! | policy | valid range | active item |
//! |---|---|---|
//! | `Clamp` | `[0, N-1]` | `index` |
//! | `WrapAround` | `[0, N-1]` | `index` |
//! | `PreviewSiblings` | `[-1, N-2]` | `index + 1` |
//!
//! In preview-siblings mode three slots are shown and the index names the slot
//! to the left of the centered one, so `-1` means "first item centered".
//!
//! # Invariants
//!
//! 1. For `N > 0`, every function returning an index returns a value inside
//!    [`bounds`](BoundaryPolicy::bounds).
//! 2. `active_item` of any in-bounds index is a valid subscript into `[0, N)`.
//! 3. `WrapAround` with `N == 1` never moves.
//!
//! # Failure Modes
//!
//! - `N == 0`: there are no bounds. Stepping and clamping return the input
//!   unchanged and `active_item` returns `None`.

/// Rule for navigation past the first or last valid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum BoundaryPolicy {
    /// Stop at the first and last item.
    #[default]
    Clamp,
    /// Advancing past the last item returns to the first, and vice versa.
    #[cfg_attr(feature = "config", serde(alias = "wrapAround"))]
    WrapAround,
    /// Three items visible, the middle one active; index range is `[-1, N-2]`.
    #[cfg_attr(feature = "config", serde(alias = "previewSiblings"))]
    PreviewSiblings,
}

impl BoundaryPolicy {
    /// Index a freshly constructed carousel starts at.
    ///
    /// This is also the sentinel returned for an empty item list.
    #[inline]
    #[must_use]
    pub const fn initial_index(self) -> isize {
        match self {
            Self::Clamp | Self::WrapAround => 0,
            Self::PreviewSiblings => -1,
        }
    }

    /// Inclusive `(min, max)` index range, or `None` for an empty list.
    #[must_use]
    pub fn bounds(self, len: usize) -> Option<(isize, isize)> {
        if len == 0 {
            return None;
        }
        let last = to_isize(len) - 1;
        Some(match self {
            Self::Clamp | Self::WrapAround => (0, last),
            Self::PreviewSiblings => (-1, last - 1),
        })
    }

    /// Clamp an arbitrary target into [`bounds`](Self::bounds).
    #[must_use]
    pub fn clamp_index(self, target: isize, len: usize) -> isize {
        match self.bounds(len) {
            Some((min, max)) => target.clamp(min, max),
            None => target,
        }
    }

    /// One step forward under this policy.
    #[must_use]
    pub fn step_forward(self, index: isize, len: usize) -> isize {
        let Some((min, max)) = self.bounds(len) else {
            return index;
        };
        match self {
            Self::WrapAround if index >= max => min,
            _ => (index + 1).min(max),
        }
    }

    /// One step backward under this policy.
    #[must_use]
    pub fn step_back(self, index: isize, len: usize) -> isize {
        let Some((min, max)) = self.bounds(len) else {
            return index;
        };
        match self {
            Self::WrapAround if index <= min => max,
            _ => (index - 1).max(min),
        }
    }

    /// Whether a forward step from `index` would move.
    #[must_use]
    pub fn can_step_forward(self, index: isize, len: usize) -> bool {
        self.step_forward(index, len) != index
    }

    /// Whether a backward step from `index` would move.
    #[must_use]
    pub fn can_step_back(self, index: isize, len: usize) -> bool {
        self.step_back(index, len) != index
    }

    /// Item subscript that is visually active for `index`.
    #[must_use]
    pub fn active_item(self, index: isize, len: usize) -> Option<usize> {
        let (min, max) = self.bounds(len)?;
        if index < min || index > max {
            return None;
        }
        let item = match self {
            Self::Clamp | Self::WrapAround => index,
            Self::PreviewSiblings => index + 1,
        };
        usize::try_from(item).ok()
    }

    /// Index that makes `item` the active one, clamped.
    #[must_use]
    pub fn index_for_item(self, item: usize, len: usize) -> isize {
        let raw = match self {
            Self::Clamp | Self::WrapAround => to_isize(item),
            Self::PreviewSiblings => to_isize(item) - 1,
        };
        self.clamp_index(raw, len)
    }

    /// Short lowercase name, as used in config files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::WrapAround => "wrap_around",
            Self::PreviewSiblings => "preview_siblings",
        }
    }
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clamp" => Ok(Self::Clamp),
            "wrap" | "wrap_around" | "wrapAround" => Ok(Self::WrapAround),
            "preview" | "preview_siblings" | "previewSiblings" => Ok(Self::PreviewSiblings),
            other => Err(format!("unknown boundary policy: {other}")),
        }
    }
}

/// Saturating `usize -> isize`. Item lists never approach `isize::MAX`.
#[inline]
pub(crate) fn to_isize(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_per_policy() {
        assert_eq!(BoundaryPolicy::Clamp.bounds(5), Some((0, 4)));
        assert_eq!(BoundaryPolicy::WrapAround.bounds(5), Some((0, 4)));
        assert_eq!(BoundaryPolicy::PreviewSiblings.bounds(5), Some((-1, 3)));
        assert_eq!(BoundaryPolicy::PreviewSiblings.bounds(1), Some((-1, -1)));
        assert_eq!(BoundaryPolicy::Clamp.bounds(0), None);
    }

    #[test]
    fn wrap_steps_around_both_ends() {
        let p = BoundaryPolicy::WrapAround;
        assert_eq!(p.step_forward(4, 5), 0);
        assert_eq!(p.step_back(0, 5), 4);
        assert_eq!(p.step_forward(2, 5), 3);
    }

    #[test]
    fn wrap_single_item_never_moves() {
        let p = BoundaryPolicy::WrapAround;
        assert_eq!(p.step_forward(0, 1), 0);
        assert_eq!(p.step_back(0, 1), 0);
        assert!(!p.can_step_forward(0, 1));
    }

    #[test]
    fn clamp_stops_at_edges() {
        let p = BoundaryPolicy::Clamp;
        assert_eq!(p.step_forward(4, 5), 4);
        assert_eq!(p.step_back(0, 5), 0);
        assert!(!p.can_step_forward(4, 5));
        assert!(p.can_step_back(4, 5));
    }

    #[test]
    fn preview_siblings_range() {
        let p = BoundaryPolicy::PreviewSiblings;
        assert_eq!(p.step_back(-1, 3), -1);
        assert_eq!(p.step_forward(1, 3), 1);
        assert_eq!(p.step_forward(-1, 3), 0);
        assert_eq!(p.active_item(-1, 3), Some(0));
        assert_eq!(p.active_item(1, 3), Some(2));
        assert_eq!(p.active_item(2, 3), None);
    }

    #[test]
    fn clamp_index_handles_extremes() {
        let p = BoundaryPolicy::Clamp;
        assert_eq!(p.clamp_index(isize::MIN, 3), 0);
        assert_eq!(p.clamp_index(isize::MAX, 3), 2);
        assert_eq!(BoundaryPolicy::PreviewSiblings.clamp_index(-7, 3), -1);
    }

    #[test]
    fn empty_list_is_inert() {
        for p in [
            BoundaryPolicy::Clamp,
            BoundaryPolicy::WrapAround,
            BoundaryPolicy::PreviewSiblings,
        ] {
            let start = p.initial_index();
            assert_eq!(p.step_forward(start, 0), start);
            assert_eq!(p.step_back(start, 0), start);
            assert_eq!(p.clamp_index(42, 0), 42);
            assert_eq!(p.active_item(start, 0), None);
        }
    }

    #[test]
    fn index_for_item_centers_in_preview_mode() {
        let p = BoundaryPolicy::PreviewSiblings;
        assert_eq!(p.index_for_item(0, 4), -1);
        assert_eq!(p.index_for_item(3, 4), 2);
        assert_eq!(p.index_for_item(99, 4), 2);
        assert_eq!(BoundaryPolicy::Clamp.index_for_item(99, 4), 3);
    }

    #[test]
    fn parse_round_trips_display() {
        for p in [
            BoundaryPolicy::Clamp,
            BoundaryPolicy::WrapAround,
            BoundaryPolicy::PreviewSiblings,
        ] {
            assert_eq!(p.to_string().parse::<BoundaryPolicy>(), Ok(p));
        }
        assert!("sideways".parse::<BoundaryPolicy>().is_err());
    }
}
