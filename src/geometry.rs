//! Layout rectangles and CSS root-margin parsing.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::RevealError;

/// Axis-aligned rectangle in document (logical pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Rectangle from position and size.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// Overlapping region, if the rectangles touch or overlap.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.origin.max(other.origin);
        let max = self.max().min(other.max());
        if max.x < min.x || max.y < min.y {
            return None;
        }
        Some(Rect {
            origin: min,
            size: max - min,
        })
    }

    /// Grow (positive) or shrink (negative) each edge independently.
    #[must_use]
    pub fn inflate(&self, top: f32, right: f32, bottom: f32, left: f32) -> Rect {
        let origin = Vec2::new(self.origin.x - left, self.origin.y - top);
        let size = Vec2::new(
            (self.size.x + left + right).max(0.0),
            (self.size.y + top + bottom).max(0.0),
        );
        Rect { origin, size }
    }
}

/// A single root-margin component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute logical pixels.
    Px(f32),
    /// Percentage of the root's corresponding dimension.
    Percent(f32),
}

impl Length {
    /// Resolve against the root dimension this side is measured on.
    #[must_use]
    pub fn resolve(self, basis: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |num: &str| {
            num.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RevealError::InvalidRootMargin(s.to_owned()))
        };
        if let Some(num) = s.strip_suffix("px") {
            parse(num).map(Self::Px)
        } else if let Some(num) = s.strip_suffix('%') {
            parse(num).map(Self::Percent)
        } else if s == "0" {
            Ok(Self::Px(0.0))
        } else {
            Err(RevealError::InvalidRootMargin(s.to_owned()))
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Offsets applied to the viewport before intersection is computed, using
/// CSS margin shorthand (`"10px"`, `"0px 0px -100px 0px"`, ...). Negative
/// values shrink the root so elements must travel further in before they
/// count as visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    /// Top edge offset.
    pub top: Length,
    /// Right edge offset.
    pub right: Length,
    /// Bottom edge offset.
    pub bottom: Length,
    /// Left edge offset.
    pub left: Length,
}

impl RootMargin {
    /// No offset on any edge.
    pub const ZERO: RootMargin = RootMargin {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// Margin that only offsets the bottom edge.
    #[must_use]
    pub fn bottom_px(px: f32) -> Self {
        Self {
            bottom: Length::Px(px),
            ..Self::ZERO
        }
    }

    /// Apply the margin to a root rectangle.
    #[must_use]
    pub fn apply(&self, root: &Rect) -> Rect {
        let (w, h) = (root.size.x, root.size.y);
        root.inflate(
            self.top.resolve(h),
            self.right.resolve(w),
            self.bottom.resolve(h),
            self.left.resolve(w),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::bottom_px(-50.0)
    }
}

impl FromStr for RootMargin {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_whitespace()
            .map(str::parse::<Length>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| RevealError::InvalidRootMargin(s.to_owned()))?;
        match parts.as_slice() {
            [all] => Ok(Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            }),
            [v, h] => Ok(Self {
                top: *v,
                right: *h,
                bottom: *v,
                left: *h,
            }),
            [t, h, b] => Ok(Self {
                top: *t,
                right: *h,
                bottom: *b,
                left: *h,
            }),
            [t, r, b, l] => Ok(Self {
                top: *t,
                right: *r,
                bottom: *b,
                left: *l,
            }),
            _ => Err(RevealError::InvalidRootMargin(s.to_owned())),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = RevealError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}
