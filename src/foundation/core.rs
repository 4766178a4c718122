use crate::foundation::error::{ParallaxError, ParallaxResult};

pub use kurbo::{Rect, Size};

/// Handle addressing one element inside a [`crate::DomHost`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visible area of the host document, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> ParallaxResult<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(ParallaxError::validation(
                "Viewport width must be finite and >= 0",
            ));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ParallaxError::validation(
                "Viewport height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when any part of `rect` (viewport-relative) is on screen vertically.
    pub fn intersects(self, rect: Rect) -> bool {
        rect.y0 < self.height && rect.y1 > 0.0
    }

    /// Resolve a `vh` length to pixels.
    pub fn vh(self, units: f64) -> f64 {
        units * self.height / 100.0
    }
}
