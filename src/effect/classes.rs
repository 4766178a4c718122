//! Stable class names and inline style properties written by the effect.
//!
//! Stylesheets and tests downstream depend on these exact strings.

/// Marks an element the effect has taken over.
pub const CONTAINER_CLASS: &str = "sticky-parallax-container";
/// Wrapper inserted between a container and its blocks.
pub const LOCKUP_CLASS: &str = "sticky-parallax-lockup";
/// Marks each stacked child.
pub const BLOCK_CLASS: &str = "sticky-parallax-block";

/// Per-frame state classes toggled on blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BlockClass {
    Active,
    Next,
    WillChange,
}

impl BlockClass {
    pub const ALL: [BlockClass; 3] = [Self::Active, Self::Next, Self::WillChange];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "sticky-block-active",
            Self::Next => "sticky-block-next",
            Self::WillChange => "sticky-block-will-change",
        }
    }
}

/// Inline style properties the effect writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StyleProp {
    Height,
    PaddingTop,
    PaddingBottom,
    MarginTop,
    MarginBottom,
    Transform,
    Opacity,
}

impl StyleProp {
    /// Properties touched on a container.
    pub const CONTAINER: [StyleProp; 5] = [
        Self::Height,
        Self::PaddingTop,
        Self::PaddingBottom,
        Self::MarginTop,
        Self::MarginBottom,
    ];

    /// Properties touched on a block.
    pub const BLOCK: [StyleProp; 6] = [
        Self::PaddingTop,
        Self::PaddingBottom,
        Self::MarginTop,
        Self::MarginBottom,
        Self::Transform,
        Self::Opacity,
    ];

    /// Vertical box properties zeroed on both containers and blocks.
    pub const VERTICAL_BOX: [StyleProp; 4] = [
        Self::PaddingTop,
        Self::PaddingBottom,
        Self::MarginTop,
        Self::MarginBottom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::PaddingTop => "padding-top",
            Self::PaddingBottom => "padding-bottom",
            Self::MarginTop => "margin-top",
            Self::MarginBottom => "margin-bottom",
            Self::Transform => "transform",
            Self::Opacity => "opacity",
        }
    }
}

pub fn translate_y(offset_px: f64) -> String {
    format!("translateY({offset_px}px)")
}

pub fn opacity_value(opacity: f64) -> String {
    format!("{opacity}")
}

/// Container height: one viewport per block plus one to scroll out.
pub fn container_height(block_count: usize) -> String {
    format!("{}vh", 100 * (block_count + 1))
}
