use crate::{
    config::options::ParallaxOptions,
    effect::opacity::calculate_opacity,
    foundation::core::Rect,
};

/// Where the scroll position sits relative to a container's blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActiveSlot {
    /// Scrolled before the first block (raw index `-1`).
    Before,
    /// A block is pinned.
    Block(usize),
    /// Scrolled past the last block (raw index `block_count`).
    After,
}

impl ActiveSlot {
    pub fn from_raw(raw: i64, block_count: usize) -> Self {
        if raw < 0 {
            Self::Before
        } else if raw as u64 >= block_count as u64 {
            Self::After
        } else {
            Self::Block(raw as usize)
        }
    }

    /// Signed index with sentinels `-1` and `block_count`.
    pub fn raw(self, block_count: usize) -> i64 {
        match self {
            Self::Before => -1,
            Self::Block(i) => i as i64,
            Self::After => block_count as i64,
        }
    }

    pub fn block(self) -> Option<usize> {
        match self {
            Self::Block(i) => Some(i),
            Self::Before | Self::After => None,
        }
    }
}

/// Result of evaluating one container for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockSettings {
    pub active: ActiveSlot,
    /// Block pre-rendered for the upcoming transition; always `< block_count`.
    pub next: usize,
    /// Vertical translation of the active block in pixels.
    pub offset: f64,
    /// `None` while the container is entirely off screen.
    pub opacity: Option<f64>,
}

/// Evaluate the active/next blocks for a container whose viewport-relative
/// bounding box is `rect`.
///
/// `block_count` must be at least 1 for `next` to address a real block.
pub fn compute_block_settings(
    rect: Rect,
    viewport_height: f64,
    block_count: usize,
    opts: &ParallaxOptions,
) -> BlockSettings {
    let max = opts.max_offset;
    let (raw, offset, opacity) = if rect.y0 > 0.0 {
        // below the viewport
        (-1, max, None)
    } else if rect.y1 < 0.0 {
        // above the viewport
        (block_count as i64, -max, None)
    } else {
        let raw = (rect.y0.abs() / viewport_height).ceil() as i64 - 1;
        let offset = (rect.y0 % viewport_height) / viewport_height * 2.0 * max + max;
        (raw, offset, Some(calculate_opacity(offset, opts)))
    };

    BlockSettings {
        active: ActiveSlot::from_raw(raw, block_count),
        next: select_next(raw, block_count, offset),
        offset,
        opacity,
    }
}

/// Pick the block that is about to take over from `active`.
///
/// At the ends of the stack the neighbour is fixed; in the middle it
/// follows the slide direction (a positive offset is still sliding in, so
/// the previous block is the one underneath).
pub fn select_next(active: i64, block_count: usize, offset: f64) -> usize {
    if block_count <= 1 {
        return 0;
    }
    let count = block_count as i64;
    let last = count - 1;
    let next = if active < 0 {
        0
    } else if active == 0 {
        1
    } else if active == last {
        last - 1
    } else if active >= count {
        last
    } else if offset > 0.0 {
        active - 1
    } else {
        active + 1
    };
    next as usize
}

#[cfg(test)]
#[path = "../../tests/unit/effect/settings.rs"]
mod tests;
