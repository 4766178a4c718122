//! Sticky parallax is a scroll-driven presentation effect for stacked content.
//!
//! A container's children ("blocks") are pinned one at a time in the viewport
//! while the page scrolls through the container. The pinned block slides
//! vertically within a bounded offset and fades out near the edges, while the
//! next block is pre-rendered underneath for a smooth handover.
//!
//! # Pipeline overview
//!
//! 1. **Compute**: `Rect + viewport height -> BlockSettings` (pure, see [`compute_block_settings`])
//! 2. **Plan**: `ContainerState + BlockSettings -> FramePlan` (only the DOM writes that changed)
//! 3. **Apply**: `FramePlan -> DomHost` (see [`apply_ops`])
//!
//! [`StickyParallax`] drives the loop: it listens for `scroll`/`resize`,
//! coalesces them into at most one pending animation frame, and revalidates
//! containers whenever the viewport changes.
//!
//! The document is reached only through the [`DomHost`] trait. [`MemoryDom`]
//! is a deterministic in-memory implementation with block-flow layout, used by
//! the CLI and the tests.
//!
//! For a walkthrough of the moving parts, see [`crate::guide`].
#![forbid(unsafe_code)]

mod config;
mod controller;
mod effect;
mod foundation;
mod host;

/// Standalone documentation for the effect's geometry and lifecycle.
pub mod guide;

pub use config::options::ParallaxOptions;
pub use controller::lifecycle::{RejectReason, Rejection};
pub use controller::schedule::{FrameGate, FrameJob, GateOutcome};
pub use controller::{ContainerSnapshot, InitReport, StickyParallax};
pub use effect::classes;
pub use effect::opacity::calculate_opacity;
pub use effect::plan::{ContainerState, EffectOp, FramePlan, plan_frame};
pub use effect::settings::{ActiveSlot, BlockSettings, compute_block_settings, select_next};
pub use foundation::core::{NodeId, Rect, Size, Viewport};
pub use foundation::error::{ParallaxError, ParallaxResult};
pub use host::memory::{BoxMetrics, MemoryDom, NodeSnapshot, parse_length};
pub use host::page::{ElementSpec, PageSpec};
pub use host::selector::{ElementRef, SelectorList};
pub use host::{DomHost, HostEvent, ListenerId, apply_ops};
