//! # Sticky parallax guide (v0.1.0)
//!
//! This module is a standalone walkthrough of how the effect is computed, how it touches the
//! document, and how the controller keeps it in sync with scrolling and resizing.
//!
//! If you are looking for command lines, start with the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`ParallaxOptions`](crate::ParallaxOptions): selector plus the three geometry knobs
//!   (`maxOffset`, `opacityOffset`, `padding`)
//! - [`DomHost`](crate::DomHost): the only way the crate reads or writes the document
//! - [`BlockSettings`](crate::BlockSettings): what one container should look like this frame
//! - [`FramePlan`](crate::FramePlan): the minimal list of [`EffectOp`](crate::EffectOp) writes
//! - [`StickyParallax`](crate::StickyParallax): lifecycle, listeners and frame scheduling
//!
//! A frame is explicitly staged:
//!
//! 1. Compute settings: [`compute_block_settings`](crate::compute_block_settings)
//! 2. Diff against remembered state: [`plan_frame`](crate::plan_frame)
//! 3. Write to the host: [`apply_ops`](crate::apply_ops)
//!
//! Steps (1) and (2) are pure. Everything that depends on a real document sits behind the
//! host trait, which is what makes the whole effect testable against
//! [`MemoryDom`](crate::MemoryDom).
//!
//! ---
//!
//! ## Geometry
//!
//! A container with `n` blocks is forced to `(n + 1) * 100vh` tall. While it scrolls through the
//! viewport, each viewport height of travel belongs to one block.
//!
//! With `top` the container's viewport-relative top edge and `vh` the viewport height:
//!
//! - `top > 0`: the container has not been reached; the active slot is "before" (`-1`)
//! - bottom `< 0`: the container has been passed; the active slot is "after" (`n`)
//! - otherwise the active block is `ceil(|top| / vh) - 1`
//!
//! The pinned block's offset sweeps linearly from `+maxOffset` to `-maxOffset` across each
//! viewport height:
//!
//! ```text
//! offset = (top % vh) / vh * 2 * maxOffset + maxOffset
//! ```
//!
//! Opacity only depends on `|offset|`: fully opaque up to `opacityOffset`, fully transparent
//! beyond `maxOffset`, linear in between. With the defaults a block is solid for the middle
//! 62.5% of its travel.
//!
//! The "next" block is the one being revealed: after the active block when the offset has
//! crossed zero, before it while the block is still sliding in, and fixed at the ends of the
//! stack.
//!
//! ---
//!
//! ## What gets written, and when
//!
//! Class changes are expensive for a real layout engine, so they are only emitted when the
//! active or next index actually changes. The active block's `transform` and `opacity` are
//! written every frame.
//!
//! | Trigger | Writes |
//! |---|---|
//! | container enters the viewport | `opacity: 0` on every block |
//! | container leaves the viewport | `opacity: 1` on every block |
//! | active index changes | `-active` moved, previous active hidden |
//! | next index changes | `-next` moved |
//! | either changes | `will-change` kept on exactly active and next |
//! | every frame | active block `transform` and `opacity` |
//!
//! The class names are in [`classes`](crate::classes).
//!
//! ---
//!
//! ## Lifecycle
//!
//! [`StickyParallax::start`](crate::StickyParallax::start) resolves the selector once. Every
//! matched container then goes through validation on each reinit:
//!
//! - it must still be an element
//! - it must have at least one block
//! - every block's content height plus `2 * maxOffset + 2 * padding` must fit in the viewport
//!
//! Containers that fail are reported as [`Rejection`](crate::Rejection)s and left untouched.
//! Valid containers are "made": classes added, heights and box paddings overridden, and blocks
//! wrapped in a lockup element (reused if the markup already has one). Original inline styles
//! are recorded so that "unmake" can give the container back exactly as it was found.
//!
//! A resize always unmakes everything first, so a container rejected at one size qualifies
//! again when the viewport grows back.
//!
//! ---
//!
//! ## Frame scheduling
//!
//! Window events never do work directly. They only request an animation frame through
//! [`FrameGate`](crate::FrameGate):
//!
//! - the first event schedules one frame
//! - further events while it is pending are folded into it
//! - a resize promotes a pending scroll update to a full reinit
//!
//! The host calls [`StickyParallax::on_animation_frame`](crate::StickyParallax::on_animation_frame)
//! once per granted frame.
//!
//! ```rust
//! use sticky_parallax::{
//!     BoxMetrics, DomHost, HostEvent, MemoryDom, ParallaxOptions, StickyParallax, Viewport,
//! };
//!
//! # fn main() -> sticky_parallax::ParallaxResult<()> {
//! let mut dom = MemoryDom::new(Viewport::new(1280.0, 800.0)?);
//! let root = dom.root();
//! let story = dom.append_element(root, "section", BoxMetrics::default())?;
//! dom.add_class(story, "story")?;
//! for _ in 0..3 {
//!     dom.append_element(story, "article", BoxMetrics::content(320.0))?;
//! }
//!
//! let mut parallax = StickyParallax::new(ParallaxOptions::new(".story"))?;
//! parallax.start(&mut dom)?;
//!
//! dom.scroll_to(1200.0);
//! if parallax.handle_event(&mut dom, HostEvent::Scroll) {
//!     parallax.on_animation_frame(&mut dom)?;
//! }
//! assert_eq!(parallax.snapshot()[0].active, Some(1));
//!
//! parallax.stop(&mut dom)?;
//! # Ok(())
//! # }
//! ```
