//! The seam between the effect and whatever owns the document.

pub mod memory;
pub mod page;
pub mod selector;

use crate::{
    effect::{
        classes::{StyleProp, opacity_value, translate_y},
        plan::EffectOp,
    },
    foundation::core::{NodeId, Rect, Viewport},
    foundation::error::{ParallaxError, ParallaxResult},
};

/// Window-level events the controller listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum HostEvent {
    Scroll,
    Resize,
}

/// Registration handle returned by [`DomHost::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ListenerId(pub u64);

/// DOM operations needed by the controller.
///
/// Every node-addressed operation is fallible so hosts can report unknown
/// or detached nodes instead of panicking.
pub trait DomHost {
    fn viewport(&self) -> Viewport;

    /// Elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> ParallaxResult<Vec<NodeId>>;

    /// True when `node` still addresses an element.
    fn is_element(&self, node: NodeId) -> bool;

    /// Element children of `node`, in order.
    fn children(&self, node: NodeId) -> ParallaxResult<Vec<NodeId>>;

    fn first_element_child(&self, node: NodeId) -> ParallaxResult<Option<NodeId>> {
        Ok(self.children(node)?.first().copied())
    }

    fn create_element(&mut self, tag: &str) -> ParallaxResult<NodeId>;

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current parent first.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> ParallaxResult<()>;

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> ParallaxResult<()>;

    fn has_class(&self, node: NodeId, class: &str) -> ParallaxResult<bool>;

    fn add_class(&mut self, node: NodeId, class: &str) -> ParallaxResult<()>;

    fn remove_class(&mut self, node: NodeId, class: &str) -> ParallaxResult<()>;

    /// Inline style value, if set.
    fn style(&self, node: NodeId, prop: &str) -> ParallaxResult<Option<String>>;

    fn set_style(&mut self, node: NodeId, prop: &str, value: &str) -> ParallaxResult<()>;

    fn remove_style(&mut self, node: NodeId, prop: &str) -> ParallaxResult<()>;

    /// Border box relative to the viewport's top-left corner.
    fn bounding_rect(&self, node: NodeId) -> ParallaxResult<Rect>;

    /// Client height minus vertical padding.
    fn content_height(&self, node: NodeId) -> ParallaxResult<f64>;

    fn add_listener(&mut self, event: HostEvent) -> ListenerId;

    /// Returns false when `id` was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    /// Ask the host to call back on its next animation frame.
    fn request_animation_frame(&mut self);
}

/// Execute a planned frame against `blocks`, which the plan indexes into.
///
/// Returns the number of DOM writes performed.
pub fn apply_ops<H: DomHost + ?Sized>(
    host: &mut H,
    blocks: &[NodeId],
    ops: &[EffectOp],
) -> ParallaxResult<usize> {
    let lookup = |block: usize| {
        blocks.get(block).copied().ok_or_else(|| {
            ParallaxError::host(format!(
                "plan addresses block {block} but container has {}",
                blocks.len()
            ))
        })
    };

    for op in ops {
        match *op {
            EffectOp::Class { block, class, on } => {
                let node = lookup(block)?;
                if on {
                    host.add_class(node, class.as_str())?;
                } else {
                    host.remove_class(node, class.as_str())?;
                }
            }
            EffectOp::Opacity { block, value } => {
                host.set_style(
                    lookup(block)?,
                    StyleProp::Opacity.as_str(),
                    &opacity_value(value),
                )?;
            }
            EffectOp::Translate { block, offset } => {
                host.set_style(
                    lookup(block)?,
                    StyleProp::Transform.as_str(),
                    &translate_y(offset),
                )?;
            }
        }
    }
    Ok(ops.len())
}
