use std::collections::BTreeMap;

use crate::{
    effect::classes::StyleProp,
    foundation::core::{NodeId, Rect, Viewport},
    foundation::error::{ParallaxError, ParallaxResult},
    host::{
        DomHost, HostEvent, ListenerId,
        selector::{ElementRef, SelectorList},
    },
};

/// Stylesheet-level box metrics of an element, before inline styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxMetrics {
    /// Intrinsic content height; ignored once the element has children.
    #[serde(default)]
    pub content_height: f64,
    #[serde(default)]
    pub padding_top: f64,
    #[serde(default)]
    pub padding_bottom: f64,
    #[serde(default)]
    pub margin_top: f64,
    #[serde(default)]
    pub margin_bottom: f64,
}

impl BoxMetrics {
    pub fn content(height: f64) -> Self {
        Self {
            content_height: height,
            ..Self::default()
        }
    }
}

/// Structure, class and inline-style state of one connected node.
///
/// Node ids are left out so documents rebuilt with fresh wrapper elements
/// still compare equal.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NodeSnapshot {
    pub tag: String,
    pub depth: usize,
    pub classes: Vec<String>,
    pub styles: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    id_attr: Option<String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    metrics: BoxMetrics,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str, metrics: BoxMetrics) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id_attr: None,
            classes: Vec::new(),
            styles: BTreeMap::new(),
            metrics,
            parent: None,
            children: Vec::new(),
        }
    }

    fn view(&self) -> ElementRef<'_> {
        ElementRef {
            tag: &self.tag,
            id: self.id_attr.as_deref(),
            classes: &self.classes,
        }
    }
}

/// In-memory document with block-flow layout.
///
/// Elements stack vertically inside their parent without margin collapsing.
/// Inline `height`, `padding-*` and `margin-*` (in `px`, `vh` or unitless)
/// override the stylesheet metrics. Transforms do not affect layout.
/// The root `body` element takes part in selector queries like any other.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    nodes: BTreeMap<NodeId, Node>,
    root: NodeId,
    next_node: u64,
    viewport: Viewport,
    scroll_y: f64,
    listeners: BTreeMap<ListenerId, HostEvent>,
    next_listener: u64,
    frame_requests: usize,
}

impl MemoryDom {
    pub fn new(viewport: Viewport) -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(root, Node::new("body", BoxMetrics::default()));
        Self {
            nodes,
            root,
            next_node: 1,
            viewport,
            scroll_y: 0.0,
            listeners: BTreeMap::new(),
            next_listener: 1,
            frame_requests: 0,
        }
    }

    /// The `body` element; everything reachable from it is in the document.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> ParallaxResult<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| ParallaxError::host(format!("unknown node {id}")))
    }

    fn node_mut(&mut self, id: NodeId) -> ParallaxResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| ParallaxError::host(format!("unknown node {id}")))
    }

    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        metrics: BoxMetrics,
    ) -> ParallaxResult<NodeId> {
        self.node(parent)?;
        let id = self.alloc(tag, metrics);
        self.append_child(parent, id)?;
        Ok(id)
    }

    fn alloc(&mut self, tag: &str, metrics: BoxMetrics) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, Node::new(tag, metrics));
        id
    }

    pub fn set_id_attr(&mut self, node: NodeId, id: impl Into<String>) -> ParallaxResult<()> {
        self.node_mut(node)?.id_attr = Some(id.into());
        Ok(())
    }

    pub fn set_metrics(&mut self, node: NodeId, metrics: BoxMetrics) -> ParallaxResult<()> {
        self.node_mut(node)?.metrics = metrics;
        Ok(())
    }

    /// Drop `node` and its subtree entirely.
    pub fn remove_node(&mut self, node: NodeId) -> ParallaxResult<()> {
        if node == self.root {
            return Err(ParallaxError::host("cannot remove the document root"));
        }
        self.detach(node)?;
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.remove(&id) {
                stack.extend(n.children);
            }
        }
        Ok(())
    }

    pub fn classes(&self, node: NodeId) -> ParallaxResult<&[String]> {
        Ok(&self.node(node)?.classes)
    }

    pub fn parent(&self, node: NodeId) -> ParallaxResult<Option<NodeId>> {
        Ok(self.node(node)?.parent)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Total height of the document flow.
    pub fn document_height(&self) -> f64 {
        self.content_box_height(self.root)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    /// Scroll the window, clamped to the document. Returns the new position.
    ///
    /// Non-finite targets are ignored and leave the position unchanged.
    pub fn scroll_to(&mut self, y: f64) -> f64 {
        if y.is_finite() {
            self.scroll_y = y.clamp(0.0, self.max_scroll());
        } else {
            tracing::debug!(y, "ignoring non-finite scroll target");
        }
        self.scroll_y
    }

    /// Change the window size and re-clamp the scroll position.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn listener_count(&self, event: HostEvent) -> usize {
        self.listeners.values().filter(|&&e| e == event).count()
    }

    /// Number of animation-frame callbacks requested since the last call.
    pub fn take_frame_requests(&mut self) -> usize {
        std::mem::take(&mut self.frame_requests)
    }

    /// Every node reachable from the root, in document order.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(n) = self.nodes.get(&id) else {
                continue;
            };
            out.push(NodeSnapshot {
                tag: n.tag.clone(),
                depth,
                classes: n.classes.clone(),
                styles: n.styles.clone(),
            });
            stack.extend(n.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }

    fn detach(&mut self, child: NodeId) -> ParallaxResult<()> {
        let parent = self.node(child)?.parent;
        if let Some(p) = parent {
            if let Some(pn) = self.nodes.get_mut(&p) {
                pn.children.retain(|&c| c != child);
            }
        }
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cur = Some(of);
        while let Some(id) = cur {
            if id == candidate {
                return true;
            }
            cur = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.is_ancestor(self.root, node)
    }

    fn length(&self, node: &Node, prop: StyleProp, fallback: f64) -> f64 {
        node.styles
            .get(prop.as_str())
            .and_then(|v| parse_length(v, self.viewport))
            .unwrap_or(fallback)
    }

    fn content_box_height(&self, id: NodeId) -> f64 {
        let Some(node) = self.nodes.get(&id) else {
            return 0.0;
        };
        if let Some(h) = node
            .styles
            .get(StyleProp::Height.as_str())
            .and_then(|v| parse_length(v, self.viewport))
        {
            return h.max(0.0);
        }
        if node.children.is_empty() {
            return node.metrics.content_height.max(0.0);
        }
        node.children.iter().map(|&c| self.outer_height(c)).sum()
    }

    fn padding_box_height(&self, id: NodeId) -> f64 {
        let Some(node) = self.nodes.get(&id) else {
            return 0.0;
        };
        self.length(node, StyleProp::PaddingTop, node.metrics.padding_top)
            + self.content_box_height(id)
            + self.length(node, StyleProp::PaddingBottom, node.metrics.padding_bottom)
    }

    fn outer_height(&self, id: NodeId) -> f64 {
        let Some(node) = self.nodes.get(&id) else {
            return 0.0;
        };
        self.length(node, StyleProp::MarginTop, node.metrics.margin_top)
            + self.padding_box_height(id)
            + self.length(node, StyleProp::MarginBottom, node.metrics.margin_bottom)
    }

    /// Document y of the border box top.
    fn document_top(&self, id: NodeId) -> f64 {
        let Some(node) = self.nodes.get(&id) else {
            return 0.0;
        };
        let Some(parent_id) = node.parent else {
            return 0.0;
        };
        let Some(parent) = self.nodes.get(&parent_id) else {
            return 0.0;
        };
        let preceding: f64 = parent
            .children
            .iter()
            .take_while(|&&c| c != id)
            .map(|&c| self.outer_height(c))
            .sum();
        self.document_top(parent_id)
            + self.length(parent, StyleProp::PaddingTop, parent.metrics.padding_top)
            + preceding
            + self.length(node, StyleProp::MarginTop, node.metrics.margin_top)
    }

    fn ancestry(&self, id: NodeId) -> Vec<ElementRef<'_>> {
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(n) = cur.and_then(|c| self.nodes.get(&c)) {
            out.push(n.view());
            cur = n.parent;
        }
        out
    }
}

/// Parse a CSS length in `px`, `vh` or unitless pixels.
pub fn parse_length(value: &str, viewport: Viewport) -> Option<f64> {
    let v = value.trim();
    let parsed = if let Some(n) = v.strip_suffix("px") {
        n.trim().parse::<f64>().ok()
    } else if let Some(n) = v.strip_suffix("vh") {
        n.trim().parse::<f64>().ok().map(|n| viewport.vh(n))
    } else {
        v.parse::<f64>().ok()
    };
    parsed.filter(|n| n.is_finite())
}

impl DomHost for MemoryDom {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn query_selector_all(&self, selector: &str) -> ParallaxResult<Vec<NodeId>> {
        let selector = SelectorList::parse(selector)?;
        let mut out = Vec::new();
        self.node(self.root)?;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if selector.matches(&self.ancestry(id)) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(out)
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn children(&self, node: NodeId) -> ParallaxResult<Vec<NodeId>> {
        Ok(self.node(node)?.children.clone())
    }

    fn create_element(&mut self, tag: &str) -> ParallaxResult<NodeId> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ParallaxError::host(format!("invalid tag name '{tag}'")));
        }
        Ok(self.alloc(tag, BoxMetrics::default()))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> ParallaxResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_ancestor(child, parent) {
            return Err(ParallaxError::host(format!(
                "appending {child} to {parent} would create a cycle"
            )));
        }
        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> ParallaxResult<()> {
        if self.node(child)?.parent != Some(parent) {
            return Err(ParallaxError::host(format!(
                "{child} is not a child of {parent}"
            )));
        }
        self.detach(child)
    }

    fn has_class(&self, node: NodeId, class: &str) -> ParallaxResult<bool> {
        Ok(self.node(node)?.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> ParallaxResult<()> {
        let n = self.node_mut(node)?;
        if !n.classes.iter().any(|c| c == class) {
            n.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: NodeId, class: &str) -> ParallaxResult<()> {
        self.node_mut(node)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn style(&self, node: NodeId, prop: &str) -> ParallaxResult<Option<String>> {
        Ok(self.node(node)?.styles.get(prop).cloned())
    }

    fn set_style(&mut self, node: NodeId, prop: &str, value: &str) -> ParallaxResult<()> {
        self.node_mut(node)?
            .styles
            .insert(prop.to_string(), value.to_string());
        Ok(())
    }

    fn remove_style(&mut self, node: NodeId, prop: &str) -> ParallaxResult<()> {
        self.node_mut(node)?.styles.remove(prop);
        Ok(())
    }

    fn bounding_rect(&self, node: NodeId) -> ParallaxResult<Rect> {
        self.node(node)?;
        if !self.is_connected(node) {
            // detached elements report an empty box, as browsers do
            return Ok(Rect::ZERO);
        }
        let top = self.document_top(node) - self.scroll_y;
        Ok(Rect::new(
            0.0,
            top,
            self.viewport.width,
            top + self.padding_box_height(node),
        ))
    }

    fn content_height(&self, node: NodeId) -> ParallaxResult<f64> {
        self.node(node)?;
        Ok(self.content_box_height(node))
    }

    fn add_listener(&mut self, event: HostEvent) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, event);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn request_animation_frame(&mut self) {
        self.frame_requests += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
