use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::core::{NodeId, Viewport},
    foundation::error::{ParallaxError, ParallaxResult},
    host::{
        DomHost,
        memory::{BoxMetrics, MemoryDom},
    },
};

/// JSON description of a page, loaded into a [`MemoryDom`].
///
/// ```json
/// {
///   "viewport": { "width": 1280, "height": 800 },
///   "body": [
///     { "tag": "header", "metrics": { "content_height": 300 } },
///     { "tag": "section", "classes": ["story"], "children": [
///         { "metrics": { "content_height": 320, "padding_top": 16 } }
///     ] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    pub viewport: Viewport,
    #[serde(default)]
    pub scroll_y: f64,
    #[serde(default)]
    pub body: Vec<ElementSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub metrics: BoxMetrics,
    /// Inline styles present in the markup.
    #[serde(default)]
    pub style: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl PageSpec {
    pub fn from_json_str(s: &str) -> ParallaxResult<Self> {
        serde_json::from_str(s).map_err(|e| ParallaxError::serde(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ParallaxResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read page '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn build(&self) -> ParallaxResult<MemoryDom> {
        let viewport = Viewport::new(self.viewport.width, self.viewport.height)?;
        let mut dom = MemoryDom::new(viewport);
        let root = dom.root();
        for el in &self.body {
            insert(&mut dom, root, el)?;
        }
        dom.scroll_to(self.scroll_y);
        Ok(dom)
    }
}

fn insert(dom: &mut MemoryDom, parent: NodeId, spec: &ElementSpec) -> ParallaxResult<NodeId> {
    let id = dom.append_element(parent, &spec.tag, spec.metrics)?;
    if let Some(attr) = &spec.id {
        dom.set_id_attr(id, attr.clone())?;
    }
    for class in &spec.classes {
        dom.add_class(id, class)?;
    }
    for (prop, value) in &spec.style {
        dom.set_style(id, prop, value)?;
    }
    for child in &spec.children {
        insert(dom, id, child)?;
    }
    Ok(id)
}
