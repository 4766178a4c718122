use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ParallaxError, ParallaxResult};

/// Invocation contract of the effect.
///
/// Field names serialize in the camelCase form used by page authors
/// (`containerSelector`, `maxOffset`, `opacityOffset`, `padding`), so an
/// options object written for the browser loads unchanged.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallaxOptions {
    /// Selector for the elements to activate. Required.
    #[serde(default)]
    pub container_selector: String,
    /// Maximum vertical translation in pixels; also the outer edge of the fade.
    #[serde(default = "default_max_offset")]
    pub max_offset: f64,
    /// Offset below which a block stays fully opaque.
    #[serde(default = "default_opacity_offset")]
    pub opacity_offset: f64,
    /// Extra vertical budget required above and below each block.
    #[serde(default = "default_padding")]
    pub padding: f64,
}

fn default_max_offset() -> f64 {
    40.0
}

fn default_opacity_offset() -> f64 {
    25.0
}

fn default_padding() -> f64 {
    50.0
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            container_selector: String::new(),
            max_offset: default_max_offset(),
            opacity_offset: default_opacity_offset(),
            padding: default_padding(),
        }
    }
}

impl ParallaxOptions {
    /// Defaults for everything except the selector.
    pub fn new(container_selector: impl Into<String>) -> Self {
        Self {
            container_selector: container_selector.into(),
            ..Self::default()
        }
    }

    pub fn with_max_offset(mut self, max_offset: f64) -> Self {
        self.max_offset = max_offset;
        self
    }

    pub fn with_opacity_offset(mut self, opacity_offset: f64) -> Self {
        self.opacity_offset = opacity_offset;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn from_json_str(s: &str) -> ParallaxResult<Self> {
        serde_json::from_str(s).map_err(|e| ParallaxError::serde(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ParallaxResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read options '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Vertical room a block needs for its slide: one `max_offset` each way.
    pub fn animation_space(&self) -> f64 {
        self.max_offset * 2.0
    }

    pub fn total_padding(&self) -> f64 {
        self.padding * 2.0
    }

    pub fn validate(&self) -> ParallaxResult<()> {
        if self.container_selector.trim().is_empty() {
            return Err(ParallaxError::selector("containerSelector not set"));
        }
        for (name, v) in [
            ("maxOffset", self.max_offset),
            ("opacityOffset", self.opacity_offset),
            ("padding", self.padding),
        ] {
            if !v.is_finite() {
                return Err(ParallaxError::validation(format!("{name} must be finite")));
            }
        }
        if self.max_offset <= 0.0 {
            return Err(ParallaxError::validation("maxOffset must be > 0"));
        }
        if self.opacity_offset < 0.0 {
            return Err(ParallaxError::validation("opacityOffset must be >= 0"));
        }
        if self.opacity_offset >= self.max_offset {
            return Err(ParallaxError::validation(
                "opacityOffset must be < maxOffset",
            ));
        }
        if self.padding < 0.0 {
            return Err(ParallaxError::validation("padding must be >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
