//! Host-tunable scene settings.
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! host only needs to supply the values it wants to change:
//!
//! ```
//! use scene_canvas::config::SceneConfig;
//!
//! let cfg = SceneConfig::from_json(r#"{ "handle_size": 10.0 }"#)?;
//! assert_eq!(cfg.handle_size, 10.0);
//! assert_eq!(cfg.selection_color, "blue");
//! # Ok::<(), scene_canvas::error::EngineError>(())
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DEFAULT_BACKGROUND, HANDLE_SIZE_PX, OUTLINE_WIDTH_PX, PREVIEW_DASH_PX, SELECTION_COLOR};
use crate::error::EngineError;
use crate::hit::HandleMetrics;

/// Visual and hit-testing settings for one engine instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Side length of a corner handle, in surface pixels.
    pub handle_size: f64,
    /// Stroke width of the selection outline.
    pub outline_width: f64,
    /// Colour of the selection outline, its handles, and the preview mark.
    pub selection_color: String,
    /// Dash length of the preview mark.
    pub preview_dash: f64,
    /// Fill for nodes without a background colour.
    pub default_background: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            handle_size: HANDLE_SIZE_PX,
            outline_width: OUTLINE_WIDTH_PX,
            selection_color: SELECTION_COLOR.to_string(),
            preview_dash: PREVIEW_DASH_PX,
            default_background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl SceneConfig {
    /// Parse a JSON object; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `raw` is not a valid config object.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Handle geometry used by hit-testing and painting.
    #[must_use]
    pub fn handle_metrics(&self) -> HandleMetrics {
        HandleMetrics { outline_width: self.outline_width, handle_size: self.handle_size }
    }
}
