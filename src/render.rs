//! Rendering: paints the scene onto a [`Raster`].
//!
//! [`draw`] receives read-only views of the registry and the interaction
//! overlay and produces pixels; it does not mutate any engine state.
//! [`CanvasRaster`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::SceneConfig;
use crate::error::EngineError;
use crate::hit::Handle;
use crate::node::ContainerProperty;
use crate::raster::Raster;
use crate::registry::SceneRegistry;

/// Interaction feedback painted above the nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    /// Committed geometry of the latched node: solid outline plus handles.
    pub selection: Option<&'a ContainerProperty>,
    /// Uncommitted drag geometry: dashed outline.
    pub preview: Option<&'a ContainerProperty>,
}

/// Paint every node in registry order, then the overlay.
///
/// There is no clear step. The root node spans the surface and is painted
/// first, so it acts as the background.
///
/// # Errors
///
/// Returns `Err` if any raster call fails.
pub fn draw<R: Raster + ?Sized>(
    raster: &mut R,
    registry: &SceneRegistry,
    overlay: Overlay<'_>,
    config: &SceneConfig,
) -> Result<(), EngineError> {
    // Layer 1: nodes, first registered at the bottom.
    for node in registry.nodes() {
        let p = &node.property;
        raster.fill_rect(
            p.position.x,
            p.position.y,
            p.size.width,
            p.size.height,
            p.fill_or(&config.default_background),
        )?;
    }

    // Layer 2: selection UI.
    if let Some(prop) = overlay.selection {
        draw_selection(raster, prop, config)?;
    }
    if let Some(prop) = overlay.preview {
        raster.stroke_rect(
            inset(prop, config.outline_width),
            &config.selection_color,
            config.outline_width,
            Some(config.preview_dash),
        )?;
    }

    Ok(())
}

fn draw_selection<R: Raster + ?Sized>(
    raster: &mut R,
    prop: &ContainerProperty,
    config: &SceneConfig,
) -> Result<(), EngineError> {
    let ow = config.outline_width;
    raster.stroke_rect(inset(prop, ow), &config.selection_color, ow, None)?;

    let size = config.handle_size;
    for handle in Handle::ALL {
        let c = handle.center(prop, ow);
        raster.fill_rect(c.x - size / 2.0, c.y - size / 2.0, size, size, &config.selection_color)?;
    }
    Ok(())
}

/// Stroke rectangle whose outer edge matches `prop`'s box.
fn inset(prop: &ContainerProperty, line_width: f64) -> (f64, f64, f64, f64) {
    let half = line_width / 2.0;
    (
        prop.position.x + half,
        prop.position.y + half,
        prop.size.width - line_width,
        prop.size.height - line_width,
    )
}

// =============================================================
// Browser canvas
// =============================================================

/// [`Raster`] backed by an `HtmlCanvasElement` and its 2D context.
#[derive(Debug, Clone)]
pub struct CanvasRaster {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRaster {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingElement`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(EngineError::MissingElement("2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::MissingElement("2d context"))?;
        Ok(Self { canvas, ctx })
    }

    /// The canvas element being painted.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Raster for CanvasRaster {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> Result<(), EngineError> {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        (x, y, width, height): (f64, f64, f64, f64),
        color: &str,
        line_width: f64,
        dash: Option<f64>,
    ) -> Result<(), EngineError> {
        self.ctx.save();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        let dash_array = js_sys::Array::new();
        if let Some(step) = dash {
            dash_array.push(&step.into());
            dash_array.push(&step.into());
        }
        self.ctx.set_line_dash(&dash_array)?;
        self.ctx.stroke_rect(x, y, width, height);
        self.ctx.restore();
        Ok(())
    }
}
