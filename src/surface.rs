//! Raster surface: a [`Raster`] plus its placement on the page.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::config::SceneConfig;
use crate::error::EngineError;
use crate::node::ContainerNode;
use crate::raster::Raster;
use crate::registry::SceneRegistry;
use crate::render::{self, Overlay};
use crate::viewport::Viewport;

/// Owns the raster and the page offset / pixel size it is laid out at.
#[derive(Debug)]
pub struct RasterSurface<R> {
    raster: R,
    viewport: Viewport,
}

impl<R: Raster> RasterSurface<R> {
    /// Wrap `raster`, sizing its backing store to `layout`.
    pub fn new(raster: R, layout: Viewport) -> Self {
        let mut surface = Self { raster, viewport: Viewport::default() };
        surface.set_offset(layout.left, layout.top);
        surface.set_backing_size(layout.width, layout.height);
        surface
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn raster(&self) -> &R {
        &self.raster
    }

    /// Move the surface within the page. Affects only pointer conversion.
    pub fn set_offset(&mut self, left: f64, top: f64) {
        self.viewport.left = left;
        self.viewport.top = top;
    }

    /// Resize the backing store and stretch `root` to cover it.
    pub fn resize(&mut self, width: f64, height: f64, root: Option<&mut ContainerNode>) {
        self.set_backing_size(width, height);
        if let Some(root) = root {
            root.property.position.x = 0.0;
            root.property.position.y = 0.0;
            root.property.size.width = self.viewport.width;
            root.property.size.height = self.viewport.height;
        }
    }

    /// Paint `registry` and `overlay` onto the raster.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the raster rejects a paint call.
    pub fn redraw(
        &mut self,
        registry: &SceneRegistry,
        overlay: Overlay<'_>,
        config: &SceneConfig,
    ) -> Result<(), EngineError> {
        render::draw(&mut self.raster, registry, overlay, config)
    }

    fn set_backing_size(&mut self, width: f64, height: f64) {
        let (w, h) = (to_pixels(width), to_pixels(height));
        if self.raster.size() != (w, h) {
            log::debug!("surface: resize to {w}x{h}");
            self.raster.set_size(w, h);
        }
        self.viewport.width = f64::from(w);
        self.viewport.height = f64::from(h);
    }
}

/// Whole pixels for a layout length; negative and NaN lengths become zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(len: f64) -> u32 {
    if len.is_nan() {
        return 0;
    }
    len.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
