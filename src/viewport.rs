//! Coordinate spaces: page, surface, and model.
//!
//! Pointer events arrive in page coordinates. The raster surface sits at an
//! offset inside the page, so surface coordinates are page coordinates minus
//! that offset. Model coordinates (node positions and sizes) are expressed in
//! surface pixels, so the surface → model step is the identity.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::Serialize;

/// A point in page, surface, or model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// The raster surface's pixel size and its offset relative to the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Viewport {
    /// Page x of the surface's left edge.
    pub left: f64,
    /// Page y of the surface's top edge.
    pub top: f64,
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a page-space point to surface coordinates.
    #[must_use]
    pub fn page_to_surface(&self, page: Point) -> Point {
        Point::new(page.x - self.left, page.y - self.top)
    }

    /// Convert a surface-space point back to page coordinates.
    #[must_use]
    pub fn surface_to_page(&self, surface: Point) -> Point {
        Point::new(surface.x + self.left, surface.y + self.top)
    }

    /// Surface → model. Model space is measured in surface pixels.
    #[must_use]
    pub fn surface_to_model(&self, surface: Point) -> Point {
        surface
    }

    /// Page → model in one step.
    #[must_use]
    pub fn page_to_model(&self, page: Point) -> Point {
        self.surface_to_model(self.page_to_surface(page))
    }

    /// Whether a surface-space point lies on the surface (half-open bounds).
    #[must_use]
    pub fn contains(&self, surface: Point) -> bool {
        surface.x >= 0.0 && surface.x < self.width && surface.y >= 0.0 && surface.y < self.height
    }
}
