//! Raster boundary: the fillable surface the scene is painted onto.
//!
//! [`Raster`] is the small primitive set the painter needs. The browser
//! implementation lives in [`crate::render::CanvasRaster`]; [`PixelRaster`]
//! is an in-memory RGBA buffer for headless hosts and tests.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use crate::error::EngineError;

/// A 2D surface addressable in pixels.
pub trait Raster {
    /// Backing-store size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the backing store. Contents after a resize are unspecified.
    fn set_size(&mut self, width: u32, height: u32);

    /// Fill an axis-aligned rectangle with a CSS colour.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying surface rejects the call.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> Result<(), EngineError>;

    /// Stroke the outline of a rectangle, centred on its edges. `dash` is the
    /// on/off segment length for a dashed outline.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying surface rejects the call.
    fn stroke_rect(
        &mut self,
        rect: (f64, f64, f64, f64),
        color: &str,
        line_width: f64,
        dash: Option<f64>,
    ) -> Result<(), EngineError>;
}

/// An RGBA colour with straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Parse the CSS colour forms the engine emits or accepts from hosts:
/// `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)`, and a few names.
#[must_use]
pub fn parse_color(raw: &str) -> Option<Rgba> {
    let value = raw.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
        return parse_channels(args, true);
    }
    if let Some(args) = value.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        return parse_channels(args, false);
    }
    match value.as_str() {
        "black" => Some(Rgba::opaque(0, 0, 0)),
        "white" => Some(Rgba::opaque(255, 255, 255)),
        "red" => Some(Rgba::opaque(255, 0, 0)),
        "green" => Some(Rgba::opaque(0, 128, 0)),
        "blue" => Some(Rgba::opaque(0, 0, 255)),
        "gray" | "grey" => Some(Rgba::opaque(128, 128, 128)),
        "transparent" => Some(Rgba { r: 0, g: 0, b: 0, a: 0.0 }),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16);
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2));
            let g = channel(&hex[1..2].repeat(2));
            let b = channel(&hex[2..3].repeat(2));
            match (r, g, b) {
                (Ok(r), Ok(g), Ok(b)) => Some(Rgba::opaque(r, g, b)),
                _ => None,
            }
        }
        6 => match (channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])) {
            (Ok(r), Ok(g), Ok(b)) => Some(Rgba::opaque(r, g, b)),
            _ => None,
        },
        _ => None,
    }
}

fn parse_channels(args: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        let Ok(v) = part.parse::<f64>() else {
            return None;
        };
        *slot = to_channel(v);
    }
    let a = if with_alpha {
        let Ok(a) = parts[3].parse::<f64>() else {
            return None;
        };
        a.clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some(Rgba { r: rgb[0], g: rgb[1], b: rgb[2], a })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Opaque black: what a canvas paints with when a colour string is rejected.
const FALLBACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 1.0 };

/// In-memory RGBA8 raster.
///
/// A pixel is covered by a rectangle when its centre lies inside the
/// rectangle, with the same half-open rule as hit-testing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelRaster {
    /// A transparent raster of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut raster = Self::default();
        raster.set_size(width, height);
        raster
    }

    /// Row-major RGBA bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The colour at `(x, y)`, or `None` off the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel index range `[first, last)` whose centres fall in `[start, start + len)`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn span(start: f64, len: f64, limit: u32) -> (u32, u32) {
        let first = (start - 0.5).ceil().clamp(0.0, f64::from(limit)) as u32;
        let last = (start + len - 0.5).ceil().clamp(0.0, f64::from(limit)) as u32;
        (first, last.max(first))
    }

    fn blend(&mut self, x: u32, y: u32, c: Rgba) {
        let i = self.index(x, y);
        let a = c.a;
        let mix = |src: u8, dst: u8| to_channel(f64::from(src) * a + f64::from(dst) * (1.0 - a));
        self.data[i] = mix(c.r, self.data[i]);
        self.data[i + 1] = mix(c.g, self.data[i + 1]);
        self.data[i + 2] = mix(c.b, self.data[i + 2]);
        let dst_a = f64::from(self.data[i + 3]) / 255.0;
        self.data[i + 3] = to_channel((a + dst_a * (1.0 - a)) * 255.0);
    }

    fn fill(&mut self, x: f64, y: f64, width: f64, height: f64, c: Rgba) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let (x0, x1) = Self::span(x, width, self.width);
        let (y0, y1) = Self::span(y, height, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, c);
            }
        }
    }
}

impl Raster for PixelRaster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data = vec![0; width as usize * height as usize * 4];
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> Result<(), EngineError> {
        let c = parse_color(color).unwrap_or_else(|| {
            log::debug!("raster: unparsed colour {color:?}, painting black");
            FALLBACK
        });
        self.fill(x, y, width, height, c);
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        (x, y, width, height): (f64, f64, f64, f64),
        color: &str,
        line_width: f64,
        dash: Option<f64>,
    ) -> Result<(), EngineError> {
        let c = parse_color(color).unwrap_or(FALLBACK);
        let half = line_width / 2.0;
        let edges = [
            // (start x, start y, length, horizontal)
            (x - half, y - half, width + line_width, true),
            (x - half, y + height - half, width + line_width, true),
            (x - half, y + half, height - line_width, false),
            (x + width - half, y + half, height - line_width, false),
        ];
        for (sx, sy, len, horizontal) in edges {
            for (offset, seg) in dash_segments(len, dash) {
                if horizontal {
                    self.fill(sx + offset, sy, seg, line_width, c);
                } else {
                    self.fill(sx, sy + offset, line_width, seg, c);
                }
            }
        }
        Ok(())
    }
}

/// Split a run of length `len` into `(offset, length)` on-segments.
fn dash_segments(len: f64, dash: Option<f64>) -> Vec<(f64, f64)> {
    match dash {
        Some(step) if step > 0.0 => {
            let mut out = Vec::new();
            let mut offset = 0.0;
            while offset < len {
                out.push((offset, step.min(len - offset)));
                offset += step * 2.0;
            }
            out
        }
        _ => vec![(0.0, len)],
    }
}
