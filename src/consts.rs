//! Shared numeric and visual constants for the scene engine.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a controller-driven mutation may produce, in pixels.
pub const MIN_NODE_SIZE: f64 = 1.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Priority assigned to the latched node in `find_topmost`; sorts first.
pub const PREFERRED_PRIORITY: u8 = 9;

/// Priority assigned to every other hit node.
pub const DEFAULT_PRIORITY: u8 = 10;

/// Side length of a square corner handle, in surface pixels.
pub const HANDLE_SIZE_PX: f64 = 6.0;

// ── Paint ───────────────────────────────────────────────────────

/// Fill used for nodes that carry no background colour.
pub const DEFAULT_BACKGROUND: &str = "rgb(247, 247, 247)";

/// Stroke width of the selection outline, in surface pixels.
pub const OUTLINE_WIDTH_PX: f64 = 1.0;

/// Stroke and handle colour of the selection outline.
pub const SELECTION_COLOR: &str = "blue";

/// Dash segment length of the preview ("mark") outline.
pub const PREVIEW_DASH_PX: f64 = 4.0;
