//! Engine error type.

use wasm_bindgen::JsValue;

/// Error returned by fallible engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A surface operation ran before [`crate::engine::EngineCore::initialize`].
    #[error("raster surface is not initialized")]
    Uninitialized,
    /// The host element already carries a scene canvas.
    #[error("host element is already initialized")]
    AlreadyInitialized,
    /// A browser object the engine needs is unavailable.
    #[error("missing browser object: {0}")]
    MissingElement(&'static str),
    /// A browser canvas call failed.
    #[error("canvas call failed: {0}")]
    Canvas(String),
    /// The core is already borrowed, typically by a running observer.
    #[error("engine is busy; observers must not call back into it")]
    Busy,
    /// Host-supplied configuration did not parse.
    #[error("invalid scene config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        Self::Canvas(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
