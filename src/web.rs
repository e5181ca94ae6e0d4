//! JavaScript bindings.
//!
//! ```js
//! const scene = new SceneHandle(document.getElementById("stage"));
//! scene.addObserver((snap) => console.log(snap.mode, snap.target_id));
//! scene.addChild(10, 10, 50, 50, "#9cf");
//! window.addEventListener("resize", () => scene.refreshRender());
//! ```

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::SceneConfig;
use crate::engine::Engine;
use crate::node::{ContainerNode, ContainerProperty, NodeId};
use crate::notify::Snapshot;

/// A scene engine mounted in a host element.
#[wasm_bindgen]
pub struct SceneHandle {
    engine: Engine,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Mount a scene into `host`. `config` is an optional JSON object of
    /// [`SceneConfig`] overrides.
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement, config: Option<String>) -> Result<SceneHandle, JsValue> {
        let config = match config {
            Some(raw) => SceneConfig::from_json(&raw)?,
            None => SceneConfig::default(),
        };
        Ok(Self { engine: Engine::initialize(host, config)? })
    }

    /// Add a container under the root. Returns its id.
    #[wasm_bindgen(js_name = addChild)]
    pub fn add_child(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Option<String>,
    ) -> Result<String, JsValue> {
        let mut property = ContainerProperty::new(x, y, width, height);
        if let Some(color) = color {
            property = property.with_background(color);
        }
        let id = self.engine.add_child(ContainerNode::new(property))?;
        Ok(id.to_string())
    }

    /// Remove a container. Returns whether one was removed.
    #[wasm_bindgen(js_name = removeChild)]
    pub fn remove_child(&self, id: &str) -> Result<bool, JsValue> {
        let Ok(id) = id.parse::<NodeId>() else {
            return Ok(false);
        };
        Ok(self.engine.remove_child(&id)?.is_some())
    }

    /// Re-measure the host and repaint.
    #[wasm_bindgen(js_name = refreshRender)]
    pub fn refresh_render(&self) -> Result<(), JsValue> {
        Ok(self.engine.refresh_render()?)
    }

    /// Call `callback` with a plain-object snapshot after every change.
    ///
    /// The callback must not call back into this handle.
    #[wasm_bindgen(js_name = addObserver)]
    pub fn add_observer(&self, callback: js_sys::Function) -> Result<(), JsValue> {
        self.engine.add_observer(move |snapshot| {
            let result = to_js(snapshot).and_then(|value| {
                callback.call1(&JsValue::NULL, &value)?;
                Ok(())
            });
            if let Err(err) = result {
                log::warn!("web: observer failed: {err:?}");
            }
        })?;
        Ok(())
    }

    /// Id of the selected container, if any.
    pub fn selection(&self) -> Result<Option<String>, JsValue> {
        Ok(self.engine.selection()?.map(|id| id.to_string()))
    }

    /// The current snapshot as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.snapshot()?)
    }
}

fn to_js(snapshot: &Snapshot) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(snapshot).map_err(|err| JsValue::from_str(&err.to_string()))?;
    js_sys::JSON::parse(&json)
}
