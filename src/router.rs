//! Per-engine DOM input binding.
//!
//! `pointerdown` is bound on the canvas; `pointermove` and `pointerup` are
//! bound on the document so a drag that leaves the canvas keeps tracking.
//! Listeners belong to one [`InputRouter`] and are removed when it drops, so
//! several engines can share a page.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, EventTarget, HtmlCanvasElement, PointerEvent};

use crate::controller::Action;
use crate::engine::{EngineCore, SharedCore, write_core};
use crate::error::EngineError;
use crate::input::Button;
use crate::render::CanvasRaster;
use crate::viewport::Point;

type PointerClosure = Closure<dyn FnMut(PointerEvent)>;

/// One bound listener, remembered so it can be removed.
struct Binding {
    target: EventTarget,
    event: &'static str,
    closure: PointerClosure,
}

/// Owns the DOM listeners that feed one engine core.
pub struct InputRouter {
    bindings: Vec<Binding>,
}

impl InputRouter {
    /// Bind pointer listeners for `core`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Canvas`] if the DOM rejects a listener.
    pub fn attach(document: &Document, canvas: &HtmlCanvasElement, core: SharedCore) -> Result<Self, EngineError> {
        let mut router = Self { bindings: Vec::with_capacity(3) };

        let down = handler(&core, canvas, |core, ev| {
            core.on_pointer_down(client_point(ev), Button::from_dom(ev.button()))
        });
        router.bind(canvas, "pointerdown", down)?;

        let moved = handler(&core, canvas, |core, ev| core.on_pointer_move(client_point(ev)));
        router.bind(document, "pointermove", moved)?;

        let up = handler(&core, canvas, |core, _| core.on_pointer_up());
        router.bind(document, "pointerup", up)?;

        Ok(router)
    }

    fn bind(&mut self, target: &EventTarget, event: &'static str, closure: PointerClosure) -> Result<(), EngineError> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.bindings.push(Binding { target: target.clone(), event, closure });
        Ok(())
    }
}

impl Drop for InputRouter {
    fn drop(&mut self) {
        for b in &self.bindings {
            if let Err(err) = b
                .target
                .remove_event_listener_with_callback(b.event, b.closure.as_ref().unchecked_ref())
            {
                log::warn!("router: failed to unbind {}: {err:?}", b.event);
            }
        }
    }
}

/// Wrap an engine call as a DOM listener that applies the returned cursor.
fn handler(
    core: &SharedCore,
    canvas: &HtmlCanvasElement,
    call: impl Fn(&mut EngineCore<CanvasRaster>, &PointerEvent) -> Vec<Action> + 'static,
) -> PointerClosure {
    let core = Rc::clone(core);
    let canvas = canvas.clone();
    Closure::wrap(Box::new(move |ev: PointerEvent| {
        let actions = match write_core(&core, |core| call(core, &ev)) {
            Ok(actions) => actions,
            Err(err) => {
                log::warn!("router: {err}, dropping {}", ev.type_());
                return;
            }
        };
        apply_cursor(&canvas, &actions);
    }) as Box<dyn FnMut(PointerEvent)>)
}

fn apply_cursor(canvas: &HtmlCanvasElement, actions: &[Action]) {
    for action in actions {
        if let Action::SetCursor(cursor) = action {
            if let Err(err) = canvas.style().set_property("cursor", cursor.as_css()) {
                log::warn!("router: failed to set cursor: {err:?}");
            }
        }
    }
}

fn client_point(ev: &PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

