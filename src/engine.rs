//! Composition root: registry, surface, controller, and bus wired together.
//!
//! [`EngineCore`] holds every piece of logic and is generic over the
//! [`Raster`], so it runs headless with a [`crate::raster::PixelRaster`].
//! [`Engine`] binds a core to a host DOM element and a browser canvas.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::config::SceneConfig;
use crate::controller::{Action, InteractionController};
use crate::error::EngineError;
use crate::input::{Button, InteractionState};
use crate::node::{ContainerNode, ContainerProperty, NodeId};
use crate::notify::{NotificationBus, Snapshot};
use crate::raster::Raster;
use crate::registry::SceneRegistry;
use crate::render::{CanvasRaster, Overlay};
use crate::router::InputRouter;
use crate::surface::RasterSurface;
use crate::viewport::{Point, Viewport};

/// Core engine state: all logic that doesn't depend on the browser.
#[derive(Debug)]
pub struct EngineCore<R> {
    registry: SceneRegistry,
    root_id: NodeId,
    controller: InteractionController,
    bus: NotificationBus,
    surface: Option<RasterSurface<R>>,
    config: SceneConfig,
}

impl<R: Raster> Default for EngineCore<R> {
    fn default() -> Self {
        Self::with_config(SceneConfig::default())
    }
}

impl<R: Raster> EngineCore<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An uninitialized engine with its root node registered.
    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        let root = ContainerNode::new(ContainerProperty::new(0.0, 0.0, 0.0, 0.0));
        let root_id = root.id();
        let mut registry = SceneRegistry::new();
        registry.register(root);
        Self {
            registry,
            root_id,
            controller: InteractionController::new(config.handle_metrics()),
            bus: NotificationBus::new(),
            surface: None,
            config,
        }
    }

    // --- Lifecycle ---

    /// Attach `raster`, lay it out at `layout`, and paint the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyInitialized`] on a second call, or a
    /// raster error from the first paint.
    pub fn initialize(&mut self, raster: R, layout: Viewport) -> Result<(), EngineError> {
        if self.surface.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }
        let mut surface = RasterSurface::new(raster, layout);
        surface.resize(layout.width, layout.height, self.registry.get_mut(&self.root_id));
        log::debug!("engine: initialized at {:?}", surface.viewport());
        self.surface = Some(surface);
        self.redraw()?;
        self.publish();
        Ok(())
    }

    /// Whether [`EngineCore::initialize`] has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    /// Re-apply the host layout, then redraw and publish.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Uninitialized`] before initialization, or a
    /// raster error from the repaint.
    pub fn refresh_render(&mut self, layout: Viewport) -> Result<(), EngineError> {
        let surface = self.surface.as_mut().ok_or(EngineError::Uninitialized)?;
        surface.set_offset(layout.left, layout.top);
        surface.resize(layout.width, layout.height, self.registry.get_mut(&self.root_id));
        self.redraw()?;
        self.publish();
        Ok(())
    }

    /// Paint the registry and the interaction overlay.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Uninitialized`] before initialization, or the
    /// raster's error.
    pub fn redraw(&mut self) -> Result<(), EngineError> {
        let surface = self.surface.as_mut().ok_or(EngineError::Uninitialized)?;
        let selection = self
            .controller
            .latched()
            .and_then(|id| self.registry.get(&id))
            .map(|node| &node.property);
        let overlay = Overlay { selection, preview: self.controller.state().next.as_ref() };
        surface.redraw(&self.registry, overlay, &self.config)
    }

    // --- Scene ---

    /// Register `node`, parenting it to the root when it has no parent, then
    /// redraw and publish.
    ///
    /// Adding a node whose id is already registered leaves the registry
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Uninitialized`] before initialization, or a
    /// raster error from the repaint.
    pub fn add_child(&mut self, node: ContainerNode) -> Result<NodeId, EngineError> {
        if self.surface.is_none() {
            return Err(EngineError::Uninitialized);
        }
        let node = if node.parent_id.is_none() { node.with_parent(self.root_id) } else { node };
        let id = node.id();
        self.registry.register(node);
        self.redraw()?;
        self.publish();
        Ok(id)
    }

    /// Remove a node, dropping any selection or drag that references it.
    ///
    /// The root cannot be removed. Returns the removed node.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Uninitialized`] before initialization, or a
    /// raster error from the repaint.
    pub fn remove_child(&mut self, id: &NodeId) -> Result<Option<ContainerNode>, EngineError> {
        if self.surface.is_none() {
            return Err(EngineError::Uninitialized);
        }
        if *id == self.root_id {
            log::debug!("engine: refusing to remove root {id}");
            return Ok(None);
        }
        let Some(removed) = self.registry.remove(id) else {
            return Ok(None);
        };
        self.controller.forget(*id);
        self.redraw()?;
        self.publish();
        Ok(Some(removed))
    }

    /// Subscribe to interaction snapshots.
    pub fn add_observer(&mut self, observer: impl Fn(&Snapshot) + 'static) {
        self.bus.subscribe(Box::new(observer));
    }

    // --- Input events ---

    /// Pointer pressed at page point `page_pt`.
    ///
    /// Returns the controller's actions after applying them; the host only
    /// needs to honour [`Action::SetCursor`].
    pub fn on_pointer_down(&mut self, page_pt: Point, button: Button) -> Vec<Action> {
        let Some(viewport) = self.surface.as_ref().map(RasterSurface::viewport) else {
            log::debug!("engine: pointer down before initialize ignored");
            return Vec::new();
        };
        let pt = viewport.page_to_model(page_pt);
        let actions = self.controller.on_pointer_down(pt, button, &self.registry, Some(self.root_id));
        self.process(&actions);
        actions
    }

    /// Pointer moved to page point `page_pt`.
    pub fn on_pointer_move(&mut self, page_pt: Point) -> Vec<Action> {
        let Some(viewport) = self.surface.as_ref().map(RasterSurface::viewport) else {
            log::debug!("engine: pointer move before initialize ignored");
            return Vec::new();
        };
        let pt = viewport.page_to_model(page_pt);
        let actions = self.controller.on_pointer_move(pt, &self.registry, Some(self.root_id), viewport);
        self.process(&actions);
        actions
    }

    /// Pointer released.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.surface.is_none() {
            log::debug!("engine: pointer up before initialize ignored");
            return Vec::new();
        }
        let actions = self.controller.on_pointer_up();
        self.process(&actions);
        actions
    }

    fn process(&mut self, actions: &[Action]) {
        let mut render = false;
        let mut publish = false;
        for action in actions {
            match action {
                Action::Commit { id, property } => match self.registry.get_mut(id) {
                    Some(node) => node.property = node.property.with_geometry_of(property),
                    None => log::debug!("engine: commit target {id} is gone"),
                },
                Action::RenderNeeded => render = true,
                Action::Publish => publish = true,
                Action::SetCursor(_) => {}
            }
        }
        if render {
            if let Err(err) = self.redraw() {
                log::warn!("engine: redraw failed: {err}");
            }
        }
        if publish {
            self.publish();
        }
    }

    fn publish(&self) {
        self.bus.publish(&self.snapshot());
    }

    // --- Queries ---

    /// Current interaction and selection state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.controller.state(), self.controller.latched(), &self.registry, self.viewport())
    }

    /// The latched node, if any.
    #[must_use]
    pub fn selection(&self) -> Option<NodeId> {
        self.controller.latched()
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&ContainerNode> {
        self.registry.get(id)
    }

    /// The background node spanning the surface.
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    #[must_use]
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        self.controller.state()
    }

    /// Surface placement; all zero before initialization.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.surface.as_ref().map(RasterSurface::viewport).unwrap_or_default()
    }

    #[must_use]
    pub fn raster(&self) -> Option<&R> {
        self.surface.as_ref().map(RasterSurface::raster)
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

// =============================================================
// Browser engine
// =============================================================

/// Shared handle to a browser-backed core, as held by event closures.
pub type SharedCore = Rc<RefCell<EngineCore<CanvasRaster>>>;

/// Run `f` against a shared borrow of `core`.
///
/// # Errors
///
/// Returns [`EngineError::Busy`] if the core is mutably borrowed, which is
/// the case while observers run.
pub fn read_core<R, T>(
    core: &RefCell<EngineCore<R>>,
    f: impl FnOnce(&EngineCore<R>) -> T,
) -> Result<T, EngineError> {
    let core = core.try_borrow().map_err(|_| EngineError::Busy)?;
    Ok(f(&core))
}

/// Run `f` against an exclusive borrow of `core`.
///
/// # Errors
///
/// Returns [`EngineError::Busy`] if the core is already borrowed.
pub fn write_core<R, T>(
    core: &RefCell<EngineCore<R>>,
    f: impl FnOnce(&mut EngineCore<R>) -> T,
) -> Result<T, EngineError> {
    let mut core = core.try_borrow_mut().map_err(|_| EngineError::Busy)?;
    Ok(f(&mut core))
}

/// The browser engine: a core bound to a canvas inside a host element.
///
/// Observers run while the core is borrowed; calls back into the engine
/// from an observer fail with [`EngineError::Busy`].
pub struct Engine {
    host: HtmlElement,
    canvas: HtmlCanvasElement,
    core: SharedCore,
    /// Held so its listeners stay attached until the engine is dropped.
    _router: InputRouter,
}

impl Engine {
    /// Create a canvas inside `host`, bind pointer input, and paint.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyInitialized`] if `host` already contains
    /// a canvas, or a DOM/canvas error if setup fails.
    pub fn initialize(host: HtmlElement, config: SceneConfig) -> Result<Self, EngineError> {
        if host.query_selector("canvas")?.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }
        let document = web_sys::window()
            .ok_or(EngineError::MissingElement("window"))?
            .document()
            .ok_or(EngineError::MissingElement("document"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::MissingElement("canvas"))?;
        canvas.style().set_property("display", "block")?;
        host.append_child(&canvas)?;

        let mut core = EngineCore::with_config(config);
        core.initialize(CanvasRaster::new(canvas.clone())?, measure(&host, &canvas))?;
        let core = Rc::new(RefCell::new(core));
        let router = InputRouter::attach(&document, &canvas, Rc::clone(&core))?;

        Ok(Self { host, canvas, core, _router: router })
    }

    /// See [`EngineCore::add_child`].
    ///
    /// # Errors
    ///
    /// As [`EngineCore::add_child`], or [`EngineError::Busy`] when called
    /// from an observer.
    pub fn add_child(&self, node: ContainerNode) -> Result<NodeId, EngineError> {
        write_core(&self.core, |core| core.add_child(node))?
    }

    /// See [`EngineCore::remove_child`].
    ///
    /// # Errors
    ///
    /// As [`EngineCore::remove_child`], or [`EngineError::Busy`].
    pub fn remove_child(&self, id: &NodeId) -> Result<Option<ContainerNode>, EngineError> {
        write_core(&self.core, |core| core.remove_child(id))?
    }

    /// Re-measure the host after a layout change and repaint.
    ///
    /// # Errors
    ///
    /// As [`EngineCore::refresh_render`], or [`EngineError::Busy`].
    pub fn refresh_render(&self) -> Result<(), EngineError> {
        let layout = measure(&self.host, &self.canvas);
        write_core(&self.core, |core| core.refresh_render(layout))?
    }

    /// # Errors
    ///
    /// [`EngineError::Busy`] when called from an observer.
    pub fn add_observer(&self, observer: impl Fn(&Snapshot) + 'static) -> Result<(), EngineError> {
        write_core(&self.core, |core| core.add_observer(observer))
    }

    /// # Errors
    ///
    /// [`EngineError::Busy`] when called from an observer.
    pub fn selection(&self) -> Result<Option<NodeId>, EngineError> {
        read_core(&self.core, EngineCore::selection)
    }

    /// # Errors
    ///
    /// [`EngineError::Busy`] when called from an observer; the observer
    /// already receives the snapshot as its argument.
    pub fn snapshot(&self) -> Result<Snapshot, EngineError> {
        read_core(&self.core, EngineCore::snapshot)
    }

    /// A copy of the node with `id`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Busy`] when called from an observer.
    pub fn node(&self, id: &NodeId) -> Result<Option<ContainerNode>, EngineError> {
        read_core(&self.core, |core| core.node(id).cloned())
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

/// Surface layout: canvas position in client coordinates, host content size.
fn measure(host: &HtmlElement, canvas: &HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport::new(
        rect.left(),
        rect.top(),
        f64::from(host.client_width()),
        f64::from(host.client_height()),
    )
}
