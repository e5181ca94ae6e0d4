//! Interactive canvas scene engine.
//!
//! Displays a flat set of rectangular containers on a raster surface and lets
//! the user select one with the pointer, drag it to a new position, or grab
//! one of its four corner handles to resize it. Every change is repainted and
//! pushed to observers as a [`notify::Snapshot`].
//!
//! All logic lives in [`engine::EngineCore`], which is generic over the
//! [`raster::Raster`] it paints and runs headless against
//! [`raster::PixelRaster`]. [`engine::Engine`] and [`web::SceneHandle`] bind
//! a core to the browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Composition root and testable [`engine::EngineCore`] |
//! | [`node`] | Container geometry, style, and identity |
//! | [`registry`] | Insertion-ordered node store and priority hit lookup |
//! | [`viewport`] | Points and page ↔ surface ↔ model conversion |
//! | [`hit`] | Corner handles and the handle-then-body hit test |
//! | [`resize`] | Handle sign table and surface clamping |
//! | [`input`] | Pointer buttons and the interaction record |
//! | [`controller`] | Pointer state machine |
//! | [`raster`] | Raster trait and in-memory RGBA raster |
//! | [`render`] | Scene painter and browser canvas raster |
//! | [`surface`] | Raster plus page placement |
//! | [`notify`] | Snapshots and the observer bus |
//! | [`router`] | Per-engine DOM pointer listeners |
//! | [`web`] | `wasm-bindgen` API for JavaScript hosts |
//! | [`config`] | Host-tunable settings |
//! | [`error`] | Engine error type |
//! | [`consts`] | Shared numeric and visual constants |

pub mod config;
pub mod consts;
pub mod controller;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod node;
pub mod notify;
pub mod raster;
pub mod registry;
pub mod render;
pub mod resize;
pub mod router;
pub mod surface;
pub mod viewport;
pub mod web;
