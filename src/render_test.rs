use super::*;
use crate::node::ContainerNode;
use crate::raster::PixelRaster;

const BLUE: [u8; 4] = [0, 0, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BACKGROUND: [u8; 4] = [247, 247, 247, 255];

// =============================================================
// Helpers
// =============================================================

/// Records raster calls instead of painting.
#[derive(Default)]
struct Recorder {
    ops: Vec<String>,
    fail: bool,
}

impl Raster for Recorder {
    fn size(&self) -> (u32, u32) {
        (0, 0)
    }

    fn set_size(&mut self, _width: u32, _height: u32) {}

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) -> Result<(), EngineError> {
        if self.fail {
            return Err(EngineError::Canvas("context lost".into()));
        }
        self.ops.push(format!("fill {x} {y} {width} {height} {color}"));
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        (x, y, width, height): (f64, f64, f64, f64),
        color: &str,
        line_width: f64,
        dash: Option<f64>,
    ) -> Result<(), EngineError> {
        self.ops.push(format!("stroke {x} {y} {width} {height} {color} {line_width} {dash:?}"));
        Ok(())
    }
}

fn scene(nodes: &[ContainerProperty]) -> SceneRegistry {
    let mut reg = SceneRegistry::new();
    reg.register(ContainerNode::new(ContainerProperty::new(0.0, 0.0, 100.0, 100.0)));
    for p in nodes {
        reg.register(ContainerNode::new(p.clone()));
    }
    reg
}

fn paint(reg: &SceneRegistry, overlay: Overlay<'_>) -> PixelRaster {
    let mut raster = PixelRaster::new(100, 100);
    draw(&mut raster, reg, overlay, &SceneConfig::default()).unwrap();
    raster
}

// =============================================================
// Nodes
// =============================================================

#[test]
fn root_paints_default_background() {
    let raster = paint(&scene(&[]), Overlay::default());
    assert_eq!(raster.pixel(0, 0), Some(BACKGROUND));
    assert_eq!(raster.pixel(99, 99), Some(BACKGROUND));
}

#[test]
fn node_paints_its_own_color() {
    let reg = scene(&[ContainerProperty::new(10.0, 10.0, 5.0, 5.0).with_background("red")]);
    let raster = paint(&reg, Overlay::default());
    assert_eq!(raster.pixel(10, 10), Some(RED));
    assert_eq!(raster.pixel(14, 14), Some(RED));
    assert_eq!(raster.pixel(15, 15), Some(BACKGROUND));
}

#[test]
fn later_nodes_paint_over_earlier() {
    let reg = scene(&[
        ContainerProperty::new(10.0, 10.0, 20.0, 20.0).with_background("red"),
        ContainerProperty::new(20.0, 20.0, 20.0, 20.0).with_background("blue"),
    ]);
    let raster = paint(&reg, Overlay::default());
    assert_eq!(raster.pixel(15, 15), Some(RED));
    assert_eq!(raster.pixel(25, 25), Some(BLUE));
}

#[test]
fn configured_default_background_is_used() {
    let config = SceneConfig { default_background: "white".into(), ..SceneConfig::default() };
    let mut raster = PixelRaster::new(100, 100);
    draw(&mut raster, &scene(&[]), Overlay::default(), &config).unwrap();
    assert_eq!(raster.pixel(50, 50), Some([255, 255, 255, 255]));
}

#[test]
fn redraw_is_idempotent() {
    let reg = scene(&[ContainerProperty::new(10.0, 10.0, 50.0, 50.0).with_background("#336699")]);
    let selected = ContainerProperty::new(10.0, 10.0, 50.0, 50.0);
    let overlay = Overlay { selection: Some(&selected), preview: None };
    let mut raster = PixelRaster::new(100, 100);
    draw(&mut raster, &reg, overlay, &SceneConfig::default()).unwrap();
    let first = raster.clone();
    draw(&mut raster, &reg, overlay, &SceneConfig::default()).unwrap();
    assert_eq!(raster, first);
}

// =============================================================
// Overlay
// =============================================================

#[test]
fn selection_outline_sits_inside_box() {
    let reg = scene(&[ContainerProperty::new(10.0, 10.0, 50.0, 50.0)]);
    let selected = ContainerProperty::new(10.0, 10.0, 50.0, 50.0);
    let raster = paint(&reg, Overlay { selection: Some(&selected), preview: None });
    assert_eq!(raster.pixel(30, 10), Some(BLUE));
    assert_eq!(raster.pixel(30, 59), Some(BLUE));
    assert_eq!(raster.pixel(10, 30), Some(BLUE));
    assert_eq!(raster.pixel(59, 30), Some(BLUE));
    assert_eq!(raster.pixel(30, 30), Some(BACKGROUND));
    assert_eq!(raster.pixel(30, 60), Some(BACKGROUND));
}

#[test]
fn selection_draws_four_handles() {
    let reg = scene(&[ContainerProperty::new(10.0, 10.0, 50.0, 50.0)]);
    let selected = ContainerProperty::new(10.0, 10.0, 50.0, 50.0);
    let raster = paint(&reg, Overlay { selection: Some(&selected), preview: None });
    // Handles extend three pixels beyond the box on the outside.
    assert_eq!(raster.pixel(8, 8), Some(BLUE));
    assert_eq!(raster.pixel(61, 8), Some(BLUE));
    assert_eq!(raster.pixel(8, 61), Some(BLUE));
    assert_eq!(raster.pixel(61, 61), Some(BLUE));
    assert_eq!(raster.pixel(35, 8), Some(BACKGROUND));
}

#[test]
fn preview_is_dashed() {
    let reg = scene(&[]);
    let preview = ContainerProperty::new(20.0, 20.0, 40.0, 40.0);
    let raster = paint(&reg, Overlay { selection: None, preview: Some(&preview) });
    assert_eq!(raster.pixel(21, 20), Some(BLUE));
    assert_eq!(raster.pixel(25, 20), Some(BACKGROUND));
    assert_eq!(raster.pixel(29, 20), Some(BLUE));
}

#[test]
fn overlay_is_painted_after_nodes() {
    let reg = scene(&[ContainerProperty::new(10.0, 10.0, 50.0, 50.0)]);
    let selected = ContainerProperty::new(10.0, 10.0, 50.0, 50.0);
    let preview = ContainerProperty::new(20.0, 20.0, 50.0, 50.0);
    let mut rec = Recorder::default();
    draw(
        &mut rec,
        &reg,
        Overlay { selection: Some(&selected), preview: Some(&preview) },
        &SceneConfig::default(),
    )
    .unwrap();

    assert_eq!(rec.ops.len(), 2 + 1 + 4 + 1);
    assert!(rec.ops[0].starts_with("fill 0 0 100 100"));
    assert!(rec.ops[1].starts_with("fill 10 10 50 50"));
    assert_eq!(rec.ops[2], "stroke 10.5 10.5 49 49 blue 1 None");
    assert_eq!(rec.ops[7], "stroke 20.5 20.5 49 49 blue 1 Some(4.0)");
}

#[test]
fn no_overlay_paints_only_nodes() {
    let reg = scene(&[ContainerProperty::new(1.0, 1.0, 1.0, 1.0)]);
    let mut rec = Recorder::default();
    draw(&mut rec, &reg, Overlay::default(), &SceneConfig::default()).unwrap();
    assert_eq!(rec.ops.len(), 2);
    assert!(rec.ops.iter().all(|op| op.starts_with("fill")));
}

#[test]
fn raster_failure_propagates() {
    let mut rec = Recorder { fail: true, ..Recorder::default() };
    let err = draw(&mut rec, &scene(&[]), Overlay::default(), &SceneConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::Canvas(_)));
}
