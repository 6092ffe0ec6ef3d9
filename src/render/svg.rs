//! SVG drawing surface
//!
//! [`SvgSurface`] keeps every primitive in memory, applies hover reactions when the
//! embedder forwards pointer events, and serializes the visible primitives into a
//! standalone SVG document.

use enum_dispatch::enum_dispatch;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path};

use crate::config::StrokeStyle;
use crate::types::Point;

use super::path::{PathCommand, PathData};
use super::surface::{DrawingSurface, HoverAction, PrimitiveId, PrimitiveStyle};

/// Common behavior for stored primitives
#[enum_dispatch]
pub trait RenderPrimitive {
    /// Add this primitive's element to `document`
    fn append_to(&self, document: Document) -> Document;
}

/// The horizon circle, or any other stroked circle
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub style: StrokeStyle,
}

impl RenderPrimitive for CirclePrimitive {
    fn append_to(&self, document: Document) -> Document {
        let node = Circle::new()
            .set("cx", self.center.x)
            .set("cy", self.center.y)
            .set("r", self.radius)
            .set("fill", "none")
            .set("stroke", self.style.color.as_str())
            .set("stroke-opacity", self.style.opacity)
            .set("stroke-width", self.style.width);
        document.add(node)
    }
}

/// A stroked or filled path
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub style: PrimitiveStyle,
    pub data: PathData,
}

impl RenderPrimitive for PathPrimitive {
    fn append_to(&self, document: Document) -> Document {
        let mut node = match &self.style {
            PrimitiveStyle::Stroke(stroke) => Path::new()
                .set("fill", "none")
                .set("stroke", stroke.color.as_str())
                .set("stroke-opacity", stroke.opacity)
                .set("stroke-width", stroke.width),
            PrimitiveStyle::Fill(fill) => Path::new()
                .set("fill", fill.color.as_str())
                .set("fill-opacity", fill.opacity)
                .set("stroke", "none"),
        };
        if !self.data.is_empty() {
            node = node.set("d", Data::from(&self.data));
        }
        document.add(node)
    }
}

impl From<&PathData> for Data {
    fn from(path: &PathData) -> Self {
        path.commands()
            .iter()
            .fold(Data::new(), |data, command| match *command {
                PathCommand::MoveTo(p) => data.move_to((p.x as f32, p.y as f32)),
                PathCommand::LineTo(p) => data.line_to((p.x as f32, p.y as f32)),
                PathCommand::ArcTo {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                } => data.elliptical_arc_to(vec![
                    rx as f32,
                    ry as f32,
                    rotation as f32,
                    f32::from(u8::from(large_arc)),
                    f32::from(u8::from(sweep)),
                    to.x as f32,
                    to.y as f32,
                ]),
                PathCommand::Close => data.close(),
            })
    }
}

#[enum_dispatch(RenderPrimitive)]
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle(CirclePrimitive),
    Path(PathPrimitive),
}

#[derive(Debug, Clone)]
struct Entry {
    primitive: Primitive,
    visible: bool,
}

#[derive(Debug, Clone, Copy)]
struct HoverBinding {
    trigger: PrimitiveId,
    enter: HoverAction,
    leave: HoverAction,
}

/// In-memory surface that renders to SVG
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    size: Point,
    /// Indexed by `PrimitiveId`; removed primitives leave a hole so ids stay stable
    entries: Vec<Option<Entry>>,
    hovers: Vec<HoverBinding>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Point {
        self.size
    }

    /// Number of live primitives
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn primitive(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.entry(id).map(|e| &e.primitive)
    }

    /// Path data of a path primitive
    pub fn path(&self, id: PrimitiveId) -> Option<&PathData> {
        match self.primitive(id)? {
            Primitive::Path(path) => Some(&path.data),
            Primitive::Circle(_) => None,
        }
    }

    pub fn is_visible(&self, id: PrimitiveId) -> bool {
        self.entry(id).is_some_and(|e| e.visible)
    }

    /// Deliver a pointer-enter event for `trigger`
    pub fn hover_enter(&mut self, trigger: PrimitiveId) {
        let actions: Vec<HoverAction> = self
            .hovers
            .iter()
            .filter(|h| h.trigger == trigger)
            .map(|h| h.enter)
            .collect();
        self.apply(&actions);
    }

    /// Deliver a pointer-leave event for `trigger`
    pub fn hover_leave(&mut self, trigger: PrimitiveId) {
        let actions: Vec<HoverAction> = self
            .hovers
            .iter()
            .filter(|h| h.trigger == trigger)
            .map(|h| h.leave)
            .collect();
        self.apply(&actions);
    }

    fn apply(&mut self, actions: &[HoverAction]) {
        for action in actions {
            match *action {
                HoverAction::Show(id) => self.set_visible(id, true),
                HoverAction::Hide(id) => self.set_visible(id, false),
            }
        }
    }

    /// Serialize visible primitives, in creation order, to an SVG document
    pub fn to_svg(&self) -> String {
        let document = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("width", self.size.x)
            .set("height", self.size.y)
            .set("viewBox", format!("0 0 {} {}", self.size.x, self.size.y));

        self.entries
            .iter()
            .flatten()
            .filter(|e| e.visible)
            .fold(document, |doc, e| e.primitive.append_to(doc))
            .to_string()
    }

    fn entry(&self, id: PrimitiveId) -> Option<&Entry> {
        self.entries.get(id.0).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, id: PrimitiveId) -> Option<&mut Entry> {
        self.entries.get_mut(id.0).and_then(Option::as_mut)
    }

    fn push(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.entries.len());
        self.entries.push(Some(Entry {
            primitive,
            visible: true,
        }));
        id
    }
}

impl DrawingSurface for SvgSurface {
    fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    fn create_circle(&mut self, center: Point, radius: f64, style: StrokeStyle) -> PrimitiveId {
        self.push(
            CirclePrimitive {
                center,
                radius,
                style,
            }
            .into(),
        )
    }

    fn create_path(&mut self, style: PrimitiveStyle) -> PrimitiveId {
        self.push(
            PathPrimitive {
                style,
                data: PathData::new(),
            }
            .into(),
        )
    }

    fn set_path(&mut self, id: PrimitiveId, path: &PathData) {
        match self.entry_mut(id).map(|e| &mut e.primitive) {
            Some(Primitive::Path(primitive)) => primitive.data = path.clone(),
            Some(Primitive::Circle(_)) => {
                crate::log::warn!(?id, "set_path on a circle primitive ignored");
            }
            None => {
                crate::log::warn!(?id, "set_path on unknown primitive ignored");
            }
        }
    }

    fn set_visible(&mut self, id: PrimitiveId, visible: bool) {
        if let Some(entry) = self.entry_mut(id) {
            entry.visible = visible;
        }
    }

    fn on_hover(&mut self, trigger: PrimitiveId, enter: HoverAction, leave: HoverAction) {
        self.hovers.push(HoverBinding {
            trigger,
            enter,
            leave,
        });
    }

    fn remove(&mut self, id: PrimitiveId) {
        if let Some(slot) = self.entries.get_mut(id.0) {
            *slot = None;
        }
        self.hovers.retain(|h| h.trigger != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FillStyle;

    fn wedge() -> PathData {
        PathData::new()
            .m(280.0, 280.0)
            .l(280.0, 550.0)
            .a(270.0, 270.0, 0.0, false, true, 10.0, 280.0)
            .z()
    }

    #[test]
    fn test_paths_start_empty() {
        let mut surface = SvgSurface::new();
        let id = surface.create_path(PrimitiveStyle::Fill(FillStyle::new("#ffd700", 0.2)));
        assert_eq!(surface.path(id), Some(&PathData::new()));
        assert!(surface.is_visible(id));

        surface.set_path(id, &wedge());
        assert_eq!(surface.path(id), Some(&wedge()));
    }

    #[test]
    fn test_set_path_on_circle_is_ignored() {
        let mut surface = SvgSurface::new();
        let id = surface.create_circle(
            Point::new(280.0, 280.0),
            270.0,
            StrokeStyle::new("#000000", 0.5, 1.0),
        );
        surface.set_path(id, &wedge());
        assert_eq!(surface.path(id), None);
        assert!(matches!(surface.primitive(id), Some(Primitive::Circle(_))));
    }

    #[test]
    fn test_hover_reveals_target() {
        let mut surface = SvgSurface::new();
        let ray_style = StrokeStyle::new("#ffd700", 0.9, 6.0);
        let ray = surface.create_path(PrimitiveStyle::Stroke(ray_style));
        let sector_style = FillStyle::new("#ffd700", 0.15);
        let sector = surface.create_path(PrimitiveStyle::Fill(sector_style));
        surface.set_visible(sector, false);
        surface.on_hover(ray, HoverAction::Show(sector), HoverAction::Hide(sector));

        surface.hover_enter(sector);
        assert!(!surface.is_visible(sector));

        surface.hover_enter(ray);
        assert!(surface.is_visible(sector));

        surface.hover_leave(ray);
        assert!(!surface.is_visible(sector));
    }

    #[test]
    fn test_remove_keeps_ids_stable() {
        let mut surface = SvgSurface::new();
        let a = surface.create_path(PrimitiveStyle::Fill(FillStyle::new("#ffd700", 0.2)));
        let b = surface.create_path(PrimitiveStyle::Fill(FillStyle::new("#ff4500", 0.2)));
        surface.on_hover(a, HoverAction::Hide(b), HoverAction::Show(b));

        surface.remove(a);
        assert_eq!(surface.len(), 1);
        assert!(surface.primitive(a).is_none());
        assert!(surface.primitive(b).is_some());

        // Bindings triggered by a removed primitive are gone
        surface.hover_enter(a);
        assert!(surface.is_visible(b));
    }

    #[test]
    fn test_svg_output() {
        let mut surface = SvgSurface::new();
        surface.set_size(Point::new(560.0, 560.0));
        surface.create_circle(
            Point::new(280.0, 280.0),
            270.0,
            StrokeStyle::new("#000000", 0.5, 1.0),
        );
        let sector = surface.create_path(PrimitiveStyle::Fill(FillStyle::new("#ffd700", 0.15)));
        surface.set_path(sector, &wedge());
        let hidden = surface.create_path(PrimitiveStyle::Fill(FillStyle::new("#ff4500", 0.12)));
        surface.set_path(hidden, &wedge());
        surface.set_visible(hidden, false);
        surface.create_path(PrimitiveStyle::Stroke(StrokeStyle::new("#ffa500", 0.7, 4.0)));

        let svg = surface.to_svg();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 560 560\""));
        assert!(svg.contains("r=\"270\""));
        // Path data goes through the svg crate's serializer
        assert!(svg.contains("d=\"M280,280 L280,550 A270,270,"));
        assert!(svg.contains("fill=\"#ffd700\""));
        assert!(!svg.contains("#ff4500"));
        // The empty stroke path is emitted without path data
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches(" d=").count(), 1);
    }
}
