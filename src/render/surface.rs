//! The drawing surface seam.
//!
//! The overlay never renders anything itself. It creates primitives on a
//! [`DrawingSurface`], sets their path data, and wires hover reactions between them.

use crate::config::{FillStyle, StrokeStyle};
use crate::types::Point;

use super::path::PathData;

/// Handle to a primitive created on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub usize);

/// How a path primitive is painted
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveStyle {
    Stroke(StrokeStyle),
    Fill(FillStyle),
}

/// What a surface does to a primitive when a hover event fires.
///
/// Hover reactions are data rather than callbacks, so the surface can apply them
/// without calling back into the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverAction {
    Show(PrimitiveId),
    Hide(PrimitiveId),
}

/// Retained-mode vector surface
pub trait DrawingSurface {
    /// Size the drawing area; called once before any primitive is created
    fn set_size(&mut self, size: Point);

    fn create_circle(&mut self, center: Point, radius: f64, style: StrokeStyle) -> PrimitiveId;

    /// Create a path primitive with empty path data
    fn create_path(&mut self, style: PrimitiveStyle) -> PrimitiveId;

    /// Replace the path data of a path primitive; an empty path draws nothing
    fn set_path(&mut self, id: PrimitiveId, path: &PathData);

    fn set_visible(&mut self, id: PrimitiveId, visible: bool);

    /// React to the pointer entering and leaving `trigger`
    fn on_hover(&mut self, trigger: PrimitiveId, enter: HoverAction, leave: HoverAction);

    /// Drop a primitive and any hover reactions it triggers
    fn remove(&mut self, id: PrimitiveId);
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn set_size(&mut self, size: Point) {
        (**self).set_size(size)
    }

    fn create_circle(&mut self, center: Point, radius: f64, style: StrokeStyle) -> PrimitiveId {
        (**self).create_circle(center, radius, style)
    }

    fn create_path(&mut self, style: PrimitiveStyle) -> PrimitiveId {
        (**self).create_path(style)
    }

    fn set_path(&mut self, id: PrimitiveId, path: &PathData) {
        (**self).set_path(id, path)
    }

    fn set_visible(&mut self, id: PrimitiveId, visible: bool) {
        (**self).set_visible(id, visible)
    }

    fn on_hover(&mut self, trigger: PrimitiveId, enter: HoverAction, leave: HoverAction) {
        (**self).on_hover(trigger, enter, leave)
    }

    fn remove(&mut self, id: PrimitiveId) {
        (**self).remove(id)
    }
}
