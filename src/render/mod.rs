//! Geometry and drawing for sun diagrams
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes, thresholds and colors
//! - `path`: SVG path data builder
//! - `geometry`: Projection of sun positions and the diagram's path builders
//! - `surface`: The drawing surface seam
//! - `svg`: In-memory SVG surface

pub mod defaults;
pub mod geometry;
pub mod path;
pub mod surface;
pub mod svg;

pub use geometry::{Diagram, ProjectedPoint, SunProjector};
pub use path::{PathCommand, PathData};
pub use surface::{DrawingSurface, HoverAction, PrimitiveId, PrimitiveStyle};
pub use svg::SvgSurface;
