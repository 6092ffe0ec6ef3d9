//! Sun path diagrams for map overlays.
//!
//! A [`SunDiagramOverlay`] draws, around a map position, the sun's track for the
//! current day and both solstices, rays toward sunrise, sunset and the current sun,
//! and the sectors of the horizon the sun rises and sets over during the year.
//!
//! The overlay talks to the outside world through three seams:
//! - [`MapHost`]: projects positions to pixels and owns the overlay's layer
//! - [`DrawingSurface`]: retained-mode primitives the diagram is drawn with
//! - [`Astronomy`]: sun positions and daily events
//!
//! [`WebMercatorHost`], [`SvgSurface`] and [`Spa`] implement them without any
//! browser or map library.

pub mod astro;
pub mod change;
pub mod config;
pub mod errors;
pub mod host;
pub mod log;
pub mod overlay;
pub mod render;
pub mod types;

pub use astro::{Astronomy, DayInfo, Spa, SunPosition, Twilight};
pub use change::{ChangeSet, RedrawTier, Snapshot};
pub use config::{DiagramConfig, DiagramStyles, FillStyle, StrokeStyle};
pub use errors::{ConfigError, CoordinateError, OverlayError};
pub use host::{LayerId, MapHost, OverlayView, WebMercatorHost};
pub use overlay::{Primitives, SunDiagramOverlay};
pub use render::{DrawingSurface, PathData, SvgSurface};
pub use types::{LatLng, Point};
