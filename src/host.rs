//! The map host seam.
//!
//! A host projects geographic positions into its viewport and owns the layers that
//! overlays draw into. Hosts drive overlays through [`OverlayView`].

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::change::RedrawTier;
use crate::types::{LatLng, Point};

/// Handle to a layer registered with a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// Map viewport an overlay is attached to
pub trait MapHost {
    /// Pixel position of `position` relative to the viewport's top-left corner.
    ///
    /// `None` when the host cannot place the position.
    fn project(&self, position: LatLng) -> Option<Point>;

    /// Register a layer of the given pixel size
    fn add_layer(&mut self, size: Point) -> LayerId;

    /// Move a layer so its top-left corner sits at `top_left` in viewport pixels
    fn position_layer(&mut self, layer: LayerId, top_left: Point);

    fn remove_layer(&mut self, layer: LayerId);
}

impl<H: MapHost + ?Sized> MapHost for &mut H {
    fn project(&self, position: LatLng) -> Option<Point> {
        (**self).project(position)
    }

    fn add_layer(&mut self, size: Point) -> LayerId {
        (**self).add_layer(size)
    }

    fn position_layer(&mut self, layer: LayerId, top_left: Point) {
        (**self).position_layer(layer, top_left)
    }

    fn remove_layer(&mut self, layer: LayerId) {
        (**self).remove_layer(layer)
    }
}

/// Lifecycle hooks a host invokes on an overlay
pub trait OverlayView {
    /// Acquire layers and primitives
    fn on_add(&mut self);

    /// Re-anchor and redraw whatever is stale; `None` when not attached
    fn draw(&mut self) -> Option<RedrawTier>;

    /// Release layers and primitives
    fn on_remove(&mut self);
}

/// Layer bookkeeping kept by [`WebMercatorHost`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub size: Point,
    /// Top-left corner in viewport pixels, once positioned
    pub offset: Option<Point>,
}

/// Tile size of the Web Mercator world at zoom 0
pub const TILE_SIZE: f64 = 256.0;
/// Latitude limit of the Web Mercator projection
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// In-memory map viewport using the Web Mercator projection.
///
/// Enough of a map to place overlays in tests, demos and server-side rendering.
#[derive(Debug, Clone)]
pub struct WebMercatorHost {
    center: LatLng,
    zoom: f64,
    viewport: Point,
    layers: BTreeMap<LayerId, Layer>,
    next_layer: u64,
}

impl WebMercatorHost {
    pub fn new(center: LatLng, zoom: f64, viewport: Point) -> Self {
        Self {
            center,
            zoom,
            viewport,
            layers: BTreeMap::new(),
            next_layer: 0,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn viewport(&self) -> Point {
        self.viewport
    }

    pub fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// World pixel coordinates at the current zoom; latitude is clamped to the
    /// projection's limit
    fn world(&self, position: LatLng) -> Point {
        let scale = TILE_SIZE * 2f64.powf(self.zoom);
        let lat = position.lat().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (position.lng() + 180.0) / 360.0;
        let y = 0.5 - ((PI / 4.0 + lat / 2.0).tan()).ln() / (2.0 * PI);
        Point::new(x, y) * scale
    }
}

impl MapHost for WebMercatorHost {
    fn project(&self, position: LatLng) -> Option<Point> {
        let p = self.world(position) - self.world(self.center) + self.viewport / 2.0;
        p.is_finite().then_some(p)
    }

    fn add_layer(&mut self, size: Point) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.insert(id, Layer { size, offset: None });
        id
    }

    fn position_layer(&mut self, layer: LayerId, top_left: Point) {
        if let Some(layer) = self.layers.get_mut(&layer) {
            layer.offset = Some(top_left);
        }
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.remove(&layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual - expected).length() < 1e-6,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_center_projects_to_viewport_middle() {
        let center = LatLng::new(48.2, 16.37).unwrap();
        let host = WebMercatorHost::new(center, 12.0, Point::new(800.0, 600.0));
        assert_close(host.project(center).unwrap(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_zoom_zero_world() {
        let origin = LatLng::new(0.0, 0.0).unwrap();
        let host = WebMercatorHost::new(origin, 0.0, Point::new(256.0, 256.0));
        assert_close(
            host.project(LatLng::new(0.0, 90.0).unwrap()).unwrap(),
            Point::new(192.0, 128.0),
        );
        assert_close(
            host.project(LatLng::new(0.0, -180.0).unwrap()).unwrap(),
            Point::new(0.0, 128.0),
        );
        // North is up
        assert!(host.project(LatLng::new(45.0, 0.0).unwrap()).unwrap().y < 128.0);
        // Poles clamp instead of diverging
        assert_close(
            host.project(LatLng::new(90.0, 0.0).unwrap()).unwrap(),
            Point::new(128.0, 0.0),
        );
    }

    #[test]
    fn test_layers() {
        let origin = LatLng::new(0.0, 0.0).unwrap();
        let mut host = WebMercatorHost::new(origin, 3.0, Point::new(256.0, 256.0));
        let a = host.add_layer(Point::new(560.0, 560.0));
        let b = host.add_layer(Point::new(10.0, 10.0));
        assert_ne!(a, b);
        assert_eq!(host.layer(a).unwrap().offset, None);

        host.position_layer(a, Point::new(-152.0, -152.0));
        assert_eq!(host.layer(a).unwrap().offset, Some(Point::new(-152.0, -152.0)));

        host.remove_layer(a);
        assert!(host.layer(a).is_none());
        assert_eq!(host.layer_count(), 1);
    }
}
