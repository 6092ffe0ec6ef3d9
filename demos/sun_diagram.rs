//! Render a sun diagram to SVG on stdout.
//!
//! ```text
//! cargo run --example sun_diagram --features tracing -- 51.5074 -0.1278 2024-06-21T12:00:00+01:00
//! ```
//!
//! Set `RUST_LOG=sunpath=debug` to watch the overlay redraw.

use chrono::{DateTime, Utc};
use miette::{IntoDiagnostic, Result, miette};
use sunpath::{LatLng, MapHost, Point, Spa, SunDiagramOverlay, SvgSurface, WebMercatorHost};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (lat, lng, date) = match args.as_slice() {
        [lat, lng] => (lat, lng, None),
        [lat, lng, date] => (lat, lng, Some(date)),
        _ => return Err(miette!("usage: sun_diagram <lat> <lng> [rfc3339 date]")),
    };

    let position = LatLng::new(
        lat.parse().into_diagnostic()?,
        lng.parse().into_diagnostic()?,
    )?;
    let date = match date {
        Some(date) => DateTime::parse_from_rfc3339(date).into_diagnostic()?,
        None => Utc::now().fixed_offset(),
    };

    let host = WebMercatorHost::new(position, 15.0, Point::new(1024.0, 768.0));
    let mut overlay = SunDiagramOverlay::new(host, SvgSurface::new(), Spa, position, date);
    overlay.attach();

    if let Some(layer) = overlay.layer().and_then(|id| overlay.host().layer(id)) {
        tracing::info!(offset = ?layer.offset, size = ?layer.size, "layer placed");
    }
    tracing::info!(projected = ?overlay.host().project(position), "diagram ready");

    println!("{}", overlay.surface().to_svg());
    Ok(())
}
