//! The sun diagram overlay.
//!
//! [`SunDiagramOverlay`] ties the pieces together: it owns its host, surface and
//! astronomy model, caches the position and date it was last given, and on each draw
//! recomputes only the primitives the pending changes invalidated.
//!
//! Redraw tiers, cheapest first:
//!
//! - **time**: the current sun ray
//! - **day**: sunrise/sunset rays and the day's sun track (plus time)
//! - **year**: solstice curves, sunlight fill and sunrise/sunset sectors (plus day)

use chrono::{DateTime, Datelike, FixedOffset, Utc};

use crate::astro::Astronomy;
use crate::change::{ChangeSet, RedrawTier, Snapshot};
use crate::config::{DiagramConfig, FillStyle, StrokeStyle};
use crate::errors::{ConfigError, OverlayError};
use crate::host::{LayerId, MapHost, OverlayView};
use crate::render::geometry::SunProjector;
use crate::render::path::PathData;
use crate::render::surface::{DrawingSurface, HoverAction, PrimitiveId, PrimitiveStyle};
use crate::types::LatLng;

/// Surface primitives of an attached diagram, in z-order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitives {
    pub horizon: PrimitiveId,
    pub sunlight_fill: PrimitiveId,
    pub summer_curve: PrimitiveId,
    pub winter_curve: PrimitiveId,
    pub sunrise_sector: PrimitiveId,
    pub sunset_sector: PrimitiveId,
    pub sunrise_ray: PrimitiveId,
    pub sunset_ray: PrimitiveId,
    pub sun_ray: PrimitiveId,
    pub current_curve: PrimitiveId,
}

impl Primitives {
    fn create<S: DrawingSurface>(surface: &mut S, config: &DiagramConfig) -> Self {
        let styles = &config.styles;
        surface.set_size(config.size());

        let stroke = |style: &StrokeStyle| PrimitiveStyle::Stroke(style.clone());
        let fill = |style: &FillStyle| PrimitiveStyle::Fill(style.clone());

        let horizon =
            surface.create_circle(config.center(), config.radius, styles.horizon.clone());
        let sunlight_fill = surface.create_path(fill(&styles.sunlight_fill));
        let summer_curve = surface.create_path(stroke(&styles.solstice_curve));
        let winter_curve = surface.create_path(stroke(&styles.solstice_curve));

        let sunrise_sector = surface.create_path(fill(&styles.sunrise_sector));
        let sunset_sector = surface.create_path(fill(&styles.sunset_sector));
        surface.set_visible(sunrise_sector, false);
        surface.set_visible(sunset_sector, false);

        let sunrise_ray = surface.create_path(stroke(&styles.sunrise_ray));
        let sunset_ray = surface.create_path(stroke(&styles.sunset_ray));
        let sun_ray = surface.create_path(stroke(&styles.sun_ray));
        let current_curve = surface.create_path(stroke(&styles.current_curve));

        surface.on_hover(
            sunrise_ray,
            HoverAction::Show(sunrise_sector),
            HoverAction::Hide(sunrise_sector),
        );
        surface.on_hover(
            sunset_ray,
            HoverAction::Show(sunset_sector),
            HoverAction::Hide(sunset_sector),
        );

        Self {
            horizon,
            sunlight_fill,
            summer_curve,
            winter_curve,
            sunrise_sector,
            sunset_sector,
            sunrise_ray,
            sunset_ray,
            sun_ray,
            current_curve,
        }
    }

    fn all(&self) -> [PrimitiveId; 10] {
        [
            self.horizon,
            self.sunlight_fill,
            self.summer_curve,
            self.winter_curve,
            self.sunrise_sector,
            self.sunset_sector,
            self.sunrise_ray,
            self.sunset_ray,
            self.sun_ray,
            self.current_curve,
        ]
    }
}

#[derive(Debug, Clone, Copy)]
struct Attachment {
    layer: LayerId,
    primitives: Primitives,
}

/// Sun path diagram anchored to a map position.
pub struct SunDiagramOverlay<H, S, A> {
    host: H,
    surface: S,
    astronomy: A,
    config: DiagramConfig,
    position: LatLng,
    date: DateTime<FixedOffset>,
    pending: ChangeSet,
    attachment: Option<Attachment>,
    last_redraw: Option<RedrawTier>,
}

impl<H: MapHost, S: DrawingSurface, A: Astronomy> SunDiagramOverlay<H, S, A> {
    /// Create a detached overlay with the default configuration
    pub fn new(
        host: H,
        surface: S,
        astronomy: A,
        position: LatLng,
        date: DateTime<FixedOffset>,
    ) -> Self {
        let config = DiagramConfig::default();
        Self::build(host, surface, astronomy, position, date, config)
    }

    /// Create a detached overlay, validating `config` first
    pub fn with_config(
        host: H,
        surface: S,
        astronomy: A,
        position: LatLng,
        date: DateTime<FixedOffset>,
        config: DiagramConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(host, surface, astronomy, position, date, config))
    }

    fn build(
        host: H,
        surface: S,
        astronomy: A,
        position: LatLng,
        date: DateTime<FixedOffset>,
        config: DiagramConfig,
    ) -> Self {
        let snapshot = Snapshot::new(position, date);
        Self {
            host,
            surface,
            astronomy,
            config,
            position,
            date,
            pending: ChangeSet::classify(None, &snapshot),
            attachment: None,
            last_redraw: None,
        }
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to pan the viewport before calling [`draw`](OverlayView::draw)
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access, e.g. to deliver hover events
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Primitive handles while attached
    pub fn primitives(&self) -> Option<Primitives> {
        self.attachment.map(|a| a.primitives)
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.attachment.map(|a| a.layer)
    }

    /// Changes not yet drawn
    pub fn pending(&self) -> ChangeSet {
        self.pending
    }

    /// Tier of the most recent draw
    pub fn last_redraw(&self) -> Option<RedrawTier> {
        self.last_redraw
    }

    /// Show the diagram for `position` at `date`.
    ///
    /// Returns what this call changed. The diagram is redrawn right away when
    /// attached; otherwise the changes wait for the first draw after attaching.
    pub fn update(&mut self, position: LatLng, date: DateTime<FixedOffset>) -> ChangeSet {
        let previous = Snapshot::new(self.position, self.date);
        let change = ChangeSet::classify(Some(&previous), &Snapshot::new(position, date));
        crate::log::debug!(?change, %position, %date, "update");

        self.position = position;
        self.date = date;
        self.pending |= change;

        if self.is_attached() && !self.pending.is_empty() {
            self.draw();
        }
        change
    }

    /// Attach to the host and draw. Attaching twice is a no-op.
    pub fn attach(&mut self) {
        if self.is_attached() {
            crate::log::debug!("attach ignored, already attached");
            return;
        }
        self.on_add();
        self.draw();
    }

    /// Remove the diagram from the host and release its primitives.
    pub fn detach(&mut self) -> Result<(), OverlayError> {
        if !self.is_attached() {
            return Err(OverlayError::NotAttached);
        }
        self.on_remove();
        Ok(())
    }

    fn anchor(&mut self, layer: LayerId) {
        match self.host.project(self.position) {
            Some(pixel) => self.host.position_layer(layer, pixel - self.config.center()),
            None => {
                crate::log::warn!(
                    position = %self.position,
                    "host cannot project position, layer not moved"
                );
            }
        }
    }

    fn draw_year_info(&mut self, ids: &Primitives) {
        let projector = SunProjector::new(&self.astronomy, self.position, self.config.diagram());
        let diagram = *projector.diagram();
        let summer = solstice(self.date, 6);
        let winter = solstice(self.date, 12);

        let summer_info = projector.day_info(summer);
        let summer_curve = projector.sun_track(&summer_info, summer);
        self.surface.set_path(ids.summer_curve, &summer_curve);

        let winter_info = projector.day_info(winter);
        let winter_curve = projector.sun_track(&winter_info, winter);
        self.surface.set_path(ids.winter_curve, &winter_curve);

        let sunrise_sector = projector.sector(summer_info.sunrise.start, winter_info.sunrise.start);
        let sunset_sector = projector.sector(winter_info.sunset.end, summer_info.sunset.end);

        // Only the sunrise sector decides whether the fill is drawn
        let fill = if sunrise_sector.is_empty() {
            crate::log::debug!(
                position = %self.position,
                "no sunrise sector, sunlight fill cleared"
            );
            PathData::new()
        } else {
            diagram.sunlight_fill(&summer_curve, &winter_curve)
        };
        self.surface.set_path(ids.sunlight_fill, &fill);
        self.surface.set_path(ids.sunrise_sector, &sunrise_sector);
        self.surface.set_path(ids.sunset_sector, &sunset_sector);
    }

    fn draw_current_day_info(&mut self, ids: &Primitives) {
        let projector = SunProjector::new(&self.astronomy, self.position, self.config.diagram());
        let at = self.date.with_timezone(&Utc);
        let info = projector.day_info(at);

        self.surface.set_path(ids.sunrise_ray, &projector.ray(info.sunrise.start));
        self.surface.set_path(ids.sunset_ray, &projector.ray(info.sunset.end));
        self.surface.set_path(ids.current_curve, &projector.sun_track(&info, at));
    }

    fn draw_current_time_info(&mut self, ids: &Primitives) {
        let projector = SunProjector::new(&self.astronomy, self.position, self.config.diagram());
        let ray = projector.ray(Some(self.date.with_timezone(&Utc)));
        self.surface.set_path(ids.sun_ray, &ray);
    }
}

impl<H: MapHost, S: DrawingSurface, A: Astronomy> OverlayView for SunDiagramOverlay<H, S, A> {
    fn on_add(&mut self) {
        let primitives = Primitives::create(&mut self.surface, &self.config);
        let layer = self.host.add_layer(self.config.size());
        crate::log::debug!(?layer, position = %self.position, "overlay attached");
        self.attachment = Some(Attachment { layer, primitives });
    }

    fn draw(&mut self) -> Option<RedrawTier> {
        let Attachment { layer, primitives } = self.attachment?;
        self.anchor(layer);

        let tier = self.pending.tier();
        match tier {
            RedrawTier::Year => {
                self.draw_year_info(&primitives);
                self.draw_current_day_info(&primitives);
                self.draw_current_time_info(&primitives);
            }
            RedrawTier::Day => {
                self.draw_current_day_info(&primitives);
                self.draw_current_time_info(&primitives);
            }
            RedrawTier::Time => self.draw_current_time_info(&primitives),
            RedrawTier::Anchor => {}
        }
        crate::log::debug!(?tier, "overlay drawn");

        self.pending = ChangeSet::NONE;
        self.last_redraw = Some(tier);
        Some(tier)
    }

    fn on_remove(&mut self) {
        let Some(Attachment { layer, primitives }) = self.attachment.take() else {
            return;
        };
        for id in primitives.all() {
            self.surface.remove(id);
        }
        self.host.remove_layer(layer);
        // A later attach starts from scratch
        self.pending = ChangeSet::classify(None, &Snapshot::new(self.position, self.date));
        crate::log::debug!(?layer, "overlay detached");
    }
}

/// June or December 21st of `date`'s year, same offset and time of day.
///
/// The day is set before the month so a date on the 31st cannot roll over.
fn solstice(date: DateTime<FixedOffset>, month: u32) -> DateTime<Utc> {
    date.with_day(21)
        .and_then(|d| d.with_month(month))
        .unwrap_or(date)
        .with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_solstice_keeps_year_offset_and_time() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = offset.with_ymd_and_hms(2024, 3, 31, 15, 30, 0).unwrap();
        let june = Utc.with_ymd_and_hms(2024, 6, 21, 13, 30, 0).unwrap();
        let december = Utc.with_ymd_and_hms(2024, 12, 21, 13, 30, 0).unwrap();
        assert_eq!(solstice(date, 6), june);
        assert_eq!(solstice(date, 12), december);
    }
}
