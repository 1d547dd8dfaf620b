//! In-process scene viewport.
//!
//! Holds a camera pose and a handful of building footprints laid out in
//! viewport cells. Camera directives are applied instantly; no projection or
//! terrain math is attempted beyond placing an orbiting camera above its
//! target.

use std::collections::HashMap;
use std::f64::consts::TAU;

use super::{FeatureInfo, OverlayMark, PickKind, PickedFeature, PropertyBag, SceneViewport};
use crate::state::{
    CameraDirective, CameraPose, FeatureId, GeoPosition, HeadingPitchRange, HighlightColor,
    ScreenPosition,
};

/// Degrees of longitude/latitude covered by one viewport cell.
const DEGREES_PER_CELL: f64 = 0.000_2;

/// A building footprint known to the simulated viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedBuilding {
    /// Feature handle.
    pub id: FeatureId,
    /// Top-left cell of the footprint.
    pub origin: ScreenPosition,
    /// Footprint width in cells (one row high).
    pub width: u16,
    /// Roof position returned by depth picks.
    pub position: GeoPosition,
    /// Attributes returned with picks.
    pub properties: PropertyBag,
}

impl SimulatedBuilding {
    fn contains(&self, position: ScreenPosition) -> bool {
        position.y == self.origin.y
            && position.x >= self.origin.x
            && position.x < self.origin.x.saturating_add(self.width)
    }
}

/// Scene viewport kept entirely in memory.
#[derive(Clone, Debug)]
pub struct SimulatedViewport {
    camera: Option<CameraPose>,
    buildings: Vec<SimulatedBuilding>,
    highlights: HashMap<FeatureId, HighlightColor>,
    info: Option<FeatureInfo>,
    rendering: bool,
    flights: Vec<CameraDirective>,
    size: (u16, u16),
}

impl Default for SimulatedViewport {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SimulatedViewport {
    /// What: Create a viewport with the given buildings and no camera pose yet.
    #[must_use]
    pub fn new(buildings: Vec<SimulatedBuilding>) -> Self {
        Self {
            camera: None,
            buildings,
            highlights: HashMap::new(),
            info: None,
            rendering: true,
            flights: Vec::new(),
            size: (80, 20),
        }
    }

    /// What: Create a viewport populated with a few Shibuya station-area buildings.
    ///
    /// Details:
    /// - Attributes follow the PLATEAU CityGML naming (`gml:id`, `bldg:*`)
    #[must_use]
    pub fn shibuya() -> Self {
        let building = |n: u64, x: u16, y: u16, width: u16, lon: f64, lat: f64, height: f64| {
            SimulatedBuilding {
                id: FeatureId(n),
                origin: ScreenPosition::new(x, y),
                width,
                position: GeoPosition::from_degrees(lon, lat, height),
                properties: PropertyBag::new()
                    .with_text("gml:id", &format!("bldg_13113-{n:04}"))
                    .with_number("bldg:measuredHeight", height)
                    .with_text("bldg:usage", if n % 2 == 0 { "401" } else { "402" })
                    .with_text("bldg:class", "3001")
                    .with_text("city_name", "渋谷区"),
            }
        };
        Self::new(vec![
            building(1, 6, 3, 5, 139.7005, 35.6590, 182.5),
            building(2, 18, 5, 4, 139.7021, 35.6581, 230.3),
            building(3, 30, 2, 6, 139.6990, 35.6605, 47.8),
            building(4, 12, 9, 3, 139.7032, 35.6572, 35.0),
            building(5, 40, 7, 5, 139.7048, 35.6566, 120.6),
        ])
    }

    /// What: Return the current highlight of a feature (`White` when untouched).
    #[must_use]
    pub fn highlight_of(&self, feature: FeatureId) -> HighlightColor {
        self.highlights
            .get(&feature)
            .copied()
            .unwrap_or(HighlightColor::White)
    }

    /// What: Return the info box content currently shown.
    #[must_use]
    pub const fn info(&self) -> Option<&FeatureInfo> {
        self.info.as_ref()
    }

    /// What: Return every fly-to directive received, oldest first.
    #[must_use]
    pub fn flights(&self) -> &[CameraDirective] {
        &self.flights
    }

    /// What: Report whether rendering is enabled.
    #[must_use]
    pub const fn rendering(&self) -> bool {
        self.rendering
    }

    /// What: Return the known buildings.
    #[must_use]
    pub fn buildings(&self) -> &[SimulatedBuilding] {
        &self.buildings
    }

    fn apply_directive(&mut self, directive: &CameraDirective) {
        let mut position = directive.destination;
        if let Some(offset) = directive.offset {
            position.height += offset.range * (-offset.pitch).sin();
        }
        self.camera = Some(CameraPose {
            position,
            heading: directive.orientation.heading.rem_euclid(TAU),
            pitch: directive.orientation.pitch,
        });
    }
}

impl SceneViewport for SimulatedViewport {
    fn pick(&self, position: ScreenPosition) -> Option<PickedFeature> {
        self.buildings
            .iter()
            .find(|b| b.contains(position))
            .map(|b| PickedFeature {
                id: b.id,
                kind: PickKind::Building,
                properties: b.properties.clone(),
            })
    }

    fn pick_position(&self, position: ScreenPosition) -> Option<GeoPosition> {
        self.buildings
            .iter()
            .find(|b| b.contains(position))
            .map(|b| b.position)
    }

    fn pick_ellipsoid(&self, position: ScreenPosition) -> Option<GeoPosition> {
        let camera = self.camera?;
        let (width, height) = self.size;
        let dx = f64::from(position.x) - f64::from(width) / 2.0;
        let dy = f64::from(position.y) - f64::from(height) / 2.0;
        Some(GeoPosition::from_degrees(
            camera.position.longitude + dx * DEGREES_PER_CELL,
            camera.position.latitude - dy * DEGREES_PER_CELL,
            0.0,
        ))
    }

    fn camera(&self) -> Option<CameraPose> {
        self.camera
    }

    fn set_view(&mut self, directive: CameraDirective) {
        self.apply_directive(&directive);
    }

    fn fly_to(&mut self, directive: CameraDirective) {
        tracing::debug!(
            lon = directive.destination.longitude,
            lat = directive.destination.latitude,
            "simulated fly-to"
        );
        self.apply_directive(&directive);
        self.flights.push(directive);
    }

    fn look_at(&mut self, center: GeoPosition, offset: HeadingPitchRange) {
        self.camera = Some(CameraPose {
            position: GeoPosition {
                height: center.height + offset.range * (-offset.pitch).sin(),
                ..center
            },
            heading: offset.heading.rem_euclid(TAU),
            pitch: offset.pitch,
        });
    }

    fn highlight(&mut self, feature: FeatureId, color: HighlightColor) {
        self.highlights.insert(feature, color);
    }

    fn reset_style(&mut self) {
        self.highlights.clear();
    }

    fn show_info(&mut self, info: Option<FeatureInfo>) {
        self.info = info;
    }

    fn set_rendering(&mut self, enabled: bool) {
        self.rendering = enabled;
    }

    fn overlay(&self) -> Vec<OverlayMark> {
        self.buildings
            .iter()
            .map(|b| OverlayMark {
                id: b.id,
                origin: b.origin,
                width: b.width,
                color: self.highlight_of(b.id),
            })
            .collect()
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Orientation;

    #[test]
    /// What: Picks hit inside building footprints only.
    ///
    /// Inputs:
    /// - The last footprint cell and the cell just past it.
    ///
    /// Output:
    /// - The building for the inside cell, `None` past the edge.
    fn pick_hits_footprint_cells_only() {
        let viewport = SimulatedViewport::shibuya();
        let first = &viewport.buildings()[0];
        let inside = ScreenPosition::new(first.origin.x + first.width - 1, first.origin.y);
        let outside = ScreenPosition::new(first.origin.x + first.width, first.origin.y);

        let picked = viewport.pick(inside).expect("footprint cell should pick");
        assert_eq!(picked.id, first.id);
        assert_eq!(picked.kind, PickKind::Building);
        assert_eq!(viewport.pick_position(inside), Some(first.position));
        assert!(viewport.pick(outside).is_none());
    }

    #[test]
    /// What: Ground picks fail until a camera is set, then follow screen offsets.
    fn ellipsoid_pick_needs_a_camera() {
        let mut viewport = SimulatedViewport::shibuya();
        viewport.resize(40, 10);
        assert!(viewport.pick_ellipsoid(ScreenPosition::new(20, 5)).is_none());

        viewport.look_at(
            GeoPosition::from_degrees(139.701, 35.658, 0.0),
            HeadingPitchRange {
                heading: 0.0,
                pitch: -0.5,
                range: 1500.0,
            },
        );
        let center = viewport
            .pick_ellipsoid(ScreenPosition::new(20, 5))
            .expect("camera set");
        assert!((center.longitude - 139.701).abs() < 1e-9);
        assert!((center.latitude - 35.658).abs() < 1e-9);

        let east = viewport
            .pick_ellipsoid(ScreenPosition::new(25, 5))
            .expect("camera set");
        assert!(east.longitude > center.longitude);
    }

    #[test]
    /// What: Headings past a full turn wrap back into one turn.
    fn look_at_normalizes_heading() {
        let mut viewport = SimulatedViewport::default();
        viewport.look_at(
            GeoPosition::from_degrees(139.701, 35.658, 0.0),
            HeadingPitchRange {
                heading: TAU + 0.25,
                pitch: -std::f64::consts::FRAC_PI_2,
                range: 1000.0,
            },
        );
        let pose = viewport.camera().expect("pose after look_at");
        assert!((pose.heading - 0.25).abs() < 1e-9);
        assert!((pose.position.height - 1000.0).abs() < 1e-6);
    }

    #[test]
    /// What: Fly-to requests are logged and move the camera.
    ///
    /// Inputs:
    /// - One `fly_to` directive.
    ///
    /// Output:
    /// - Flight log entry and matching camera pose.
    fn fly_to_is_recorded_and_applied() {
        let mut viewport = SimulatedViewport::default();
        let directive = CameraDirective {
            destination: GeoPosition::from_degrees(139.7, 35.66, 1500.0),
            orientation: Orientation {
                heading: 0.0,
                pitch: -0.5,
                roll: 0.0,
            },
            duration: None,
            offset: None,
        };
        viewport.fly_to(directive);
        assert_eq!(viewport.flights().len(), 1);
        assert_eq!(
            viewport.camera().map(|p| p.position),
            Some(directive.destination)
        );
    }

    #[test]
    /// What: Highlights apply to one building and reset clears them.
    fn highlight_and_reset() {
        let mut viewport = SimulatedViewport::shibuya();
        viewport.highlight(FeatureId(2), HighlightColor::Yellow);
        assert_eq!(viewport.highlight_of(FeatureId(2)), HighlightColor::Yellow);
        assert!(
            viewport
                .overlay()
                .iter()
                .any(|m| m.id == FeatureId(2) && m.color == HighlightColor::Yellow)
        );
        viewport.reset_style();
        assert_eq!(viewport.highlight_of(FeatureId(2)), HighlightColor::White);
    }
}
