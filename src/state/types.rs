//! Core value types shared by the controller, the scene viewport and the UI.

use std::time::Duration;

use crate::i18n::Language;

/// Opaque handle to a feature owned by the scene viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeatureId(pub u64);

/// Position inside the viewport area, in terminal cells from its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenPosition {
    /// Column offset.
    pub x: u16,
    /// Row offset.
    pub y: u16,
}

impl ScreenPosition {
    /// What: Build a position from a column and row.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Geographic position: degrees for longitude/latitude, metres for height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPosition {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Height above the ellipsoid in metres.
    pub height: f64,
}

impl GeoPosition {
    /// What: Build a position from degrees and metres.
    #[must_use]
    pub const fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }
}

/// Camera orientation in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    /// Heading (clockwise from north).
    pub heading: f64,
    /// Pitch (negative looks down).
    pub pitch: f64,
    /// Roll.
    pub roll: f64,
}

/// Offset of a camera from the point it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingPitchRange {
    /// Heading in radians.
    pub heading: f64,
    /// Pitch in radians.
    pub pitch: f64,
    /// Distance from the target in metres.
    pub range: f64,
}

/// Camera pose as reported by the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Camera position.
    pub position: GeoPosition,
    /// Heading in radians, normalized to `[0, 2π)`.
    pub heading: f64,
    /// Pitch in radians.
    pub pitch: f64,
}

/// A camera set/fly-to request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraDirective {
    /// Where the camera should end up (or the target when `offset` is set).
    pub destination: GeoPosition,
    /// Final orientation.
    pub orientation: Orientation,
    /// Flight duration; `None` lets the viewport pick its default.
    pub duration: Option<Duration>,
    /// Keep this offset from `destination` instead of moving onto it.
    pub offset: Option<HeadingPitchRange>,
}

/// Colour applied to a picked feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightColor {
    /// Default tileset style.
    White,
    /// Selected building.
    Yellow,
}

/// Presentation mode of the scene area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// Perspective 3D view (default).
    Globe3d,
    /// Top-down map view.
    Map,
}

/// The small record of UI flags mutated by event handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Language whose strings are currently displayed.
    pub active_language: Language,
    /// Whether the per-tick orbit advances the camera heading.
    pub is_rotating: bool,
    /// Whether the map view is active instead of the 3D view.
    pub is_map_view: bool,
    /// Feature selected by the last successful pick.
    pub selected_feature: Option<FeatureId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_language: Language::En,
            is_rotating: true,
            is_map_view: false,
            selected_feature: None,
        }
    }
}

impl ViewState {
    /// What: Return the current view mode derived from `is_map_view`.
    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        if self.is_map_view {
            ViewMode::Map
        } else {
            ViewMode::Globe3d
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Initial view state: 3D, rotating, English, nothing selected.
    fn view_state_defaults() {
        let view = ViewState::default();
        assert_eq!(view.active_language, Language::En);
        assert!(view.is_rotating);
        assert!(!view.is_map_view);
        assert_eq!(view.selected_feature, None);
        assert_eq!(view.view_mode(), ViewMode::Globe3d);
    }
}
