//! Scene viewport boundary.
//!
//! The 3D globe (terrain, imagery, streamed building tiles, picking, camera
//! flights) is an external engine. The controller only talks to it through
//! [`SceneViewport`]; [`SimulatedViewport`] is the in-process implementation
//! used by the terminal front end and by tests.

mod feature;
mod sim;

pub use feature::{
    BUILDING_CLASS_KEYS, BUILDING_HEIGHT_KEYS, BUILDING_ID_KEYS, BUILDING_USAGE_KEYS, FeatureInfo,
    MAX_EXTRA_PROPERTIES, probe,
};
pub use sim::{SimulatedBuilding, SimulatedViewport};

use std::collections::BTreeMap;
use std::fmt;

use crate::state::{
    CameraDirective, CameraPose, FeatureId, GeoPosition, HeadingPitchRange, HighlightColor,
    ScreenPosition,
};

/// A property value read from a picked feature.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// String attribute.
    Text(String),
    /// Numeric attribute.
    Number(f64),
    /// Boolean attribute.
    Bool(bool),
}

impl PropertyValue {
    /// What: Check whether the value carries information.
    ///
    /// Details:
    /// - Empty strings, zero and `false` count as absent when probing candidate keys
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Read access to the attributes of a picked feature.
pub trait FeatureProperties {
    /// What: Read one attribute by name.
    fn get_property(&self, key: &str) -> Option<PropertyValue>;

    /// What: List attribute names in the feature's own order.
    fn property_ids(&self) -> Vec<String>;
}

/// Ordered attribute bag used for features held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    /// What: Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Append an attribute (builder style).
    #[must_use]
    pub fn with(mut self, key: &str, value: PropertyValue) -> Self {
        self.entries.push((key.to_string(), value));
        self
    }

    /// What: Append a text attribute (builder style).
    #[must_use]
    pub fn with_text(self, key: &str, value: &str) -> Self {
        self.with(key, PropertyValue::Text(value.to_string()))
    }

    /// What: Append a numeric attribute (builder style).
    #[must_use]
    pub fn with_number(self, key: &str, value: f64) -> Self {
        self.with(key, PropertyValue::Number(value))
    }
}

impl FeatureProperties for PropertyBag {
    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn property_ids(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

impl FeatureProperties for BTreeMap<String, PropertyValue> {
    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.get(key).cloned()
    }

    fn property_ids(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

/// What kind of primitive a pick hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickKind {
    /// A feature of the building tileset.
    Building,
    /// Any other primitive (labels, markers, terrain-draped entities).
    Other,
}

/// Result of a successful pick.
#[derive(Clone, Debug, PartialEq)]
pub struct PickedFeature {
    /// Feature handle.
    pub id: FeatureId,
    /// Primitive kind of the hit.
    pub kind: PickKind,
    /// Feature attributes.
    pub properties: PropertyBag,
}

/// Screen-space mark a viewport asks the host to draw (terminal hosts cannot
/// embed the engine's own canvas).
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayMark {
    /// Feature the mark belongs to.
    pub id: FeatureId,
    /// Top-left cell of the mark inside the viewport area.
    pub origin: ScreenPosition,
    /// Width in cells.
    pub width: u16,
    /// Current highlight.
    pub color: HighlightColor,
}

/// Capabilities the controller needs from the external 3D engine.
pub trait SceneViewport {
    /// What: Pick the topmost feature under a viewport position.
    fn pick(&self, position: ScreenPosition) -> Option<PickedFeature>;

    /// What: Resolve the 3D surface position under a viewport position (depth pick).
    fn pick_position(&self, position: ScreenPosition) -> Option<GeoPosition>;

    /// What: Intersect the ray under a viewport position with the ellipsoid.
    fn pick_ellipsoid(&self, position: ScreenPosition) -> Option<GeoPosition>;

    /// What: Report the current camera pose, if the camera has one yet.
    fn camera(&self) -> Option<CameraPose>;

    /// What: Move the camera immediately.
    fn set_view(&mut self, directive: CameraDirective);

    /// What: Animate the camera to a destination.
    fn fly_to(&mut self, directive: CameraDirective);

    /// What: Orbit-style placement: look at `center` from `offset`.
    fn look_at(&mut self, center: GeoPosition, offset: HeadingPitchRange);

    /// What: Colour a single feature.
    fn highlight(&mut self, feature: FeatureId, color: HighlightColor);

    /// What: Restore the default tileset style for every feature.
    fn reset_style(&mut self);

    /// What: Show or clear the engine's own selected-entity info box.
    fn show_info(&mut self, info: Option<FeatureInfo>);

    /// What: Turn rendering on or off globally.
    fn set_rendering(&mut self, enabled: bool);

    /// What: Marks for the host to draw; engines that render themselves return nothing.
    fn overlay(&self) -> Vec<OverlayMark> {
        Vec::new()
    }

    /// What: Tell the viewport the size of the area it is shown in.
    fn resize(&mut self, _width: u16, _height: u16) {}
}
