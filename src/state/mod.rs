//! Application state: view flags, labelled elements, camera parameters.
//!
//! Public re-exports keep the `crate::state::*` paths short.

pub mod app_state;
pub mod camera;
pub mod elements;
pub mod types;

pub use app_state::AppState;
pub use camera::{OrbitCamera, Telemetry, format_clicked_coords};
pub use elements::{
    ElementId, ElementRegistry, MAP_VIEW_LABEL, START_ROTATION_LABEL, STOP_ROTATION_LABEL,
    UiElement, VIEW_3D_LABEL,
};
pub use types::{
    CameraDirective, CameraPose, FeatureId, GeoPosition, HeadingPitchRange, HighlightColor,
    Orientation, ScreenPosition, ViewMode, ViewState,
};
