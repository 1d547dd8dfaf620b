//! Central `AppState` container shared by the controller, the event handlers and the UI.

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::{FeatureSet, KeyMap};
use crate::i18n::LocalizationStore;
use crate::state::camera::{OrbitCamera, Telemetry};
use crate::state::elements::{ElementId, ElementRegistry};
use crate::state::types::{ScreenPosition, ViewState};
use crate::viewport::FeatureInfo;

/// Global application state.
///
/// Everything here is owned by the single task that runs the event loop;
/// background work reports back over channels instead of touching it.
#[derive(Debug)]
pub struct AppState {
    /// Language, rotation, view mode and selection flags.
    pub view: ViewState,
    /// Loaded translation table.
    pub store: LocalizationStore,
    /// Labelled UI elements (buttons, panel titles).
    pub elements: ElementRegistry,
    /// Optional behaviours enabled for this session.
    pub features: FeatureSet,
    /// Keyboard bindings.
    pub keymap: KeyMap,
    /// Orbit parameters driven by the tick.
    pub orbit: OrbitCamera,
    /// Ticks seen so far.
    pub frame_count: u64,
    /// Last telemetry readout; `None` until the camera has a pose.
    pub telemetry: Option<Telemetry>,
    /// Text of the clicked-coordinates panel; `None` keeps the panel hidden.
    pub clicked_coords: Option<String>,
    /// Info box of the selected building.
    pub info: Option<FeatureInfo>,
    /// Screen area of the scene, recorded by the last render.
    pub viewport_rect: Rect,
    /// Screen areas of the control-bar buttons, recorded by the last render.
    pub button_rects: Vec<(ElementId, Rect)>,
    /// Time and position of the last left click inside the scene.
    pub last_click: Option<(Instant, ScreenPosition)>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: ViewState::default(),
            store: LocalizationStore::new(),
            elements: ElementRegistry::with_defaults(),
            features: FeatureSet::default(),
            keymap: KeyMap::default(),
            orbit: OrbitCamera::default(),
            frame_count: 0,
            telemetry: None,
            clicked_coords: None,
            info: None,
            viewport_rect: Rect::default(),
            button_rects: Vec::new(),
            last_click: None,
        }
    }
}

impl AppState {
    /// What: Find the control-bar button under a terminal cell.
    #[must_use]
    pub fn button_at(&self, column: u16, row: u16) -> Option<ElementId> {
        self.button_rects
            .iter()
            .find(|(_, r)| {
                column >= r.x
                    && column < r.x.saturating_add(r.width)
                    && row >= r.y
                    && row < r.y.saturating_add(r.height)
            })
            .map(|(id, _)| *id)
    }

    /// What: Translate a terminal cell into a position inside the scene area.
    ///
    /// Output:
    /// - `None` when the cell lies outside the recorded scene area
    #[must_use]
    pub fn scene_position(&self, column: u16, row: u16) -> Option<ScreenPosition> {
        let r = self.viewport_rect;
        let inside = column >= r.x
            && column < r.x.saturating_add(r.width)
            && row >= r.y
            && row < r.y.saturating_add(r.height);
        inside.then(|| ScreenPosition::new(column - r.x, row - r.y))
    }
}
