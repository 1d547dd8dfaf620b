//! View-state controller: reacts to buttons, keys, clicks and ticks.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::config::KeyAction;
use crate::i18n::{Language, TranslationTable};
use crate::state::camera::{FOCUS_PITCH_DEG, FOCUS_RANGE_M, HOME_FLIGHT, TELEMETRY_EVERY_TICKS};
use crate::state::{
    AppState, CameraDirective, ElementId, FeatureId, HeadingPitchRange, HighlightColor,
    MAP_VIEW_LABEL, Orientation, START_ROTATION_LABEL, STOP_ROTATION_LABEL, ScreenPosition,
    Telemetry, VIEW_3D_LABEL, format_clicked_coords,
};
use crate::viewport::{FeatureInfo, PickKind, SceneViewport};

/// Result of routing a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key triggered an action.
    Handled,
    /// The key is unbound or its shortcut is currently disabled.
    Ignored,
    /// The application should exit.
    Exit,
}

/// Owns the application state and the scene viewport and applies every
/// state transition.
///
/// All mutation goes through `&mut self`, so the controller can only be
/// driven from one task at a time.
#[derive(Debug)]
pub struct ViewController<V: SceneViewport> {
    app: AppState,
    viewport: V,
}

impl<V: SceneViewport> ViewController<V> {
    /// What: Wire the state to a viewport and place the camera at the home view.
    ///
    /// Inputs:
    /// - `app`: Initial state (settings already applied)
    /// - `viewport`: Scene viewport to drive
    ///
    /// Output:
    /// - Controller with rendering enabled and the camera set without animation
    pub fn new(app: AppState, mut viewport: V) -> Self {
        viewport.set_rendering(true);
        viewport.set_view(app.orbit.home_directive(None));
        Self { app, viewport }
    }

    /// What: Borrow the application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.app
    }

    /// What: Borrow the application state mutably (render bookkeeping, tests).
    pub const fn state_mut(&mut self) -> &mut AppState {
        &mut self.app
    }

    /// What: Borrow the viewport.
    #[must_use]
    pub const fn viewport(&self) -> &V {
        &self.viewport
    }

    /// What: Borrow the viewport mutably.
    pub const fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// What: Install a freshly loaded translation table and apply the active language once.
    ///
    /// Output:
    /// - Number of elements relabelled
    pub fn install_translations(&mut self, table: TranslationTable) -> usize {
        self.app.store.replace_table(table);
        let language = self.app.view.active_language;
        let AppState {
            store,
            view,
            elements,
            ..
        } = &mut self.app;
        store.apply(language, view, elements)
    }

    /// What: Switch the display language.
    ///
    /// Inputs:
    /// - `code`: Language code; unsupported codes change nothing
    ///
    /// Output:
    /// - Number of elements relabelled
    pub fn set_language(&mut self, code: &str) -> usize {
        let AppState {
            store,
            view,
            elements,
            ..
        } = &mut self.app;
        store.apply_language(code, view, elements)
    }

    /// What: Flip between the 3D view and the map view and relabel the toggle.
    ///
    /// Output:
    /// - The new `is_map_view`
    pub fn toggle_view_mode(&mut self) -> bool {
        self.app.view.is_map_view = !self.app.view.is_map_view;
        let key = if self.app.view.is_map_view {
            MAP_VIEW_LABEL
        } else {
            VIEW_3D_LABEL
        };
        self.relabel(ElementId::VIEW_MODE_TOGGLE, key);
        tracing::debug!(map_view = self.app.view.is_map_view, "view mode toggled");
        self.app.view.is_map_view
    }

    /// What: Start or stop the orbit and relabel the toggle.
    ///
    /// Output:
    /// - The new `is_rotating`
    pub fn toggle_rotation(&mut self) -> bool {
        self.app.view.is_rotating = !self.app.view.is_rotating;
        let key = if self.app.view.is_rotating {
            STOP_ROTATION_LABEL
        } else {
            START_ROTATION_LABEL
        };
        self.relabel(ElementId::ROTATION_TOGGLE, key);
        tracing::debug!(rotating = self.app.view.is_rotating, "rotation toggled");
        self.app.view.is_rotating
    }

    /// What: Store or clear the selected feature.
    pub const fn select_feature(&mut self, feature: Option<FeatureId>) {
        self.app.view.selected_feature = feature;
    }

    /// What: Fly back to the home view over two seconds.
    pub fn reset_home(&mut self) {
        let directive = self.app.orbit.home_directive(Some(HOME_FLIGHT));
        self.viewport.fly_to(directive);
    }

    /// What: Drop the selection, hide the info box and restore the default building style.
    pub fn clear_selection(&mut self) {
        self.select_feature(None);
        self.app.info = None;
        self.viewport.show_info(None);
        self.viewport.reset_style();
    }

    /// What: Activate a control-bar button.
    ///
    /// Output:
    /// - `true` when `id` names a button
    pub fn press_button(&mut self, id: ElementId) -> bool {
        match id {
            ElementId::LANG_EN => {
                self.set_language(Language::En.code());
            }
            ElementId::LANG_JA => {
                self.set_language(Language::Ja.code());
            }
            ElementId::VIEW_MODE_TOGGLE => {
                self.toggle_view_mode();
            }
            ElementId::ROTATION_TOGGLE => {
                self.toggle_rotation();
            }
            _ => return false,
        }
        true
    }

    /// What: Route a key press through the key map.
    ///
    /// Inputs:
    /// - `code`, `mods`: Pressed key and modifiers
    ///
    /// Output:
    /// - `KeyOutcome` telling the caller whether to exit
    ///
    /// Details:
    /// - Exit, language and view-mode keys mirror the buttons and always work
    /// - Home, rotation and clear-selection shortcuts honour the `FeatureSet` gates
    pub fn handle_key(&mut self, code: KeyCode, mods: KeyModifiers) -> KeyOutcome {
        let Some(action) = self.app.keymap.action_for(code, mods) else {
            return KeyOutcome::Ignored;
        };
        match action {
            KeyAction::Exit => return KeyOutcome::Exit,
            KeyAction::LanguageEn => {
                self.set_language(Language::En.code());
            }
            KeyAction::LanguageJa => {
                self.set_language(Language::Ja.code());
            }
            KeyAction::ToggleViewMode => {
                self.toggle_view_mode();
            }
            KeyAction::Home | KeyAction::ToggleRotation | KeyAction::ClearSelection => {
                if !self.shortcuts_enabled() {
                    tracing::trace!(?action, "shortcut disabled in this view");
                    return KeyOutcome::Ignored;
                }
                match action {
                    KeyAction::Home => self.reset_home(),
                    KeyAction::ToggleRotation => {
                        self.toggle_rotation();
                    }
                    _ => self.clear_selection(),
                }
            }
        }
        KeyOutcome::Handled
    }

    /// What: Advance one viewport frame.
    ///
    /// Details:
    /// - Rotation runs first, so the readout reflects this frame's heading
    /// - Telemetry refreshes on ticks 0, 10, 20, ... and only when the camera has a pose
    pub fn tick(&mut self) {
        if self.app.view.is_rotating {
            let offset = self.app.orbit.advance();
            self.viewport.look_at(self.app.orbit.center, offset);
        }
        if self.app.frame_count % TELEMETRY_EVERY_TICKS == 0
            && let Some(pose) = self.viewport.camera()
        {
            self.app.telemetry = Some(Telemetry::from_pose(&pose));
        }
        self.app.frame_count = self.app.frame_count.wrapping_add(1);
    }

    /// What: Handle a single left click inside the scene.
    ///
    /// Inputs:
    /// - `position`: Click position relative to the scene area
    ///
    /// Details:
    /// - A building hit selects and highlights it, shows its coordinates and the info box
    /// - A miss reports ground coordinates in map view and clears the selection
    /// - Without the `feature_info` feature only the map-view coordinates are reported
    pub fn click(&mut self, position: ScreenPosition) {
        if !self.app.features.feature_info {
            self.report_ground_coords(position);
            return;
        }

        if let Some(previous) = self.app.view.selected_feature {
            self.viewport.highlight(previous, HighlightColor::White);
        }

        match self.viewport.pick(position) {
            Some(picked) if picked.kind == PickKind::Building => {
                self.select_feature(Some(picked.id));
                self.viewport.highlight(picked.id, HighlightColor::Yellow);
                if let Some(surface) = self.viewport.pick_position(position) {
                    self.app.clicked_coords = Some(format_clicked_coords(&surface));
                }
                let info = FeatureInfo::from_properties(&picked.properties);
                tracing::debug!(id = %info.id, "building selected");
                self.app.info = Some(info.clone());
                self.viewport.show_info(Some(info));
            }
            _ => {
                self.report_ground_coords(position);
                self.select_feature(None);
                self.app.info = None;
                self.viewport.show_info(None);
            }
        }
    }

    /// What: Handle a double click inside the scene.
    ///
    /// Output:
    /// - `true` when a flight to a building was started
    ///
    /// Details:
    /// - Keeps the current camera heading, looks down 30° and stops 200 m away
    pub fn double_click(&mut self, position: ScreenPosition) -> bool {
        if !self.app.features.double_click_fly_to {
            return false;
        }
        let Some(picked) = self.viewport.pick(position) else {
            return false;
        };
        if picked.kind != PickKind::Building {
            return false;
        }
        let Some(destination) = self.viewport.pick_position(position) else {
            return false;
        };
        let heading = self.viewport.camera().map_or(0.0, |pose| pose.heading);
        let pitch = FOCUS_PITCH_DEG.to_radians();
        self.viewport.fly_to(CameraDirective {
            destination,
            orientation: Orientation {
                heading,
                pitch,
                roll: 0.0,
            },
            duration: None,
            offset: Some(HeadingPitchRange {
                heading: 0.0,
                pitch,
                range: FOCUS_RANGE_M,
            }),
        });
        true
    }

    /// What: Tell the viewport the size of the scene area recorded by the last render.
    pub fn sync_viewport_size(&mut self) {
        let rect = self.app.viewport_rect;
        self.viewport.resize(rect.width, rect.height);
    }

    const fn shortcuts_enabled(&self) -> bool {
        let features = self.app.features;
        features.keyboard_shortcuts
            && (!features.shortcuts_require_map_view || self.app.view.is_map_view)
    }

    fn report_ground_coords(&mut self, position: ScreenPosition) {
        if !self.app.view.is_map_view {
            return;
        }
        if let Some(ground) = self.viewport.pick_ellipsoid(position) {
            self.app.clicked_coords = Some(format_clicked_coords(&ground));
        }
    }

    fn relabel(&mut self, id: ElementId, key: &str) {
        let language = self.app.view.active_language;
        let AppState {
            store, elements, ..
        } = &mut self.app;
        if let Some(element) = elements.get_mut(id) {
            store.relabel(language, element, key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::SimulatedViewport;

    fn controller() -> ViewController<SimulatedViewport> {
        ViewController::new(AppState::default(), SimulatedViewport::shibuya())
    }

    fn bilingual_table() -> TranslationTable {
        let mut table = TranslationTable::new();
        for (lang, pairs) in [
            (
                "en",
                [
                    (MAP_VIEW_LABEL, "Map View"),
                    (VIEW_3D_LABEL, "3D View"),
                    (STOP_ROTATION_LABEL, "Stop Rotation"),
                    (START_ROTATION_LABEL, "Start Rotation"),
                ],
            ),
            (
                "ja",
                [
                    (MAP_VIEW_LABEL, "マップビュー"),
                    (VIEW_3D_LABEL, "3Dビュー"),
                    (STOP_ROTATION_LABEL, "回転停止"),
                    (START_ROTATION_LABEL, "回転開始"),
                ],
            ),
        ] {
            for (key, text) in pairs {
                table.insert(lang, key, text);
            }
        }
        table
    }

    #[test]
    /// What: A new controller places the camera at home without a flight and enables rendering.
    fn new_sets_home_view_and_rendering() {
        let c = controller();
        assert!(c.viewport().rendering());
        let pose = c.viewport().camera().expect("home pose");
        assert!((pose.position.height - 1500.0).abs() < 1e-9);
        assert!(c.viewport().flights().is_empty());
    }

    #[test]
    /// What: The rotation button text follows the flag in the active language.
    ///
    /// Inputs:
    /// - Table loaded, Japanese active, rotation toggled twice.
    ///
    /// Output:
    /// - Start then stop labels in Japanese.
    fn rotation_toggle_relabels_in_active_language() {
        let mut c = controller();
        c.install_translations(bilingual_table());
        c.set_language("ja");

        assert!(!c.toggle_rotation());
        assert_eq!(c.state().elements.text(ElementId::ROTATION_TOGGLE), "回転開始");
        assert_eq!(
            c.state().elements.key(ElementId::ROTATION_TOGGLE),
            Some(START_ROTATION_LABEL)
        );

        assert!(c.toggle_rotation());
        assert_eq!(c.state().elements.text(ElementId::ROTATION_TOGGLE), "回転停止");
    }

    #[test]
    /// What: Toggling view with no table keeps the text but moves the key.
    fn view_toggle_without_table_keeps_text_but_updates_key() {
        let mut c = controller();
        assert!(c.toggle_view_mode());
        assert_eq!(c.state().elements.text(ElementId::VIEW_MODE_TOGGLE), "3D View");
        assert_eq!(
            c.state().elements.key(ElementId::VIEW_MODE_TOGGLE),
            Some(MAP_VIEW_LABEL)
        );

        c.install_translations(bilingual_table());
        assert_eq!(c.state().elements.text(ElementId::VIEW_MODE_TOGGLE), "Map View");
    }

    #[test]
    /// What: Ticks orbit the camera and refresh telemetry every tenth frame.
    ///
    /// Inputs:
    /// - Eleven ticks with rotation on.
    ///
    /// Output:
    /// - Telemetry set on the first tick, kept for nine more, refreshed on the eleventh.
    fn tick_rotates_and_refreshes_telemetry_every_tenth_frame() {
        let mut c = controller();
        c.tick();
        let first = c.state().telemetry.clone().expect("first tick refreshes");
        assert_eq!(c.state().frame_count, 1);

        for _ in 0..9 {
            c.tick();
        }
        assert_eq!(c.state().telemetry.as_ref(), Some(&first));

        c.tick();
        let eleventh = c.state().telemetry.clone().expect("tick 10 refreshes");
        assert_eq!(first.heading, "0°");
        assert_eq!(eleventh.heading, "1°");
        assert!((c.state().orbit.heading - 11.0 * 0.002).abs() < 1e-9);
    }

    #[test]
    /// What: With rotation off, ticks leave the camera still.
    fn tick_does_not_move_camera_when_stopped() {
        let mut c = controller();
        c.toggle_rotation();
        let before = c.viewport().camera();
        c.tick();
        c.tick();
        assert_eq!(c.viewport().camera(), before);
        assert!(c.state().orbit.heading.abs() < f64::EPSILON);
    }

    #[test]
    /// What: Home, rotation and clear shortcuts only fire in map view.
    ///
    /// Inputs:
    /// - `r` in 3D view; `r`, `h` and `q` in map view.
    ///
    /// Output:
    /// - Ignored in 3D; handled in map view with one home flight; `q` exits.
    fn shortcuts_are_gated_by_map_view() {
        let mut c = controller();
        assert_eq!(
            c.handle_key(KeyCode::Char('r'), KeyModifiers::NONE),
            KeyOutcome::Ignored
        );
        assert!(c.state().view.is_rotating);

        c.toggle_view_mode();
        assert_eq!(
            c.handle_key(KeyCode::Char('r'), KeyModifiers::NONE),
            KeyOutcome::Handled
        );
        assert!(!c.state().view.is_rotating);

        assert_eq!(
            c.handle_key(KeyCode::Char('h'), KeyModifiers::NONE),
            KeyOutcome::Handled
        );
        assert_eq!(c.viewport().flights().len(), 1);
        assert_eq!(c.viewport().flights()[0].duration, Some(HOME_FLIGHT));

        assert_eq!(
            c.handle_key(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyOutcome::Exit
        );
    }

    #[test]
    /// What: Language, view and exit keys work in either view.
    fn ungated_shortcuts_work_in_3d_view() {
        let mut app = AppState::default();
        app.features.shortcuts_require_map_view = false;
        let mut c = ViewController::new(app, SimulatedViewport::shibuya());
        assert_eq!(
            c.handle_key(KeyCode::Char('r'), KeyModifiers::NONE),
            KeyOutcome::Handled
        );

        c.state_mut().features.keyboard_shortcuts = false;
        assert_eq!(
            c.handle_key(KeyCode::Char('r'), KeyModifiers::NONE),
            KeyOutcome::Ignored
        );
        assert_eq!(
            c.handle_key(KeyCode::Char('j'), KeyModifiers::NONE),
            KeyOutcome::Handled
        );
        assert_eq!(c.state().view.active_language, Language::Ja);
    }

    #[test]
    /// What: Clicking a building selects, highlights and fills the info box.
    ///
    /// Inputs:
    /// - Click at a building footprint.
    ///
    /// Output:
    /// - Selected id set, highlight applied, info with the building id.
    fn click_on_building_selects_and_highlights() {
        let mut c = controller();
        let target = c.viewport().buildings()[1].clone();

        c.click(target.origin);
        assert_eq!(c.state().view.selected_feature, Some(target.id));
        assert_eq!(c.viewport().highlight_of(target.id), HighlightColor::Yellow);
        assert_eq!(
            c.state().clicked_coords.as_deref(),
            Some(format_clicked_coords(&target.position).as_str())
        );
        let info = c.state().info.as_ref().expect("info shown");
        assert_eq!(info.id, "bldg_13113-0002");
        assert_eq!(c.viewport().info(), Some(info));

        let other = c.viewport().buildings()[0].clone();
        c.click(other.origin);
        assert_eq!(c.viewport().highlight_of(target.id), HighlightColor::White);
        assert_eq!(c.viewport().highlight_of(other.id), HighlightColor::Yellow);
    }

    #[test]
    /// What: Ground clicks drop the selection; coordinates appear only in map view.
    ///
    /// Inputs:
    /// - Ground clicks in 3D and map view after a selection.
    ///
    /// Output:
    /// - Selection cleared both times; clicked coords only in map view.
    fn click_on_ground_clears_selection_and_reports_only_in_map_view() {
        let mut c = controller();
        let target = c.viewport().buildings()[0].clone();
        c.click(target.origin);
        let coords = c.state().clicked_coords.clone();

        let ground = ScreenPosition::new(0, 0);
        c.click(ground);
        assert_eq!(c.state().view.selected_feature, None);
        assert!(c.state().info.is_none());
        assert!(c.viewport().info().is_none());
        assert_eq!(c.state().clicked_coords, coords);

        c.toggle_view_mode();
        c.click(ground);
        let reported = c.state().clicked_coords.clone().expect("map view reports");
        assert_ne!(Some(reported.clone()), coords);
        assert!(reported.starts_with("Lat: "));
    }

    #[test]
    /// What: With feature info off, clicks only report coordinates.
    fn click_without_feature_info_only_reports_coords() {
        let mut app = AppState::default();
        app.features.feature_info = false;
        let mut c = ViewController::new(app, SimulatedViewport::shibuya());
        let target = c.viewport().buildings()[0].clone();
        c.click(target.origin);
        assert_eq!(c.state().view.selected_feature, None);
        assert_eq!(c.viewport().highlight_of(target.id), HighlightColor::White);
        assert!(c.state().clicked_coords.is_none());
    }

    #[test]
    /// What: Double click flies the camera to the building under the pointer.
    fn double_click_flies_to_building() {
        let mut c = controller();
        let target = c.viewport().buildings()[2].clone();
        assert!(!c.double_click(ScreenPosition::new(0, 0)));
        assert!(c.double_click(target.origin));

        let flight = c.viewport().flights().last().copied().expect("flight");
        assert_eq!(flight.destination, target.position);
        let offset = flight.offset.expect("offset");
        assert!((offset.range - 200.0).abs() < f64::EPSILON);
        assert!((flight.orientation.pitch - (-30.0_f64).to_radians()).abs() < 1e-12);
    }

    #[test]
    /// What: Clearing the selection resets the highlight and hides the info box.
    fn clear_selection_resets_style_and_info() {
        let mut c = controller();
        let target = c.viewport().buildings()[0].clone();
        c.click(target.origin);
        c.clear_selection();
        assert_eq!(c.state().view.selected_feature, None);
        assert!(c.state().info.is_none());
        assert_eq!(c.viewport().highlight_of(target.id), HighlightColor::White);
    }

    #[test]
    /// What: Each button id runs its operation.
    ///
    /// Inputs:
    /// - Presses on the Japanese, view and rotation buttons, then on the title.
    ///
    /// Output:
    /// - Each button runs its operation; the title is not a button.
    fn press_button_routes_to_operations() {
        let mut c = controller();
        c.install_translations(bilingual_table());
        assert!(c.press_button(ElementId::LANG_JA));
        assert_eq!(c.state().view.active_language, Language::Ja);
        assert!(c.press_button(ElementId::VIEW_MODE_TOGGLE));
        assert_eq!(c.state().elements.text(ElementId::VIEW_MODE_TOGGLE), "マップビュー");
        assert!(c.press_button(ElementId::ROTATION_TOGGLE));
        assert!(!c.state().view.is_rotating);
        assert!(!c.press_button(ElementId::TITLE));
    }
}
