//! Labelled UI elements and the registry the localization store walks.

use crate::i18n::translations::default_label;

/// Stable identifier of a UI element (the equivalent of a DOM id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub &'static str);

impl ElementId {
    /// Page title.
    pub const TITLE: Self = Self("title");
    /// English language button.
    pub const LANG_EN: Self = Self("lang-en");
    /// Japanese language button.
    pub const LANG_JA: Self = Self("lang-ja");
    /// 3D/map view toggle button.
    pub const VIEW_MODE_TOGGLE: Self = Self("view-mode-toggle");
    /// Rotation start/stop button.
    pub const ROTATION_TOGGLE: Self = Self("rotation-toggle");
    /// Title of the telemetry panel.
    pub const STATUS_TITLE: Self = Self("status-title");
    /// Latitude label in the telemetry panel.
    pub const STATUS_LAT_LABEL: Self = Self("status-lat-label");
    /// Longitude label in the telemetry panel.
    pub const STATUS_LON_LABEL: Self = Self("status-lon-label");
    /// Altitude label in the telemetry panel.
    pub const STATUS_ALT_LABEL: Self = Self("status-alt-label");
    /// Heading label in the telemetry panel.
    pub const STATUS_HDG_LABEL: Self = Self("status-hdg-label");
    /// Pitch label in the telemetry panel.
    pub const STATUS_PITCH_LABEL: Self = Self("status-pitch-label");
    /// Title of the clicked-coordinates panel.
    pub const CLICKED_COORDS_TITLE: Self = Self("clicked-coords-title");

    /// Buttons the mouse handler can activate, in the order they are drawn.
    pub const BUTTONS: [Self; 4] = [
        Self::LANG_EN,
        Self::LANG_JA,
        Self::VIEW_MODE_TOGGLE,
        Self::ROTATION_TOGGLE,
    ];
}

/// Label key assigned to the view-mode button while the map view is active.
pub const MAP_VIEW_LABEL: &str = "map-view-label";
/// Label key assigned to the view-mode button while the 3D view is active.
pub const VIEW_3D_LABEL: &str = "3d-view-label";
/// Label key assigned to the rotation button while the camera rotates.
pub const STOP_ROTATION_LABEL: &str = "stop-rotation-label";
/// Label key assigned to the rotation button while the camera is still.
pub const START_ROTATION_LABEL: &str = "start-rotation-label";

/// Element tags in markup order: (element, initial label key).
const MARKUP: &[(ElementId, &str)] = &[
    (ElementId::TITLE, "title"),
    (ElementId::LANG_EN, "lang-en-label"),
    (ElementId::LANG_JA, "lang-ja-label"),
    (ElementId::VIEW_MODE_TOGGLE, VIEW_3D_LABEL),
    (ElementId::ROTATION_TOGGLE, STOP_ROTATION_LABEL),
    (ElementId::STATUS_TITLE, "status-title"),
    (ElementId::STATUS_LAT_LABEL, "status-lat-label"),
    (ElementId::STATUS_LON_LABEL, "status-lon-label"),
    (ElementId::STATUS_ALT_LABEL, "status-alt-label"),
    (ElementId::STATUS_HDG_LABEL, "status-hdg-label"),
    (ElementId::STATUS_PITCH_LABEL, "status-pitch-label"),
    (ElementId::CLICKED_COORDS_TITLE, "clicked-coords-title"),
];

/// A UI element with visible text and an optional label key binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiElement {
    /// Element identifier.
    pub id: ElementId,
    /// Current label key; `None` means the element is not localized.
    pub key: Option<String>,
    /// Currently displayed text.
    pub text: String,
}

impl UiElement {
    /// What: Create a localized element with its initial text.
    #[must_use]
    pub fn labelled(id: ElementId, key: &str, text: &str) -> Self {
        Self {
            id,
            key: Some(key.to_string()),
            text: text.to_string(),
        }
    }
}

/// Ordered collection of UI elements (the "document").
#[derive(Clone, Debug, Default)]
pub struct ElementRegistry {
    elements: Vec<UiElement>,
}

impl ElementRegistry {
    /// What: Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Create the registry for the built-in screen with English markup text.
    ///
    /// Output:
    /// - Registry holding every element of the control bar and panels
    ///
    /// Details:
    /// - Initial keys match the default `ViewState` (3D view, rotating)
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for &(id, key) in MARKUP {
            let text = default_label(key).unwrap_or(key);
            registry.register(UiElement::labelled(id, key, text));
        }
        registry
    }

    /// What: Register an element, replacing any element with the same id.
    pub fn register(&mut self, element: UiElement) {
        if let Some(existing) = self.get_mut(element.id) {
            *existing = element;
        } else {
            self.elements.push(element);
        }
    }

    /// What: Find an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&UiElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// What: Find an element by id for mutation.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut UiElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// What: Return the visible text of an element, or an empty string when it is not registered.
    #[must_use]
    pub fn text(&self, id: ElementId) -> &str {
        self.get(id).map_or("", |e| e.text.as_str())
    }

    /// What: Return the label key currently bound to an element.
    #[must_use]
    pub fn key(&self, id: ElementId) -> Option<&str> {
        self.get(id).and_then(|e| e.key.as_deref())
    }

    /// What: Iterate all elements in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &UiElement> {
        self.elements.iter()
    }

    /// What: Iterate all elements mutably in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut UiElement> {
        self.elements.iter_mut()
    }

    /// What: Count registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// What: Check whether no element is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: The default registry holds every markup element with its initial key.
    fn defaults_use_markup_text_and_initial_keys() {
        let registry = ElementRegistry::with_defaults();
        assert_eq!(registry.len(), MARKUP.len());
        assert_eq!(registry.text(ElementId::ROTATION_TOGGLE), "Stop Rotation");
        assert_eq!(registry.key(ElementId::VIEW_MODE_TOGGLE), Some(VIEW_3D_LABEL));
        assert_eq!(registry.text(ElementId::LANG_JA), "日本語");
        assert_eq!(registry.text(ElementId("nope")), "");
    }

    #[test]
    /// What: Registering an existing id replaces the element.
    fn register_replaces_same_id() {
        let mut registry = ElementRegistry::new();
        registry.register(UiElement::labelled(ElementId("a"), "k1", "one"));
        registry.register(UiElement::labelled(ElementId("a"), "k2", "two"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.key(ElementId("a")), Some("k2"));
        assert_eq!(registry.text(ElementId("a")), "two");
    }
}
