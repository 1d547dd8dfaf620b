//! Building attribute probing for picked features.

use super::{FeatureProperties, PropertyValue};

/// Candidate keys for the building identifier, in priority order.
pub const BUILDING_ID_KEYS: &[&str] = &["gml:id", "fid"];
/// Candidate keys for the measured building height, in priority order.
pub const BUILDING_HEIGHT_KEYS: &[&str] = &["bldg:measuredHeight", "height"];
/// Candidate keys for the building usage code, in priority order.
pub const BUILDING_USAGE_KEYS: &[&str] = &["bldg:usage", "usage"];
/// Candidate keys for the building class, in priority order.
pub const BUILDING_CLASS_KEYS: &[&str] = &["bldg:class", "class"];
/// How many raw attributes the info box lists.
pub const MAX_EXTRA_PROPERTIES: usize = 5;

const UNKNOWN: &str = "Unknown";

/// What: Read the first present value among candidate keys.
///
/// Inputs:
/// - `properties`: Feature attribute access
/// - `candidates`: Keys to try, highest priority first
///
/// Output:
/// - `Some(PropertyValue)` for the first key whose value is present
///
/// Details:
/// - Empty strings, zero and `false` do not count as present
pub fn probe<P: FeatureProperties + ?Sized>(
    properties: &P,
    candidates: &[&str],
) -> Option<PropertyValue> {
    candidates
        .iter()
        .filter_map(|key| properties.get_property(key))
        .find(PropertyValue::is_present)
}

/// Summary of a picked building shown in the info box.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureInfo {
    /// Building identifier, or "Unknown".
    pub id: String,
    /// Height text; numeric heights carry an "m" suffix.
    pub height: String,
    /// Usage code, or "Unknown".
    pub usage: String,
    /// Class, or "Unknown".
    pub class: String,
    /// Up to [`MAX_EXTRA_PROPERTIES`] raw `(name, value)` attributes.
    pub extras: Vec<(String, String)>,
}

impl FeatureInfo {
    /// What: Build the info summary from feature attributes.
    ///
    /// Inputs:
    /// - `properties`: Feature attribute access
    ///
    /// Output:
    /// - `FeatureInfo` with "Unknown" in place of missing fields
    ///
    /// Details:
    /// - Extras look at the first five attribute names only, then drop empty values
    pub fn from_properties<P: FeatureProperties + ?Sized>(properties: &P) -> Self {
        let text_or_unknown = |candidates: &[&str]| {
            probe(properties, candidates).map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
        };

        let height = match probe(properties, BUILDING_HEIGHT_KEYS) {
            Some(PropertyValue::Number(n)) => format!("{n}m"),
            Some(other) => other.to_string(),
            None => UNKNOWN.to_string(),
        };

        let extras = properties
            .property_ids()
            .into_iter()
            .take(MAX_EXTRA_PROPERTIES)
            .filter_map(|name| {
                let value = properties.get_property(&name)?;
                let text = value.to_string();
                (!text.is_empty()).then_some((name, text))
            })
            .collect();

        Self {
            id: text_or_unknown(BUILDING_ID_KEYS),
            height,
            usage: text_or_unknown(BUILDING_USAGE_KEYS),
            class: text_or_unknown(BUILDING_CLASS_KEYS),
            extras,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::PropertyBag;

    #[test]
    /// What: Probing returns the first candidate key that is present.
    ///
    /// Inputs:
    /// - Bag holding two candidate keys.
    ///
    /// Output:
    /// - Value of the earlier one.
    fn probe_prefers_earlier_candidates() {
        let bag = PropertyBag::new()
            .with_text("fid", "fallback")
            .with_text("gml:id", "bldg_1234");
        assert_eq!(
            probe(&bag, BUILDING_ID_KEYS),
            Some(PropertyValue::Text("bldg_1234".to_string()))
        );
    }

    #[test]
    /// What: Blank values do not count as present.
    fn probe_skips_blank_values() {
        let bag = PropertyBag::new()
            .with_text("gml:id", "")
            .with_text("fid", "42");
        assert_eq!(
            probe(&bag, BUILDING_ID_KEYS),
            Some(PropertyValue::Text("42".to_string()))
        );
        assert_eq!(probe(&bag, BUILDING_CLASS_KEYS), None);
    }

    #[test]
    /// What: Missing fields show Unknown and numeric heights get an `m` suffix.
    ///
    /// Inputs:
    /// - Bag with id, numeric height and usage; a bag with a text height.
    ///
    /// Output:
    /// - `48.5m` and an `Unknown` class; text heights pass through.
    fn info_uses_unknown_and_height_suffix() {
        let bag = PropertyBag::new()
            .with_text("gml:id", "bldg_1")
            .with_number("bldg:measuredHeight", 48.5)
            .with_text("usage", "401");
        let info = FeatureInfo::from_properties(&bag);
        assert_eq!(info.id, "bldg_1");
        assert_eq!(info.height, "48.5m");
        assert_eq!(info.usage, "401");
        assert_eq!(info.class, "Unknown");

        let text_height = PropertyBag::new().with_text("height", "tall");
        assert_eq!(FeatureInfo::from_properties(&text_height).height, "tall");
    }

    #[test]
    /// What: Extra properties take the first five keys before filtering.
    fn extras_take_first_five_then_filter() {
        let bag = PropertyBag::new()
            .with_text("p1", "a")
            .with_text("p2", "")
            .with_text("p3", "c")
            .with_text("p4", "d")
            .with_text("p5", "e")
            .with_text("p6", "f");
        let info = FeatureInfo::from_properties(&bag);
        let names: Vec<&str> = info.extras.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["p1", "p3", "p4", "p5"]);
    }
}
