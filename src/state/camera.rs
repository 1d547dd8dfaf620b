//! Orbit camera parameters and the telemetry readout derived from camera poses.

use std::time::Duration;

use crate::state::types::{CameraDirective, CameraPose, GeoPosition, HeadingPitchRange, Orientation};

/// Shibuya Station, the rotation center and home target.
pub const SHIBUYA_CENTER: GeoPosition = GeoPosition::from_degrees(139.701, 35.658, 0.0);
/// Camera height of the home view, in metres.
pub const HOME_HEIGHT_M: f64 = 1500.0;
/// Distance kept from the rotation center while orbiting, in metres.
pub const ORBIT_RANGE_M: f64 = 1500.0;
/// Pitch of the home view and the orbit, in degrees.
pub const ORBIT_PITCH_DEG: f64 = -30.0;
/// Heading advance per viewport tick, in radians.
pub const HEADING_STEP_RAD: f64 = 0.002;
/// Telemetry refreshes on every n-th tick.
pub const TELEMETRY_EVERY_TICKS: u64 = 10;
/// Duration of the home flight.
pub const HOME_FLIGHT: Duration = Duration::from_secs(2);
/// Pitch used when flying to a double-clicked building, in degrees.
pub const FOCUS_PITCH_DEG: f64 = -30.0;
/// Distance kept from a double-clicked building, in metres.
pub const FOCUS_RANGE_M: f64 = 200.0;

/// Per-tick orbit around a fixed center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera circles.
    pub center: GeoPosition,
    /// Current heading in radians; grows without bound while rotating.
    pub heading: f64,
    /// Fixed pitch in radians.
    pub pitch: f64,
    /// Fixed distance from the center in metres.
    pub range: f64,
    /// Heading advance per tick in radians.
    pub step: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            center: SHIBUYA_CENTER,
            heading: 0.0,
            pitch: ORBIT_PITCH_DEG.to_radians(),
            range: ORBIT_RANGE_M,
            step: HEADING_STEP_RAD,
        }
    }
}

impl OrbitCamera {
    /// What: Advance the heading by one step and return the resulting offset.
    pub fn advance(&mut self) -> HeadingPitchRange {
        self.heading += self.step;
        self.offset()
    }

    /// What: Current offset from the center.
    #[must_use]
    pub const fn offset(&self) -> HeadingPitchRange {
        HeadingPitchRange {
            heading: self.heading,
            pitch: self.pitch,
            range: self.range,
        }
    }

    /// What: Directive placing the camera above the center, heading north.
    ///
    /// Inputs:
    /// - `duration`: `None` for an immediate set, `Some` for a flight
    #[must_use]
    pub const fn home_directive(&self, duration: Option<Duration>) -> CameraDirective {
        CameraDirective {
            destination: GeoPosition {
                height: HOME_HEIGHT_M,
                ..self.center
            },
            orientation: Orientation {
                heading: 0.0,
                pitch: self.pitch,
                roll: 0.0,
            },
            duration,
            offset: None,
        }
    }
}

/// Formatted camera readout shown in the status panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Telemetry {
    /// Latitude, 4 decimals.
    pub latitude: String,
    /// Longitude, 4 decimals.
    pub longitude: String,
    /// Altitude, whole metres with " m".
    pub altitude: String,
    /// Heading, whole degrees with "°".
    pub heading: String,
    /// Pitch, whole degrees with "°".
    pub pitch: String,
}

impl Telemetry {
    /// What: Format a camera pose for display.
    #[must_use]
    pub fn from_pose(pose: &CameraPose) -> Self {
        Self {
            latitude: format!("{:.4}", pose.position.latitude),
            longitude: format!("{:.4}", pose.position.longitude),
            altitude: format!("{:.0} m", pose.position.height),
            heading: format!("{:.0}°", pose.heading.to_degrees()),
            pitch: format!("{:.0}°", pose.pitch.to_degrees()),
        }
    }
}

/// What: Format a picked position for the clicked-coordinates panel.
///
/// Output:
/// - `"Lat: <lat>, Lon: <lon>"` with 5 decimals each
#[must_use]
pub fn format_clicked_coords(position: &GeoPosition) -> String {
    format!(
        "Lat: {:.5}, Lon: {:.5}",
        position.latitude, position.longitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Each orbit step adds the configured heading increment.
    fn orbit_advances_by_step() {
        let mut orbit = OrbitCamera::default();
        let first = orbit.advance();
        let second = orbit.advance();
        assert!((first.heading - 0.002).abs() < 1e-12);
        assert!((second.heading - 0.004).abs() < 1e-12);
        assert!((second.range - 1500.0).abs() < f64::EPSILON);
        assert!((second.pitch - (-30.0_f64).to_radians()).abs() < 1e-12);
    }

    #[test]
    /// What: The home view faces north at the home altitude.
    fn home_directive_points_north_at_home_height() {
        let orbit = OrbitCamera::default();
        let directive = orbit.home_directive(Some(HOME_FLIGHT));
        assert!((directive.destination.height - HOME_HEIGHT_M).abs() < f64::EPSILON);
        assert!((directive.destination.longitude - 139.701).abs() < f64::EPSILON);
        assert!(directive.orientation.heading.abs() < f64::EPSILON);
        assert_eq!(directive.duration, Some(Duration::from_secs(2)));
    }

    #[test]
    /// What: Telemetry rows format position and angles.
    ///
    /// Inputs:
    /// - A camera pose.
    ///
    /// Output:
    /// - Lat/lon with four decimals, rounded metres, whole degrees.
    fn telemetry_formatting() {
        let pose = CameraPose {
            position: GeoPosition::from_degrees(139.701_23, 35.658_46, 1234.6),
            heading: 90.4_f64.to_radians(),
            pitch: (-30.0_f64).to_radians(),
        };
        let t = Telemetry::from_pose(&pose);
        assert_eq!(t.latitude, "35.6585");
        assert_eq!(t.longitude, "139.7012");
        assert_eq!(t.altitude, "1235 m");
        assert_eq!(t.heading, "90°");
        assert_eq!(t.pitch, "-30°");
    }

    #[test]
    fn clicked_coords_use_five_decimals() {
        let p = GeoPosition::from_degrees(139.700_123_4, 35.659_876_5, 10.0);
        assert_eq!(format_clicked_coords(&p), "Lat: 35.65988, Lon: 139.70012");
    }
}
