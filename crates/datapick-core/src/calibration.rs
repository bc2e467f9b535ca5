//! Calibration types assembled by the picker UI from user clicks.

use serde::{Deserialize, Serialize};

use crate::math::{Pt2, Real, Vec3};

/// Axis mapping of the calibrated plot.
///
/// Determines how logical reference coordinates are linearized before the
/// affine solve, and how a solved coordinate is folded back into its native
/// representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisType {
    Linear,
    LogarithmicX,
    LogarithmicY,
    PolarDegrees,
    PolarRadians,
    Ternary,
}

/// A calibration anchor: a pixel position on the plot image paired with the
/// data coordinate it represents.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ReferencePoint {
    /// Position on the image, in scene (pixel) coordinates.
    pub scene: Pt2,
    /// Data coordinate. `z` carries the third barycentric component on
    /// ternary axes and is ignored otherwise.
    pub logical: Vec3,
}

impl ReferencePoint {
    pub fn new(scene: Pt2, logical: Vec3) -> Self {
        Self { scene, logical }
    }
}

/// Three reference points plus the axis mapping they calibrate.
///
/// Built once per image-calibration action and borrowed read-only by every
/// mapping call for the lifetime of the picker session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Calibration {
    pub points: [ReferencePoint; 3],
    pub axis: AxisType,
    /// Total of the three barycentric components on ternary axes.
    #[serde(default = "default_ternary_scale")]
    pub ternary_scale: Real,
}

fn default_ternary_scale() -> Real {
    1.0
}

impl Calibration {
    pub fn new(points: [ReferencePoint; 3], axis: AxisType) -> Self {
        Self {
            points,
            axis,
            ternary_scale: default_ternary_scale(),
        }
    }

    pub fn with_ternary_scale(points: [ReferencePoint; 3], ternary_scale: Real) -> Self {
        Self {
            points,
            axis: AxisType::Ternary,
            ternary_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ternary_scale_defaults_to_one_in_json() {
        let json = r#"{
            "points": [
                { "scene": [0.0, 0.0], "logical": [0.0, 0.0, 0.0] },
                { "scene": [10.0, 0.0], "logical": [1.0, 0.0, 0.0] },
                { "scene": [0.0, 10.0], "logical": [0.0, 1.0, 0.0] }
            ],
            "axis": "Linear"
        }"#;
        let cal: Calibration = serde_json::from_str(json).unwrap();
        assert_eq!(cal.axis, AxisType::Linear);
        assert_eq!(cal.ternary_scale, 1.0);
        assert_eq!(cal.points[1].scene, Pt2::new(10.0, 0.0));
        assert_eq!(cal.points[2].logical, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn calibration_round_trips_through_json() {
        let cal = Calibration::with_ternary_scale(
            [
                ReferencePoint::new(Pt2::new(0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
                ReferencePoint::new(Pt2::new(1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
                ReferencePoint::new(Pt2::new(0.5, 0.8), Vec3::new(0.0, 0.0, 1.0)),
            ],
            100.0,
        );
        let json = serde_json::to_string(&cal).unwrap();
        let back: Calibration = serde_json::from_str(&json).unwrap();
        assert_eq!(back.axis, AxisType::Ternary);
        assert_eq!(back.ternary_scale, 100.0);
        assert_eq!(back.points[2].scene, cal.points[2].scene);
    }
}
