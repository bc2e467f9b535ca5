//! Scene-to-logical coordinate mapping for picked plot points.
//!
//! Three calibration reference points fix an affine (rotation plus
//! anisotropic scale) map between image pixels and a linearized logical
//! plane. Non-linear axes (log, polar, ternary) are linearized before the
//! solve and folded back afterwards.

use log::debug;
use thiserror::Error;

use crate::calibration::{AxisType, Calibration};
use crate::math::{Pt2, Real, Vec2, Vec3};

/// Which anisotropic scale factor a degenerate calibration left unconstrained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleAxis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("reference point {index} has non-positive value {value} on a logarithmic axis")]
    NonPositiveLogCoordinate { index: usize, value: Real },
    #[error("reference point {index} has negative radius {value}")]
    NegativeRadius { index: usize, value: Real },
    #[error("ternary scale must be positive, got {0}")]
    NonPositiveTernaryScale(Real),
    #[error("reference points leave the {axis:?} scale unconstrained")]
    DegenerateCalibration { axis: ScaleAxis },
}

/// The three reference points with logical coordinates linearized into a
/// common Cartesian plane, ready for the affine solve.
#[derive(Clone, Copy, Debug)]
pub struct LinearizedFrame {
    /// Scene (pixel) positions of the reference points.
    pub scene: [Pt2; 3],
    /// Linearized logical positions, aligned with `scene`.
    pub logical: [Pt2; 3],
}

/// Linearize a calibration's logical coordinates under its axis mapping.
///
/// Domain preconditions are checked eagerly: log axes require positive
/// coordinates, polar axes a non-negative radius, ternary a positive scale.
pub fn linearize(cal: &Calibration) -> Result<LinearizedFrame, TransformError> {
    let scene = [cal.points[0].scene, cal.points[1].scene, cal.points[2].scene];
    let mut logical = [Pt2::origin(); 3];
    for (index, point) in cal.points.iter().enumerate() {
        logical[index] = linearize_logical(index, &point.logical, cal)?;
    }
    Ok(LinearizedFrame { scene, logical })
}

fn linearize_logical(index: usize, logical: &Vec3, cal: &Calibration) -> Result<Pt2, TransformError> {
    match cal.axis {
        AxisType::Linear => Ok(Pt2::new(logical.x, logical.y)),
        AxisType::LogarithmicX => {
            if logical.x <= 0.0 {
                return Err(TransformError::NonPositiveLogCoordinate {
                    index,
                    value: logical.x,
                });
            }
            Ok(Pt2::new(logical.x.ln(), logical.y))
        }
        AxisType::LogarithmicY => {
            if logical.y <= 0.0 {
                return Err(TransformError::NonPositiveLogCoordinate {
                    index,
                    value: logical.y,
                });
            }
            Ok(Pt2::new(logical.x, logical.y.ln()))
        }
        AxisType::PolarDegrees | AxisType::PolarRadians => {
            let radius = logical.x;
            if radius < 0.0 {
                return Err(TransformError::NegativeRadius {
                    index,
                    value: radius,
                });
            }
            let theta = if cal.axis == AxisType::PolarDegrees {
                logical.y.to_radians()
            } else {
                logical.y
            };
            Ok(Pt2::new(radius * theta.cos(), radius * theta.sin()))
        }
        AxisType::Ternary => {
            let scale = cal.ternary_scale;
            if scale <= 0.0 {
                return Err(TransformError::NonPositiveTernaryScale(scale));
            }
            Ok(Pt2::new(
                (2.0 * logical.y + logical.z) / (2.0 * scale),
                (3.0_f64.sqrt() * logical.z) / (2.0 * scale),
            ))
        }
    }
}

/// The solved pixel-to-linearized-logical affine map for one calibration.
#[derive(Clone, Copy, Debug)]
pub struct AffineMap {
    origin_scene: Pt2,
    origin_logical: Pt2,
    sin: Real,
    cos: Real,
    scale_x: Real,
    scale_y: Real,
}

impl AffineMap {
    /// Solve for the map fixed by a calibration's three reference points.
    pub fn solve(cal: &Calibration) -> Result<Self, TransformError> {
        Self::from_frame(&linearize(cal)?)
    }

    /// Solve from an already linearized frame.
    pub fn from_frame(frame: &LinearizedFrame) -> Result<Self, TransformError> {
        let (sin, cos) = rotation(frame);
        let scale_x = scale_factor(frame, sin, cos, ScaleAxis::X)?;
        let scale_y = scale_factor(frame, sin, cos, ScaleAxis::Y)?;
        Ok(Self {
            origin_scene: frame.scene[0],
            origin_logical: frame.logical[0],
            sin,
            cos,
            scale_x,
            scale_y,
        })
    }

    /// Rotate and scale a scene point into the linearized logical plane.
    pub fn apply(&self, scene: Pt2) -> Pt2 {
        let dx = scene.x - self.origin_scene.x;
        let dy = scene.y - self.origin_scene.y;
        Pt2::new(
            self.origin_logical.x + (dx * self.cos - dy * self.sin) * self.scale_x,
            self.origin_logical.y + (dx * self.sin + dy * self.cos) * self.scale_y,
        )
    }
}

/// Rotation implied by the calibration geometry, as `(sin, cos)`.
///
/// A vanishing denominator means the logical x axis carries no component
/// along the scene y direction that the solve could measure; the map is then
/// taken to be a quarter turn.
fn rotation(frame: &LinearizedFrame) -> (Real, Real) {
    let s = &frame.scene;
    let l = &frame.logical;
    let den = (s[1].y - s[0].y) * (l[2].x - l[0].x) - (s[2].y - s[0].y) * (l[1].x - l[0].x);
    if den != 0.0 {
        let tan = ((s[1].x - s[0].x) * (l[2].x - l[0].x) - (s[2].x - s[0].x) * (l[1].x - l[0].x))
            / den;
        let sin = tan / (1.0 + tan * tan).sqrt();
        let cos = (1.0 - sin * sin).sqrt();
        (sin, cos)
    } else {
        debug!("rotation denominator vanished, assuming a quarter-turn calibration");
        (1.0, 0.0)
    }
}

/// One anisotropic scale factor, from whichever reference pair (0-1
/// preferred, else 0-2) has a non-zero logical delta along `axis`.
///
/// Both deltas vanishing, or the rotated scene-space denominator of the
/// chosen pair vanishing, means the points cannot fix that scale; this is
/// reported instead of letting a non-finite factor flow downstream.
fn scale_factor(
    frame: &LinearizedFrame,
    sin: Real,
    cos: Real,
    axis: ScaleAxis,
) -> Result<Real, TransformError> {
    let s = &frame.scene;
    let l = &frame.logical;
    let logical_delta = |i: usize| match axis {
        ScaleAxis::X => l[i].x - l[0].x,
        ScaleAxis::Y => l[i].y - l[0].y,
    };
    let scene_delta = |i: usize| match axis {
        ScaleAxis::X => (s[i].x - s[0].x) * cos - (s[i].y - s[0].y) * sin,
        ScaleAxis::Y => (s[i].x - s[0].x) * sin + (s[i].y - s[0].y) * cos,
    };

    let pair = if logical_delta(1) != 0.0 { 1 } else { 2 };
    let num = logical_delta(pair);
    let den = scene_delta(pair);
    if num == 0.0 || den == 0.0 {
        return Err(TransformError::DegenerateCalibration { axis });
    }
    Ok(num / den)
}

/// Map a picked scene (pixel) point into logical data coordinates.
///
/// The third component of the result is zero except on ternary axes, where
/// it carries the derived third barycentric coordinate.
pub fn scene_to_logical(scene: Pt2, cal: &Calibration) -> Result<Vec3, TransformError> {
    let map = AffineMap::solve(cal)?;
    Ok(cartesian_to_axis_type(map.apply(scene), cal))
}

/// Map a batch of picked scene points through one calibration.
///
/// The affine map is solved once and reused; any calibration error is
/// reported before a single point is mapped.
pub fn scene_points_to_logical(
    points: &[Pt2],
    cal: &Calibration,
) -> Result<Vec<Vec3>, TransformError> {
    let map = AffineMap::solve(cal)?;
    Ok(points
        .iter()
        .map(|p| cartesian_to_axis_type(map.apply(*p), cal))
        .collect())
}

/// Map a scene-space span (an error-bar extent) into a logical-space span.
///
/// Computed as the difference of two absolute mappings, so the result is
/// exact on linear axes and a locally-linear approximation on the others.
pub fn scene_length_to_logical(span: Vec2, cal: &Calibration) -> Result<Vec3, TransformError> {
    let tip = scene_to_logical(Pt2::new(span.x, span.y), cal)?;
    let base = scene_to_logical(Pt2::origin(), cal)?;
    Ok(tip - base)
}

/// Fold a point in the linearized plane back into the axis mapping's native
/// representation.
///
/// The polar branches use a single-quadrant `atan`, the degree variant
/// even applying the degree factor inside the arctangent; angles are only
/// meaningful for points that land at `x > 0`. Digitized chart axes live
/// in that range in practice, and saved calibrations depend on the exact
/// values, so this is documented rather than replaced with `atan2`.
pub fn cartesian_to_axis_type(point: Pt2, cal: &Calibration) -> Vec3 {
    match cal.axis {
        AxisType::Linear => Vec3::new(point.x, point.y, 0.0),
        AxisType::LogarithmicX => Vec3::new(point.x.exp(), point.y, 0.0),
        AxisType::LogarithmicY => Vec3::new(point.x, point.y.exp(), 0.0),
        AxisType::PolarDegrees => {
            let radius = point.coords.norm();
            let angle = (point.y * 180.0 / (point.x * std::f64::consts::PI)).atan();
            Vec3::new(radius, angle, 0.0)
        }
        AxisType::PolarRadians => {
            let radius = point.coords.norm();
            Vec3::new(radius, (point.y / point.x).atan(), 0.0)
        }
        AxisType::Ternary => {
            let c = point.y * 2.0 * cal.ternary_scale / 3.0_f64.sqrt();
            let b = (point.x * 2.0 * cal.ternary_scale - c) / 2.0;
            let a = cal.ternary_scale - b - c;
            Vec3::new(a, b, c)
        }
    }
}
