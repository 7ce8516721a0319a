//! Scene-space to screen-space projection
//!
//! The fixed transform at the heart of the 3D view: rotate about the X
//! axis, rotate about the Y axis, then apply perspective foreshortening
//! with a fixed camera distance. Pure and deterministic; the camera never
//! moves, only the scene rotates under it.

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Distance from the camera to the projection plane, in scene units.
pub const CAMERA_DISTANCE: f32 = 400.0;

/// Depths closer to the camera plane than this are saturated so the
/// perspective divide stays finite.
const MIN_DEPTH: f32 = 1e-3;

/// Camera orientation as rotations about the X and Y axes, in radians.
///
/// Both components are unbounded; the trigonometric functions wrap them
/// naturally, so no explicit modulo is applied anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewRotation {
    pub x: f32,
    pub y: f32,
}

impl ViewRotation {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Project a scene-space point onto the screen plane.
///
/// The output is an offset from the screen center; callers anchor it at
/// whatever center they are drawing around. Total over all finite inputs:
/// a point landing on the camera plane gets a saturated finite scale
/// instead of a division by zero.
///
/// # Example
/// ```rust
/// use nalgebra::Point3;
/// use spinplot_core::{project, ViewRotation};
///
/// let projected = project(&Point3::new(10.0, 20.0, 0.0), &ViewRotation::default());
/// assert_eq!((projected.x, projected.y), (10.0, 20.0));
/// ```
pub fn project(point: &Point3<f32>, rotation: &ViewRotation) -> Point2<f32> {
    let (sin_rx, cos_rx) = rotation.x.sin_cos();
    let (sin_ry, cos_ry) = rotation.y.sin_cos();

    // Rotate around the X axis.
    let rotated_y = point.y * cos_rx - point.z * sin_rx;
    let rotated_z = point.y * sin_rx + point.z * cos_rx;

    // Rotate around the Y axis.
    let final_x = point.x * cos_ry + rotated_z * sin_ry;
    let final_z = -point.x * sin_ry + rotated_z * cos_ry;

    let depth = CAMERA_DISTANCE + final_z;
    let scale = if depth.abs() < MIN_DEPTH {
        CAMERA_DISTANCE / MIN_DEPTH.copysign(depth)
    } else {
        CAMERA_DISTANCE / depth
    };

    Point2::new(final_x * scale, rotated_y * scale)
}
