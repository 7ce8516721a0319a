//! Camera state and pointer interaction
//!
//! The controller owns rotation, zoom, and autorotation state and is the
//! only mutation path for them. Pointer gestures apply incremental deltas
//! against the last recorded pointer position; zoom moves in discrete
//! clamped steps. All commands are synchronous and applied between ticks,
//! so no tick ever observes a half-updated rotation pair.

use serde::{Deserialize, Serialize};
use spinplot_core::ViewRotation;

/// Radians of rotation per pixel of pointer drag.
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Radians added to the Y rotation each tick while autorotating.
pub const AUTOROTATE_STEP: f32 = 0.01;

/// Multiplier applied per zoom-in step (and divided out per zoom-out).
pub const ZOOM_STEP: f32 = 1.2;

/// Lower bound of the zoom range.
pub const ZOOM_MIN: f32 = 0.5;

/// Upper bound of the zoom range.
pub const ZOOM_MAX: f32 = 3.0;

/// Camera state read by the scene builder and renderer once per tick.
///
/// `zoom` is clamped to `[ZOOM_MIN, ZOOM_MAX]` at all times; the rotation
/// components are unbounded reals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub zoom: f32,
    pub autorotate: bool,
}

impl Camera {
    /// The rotation pair in the form the projection expects.
    pub fn rotation(&self) -> ViewRotation {
        ViewRotation::new(self.rotation_x, self.rotation_y)
    }
}

impl Default for Camera {
    /// The mount-time view: tilted slightly toward the viewer, unit zoom,
    /// autorotating.
    fn default() -> Self {
        Self {
            rotation_x: 0.5,
            rotation_y: 0.0,
            zoom: 1.0,
            autorotate: true,
        }
    }
}

/// Read-only camera readout for the surrounding UI, refreshed once per
/// tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTelemetry {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub zoom: f32,
}

/// Live pointer-drag state. At most one session exists at a time; it is
/// created on pointer-down, re-anchored on every pointer-move, and
/// discarded on pointer-up or pointer-leave.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    last_x: f32,
    last_y: f32,
}

/// Owns the camera and applies pointer, zoom, and autorotation commands.
///
/// Autorotation and a manual drag both advance `rotation_y` within the
/// same tick; they are deliberately not mutually exclusive.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera,
    drag: Option<DragSession>,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            drag: None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin a drag session anchored at the pointer position. A second
    /// pointer-down simply re-anchors the existing session.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag = Some(DragSession {
            last_x: x,
            last_y: y,
        });
    }

    /// Apply the delta from the last recorded pointer position and
    /// re-anchor. Ignored when no drag session is active.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(drag) = &mut self.drag {
            let delta_x = x - drag.last_x;
            let delta_y = y - drag.last_y;
            self.camera.rotation_y += delta_x * DRAG_SENSITIVITY;
            self.camera.rotation_x += delta_y * DRAG_SENSITIVITY;
            drag.last_x = x;
            drag.last_y = y;
        }
    }

    /// End the drag session, if any.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// The pointer left the surface; same effect as pointer-up.
    pub fn pointer_leave(&mut self) {
        self.drag = None;
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom = (self.camera.zoom * ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom = (self.camera.zoom / ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn toggle_autorotate(&mut self) {
        self.camera.autorotate = !self.camera.autorotate;
    }

    /// Return to the mount-time orientation and zoom. Leaves the
    /// autorotate flag and any live drag session untouched.
    pub fn reset(&mut self) {
        self.camera.rotation_x = 0.5;
        self.camera.rotation_y = 0.0;
        self.camera.zoom = 1.0;
    }

    /// Apply the per-tick autorotation step when enabled. Runs regardless
    /// of drag state.
    pub fn advance(&mut self) {
        if self.camera.autorotate {
            self.camera.rotation_y += AUTOROTATE_STEP;
        }
    }

    pub fn telemetry(&self) -> CameraTelemetry {
        CameraTelemetry {
            rotation_x: self.camera.rotation_x,
            rotation_y: self.camera.rotation_y,
            zoom: self.camera.zoom,
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}
