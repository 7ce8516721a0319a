//! The embeddable chart view
//!
//! `ChartView` ties the camera controller, scene builder, frame renderer,
//! and scheduler together around one dataset snapshot and one raster
//! surface. The host embeds it, forwards pointer and zoom commands, and
//! drives `tick` from its display-synchronized callback.
//!
//! All mutation happens on one logical thread: commands arrive between
//! ticks and the whole render pipeline runs synchronously inside `tick`,
//! so no tick observes half-updated camera state and a slow paint delays,
//! never skips, the following tick.

use std::sync::Arc;
use std::time::Duration;

use instant::Instant;
use nalgebra::Point2;
use tiny_skia::Pixmap;

use spinplot_core::{DatasetSnapshot, Result};

use crate::camera::{Camera, CameraController, CameraTelemetry};
use crate::painter::FrameRenderer;
use crate::scene::build_scene;
use crate::scheduler::{FrameScheduler, SubscriptionToken};

/// An interactive 3D view over one dataset snapshot.
///
/// Lifecycle: create, `resize` to the real viewport, `attach` when the
/// surface is mounted, then call `tick` with the token from `attach` on
/// every display-refresh callback. `set_dataset` and `resize` return a
/// fresh token while attached; the host must adopt it, which retires any
/// tick still in flight from the old loop.
pub struct ChartView {
    dataset: Arc<DatasetSnapshot>,
    controller: CameraController,
    renderer: FrameRenderer,
    scheduler: FrameScheduler,
    surface: Option<Pixmap>,
    last_frame: Option<Duration>,
}

impl ChartView {
    /// Create a detached view with no surface yet.
    pub fn new(dataset: Arc<DatasetSnapshot>) -> Self {
        Self {
            dataset,
            controller: CameraController::new(),
            renderer: FrameRenderer::new(),
            scheduler: FrameScheduler::new(),
            surface: None,
            last_frame: None,
        }
    }

    /// The surface is mounted; start the repaint subscription. Calling
    /// while already attached returns the live token.
    pub fn attach(&mut self) -> SubscriptionToken {
        self.scheduler.start()
    }

    /// The surface is unmounted; release the subscription. Idempotent.
    pub fn detach(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_attached(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Swap in a new snapshot; the next tick reads it. While attached this
    /// rebuilds the loop and returns the replacement token.
    pub fn set_dataset(&mut self, dataset: Arc<DatasetSnapshot>) -> Option<SubscriptionToken> {
        self.dataset = dataset;
        self.scheduler
            .is_running()
            .then(|| self.scheduler.restart())
    }

    pub fn dataset(&self) -> &Arc<DatasetSnapshot> {
        &self.dataset
    }

    /// Resize the raster surface to the viewport's pixel dimensions.
    /// Applied between ticks, never mid-paint. A zero-area viewport drops
    /// the surface entirely; ticks keep advancing the camera but painting
    /// is skipped until a real size arrives. While attached this rebuilds
    /// the loop and returns the replacement token.
    pub fn resize(&mut self, width: u32, height: u32) -> Option<SubscriptionToken> {
        self.surface = Pixmap::new(width, height);
        if self.surface.is_none() {
            log::debug!("zero-area viewport ({width}x{height}); painting suspended");
        }
        self.scheduler
            .is_running()
            .then(|| self.scheduler.restart())
    }

    /// One frame: autorotation step, scene build, paint. Returns false
    /// without touching anything when the token is stale or the view is
    /// detached.
    pub fn tick(&mut self, token: SubscriptionToken) -> bool {
        if !self.scheduler.accepts(token) {
            return false;
        }
        let started = Instant::now();
        self.controller.advance();
        if let Some(surface) = &mut self.surface {
            let center = Point2::new(
                surface.width() as f32 / 2.0,
                surface.height() as f32 / 2.0,
            );
            let batch = build_scene(&self.dataset, self.controller.camera(), center);
            self.renderer.render(&batch, surface);
        }
        self.last_frame = Some(started.elapsed());
        true
    }

    // Pointer and zoom commands, forwarded verbatim from the host UI.

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.controller.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.controller.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.controller.pointer_leave();
    }

    pub fn zoom_in(&mut self) {
        self.controller.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.controller.zoom_out();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn toggle_autorotate(&mut self) {
        self.controller.toggle_autorotate();
    }

    /// Camera readout for the surrounding UI.
    pub fn telemetry(&self) -> CameraTelemetry {
        self.controller.telemetry()
    }

    /// Duration of the most recent tick, if any has run.
    pub fn last_frame_time(&self) -> Option<Duration> {
        self.last_frame
    }

    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    /// The rendered frame, when a nonzero surface exists.
    pub fn surface(&self) -> Option<&Pixmap> {
        self.surface.as_ref()
    }

    /// Supply a TTF/OTF font for label painting.
    pub fn set_font(&mut self, data: Vec<u8>) -> Result<()> {
        self.renderer.set_font(data)
    }
}
