//! CPU frame painting
//!
//! Paints a primitive batch back-to-front onto a raster surface. Layer
//! order is fixed: background gradient, grid, axes, marker shadows,
//! marker fills, marker highlights, labels, and the connective polyline
//! last, so the polyline is never occluded by the markers. Each layer
//! simply overwrites the pixels beneath where it draws; there is no depth
//! buffer.
//!
//! The whole surface is cleared at the start of every paint; there is no
//! incremental redraw. The cleared surface is transparent, so the frame
//! composites over whatever the host draws behind it.

use rusttype::{point, Font, Scale};
use tiny_skia::{
    Color, ColorU8, FillRule, GradientStop, Paint, PathBuilder, Pixmap, Point as PixelPoint,
    RadialGradient, Rect, SpreadMode, Stroke, Transform,
};

use spinplot_core::{Error, Result};

use crate::scene::{Label, LineSegment, Marker, Polyline, PrimitiveBatch};
use crate::style;

/// Offset of the marker drop shadow, in pixels. Not zoom-scaled.
const SHADOW_OFFSET: f32 = 5.0;

/// Marker fill gradients extend past the marker outline by this factor.
const MARKER_GRADIENT_SPREAD: f32 = 1.5;

fn to_color(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Paints primitive batches onto a raster surface.
///
/// Holds only styling state (the optional label font); all geometry
/// arrives through the batch. Without a font, label commands are skipped
/// and the rest of the frame paints normally.
#[derive(Default)]
pub struct FrameRenderer {
    font: Option<Font<'static>>,
    missing_font_logged: bool,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply a TTF/OTF font for label painting, as raw bytes from the
    /// host.
    pub fn set_font(&mut self, data: Vec<u8>) -> Result<()> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| Error::InvalidData("unreadable font data".to_string()))?;
        self.font = Some(font);
        self.missing_font_logged = false;
        Ok(())
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Paint a batch onto the surface.
    pub fn render(&mut self, batch: &PrimitiveBatch, surface: &mut Pixmap) {
        surface.fill(Color::TRANSPARENT);
        paint_background(surface);
        for segment in &batch.grid {
            stroke_segment(surface, segment);
        }
        for segment in &batch.axes {
            stroke_segment(surface, segment);
        }
        for marker in &batch.markers {
            paint_marker_shadow(surface, marker);
        }
        for marker in &batch.markers {
            paint_marker_fill(surface, marker);
        }
        for marker in &batch.markers {
            paint_marker_highlight(surface, marker);
        }
        self.paint_labels(&batch.labels, surface);
        if let Some(polyline) = &batch.polyline {
            stroke_polyline(surface, polyline);
        }
    }

    fn paint_labels(&mut self, labels: &[Label], surface: &mut Pixmap) {
        if labels.is_empty() {
            return;
        }
        let Some(font) = &self.font else {
            if !self.missing_font_logged {
                log::debug!("no label font configured; skipping {} label(s)", labels.len());
                self.missing_font_logged = true;
            }
            return;
        };
        for label in labels {
            draw_text(surface, font, label);
        }
    }
}

fn paint_background(surface: &mut Pixmap) {
    let width = surface.width() as f32;
    let height = surface.height() as f32;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let shader = RadialGradient::new(
        PixelPoint::from_xy(center_x, center_y),
        PixelPoint::from_xy(center_x, center_y),
        width.max(height) / 2.0,
        vec![
            GradientStop::new(0.0, to_color(style::BACKGROUND_CENTER_COLOR)),
            GradientStop::new(1.0, to_color(style::BACKGROUND_EDGE_COLOR)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    );
    let (Some(shader), Some(rect)) = (shader, Rect::from_xywh(0.0, 0.0, width, height)) else {
        return;
    };
    let mut paint = Paint::default();
    paint.shader = shader;
    surface.fill_rect(rect, &paint, Transform::identity(), None);
}

fn stroke_segment(surface: &mut Pixmap, segment: &LineSegment) {
    let mut builder = PathBuilder::new();
    builder.move_to(segment.start.x, segment.start.y);
    builder.line_to(segment.end.x, segment.end.y);
    let Some(path) = builder.finish() else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(to_color(segment.color));
    paint.anti_alias = true;
    let stroke = Stroke {
        width: segment.width,
        ..Stroke::default()
    };
    surface.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

fn stroke_polyline(surface: &mut Pixmap, polyline: &Polyline) {
    let mut points = polyline.points.iter();
    let Some(first) = points.next() else {
        return;
    };
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in points {
        builder.line_to(point.x, point.y);
    }
    let Some(path) = builder.finish() else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(to_color(polyline.color));
    paint.anti_alias = true;
    let stroke = Stroke {
        width: polyline.width,
        ..Stroke::default()
    };
    surface.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

fn fill_circle(surface: &mut Pixmap, x: f32, y: f32, radius: f32, paint: &Paint) {
    let Some(path) = PathBuilder::from_circle(x, y, radius) else {
        return;
    };
    surface.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
}

fn paint_marker_shadow(surface: &mut Pixmap, marker: &Marker) {
    let mut paint = Paint::default();
    paint.set_color(to_color(style::SHADOW_COLOR));
    paint.anti_alias = true;
    fill_circle(
        surface,
        marker.position.x + SHADOW_OFFSET,
        marker.position.y + SHADOW_OFFSET,
        marker.radius,
        &paint,
    );
}

fn paint_marker_fill(surface: &mut Pixmap, marker: &Marker) {
    let core = Color::from_rgba8(marker.color[0], marker.color[1], marker.color[2], 255);
    let shader = RadialGradient::new(
        PixelPoint::from_xy(marker.position.x, marker.position.y),
        PixelPoint::from_xy(marker.position.x, marker.position.y),
        marker.radius * MARKER_GRADIENT_SPREAD,
        vec![
            GradientStop::new(0.0, core),
            GradientStop::new(1.0, to_color(style::MARKER_EDGE_COLOR)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    );
    let mut paint = Paint::default();
    match shader {
        Some(shader) => paint.shader = shader,
        None => paint.set_color(core),
    }
    paint.anti_alias = true;
    fill_circle(
        surface,
        marker.position.x,
        marker.position.y,
        marker.radius,
        &paint,
    );
}

fn paint_marker_highlight(surface: &mut Pixmap, marker: &Marker) {
    let offset = marker.radius / 4.0;
    let mut paint = Paint::default();
    paint.set_color(to_color(style::HIGHLIGHT_COLOR));
    paint.anti_alias = true;
    fill_circle(
        surface,
        marker.position.x - offset,
        marker.position.y - offset,
        offset,
        &paint,
    );
}

/// Rasterize one label, centered on its anchor, by blitting glyph
/// coverage straight into the pixel buffer.
fn draw_text(surface: &mut Pixmap, font: &Font<'static>, label: &Label) {
    let scale = Scale::uniform(label.size);
    let text_width: f32 = label
        .text
        .chars()
        .map(|ch| font.glyph(ch).scaled(scale).h_metrics().advance_width)
        .sum();

    let mut cursor = label.position.x - text_width / 2.0;
    let baseline = label.position.y;
    let width = surface.width();
    let height = surface.height();
    for ch in label.text.chars() {
        let glyph = font
            .glyph(ch)
            .scaled(scale)
            .positioned(point(cursor, baseline));
        if let Some(bounds) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bounds.min.x;
                let py = gy as i32 + bounds.min.y;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    let index = (py as u32 * width + px as u32) as usize;
                    let alpha = (style::LABEL_COLOR[3] as f32 * coverage) as u8;
                    surface.pixels_mut()[index] = ColorU8::from_rgba(
                        style::LABEL_COLOR[0],
                        style::LABEL_COLOR[1],
                        style::LABEL_COLOR[2],
                        alpha,
                    )
                    .premultiply();
                }
            });
        }
        cursor += glyph.unpositioned().h_metrics().advance_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PrimitiveBatch;
    use nalgebra::Point2;

    fn pixel(surface: &Pixmap, x: u32, y: u32) -> tiny_skia::PremultipliedColorU8 {
        surface.pixels()[(y * surface.width() + x) as usize]
    }

    fn surface_64() -> Pixmap {
        Pixmap::new(64, 64).expect("nonzero surface")
    }

    #[test]
    fn test_background_gradient_covers_surface() {
        let mut renderer = FrameRenderer::new();
        let mut surface = surface_64();
        renderer.render(&PrimitiveBatch::default(), &mut surface);

        let center = pixel(&surface, 32, 32);
        let corner = pixel(&surface, 0, 0);
        assert!(center.alpha() > 0);
        assert!(corner.alpha() > 0);
        // Violet core, dark edge.
        assert_ne!(center, corner);
    }

    #[test]
    fn test_axis_segment_paints() {
        let mut renderer = FrameRenderer::new();
        let batch = PrimitiveBatch {
            axes: vec![LineSegment {
                start: Point2::new(4.0, 32.0),
                end: Point2::new(60.0, 32.0),
                color: style::AXIS_X_COLOR,
                width: 3.0,
            }],
            ..PrimitiveBatch::default()
        };

        let mut plain = surface_64();
        renderer.render(&PrimitiveBatch::default(), &mut plain);
        let mut with_axis = surface_64();
        renderer.render(&batch, &mut with_axis);

        assert_ne!(pixel(&with_axis, 32, 32), pixel(&plain, 32, 32));
        let painted = pixel(&with_axis, 32, 32).demultiply();
        assert!(painted.red() > painted.blue());
    }

    #[test]
    fn test_marker_fill_core_color() {
        let mut renderer = FrameRenderer::new();
        let batch = PrimitiveBatch {
            markers: vec![Marker {
                position: Point2::new(32.0, 32.0),
                radius: 10.0,
                color: [255, 0, 0],
            }],
            ..PrimitiveBatch::default()
        };
        let mut surface = surface_64();
        renderer.render(&batch, &mut surface);

        let center = pixel(&surface, 32, 32).demultiply();
        assert!(center.red() > 200);
        assert!(center.green() < 60);
    }

    #[test]
    fn test_polyline_paints_over_markers() {
        let marker = Marker {
            position: Point2::new(32.0, 32.0),
            radius: 8.0,
            color: [255, 0, 0],
        };
        let markers_only = PrimitiveBatch {
            markers: vec![marker.clone()],
            ..PrimitiveBatch::default()
        };
        let with_polyline = PrimitiveBatch {
            markers: vec![marker],
            polyline: Some(Polyline {
                points: vec![Point2::new(4.0, 32.0), Point2::new(60.0, 32.0)],
                color: style::POLYLINE_COLOR,
                width: 4.0,
            }),
            ..PrimitiveBatch::default()
        };

        let mut renderer = FrameRenderer::new();
        let mut base = surface_64();
        renderer.render(&markers_only, &mut base);
        let mut layered = surface_64();
        renderer.render(&with_polyline, &mut layered);

        // The polyline crosses the marker center; if it were painted
        // first, the opaque marker fill would hide it and the two frames
        // would match there.
        assert_ne!(pixel(&layered, 32, 32), pixel(&base, 32, 32));
        // And it shows up away from the marker too.
        assert_ne!(pixel(&layered, 10, 32), pixel(&base, 10, 32));
    }

    #[test]
    fn test_labels_skipped_without_font() {
        let mut renderer = FrameRenderer::new();
        assert!(!renderer.has_font());
        let batch = PrimitiveBatch {
            labels: vec![Label {
                position: Point2::new(32.0, 20.0),
                text: "Jan".to_string(),
                size: 12.0,
            }],
            ..PrimitiveBatch::default()
        };
        let mut surface = surface_64();
        // Must not panic or alter behavior beyond skipping the text layer.
        renderer.render(&batch, &mut surface);
    }

    #[test]
    fn test_rejects_bad_font_bytes() {
        let mut renderer = FrameRenderer::new();
        assert!(renderer.set_font(vec![0, 1, 2, 3]).is_err());
        assert!(!renderer.has_font());
    }
}
