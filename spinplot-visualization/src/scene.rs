//! Scene construction
//!
//! Derives the per-frame primitive batch from a dataset snapshot and the
//! current camera state, anchored at a caller-supplied screen center. The
//! batch stores final screen positions; nothing downstream re-projects.
//! Building is deterministic: identical inputs produce an identical batch.

use nalgebra::{Point2, Point3};
use spinplot_core::{project, DatasetSnapshot, Error, Sample};

use crate::camera::Camera;
use crate::style;

/// A single stroked line segment in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub start: Point2<f32>,
    pub end: Point2<f32>,
    pub color: [u8; 4],
    pub width: f32,
}

/// A point marker with its computed draw position.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Point2<f32>,
    pub radius: f32,
    pub color: [u8; 3],
}

/// A label draw command.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Center of the text baseline anchor.
    pub position: Point2<f32>,
    pub text: String,
    pub size: f32,
}

/// The connective polyline through the markers, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point2<f32>>,
    pub color: [u8; 4],
    pub width: f32,
}

/// Everything drawable for one frame. Built per tick, discarded after
/// paint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimitiveBatch {
    pub grid: Vec<LineSegment>,
    pub axes: Vec<LineSegment>,
    pub markers: Vec<Marker>,
    pub labels: Vec<Label>,
    pub polyline: Option<Polyline>,
}

/// Map a sample to its scene-space position. The ordinal index drives the
/// synthetic depth; there is no true third data dimension.
fn scene_position(sample: &Sample, index: usize, zoom: f32) -> Result<Point3<f32>, Error> {
    if !sample.is_finite() {
        return Err(Error::MalformedSample {
            id: sample.id.clone(),
            x: sample.x,
            y: sample.y,
        });
    }
    let x = (sample.x - style::SAMPLE_OFFSET) * style::SAMPLE_SPREAD * zoom;
    let y = (sample.y - style::SAMPLE_OFFSET) * style::SAMPLE_SPREAD * zoom;
    let z = (index as f32 * style::DEPTH_FREQUENCY).sin() * style::DEPTH_AMPLITUDE * zoom;
    Ok(Point3::new(x, y, z))
}

/// Build the primitive batch for one frame.
///
/// Malformed samples (non-finite coordinates) are skipped with a warning
/// and excluded from markers, labels, and the polyline; one bad sample
/// never blanks the frame. Grid and axes are independent of the dataset.
pub fn build_scene(dataset: &DatasetSnapshot, camera: &Camera, center: Point2<f32>) -> PrimitiveBatch {
    let rotation = camera.rotation();
    let zoom = camera.zoom;
    let at = |point: Point3<f32>| -> Point2<f32> {
        let projected = project(&point, &rotation);
        Point2::new(center.x + projected.x, center.y + projected.y)
    };

    let line_count = (2 * style::GRID_HALF_COUNT + 1) as usize;
    let mut grid = Vec::with_capacity(line_count * 2);
    let spacing = style::GRID_SPACING * zoom;
    let extent = style::GRID_HALF_COUNT as f32 * spacing;
    for i in -style::GRID_HALF_COUNT..=style::GRID_HALF_COUNT {
        let offset = i as f32 * spacing;
        grid.push(LineSegment {
            start: at(Point3::new(offset, -extent, 0.0)),
            end: at(Point3::new(offset, extent, 0.0)),
            color: style::GRID_COLOR,
            width: style::GRID_WIDTH,
        });
        grid.push(LineSegment {
            start: at(Point3::new(-extent, offset, 0.0)),
            end: at(Point3::new(extent, offset, 0.0)),
            color: style::GRID_COLOR,
            width: style::GRID_WIDTH,
        });
    }

    let origin = at(Point3::origin());
    let axis_length = style::AXIS_LENGTH * zoom;
    let axes = vec![
        LineSegment {
            start: origin,
            end: at(Point3::new(axis_length, 0.0, 0.0)),
            color: style::AXIS_X_COLOR,
            width: style::AXIS_WIDTH,
        },
        LineSegment {
            start: origin,
            end: at(Point3::new(0.0, axis_length, 0.0)),
            color: style::AXIS_Y_COLOR,
            width: style::AXIS_WIDTH,
        },
        LineSegment {
            start: origin,
            end: at(Point3::new(0.0, 0.0, axis_length)),
            color: style::AXIS_Z_COLOR,
            width: style::AXIS_WIDTH,
        },
    ];

    let mut markers = Vec::with_capacity(dataset.len());
    let mut labels = Vec::new();
    let mut path = Vec::with_capacity(dataset.len());
    for (index, sample) in dataset.iter().enumerate() {
        match scene_position(sample, index, zoom) {
            Ok(scene_point) => {
                let position = at(scene_point);
                markers.push(Marker {
                    position,
                    radius: style::MARKER_RADIUS * zoom,
                    color: sample.color.unwrap_or(style::MARKER_DEFAULT_COLOR),
                });
                if let Some(text) = &sample.label {
                    labels.push(Label {
                        position: Point2::new(position.x, position.y - style::LABEL_LIFT * zoom),
                        text: text.clone(),
                        size: style::LABEL_SIZE * zoom,
                    });
                }
                path.push(position);
            }
            Err(err) => log::warn!("skipping sample: {err}"),
        }
    }

    let polyline = if dataset.render_mode.connects_samples() && path.len() >= 2 {
        Some(Polyline {
            points: path,
            color: style::POLYLINE_COLOR,
            width: style::POLYLINE_WIDTH * zoom,
        })
    } else {
        None
    };

    PrimitiveBatch {
        grid,
        axes,
        markers,
        labels,
        polyline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinplot_core::RenderMode;

    fn example_dataset(mode: RenderMode) -> DatasetSnapshot {
        DatasetSnapshot::from_samples(
            "example",
            mode,
            vec![
                Sample::new("a", 10.0, 15.0),
                Sample::new("b", 20.0, 25.0),
                Sample::new("c", 30.0, 35.0),
                Sample::new("d", 40.0, 45.0),
            ],
        )
    }

    fn default_camera() -> Camera {
        Camera {
            rotation_x: 0.5,
            rotation_y: 0.0,
            zoom: 1.0,
            autorotate: false,
        }
    }

    fn center() -> Point2<f32> {
        Point2::new(400.0, 300.0)
    }

    #[test]
    fn test_line_dataset_batch_shape() {
        let batch = build_scene(&example_dataset(RenderMode::Line), &default_camera(), center());

        assert_eq!(batch.markers.len(), 4);
        assert_eq!(batch.axes.len(), 3);
        assert_eq!(batch.grid.len(), 2 * (2 * style::GRID_HALF_COUNT as usize + 1));

        let polyline = batch.polyline.expect("line mode connects samples");
        assert_eq!(polyline.points.len(), 4);
        // Connected in dataset order, which here runs diagonally outward.
        for (point, marker) in polyline.points.iter().zip(&batch.markers) {
            assert_eq!(*point, marker.position);
        }
    }

    #[test]
    fn test_scatter_mode_has_no_polyline() {
        let batch = build_scene(
            &example_dataset(RenderMode::Scatter),
            &default_camera(),
            center(),
        );
        assert!(batch.polyline.is_none());
        assert_eq!(batch.markers.len(), 4);
    }

    #[test]
    fn test_volumetric_mode_connects() {
        let batch = build_scene(
            &example_dataset(RenderMode::Volumetric),
            &default_camera(),
            center(),
        );
        assert!(batch.polyline.is_some());
    }

    #[test]
    fn test_single_sample_has_no_polyline() {
        let dataset = DatasetSnapshot::from_samples(
            "one",
            RenderMode::Line,
            vec![Sample::new("a", 10.0, 10.0)],
        );
        let batch = build_scene(&dataset, &default_camera(), center());
        assert!(batch.polyline.is_none());
        assert_eq!(batch.markers.len(), 1);
    }

    #[test]
    fn test_empty_dataset_keeps_grid_and_axes() {
        let dataset = DatasetSnapshot::new("empty", RenderMode::Line);
        let batch = build_scene(&dataset, &default_camera(), center());
        assert!(batch.markers.is_empty());
        assert!(batch.labels.is_empty());
        assert!(batch.polyline.is_none());
        assert_eq!(batch.axes.len(), 3);
        assert_eq!(batch.grid.len(), 42);
    }

    #[test]
    fn test_grid_is_dataset_independent() {
        let empty = DatasetSnapshot::new("empty", RenderMode::Line);
        let full = example_dataset(RenderMode::Line);
        let camera = default_camera();
        let a = build_scene(&empty, &camera, center());
        let b = build_scene(&full, &camera, center());
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.axes, b.axes);
    }

    #[test]
    fn test_malformed_samples_are_skipped() {
        let dataset = DatasetSnapshot::from_samples(
            "partial",
            RenderMode::Line,
            vec![
                Sample::new("ok1", 10.0, 15.0),
                Sample::new("bad", f32::NAN, 15.0),
                Sample::new("ok2", 30.0, 35.0).with_label("kept"),
                Sample::new("worse", 5.0, f32::INFINITY),
            ],
        );
        let batch = build_scene(&dataset, &default_camera(), center());
        assert_eq!(batch.markers.len(), 2);
        assert_eq!(batch.labels.len(), 1);
        let polyline = batch.polyline.expect("two good samples still connect");
        assert_eq!(polyline.points.len(), 2);
        for marker in &batch.markers {
            assert!(marker.position.x.is_finite());
            assert!(marker.position.y.is_finite());
        }
    }

    #[test]
    fn test_labels_and_colors_carry_through() {
        let dataset = DatasetSnapshot::from_samples(
            "styled",
            RenderMode::Scatter,
            vec![
                Sample::new("a", 10.0, 15.0).with_label("Jan").with_color([200, 30, 30]),
                Sample::new("b", 20.0, 25.0),
            ],
        );
        let batch = build_scene(&dataset, &default_camera(), center());
        assert_eq!(batch.markers[0].color, [200, 30, 30]);
        assert_eq!(batch.markers[1].color, style::MARKER_DEFAULT_COLOR);
        assert_eq!(batch.labels.len(), 1);
        assert_eq!(batch.labels[0].text, "Jan");
        assert!(batch.labels[0].position.y < batch.markers[0].position.y);
    }

    #[test]
    fn test_zoom_scales_marker_radius_and_widths() {
        let mut camera = default_camera();
        camera.zoom = 2.0;
        let batch = build_scene(&example_dataset(RenderMode::Line), &camera, center());
        assert_eq!(batch.markers[0].radius, style::MARKER_RADIUS * 2.0);
        assert_eq!(batch.polyline.unwrap().width, style::POLYLINE_WIDTH * 2.0);
    }

    #[test]
    fn test_deterministic_batches() {
        let dataset = example_dataset(RenderMode::Line);
        let camera = default_camera();
        let a = build_scene(&dataset, &camera, center());
        let b = build_scene(&dataset, &camera, center());
        assert_eq!(a, b);
    }
}
