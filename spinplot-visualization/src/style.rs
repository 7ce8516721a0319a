//! Fixed palette and scene sizing constants
//!
//! All colors are `[r, g, b, a]` bytes; the painter converts them to the
//! raster backend's color type at paint time.

/// Half-extent of the decorative grid; the full lattice is
/// `2 * GRID_HALF_COUNT + 1` lines per axis.
pub const GRID_HALF_COUNT: i32 = 10;

/// Grid spacing in scene units before zoom scaling.
pub const GRID_SPACING: f32 = 50.0;

/// Axis segment length in scene units before zoom scaling.
pub const AXIS_LENGTH: f32 = 200.0;

/// Base marker radius in pixels before zoom scaling.
pub const MARKER_RADIUS: f32 = 8.0;

/// Amplitude of the synthetic per-index depth, in scene units.
pub const DEPTH_AMPLITUDE: f32 = 50.0;

/// Angular step of the synthetic depth per sample index.
pub const DEPTH_FREQUENCY: f32 = 0.5;

/// Offset subtracted from sample coordinates before spreading them into
/// scene space.
pub const SAMPLE_OFFSET: f32 = 25.0;

/// Spread factor from data units to scene units.
pub const SAMPLE_SPREAD: f32 = 5.0;

/// Label font size in pixels before zoom scaling.
pub const LABEL_SIZE: f32 = 12.0;

/// Label lift above the marker center, in pixels before zoom scaling.
pub const LABEL_LIFT: f32 = 15.0;

/// Polyline stroke width before zoom scaling.
pub const POLYLINE_WIDTH: f32 = 2.0;

pub const GRID_WIDTH: f32 = 1.0;
pub const AXIS_WIDTH: f32 = 3.0;

pub const GRID_COLOR: [u8; 4] = [255, 255, 255, 26];
pub const AXIS_X_COLOR: [u8; 4] = [255, 107, 107, 255];
pub const AXIS_Y_COLOR: [u8; 4] = [78, 205, 196, 255];
pub const AXIS_Z_COLOR: [u8; 4] = [69, 183, 209, 255];

/// Marker fill when a sample carries no color of its own.
pub const MARKER_DEFAULT_COLOR: [u8; 3] = [139, 92, 246];

/// Outer stop of every marker's fill gradient, regardless of its core
/// color.
pub const MARKER_EDGE_COLOR: [u8; 4] = [139, 92, 246, 77];

pub const POLYLINE_COLOR: [u8; 4] = [139, 92, 246, 153];
pub const SHADOW_COLOR: [u8; 4] = [0, 0, 0, 77];
pub const HIGHLIGHT_COLOR: [u8; 4] = [255, 255, 255, 204];
pub const LABEL_COLOR: [u8; 4] = [255, 255, 255, 230];

/// Background radial gradient, violet core to dark edge.
pub const BACKGROUND_CENTER_COLOR: [u8; 4] = [139, 92, 246, 26];
pub const BACKGROUND_EDGE_COLOR: [u8; 4] = [0, 0, 0, 77];
