//! Sample and dataset snapshot types

use serde::{Deserialize, Serialize};

/// A single 2D-labeled data sample.
///
/// Samples are immutable once handed to the renderer; the rendering core
/// only ever reads them. A sample with a non-finite coordinate is skipped
/// during scene construction rather than propagated into geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Identifier unique within the dataset.
    pub id: String,
    pub x: f32,
    pub y: f32,
    /// Optional text drawn above the sample's marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Optional marker fill override as `[r, g, b]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

impl Sample {
    pub fn new(id: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            label: None,
            color: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = Some(color);
        self
    }

    /// Both coordinates are finite and safe to project.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// How the surrounding dashboard wants a dataset drawn.
///
/// Only `Line` and `Volumetric` affect the 3D view (they connect the
/// markers with a polyline); the remaining modes exist so snapshots from
/// the dashboard's 2D charts can be displayed without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Line,
    Bar,
    Scatter,
    Area,
    Volumetric,
}

impl RenderMode {
    /// Modes that connect consecutive samples with a polyline.
    pub fn connects_samples(&self) -> bool {
        matches!(self, RenderMode::Line | RenderMode::Volumetric)
    }
}

/// An immutable, ordered collection of samples with display metadata.
///
/// Owned by the surrounding dataset-management feature and shared into the
/// view read-only. Sample order is significant: it determines polyline
/// connection order and the per-sample depth offset in the synthetic-z
/// heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub name: String,
    pub samples: Vec<Sample>,
    pub render_mode: RenderMode,
}

impl DatasetSnapshot {
    /// Create a new empty snapshot.
    pub fn new(name: impl Into<String>, render_mode: RenderMode) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
            render_mode,
        }
    }

    /// Create a snapshot from a vector of samples.
    pub fn from_samples(
        name: impl Into<String>,
        render_mode: RenderMode,
        samples: Vec<Sample>,
    ) -> Self {
        Self {
            name: name.into(),
            samples,
            render_mode,
        }
    }

    /// Number of samples in the snapshot.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate the samples in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }
}

impl<'a> IntoIterator for &'a DatasetSnapshot {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
