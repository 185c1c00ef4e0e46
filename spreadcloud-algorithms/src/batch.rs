//! Geometry handed from a data source to the renderer

use spreadcloud_core::EmbeddingPoint;

/// Points and line vertices to draw in one frame.
///
/// `lines` is a line list: consecutive vertex pairs form one segment. Both
/// go through the same spread transform, so reference geometry squashes
/// together with the cloud.
#[derive(Debug, Default, Clone)]
pub struct FrameBatch {
    pub points: Vec<EmbeddingPoint>,
    pub lines: Vec<EmbeddingPoint>,
}

impl FrameBatch {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_points(points: Vec<EmbeddingPoint>) -> Self {
        Self {
            points,
            lines: Vec::new(),
        }
    }

    pub fn from_lines(lines: Vec<EmbeddingPoint>) -> Self {
        Self {
            points: Vec::new(),
            lines,
        }
    }

    /// Append another batch's geometry after this one's
    pub fn append(&mut self, other: &FrameBatch) {
        self.lines.extend_from_slice(&other.lines);
        self.points.extend_from_slice(&other.points);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty()
    }

    /// Number of complete line segments
    pub fn segment_count(&self) -> usize {
        self.lines.len() / 2
    }
}
