//! Host-side mirrors of the WGSL data layouts

use bytemuck::{Pod, Zeroable};
use nalgebra::Vector4;
use spreadcloud_core::{EmbeddingPoint, FrameParams, ProjectedPoint};

/// Per-frame uniform block, matching `Frame` in `spread.wgsl`
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// `[pivot, factor]`
    pub spread: [f32; 2],
    pub point_size: f32,
    pub _padding0: f32,
    /// Viewport size in pixels
    pub viewport: [f32; 2],
    pub _padding1: [f32; 2],
}

impl FrameUniform {
    /// Pack a frame snapshot for upload.
    ///
    /// `viewport` only matters for rendering, where it converts the point
    /// size from pixels to clip-space units.
    pub fn new(frame: &FrameParams, viewport: [f32; 2]) -> Self {
        Self {
            view: frame.camera.view.into(),
            projection: frame.camera.projection.into(),
            spread: [frame.spread.pivot, frame.spread.factor],
            point_size: frame.point_size.get(),
            _padding0: 0.0,
            viewport,
            _padding1: [0.0; 2],
        }
    }
}

impl Default for FrameUniform {
    fn default() -> Self {
        Self::new(&FrameParams::default(), [1.0, 1.0])
    }
}

/// One element of the compute projector's output buffer, matching
/// `ProjectedPoint` in `project.wgsl` (48-byte stride)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuProjectedPoint {
    pub clip: [f32; 4],
    pub color: [f32; 4],
    pub size: f32,
    pub _padding: [f32; 3],
}

impl From<GpuProjectedPoint> for ProjectedPoint {
    fn from(p: GpuProjectedPoint) -> Self {
        ProjectedPoint {
            clip: Vector4::from(p.clip),
            size: p.size,
            color: p.color,
        }
    }
}

/// Vertex buffer layout for [`EmbeddingPoint`] data
pub fn embedding_point_layout<'a>(step_mode: wgpu::VertexStepMode) -> wgpu::VertexBufferLayout<'a> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3
    ];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<EmbeddingPoint>() as wgpu::BufferAddress,
        step_mode,
        attributes: &ATTRIBUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spreadcloud_core::{Camera, Matrix4, PointSize, SpreadConfig};

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 160);
        assert_eq!(std::mem::size_of::<GpuProjectedPoint>(), 48);
        assert_eq!(std::mem::size_of::<EmbeddingPoint>(), 24);
    }

    #[test]
    fn test_frame_uniform_packing() {
        let view = Matrix4::new_translation(&nalgebra::Vector3::new(1.0, 2.0, 3.0));
        let frame = FrameParams::new(
            Camera::new(view, Matrix4::identity()),
            SpreadConfig::new(4.0, 0.25),
            PointSize(3.0),
        );
        let uniform = FrameUniform::new(&frame, [800.0, 600.0]);

        // column-major: translation lives in the last column
        assert_eq!(uniform.view[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.spread, [4.0, 0.25]);
        assert_eq!(uniform.point_size, 3.0);
        assert_eq!(uniform.viewport, [800.0, 600.0]);
    }

    #[test]
    fn test_vertex_layout() {
        let layout = embedding_point_layout(wgpu::VertexStepMode::Instance);
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_gpu_output_conversion() {
        let raw = GpuProjectedPoint {
            clip: [1.0, 2.0, 3.0, 4.0],
            color: [0.1, 0.2, 0.3, 1.0],
            size: 2.0,
            _padding: [0.0; 3],
        };
        let projected = ProjectedPoint::from(raw);
        assert_eq!(projected.clip, Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(projected.size, 2.0);
        assert_eq!(projected.color, [0.1, 0.2, 0.3, 1.0]);
    }
}
