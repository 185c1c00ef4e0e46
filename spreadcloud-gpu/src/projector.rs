//! Spread-projection on the GPU with read-back
//!
//! Runs the same WGSL transform the renderer uses, one invocation per
//! point, and copies the clip positions back to the host. Useful for
//! checking the shader against the CPU path and for callers that need clip
//! coordinates without drawing.

use crate::device::{buffer_layout_entry, GpuContext};
use crate::shader::project_shader_source;
use crate::uniform::{FrameUniform, GpuProjectedPoint};
use spreadcloud_core::{EmbeddingPoint, Error, FrameParams, ProjectedPoint, Result};

const WORKGROUP_SIZE: u32 = 64;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ProjectParams {
    num_points: u32,
    _padding: [u32; 3],
}

/// Compute pipeline for the spread-projection transform
pub struct GpuProjector {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl GpuProjector {
    pub fn new(gpu: &GpuContext) -> Self {
        let shader = gpu.create_shader_module("Spread Projection Compute", &project_shader_source());

        let bind_group_layout = gpu.create_bind_group_layout(
            "Spread Projection",
            &[
                buffer_layout_entry(0, wgpu::ShaderStages::COMPUTE, wgpu::BufferBindingType::Uniform),
                buffer_layout_entry(
                    1,
                    wgpu::ShaderStages::COMPUTE,
                    wgpu::BufferBindingType::Storage { read_only: true },
                ),
                buffer_layout_entry(
                    2,
                    wgpu::ShaderStages::COMPUTE,
                    wgpu::BufferBindingType::Storage { read_only: false },
                ),
                buffer_layout_entry(3, wgpu::ShaderStages::COMPUTE, wgpu::BufferBindingType::Uniform),
            ],
        );

        let layout = gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Spread Projection Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = gpu.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Spread Projection Pipeline"),
            layout: Some(&layout),
            module: &shader,
            entry_point: "main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        });

        Self {
            pipeline,
            bind_group_layout,
        }
    }

    /// Project every point of a frame; output order matches `points`.
    ///
    /// Clouds larger than the device's storage buffer limits are split
    /// into several dispatches.
    pub async fn project(
        &self,
        gpu: &GpuContext,
        points: &[EmbeddingPoint],
        frame: &FrameParams,
    ) -> Result<Vec<ProjectedPoint>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_len = max_points_per_dispatch(&gpu.device.limits());
        if chunk_len == 0 {
            return Err(Error::Gpu(
                "Storage buffer limits too small for a single point".to_string(),
            ));
        }

        let mut projected = Vec::with_capacity(points.len());
        for chunk in points.chunks(chunk_len) {
            projected.extend(self.project_chunk(gpu, chunk, frame).await?);
        }
        Ok(projected)
    }

    async fn project_chunk(
        &self,
        gpu: &GpuContext,
        points: &[EmbeddingPoint],
        frame: &FrameParams,
    ) -> Result<Vec<ProjectedPoint>> {
        let num_points = u32::try_from(points.len())
            .map_err(|_| Error::Gpu(format!("Too many points for one dispatch: {}", points.len())))?;
        let (groups_x, groups_y) = dispatch_size(num_points, gpu.device.limits().max_compute_workgroups_per_dimension);
        log::debug!(
            "Projecting {} points in {}x{} workgroups",
            num_points,
            groups_x,
            groups_y
        );

        let frame_buffer = gpu.create_buffer_init(
            "Projection Frame",
            &[FrameUniform::new(frame, [1.0, 1.0])],
            wgpu::BufferUsages::UNIFORM,
        );
        let input_buffer = gpu.create_buffer_init("Projection Input", points, wgpu::BufferUsages::STORAGE);
        let params_buffer = gpu.create_buffer_init(
            "Projection Params",
            &[ProjectParams {
                num_points,
                _padding: [0; 3],
            }],
            wgpu::BufferUsages::UNIFORM,
        );

        let output_size = (points.len() * std::mem::size_of::<GpuProjectedPoint>()) as u64;
        let output_buffer = gpu.create_buffer(
            "Projection Output",
            output_size,
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        );
        let staging_buffer = gpu.create_buffer(
            "Projection Staging",
            output_size,
            wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        );

        let bind_group = gpu.create_bind_group(
            "Spread Projection",
            &self.bind_group_layout,
            &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: input_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: output_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        );

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Spread Projection"),
        });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Spread Projection Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(groups_x, groups_y, 1);
        }

        encoder.copy_buffer_to_buffer(&output_buffer, 0, &staging_buffer, 0, output_size);
        gpu.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = futures_intrusive::channel::shared::oneshot_channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |v| {
            // Receiver dropped means the caller gave up on this frame
            let _ = sender.send(v);
        });

        let _ = gpu.device.poll(wgpu::Maintain::Wait);

        match receiver.receive().await {
            Some(Ok(())) => {}
            Some(Err(e)) => return Err(e.into()),
            None => return Err(Error::Gpu("Failed to read GPU results".to_string())),
        }

        let data = buffer_slice.get_mapped_range();
        let projected = bytemuck::cast_slice::<u8, GpuProjectedPoint>(&data)
            .iter()
            .map(|p| ProjectedPoint::from(*p))
            .collect();

        drop(data);
        staging_buffer.unmap();

        Ok(projected)
    }
}

/// Largest point count whose input and output buffers both fit the
/// device's storage binding and buffer size limits
fn max_points_per_dispatch(limits: &wgpu::Limits) -> usize {
    let binding = u64::from(limits.max_storage_buffer_binding_size);
    let buffer = limits.max_buffer_size;
    let input = std::mem::size_of::<EmbeddingPoint>() as u64;
    let output = std::mem::size_of::<GpuProjectedPoint>() as u64;

    let points = (binding.min(buffer) / input).min(binding.min(buffer) / output);
    usize::try_from(points.min(u64::from(u32::MAX))).unwrap_or(usize::MAX)
}

/// Workgroup grid covering `num_points`, spilling into the second
/// dimension once the first reaches the device limit
fn dispatch_size(num_points: u32, max_per_dimension: u32) -> (u32, u32) {
    let groups = num_points.div_ceil(WORKGROUP_SIZE);
    if groups <= max_per_dimension {
        (groups, 1)
    } else {
        (max_per_dimension, groups.div_ceil(max_per_dimension))
    }
}

/// Convenience wrapper building a one-off projector
pub async fn gpu_project_cloud(
    gpu: &GpuContext,
    points: &[EmbeddingPoint],
    frame: &FrameParams,
) -> Result<Vec<ProjectedPoint>> {
    GpuProjector::new(gpu).project(gpu, points, frame).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_size() {
        assert_eq!(dispatch_size(1, 65535), (1, 1));
        assert_eq!(dispatch_size(64, 65535), (1, 1));
        assert_eq!(dispatch_size(65, 65535), (2, 1));
        assert_eq!(dispatch_size(64 * 10, 4), (4, 3));
    }

    #[test]
    fn test_max_points_per_dispatch() {
        // 128 MiB binding at 48 bytes per projected point
        assert_eq!(max_points_per_dispatch(&wgpu::Limits::default()), 2_796_202);

        let small = wgpu::Limits {
            max_storage_buffer_binding_size: 480,
            ..wgpu::Limits::default()
        };
        assert_eq!(max_points_per_dispatch(&small), 10);

        let tiny_buffer = wgpu::Limits {
            max_buffer_size: 96,
            ..wgpu::Limits::default()
        };
        assert_eq!(max_points_per_dispatch(&tiny_buffer), 2);
    }

    #[test]
    fn test_params_size() {
        assert_eq!(std::mem::size_of::<ProjectParams>(), 16);
    }
}
