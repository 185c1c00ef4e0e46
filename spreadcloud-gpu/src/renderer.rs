//! Window renderer for embedding clouds
//!
//! Points are drawn as instanced quads `point_size` pixels wide and
//! reference lines as a line list. Both run through the spread transform
//! in `spread.wgsl`, driven by one frame uniform.

use crate::device::{buffer_layout_entry, GpuContext};
use crate::shader::render_shader_source;
use crate::uniform::{embedding_point_layout, FrameUniform};
use spreadcloud_algorithms::FrameBatch;
use spreadcloud_core::{EmbeddingPoint, Error, FrameParams, Result};
use winit::window::Window;

/// Vertices drawn per point; each point is an instanced two-triangle quad
pub const QUAD_VERTICES: u32 = 6;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background_color: [f64; 4],
    pub enable_depth_test: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [0.1, 0.1, 0.1, 1.0],
            enable_depth_test: true,
        }
    }
}

/// Geometry resident on the GPU, re-uploaded only when a new batch arrives
struct GeometryBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl GeometryBuffer {
    fn new(gpu: &GpuContext, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate(gpu, label, 1),
            capacity: 1,
            count: 0,
        }
    }

    fn allocate(gpu: &GpuContext, label: &str, capacity: usize) -> wgpu::Buffer {
        gpu.create_buffer(
            label,
            (capacity * std::mem::size_of::<EmbeddingPoint>()) as u64,
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        )
    }

    fn upload(&mut self, gpu: &GpuContext, vertices: &[EmbeddingPoint]) -> Result<()> {
        let count = u32::try_from(vertices.len()).map_err(|_| {
            Error::Gpu(format!("Too many vertices for {}: {}", self.label, vertices.len()))
        })?;
        if vertices.len() > self.capacity {
            self.capacity = vertices.len().next_power_of_two();
            self.buffer = Self::allocate(gpu, self.label, self.capacity);
            log::debug!("Grew {} to {} vertices", self.label, self.capacity);
        }
        if !vertices.is_empty() {
            gpu.queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.count = count;
        Ok(())
    }
}

/// Draws embedding points and reference lines through the spread transform
pub struct SpreadRenderer<'window> {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'window>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: RenderConfig,
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    frame_uniform: FrameUniform,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    points: GeometryBuffer,
    lines: GeometryBuffer,
}

impl<'window> SpreadRenderer<'window> {
    pub async fn new(window: &'window Window, config: RenderConfig) -> Result<Self> {
        let instance = GpuContext::create_instance();
        let surface = instance
            .create_surface(window)
            .map_err(|e| Error::Gpu(format!("Failed to create surface: {:?}", e)))?;
        let gpu_context = GpuContext::from_instance(instance, Some(&surface)).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let frame_uniform = FrameUniform::default();
        let frame_buffer = gpu_context.create_buffer_init(
            "Frame Uniform Buffer",
            &[frame_uniform],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let frame_bind_group_layout = gpu_context.create_bind_group_layout(
            "frame_bind_group_layout",
            &[buffer_layout_entry(0, wgpu::ShaderStages::VERTEX, wgpu::BufferBindingType::Uniform)],
        );
        let frame_bind_group = gpu_context.create_bind_group(
            "frame_bind_group",
            &frame_bind_group_layout,
            &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        );

        let shader = gpu_context.create_shader_module("Spread Render Shader", &render_shader_source());
        let layout = gpu_context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Spread Render Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout],
            push_constant_ranges: &[],
        });

        let point_pipeline = create_pipeline(
            &gpu_context,
            &layout,
            &shader,
            &config,
            surface_config.format,
            PipelineKind::Points,
        );
        let line_pipeline = create_pipeline(
            &gpu_context,
            &layout,
            &shader,
            &config,
            surface_config.format,
            PipelineKind::Lines,
        );

        let depth_view = create_depth_view(&gpu_context, &surface_config);
        let points = GeometryBuffer::new(&gpu_context, "Point Instance Buffer");
        let lines = GeometryBuffer::new(&gpu_context, "Line Vertex Buffer");

        log::info!(
            "Spread renderer ready: {}x{} {:?}",
            surface_config.width,
            surface_config.height,
            surface_config.format
        );

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            config,
            point_pipeline,
            line_pipeline,
            frame_uniform,
            frame_buffer,
            frame_bind_group,
            depth_view,
            points,
            lines,
        })
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> [f32; 2] {
        [self.surface_config.width as f32, self.surface_config.height as f32]
    }

    /// Upload this frame's camera, spread and point size
    pub fn update_frame(&mut self, frame: &FrameParams) {
        self.frame_uniform = FrameUniform::new(frame, self.viewport());
        self.gpu_context.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&self.frame_uniform),
        );
    }

    /// Replace the resident geometry
    pub fn upload(&mut self, batch: &FrameBatch) -> Result<()> {
        self.points.upload(&self.gpu_context, &batch.points)?;
        self.lines.upload(&self.gpu_context, &batch.lines)
    }

    /// Resize renderer surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu_context.device, &self.surface_config);
            self.depth_view = create_depth_view(&self.gpu_context, &self.surface_config);
        }
    }

    /// Draw the resident geometry with the last uploaded frame parameters
    pub fn render(&self) -> Result<()> {
        let output = self.surface.get_current_texture()
            .map_err(|e| Error::Gpu(format!("Failed to get surface texture: {:?}", e)))?;

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.gpu_context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Spread Render Encoder"),
        });

        {
            let [r, g, b, a] = self.config.background_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Spread Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: if self.config.enable_depth_test {
                    Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    })
                } else {
                    None
                },
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            if self.points.count > 0 {
                render_pass.set_pipeline(&self.point_pipeline);
                render_pass.set_vertex_buffer(0, self.points.buffer.slice(..));
                render_pass.draw(0..QUAD_VERTICES, 0..self.points.count);
            }

            if self.lines.count > 0 {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.lines.buffer.slice(..));
                render_pass.draw(0..self.lines.count, 0..1);
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineKind {
    Points,
    Lines,
}

fn create_pipeline(
    gpu: &GpuContext,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    config: &RenderConfig,
    format: wgpu::TextureFormat,
    kind: PipelineKind,
) -> wgpu::RenderPipeline {
    let (label, entry_point, step_mode, topology) = match kind {
        PipelineKind::Points => (
            "Spread Point Pipeline",
            "vs_point",
            wgpu::VertexStepMode::Instance,
            wgpu::PrimitiveTopology::TriangleList,
        ),
        PipelineKind::Lines => (
            "Spread Line Pipeline",
            "vs_line",
            wgpu::VertexStepMode::Vertex,
            wgpu::PrimitiveTopology::LineList,
        ),
    };

    gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point,
            buffers: &[embedding_point_layout(step_mode)],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: if config.enable_depth_test {
            Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            })
        } else {
            None
        },
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

fn create_depth_view(gpu: &GpuContext, surface_config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: surface_config.width,
            height: surface_config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_buffer_grows_and_counts() {
        let gpu = match pollster::block_on(GpuContext::new()) {
            Ok(gpu) => gpu,
            Err(e) => {
                eprintln!("Skipping GPU test: {}", e);
                return;
            }
        };

        let mut buffer = GeometryBuffer::new(&gpu, "Test Vertex Buffer");
        assert_eq!(buffer.count, 0);

        let vertices = vec![EmbeddingPoint::default(); 5];
        buffer.upload(&gpu, &vertices).unwrap();
        assert_eq!(buffer.count, 5);
        assert_eq!(buffer.capacity, 8);

        buffer.upload(&gpu, &vertices[..2]).unwrap();
        assert_eq!(buffer.count, 2);
        assert_eq!(buffer.capacity, 8);

        buffer.upload(&gpu, &[]).unwrap();
        assert_eq!(buffer.count, 0);
    }
}
