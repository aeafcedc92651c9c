#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use gpu::{Globals, RenderFrame, RenderSurface, SphereInstance, SpherePass, SurfaceError};
    use std::borrow::Cow;
    use wasm_bindgen::JsCast;

    #[derive(Debug)]
    pub struct WgpuSurface {
        surface: ::wgpu::Surface<'static>,
        device: ::wgpu::Device,
        queue: ::wgpu::Queue,
        config: ::wgpu::SurfaceConfiguration,
        _canvas: web_sys::HtmlCanvasElement,
        lit_pipeline: ::wgpu::RenderPipeline,
        back_pipeline: ::wgpu::RenderPipeline,
        unlit_pipeline: ::wgpu::RenderPipeline,
        uniform_buffer: ::wgpu::Buffer,
        uniform_bind_group: ::wgpu::BindGroup,
        depth_view: ::wgpu::TextureView,
        vertex_buffer: ::wgpu::Buffer,
        index_buffer: ::wgpu::Buffer,
        index_count: u32,
        // Dropped after the surface and device above.
        _instance: ::wgpu::Instance,
    }

    const SPHERE_SHADER: &str = r#"
struct PointLight {
    position: vec3<f32>,
    intensity: f32,
};

struct Globals {
    view_proj: mat4x4<f32>,
    eye: vec3<f32>,
    ambient: f32,
    lights: array<PointLight, 2>,
    light_count: u32,
    shininess: f32,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) world: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) center_radius: vec4<f32>,
    @location(3) color: vec4<f32>,
) -> VsOut {
    let world = center_radius.xyz + position * center_radius.w;
    return VsOut(globals.view_proj * vec4<f32>(world, 1.0), world, normal, color);
}

@fragment
fn fs_unlit(fs_in: VsOut) -> @location(0) vec4<f32> {
    return fs_in.color;
}

@fragment
fn fs_lit(fs_in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(fs_in.normal);
    let v = normalize(globals.eye - fs_in.world);
    var rgb = fs_in.color.rgb * globals.ambient;
    for (var i = 0u; i < globals.light_count; i = i + 1u) {
        let light = globals.lights[i];
        let l = normalize(light.position - fs_in.world);
        let diffuse = max(dot(n, l), 0.0);
        let h = normalize(l + v);
        let specular = pow(max(dot(n, h), 0.0), globals.shininess);
        rgb = rgb + light.intensity * (fs_in.color.rgb * diffuse + vec3<f32>(0.067) * specular);
    }
    return vec4<f32>(rgb, fs_in.color.a);
}
"#;

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Vertex {
        position: [f32; 3],
        normal: [f32; 3],
    }

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("globe-depth"),
            size: ::wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: ::wgpu::TextureFormat::Depth24Plus,
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    /// Unit sphere, counter-clockwise when seen from outside.
    fn generate_sphere_mesh(lat_segments: u32, lon_segments: u32) -> (Vec<Vertex>, Vec<u16>) {
        let lat_segments = lat_segments.max(3);
        let lon_segments = lon_segments.max(3);

        let mut vertices = Vec::with_capacity(((lat_segments + 1) * (lon_segments + 1)) as usize);
        for lat in 0..=lat_segments {
            let theta = lat as f32 / lat_segments as f32 * std::f32::consts::PI;
            let (sin_t, cos_t) = theta.sin_cos();
            for lon in 0..=lon_segments {
                let phi = lon as f32 / lon_segments as f32 * std::f32::consts::TAU;
                let (sin_p, cos_p) = phi.sin_cos();
                let p = [sin_t * cos_p, cos_t, sin_t * sin_p];
                vertices.push(Vertex {
                    position: p,
                    normal: p,
                });
            }
        }

        let stride = lon_segments + 1;
        let mut indices = Vec::with_capacity((lat_segments * lon_segments * 6) as usize);
        for lat in 0..lat_segments {
            for lon in 0..lon_segments {
                let i0 = lat * stride + lon;
                let i1 = i0 + 1;
                let i2 = i0 + stride;
                let i3 = i2 + 1;
                indices.extend([i0, i1, i2, i1, i3, i2].map(|i| i as u16));
            }
        }

        (vertices, indices)
    }

    #[allow(clippy::too_many_arguments)]
    fn create_sphere_pipeline(
        device: &::wgpu::Device,
        layout: &::wgpu::PipelineLayout,
        shader: &::wgpu::ShaderModule,
        format: ::wgpu::TextureFormat,
        label: &str,
        fragment_entry: &str,
        cull_mode: ::wgpu::Face,
        depth_write_enabled: bool,
    ) -> ::wgpu::RenderPipeline {
        device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: ::wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    ::wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as ::wgpu::BufferAddress,
                        step_mode: ::wgpu::VertexStepMode::Vertex,
                        attributes: &[
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32x3,
                                offset: 0,
                                shader_location: 0,
                            },
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32x3,
                                offset: 12,
                                shader_location: 1,
                            },
                        ],
                    },
                    ::wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<SphereInstance>() as ::wgpu::BufferAddress,
                        step_mode: ::wgpu::VertexStepMode::Instance,
                        attributes: &[
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32x4,
                                offset: 0,
                                shader_location: 2,
                            },
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32x4,
                                offset: 16,
                                shader_location: 3,
                            },
                        ],
                    },
                ],
            },
            fragment: Some(::wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format,
                    blend: Some(::wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                cull_mode: Some(cull_mode),
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(::wgpu::DepthStencilState {
                format: ::wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled,
                depth_compare: ::wgpu::CompareFunction::LessEqual,
                stencil: ::wgpu::StencilState::default(),
                bias: ::wgpu::DepthBiasState::default(),
            }),
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn unavailable(what: &str, e: impl std::fmt::Display) -> SurfaceError {
        SurfaceError::Unavailable(format!("{what}: {e}"))
    }

    impl WgpuSurface {
        pub async fn from_canvas_id(canvas_id: &str) -> Result<Self, SurfaceError> {
            let window = web_sys::window().ok_or_else(|| unavailable("window", "missing"))?;
            let document = window
                .document()
                .ok_or_else(|| unavailable("document", "missing"))?;
            let canvas_elem = document
                .get_element_by_id(canvas_id)
                .ok_or_else(|| unavailable("canvas", format!("#{canvas_id} missing")))?
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .map_err(|_| unavailable("canvas", "element is not a canvas"))?;

            let width = canvas_elem.width().max(1);
            let height = canvas_elem.height().max(1);

            let instance = ::wgpu::Instance::new(&::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            });

            let surface = instance
                .create_surface(::wgpu::SurfaceTarget::Canvas(canvas_elem.clone()))
                .map_err(|e| unavailable("surface", e))?;

            let adapter = instance
                .request_adapter(&::wgpu::RequestAdapterOptions {
                    power_preference: ::wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .map_err(|e| unavailable("adapter", e))?;

            let (device, queue) = adapter
                .request_device(&::wgpu::DeviceDescriptor {
                    label: Some("globe-device"),
                    required_features: ::wgpu::Features::empty(),
                    required_limits: ::wgpu::Limits::downlevel_webgl2_defaults(),
                    ..Default::default()
                })
                .await
                .map_err(|e| unavailable("device", e))?;

            let surface_caps = surface.get_capabilities(&adapter);
            let format = surface_caps
                .formats
                .iter()
                .copied()
                .find(|f| f.is_srgb())
                .or_else(|| surface_caps.formats.first().copied())
                .ok_or_else(|| unavailable("surface", "no supported formats"))?;
            let alpha_mode = surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(::wgpu::CompositeAlphaMode::Auto);

            let config = ::wgpu::SurfaceConfiguration {
                usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width,
                height,
                desired_maximum_frame_latency: 2,
                present_mode: ::wgpu::PresentMode::Fifo,
                alpha_mode,
                view_formats: vec![],
            };
            surface.configure(&device, &config);

            let depth_view = create_depth_view(&device, &config);

            let shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
                label: Some("globe-sphere-shader"),
                source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(SPHERE_SHADER)),
            });

            let uniform_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
                label: Some("globe-globals"),
                size: std::mem::size_of::<Globals>() as u64,
                usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            let uniform_bind_group_layout =
                device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
                    label: Some("globe-globals-bgl"),
                    entries: &[::wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: ::wgpu::BindingType::Buffer {
                            ty: ::wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

            let uniform_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
                label: Some("globe-globals-bg"),
                layout: &uniform_bind_group_layout,
                entries: &[::wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

            let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
                label: Some("globe-sphere-pipeline-layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                immediate_size: 0,
            });

            // Lit spheres write depth so markers on the far side are hidden.
            let lit_pipeline = create_sphere_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                config.format,
                "globe-lit-pipeline",
                "fs_lit",
                ::wgpu::Face::Back,
                true,
            );
            let back_pipeline = create_sphere_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                config.format,
                "globe-back-pipeline",
                "fs_unlit",
                ::wgpu::Face::Front,
                false,
            );
            let unlit_pipeline = create_sphere_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                config.format,
                "globe-unlit-pipeline",
                "fs_unlit",
                ::wgpu::Face::Back,
                false,
            );

            let (vertices, indices) = generate_sphere_mesh(48, 64);
            let vertex_buffer = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("globe-sphere-vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: ::wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("globe-sphere-indices"),
                contents: bytemuck::cast_slice(&indices),
                usage: ::wgpu::BufferUsages::INDEX,
            });

            Ok(WgpuSurface {
                _instance: instance,
                surface,
                device,
                queue,
                config,
                _canvas: canvas_elem,
                lit_pipeline,
                back_pipeline,
                unlit_pipeline,
                uniform_buffer,
                uniform_bind_group,
                depth_view,
                vertex_buffer,
                index_buffer,
                index_count: indices.len() as u32,
            })
        }

        fn instance_buffer(&self, instances: &[SphereInstance]) -> Option<::wgpu::Buffer> {
            if instances.is_empty() {
                return None;
            }
            Some(self.device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some("globe-sphere-instances"),
                contents: bytemuck::cast_slice(instances),
                usage: ::wgpu::BufferUsages::VERTEX,
            }))
        }
    }

    impl RenderSurface for WgpuSurface {
        fn size(&self) -> (u32, u32) {
            (self.config.width, self.config.height)
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.config.width = width.max(1);
            self.config.height = height.max(1);
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }

        fn submit(&mut self, frame: &RenderFrame) -> Result<(), SurfaceError> {
            let output = match self.surface.get_current_texture() {
                Ok(output) => output,
                Err(e) if super::acquire_is_recoverable(&e) => {
                    // Skip this frame; the next one acquires from the fresh configuration.
                    self.surface.configure(&self.device, &self.config);
                    return Ok(());
                }
                Err(e) => return Err(SurfaceError::Lost(format!("surface acquire failed: {e}"))),
            };
            let view = output
                .texture
                .create_view(&::wgpu::TextureViewDescriptor::default());

            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&frame.globals));

            // Lit bodies first, then the atmosphere shell, then blended markers.
            let lit = frame.lit_instances();
            let batches = [
                (&self.lit_pipeline, self.instance_buffer(&lit), lit.len()),
                {
                    let back = frame.instances(SpherePass::BackSide);
                    (&self.back_pipeline, self.instance_buffer(&back), back.len())
                },
                {
                    let unlit = frame.instances(SpherePass::Unlit);
                    (&self.unlit_pipeline, self.instance_buffer(&unlit), unlit.len())
                },
            ];

            let mut encoder = self
                .device
                .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                    label: Some("globe-encoder"),
                });

            {
                let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                    label: Some("globe-pass"),
                    color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        depth_slice: None,
                        ops: ::wgpu::Operations {
                            load: ::wgpu::LoadOp::Clear(::wgpu::Color::TRANSPARENT),
                            store: ::wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(::wgpu::Operations {
                            load: ::wgpu::LoadOp::Clear(1.0),
                            store: ::wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                    multiview_mask: None,
                });

                rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                rpass.set_index_buffer(self.index_buffer.slice(..), ::wgpu::IndexFormat::Uint16);
                for (pipeline, buffer, count) in &batches {
                    let Some(buffer) = buffer else { continue };
                    rpass.set_pipeline(pipeline);
                    rpass.set_vertex_buffer(1, buffer.slice(..));
                    rpass.draw_indexed(0..self.index_count, 0, 0..*count as u32);
                }
            }

            self.queue.submit(std::iter::once(encoder.finish()));
            output.present();
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::{RenderFrame, RenderSurface, SurfaceError};

    #[derive(Debug, Default)]
    pub struct WgpuSurface;

    impl WgpuSurface {
        pub async fn from_canvas_id(_canvas_id: &str) -> Result<Self, SurfaceError> {
            Err(SurfaceError::Unavailable(
                "wgpu initialization is only available on wasm32 targets".to_string(),
            ))
        }
    }

    impl RenderSurface for WgpuSurface {
        fn size(&self) -> (u32, u32) {
            (1, 1)
        }

        fn resize(&mut self, _width: u32, _height: u32) {}

        fn submit(&mut self, _frame: &RenderFrame) -> Result<(), SurfaceError> {
            Err(SurfaceError::Unavailable(
                "wgpu rendering is only available on wasm32 targets".to_string(),
            ))
        }
    }
}

pub use imp::WgpuSurface;

/// Acquire failures that only cost the current frame. `Lost` and
/// `OutOfMemory` end rendering for the session.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn acquire_is_recoverable(err: &::wgpu::SurfaceError) -> bool {
    match err {
        ::wgpu::SurfaceError::Timeout | ::wgpu::SurfaceError::Outdated => true,
        ::wgpu::SurfaceError::Lost | ::wgpu::SurfaceError::OutOfMemory => false,
        _ => true,
    }
}
