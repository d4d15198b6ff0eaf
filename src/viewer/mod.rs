mod lights;
mod mesh;
mod pipeline;
mod shaders;
mod texture;
mod vertex;

pub use lights::LightMode;

use crate::common::{mesh::Mesh, Camera};
use lights::LightsUniform;
use mesh::{DrawMesh, MeshRenderPass};
use wgpu::util::DeviceExt;
use winit::window::Window;

lazy_static::lazy_static! {
    #[rustfmt::skip]
    static ref OPENGL_TO_WGPU_MATRIX: glm::Mat4 = glm::mat4(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    );
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct Uniforms {
    view_proj: glm::Mat4,
    model: glm::Mat4,
    eye: glm::Vec4,
}

unsafe impl bytemuck::Zeroable for Uniforms {}

unsafe impl bytemuck::Pod for Uniforms {}

impl Uniforms {
    fn new() -> Self {
        Self {
            view_proj: glm::Mat4::identity(),
            model: glm::Mat4::identity(),
            eye: glm::Vec4::zeros(),
        }
    }

    fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = *OPENGL_TO_WGPU_MATRIX * camera.view_proj();
        let eye = camera.eye();
        self.eye = glm::vec4(eye.x, eye.y, eye.z, 1.0);
    }

    fn update_model(&mut self, mesh: &Mesh) {
        self.model = mesh.to_world;
    }

    pub fn create_bind_group_layout_entry() -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }
}

pub struct Viewer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    mesh_render_pass: MeshRenderPass,
    uniforms: Uniforms,
    uniform_buffer: wgpu::Buffer,
    lights: LightsUniform,
    lights_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_texture: texture::Texture,
    pub size: winit::dpi::PhysicalSize<u32>,
    log: slog::Logger,
}

impl Viewer {
    pub async fn new(
        log: &slog::Logger,
        window: &Window,
        models: &[Mesh],
        camera: &Camera,
    ) -> Self {
        let log = log.new(o!("module" => "viewer"));

        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = unsafe { instance.create_surface(window) }.unwrap();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        debug!(log, "{:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .unwrap();

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: texture::Texture::COLOR_FORMAT,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let mut compiler = shaderc::Compiler::new().unwrap();

        let mut uniforms = Uniforms::new();
        uniforms.update_view_proj(camera);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let lights = LightsUniform::new(camera);
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[lights]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    Uniforms::create_bind_group_layout_entry(),
                    LightsUniform::create_bind_group_layout_entry(),
                ],
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
            label: Some("uniform_bind_group"),
        });

        let mesh_render_pass =
            MeshRenderPass::from_models(&device, &mut compiler, &uniform_bind_group_layout, models);

        let depth_texture =
            texture::Texture::create_depth_texture(&device, &config, "depth_texture");

        Self {
            surface,
            device,
            queue,
            config,
            mesh_render_pass,
            uniforms,
            uniform_buffer,
            lights,
            lights_buffer,
            uniform_bind_group,
            depth_texture,
            size,
            log,
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>, camera: &mut Camera) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            texture::Texture::create_depth_texture(&self.device, &self.config, "depth_texture");

        camera.set_aspect(new_size.width as f32 / new_size.height as f32);
        self.uniforms.update_view_proj(camera);
    }

    pub fn set_light_mode(&mut self, mode: LightMode) {
        info!(self.log, "switching light mode"; "mode" => ?mode);
        self.lights.set_mode(mode);
        self.queue
            .write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[self.lights]));
    }

    /// Pushes the selected model's transform (and the current view) to the
    /// GPU. Called once per frame before `render`.
    pub fn update_model(&mut self, mesh: &Mesh, camera: &Camera) {
        self.uniforms.update_view_proj(camera);
        self.uniforms.update_model(mesh);
        self.lights.follow_camera(camera);

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniforms]),
        );
        self.queue
            .write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[self.lights]));
    }

    pub fn render(&mut self, selected: usize) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(err) => {
                warn!(self.log, "dropping frame"; "error" => %err);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.05,
                            b: 0.05,
                            a: 1.0,
                        }),
                        store: true,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: true,
                    }),
                    stencil_ops: None,
                }),
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.draw_selected_mesh(&self.mesh_render_pass, selected);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}
