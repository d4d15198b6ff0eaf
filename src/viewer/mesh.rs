use super::vertex::VertexPosNorm;
use super::{pipeline::create_render_pipeline, shaders};
use crate::common::mesh::Mesh;
use itertools::Itertools;
use wgpu::util::DeviceExt;

/// GPU-side buffers for one loaded model, uploaded once at startup.
pub struct MeshHandle {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: usize,
}

impl MeshHandle {
    pub fn from_mesh(device: &wgpu::Device, mesh: &Mesh) -> Self {
        // Normals are a parallel stream by declaration order and may be
        // shorter than the vertex list; missing entries get a placeholder.
        let fallback = na::Vector3::y();
        let vertices = mesh
            .vertices
            .iter()
            .enumerate()
            .map(|(i, pos)| VertexPosNorm::from((pos, mesh.normals.get(i).unwrap_or(&fallback))))
            .collect_vec();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices[..]),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices[..]),
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshHandle {
            vertex_buffer,
            index_buffer,
            num_elements: mesh.indices.len(),
        }
    }
}

pub struct MeshRenderPass {
    render_pipeline: wgpu::RenderPipeline,
    handles: Vec<MeshHandle>,
}

impl MeshRenderPass {
    pub fn from_models(
        device: &wgpu::Device,
        mut compiler: &mut shaderc::Compiler,
        uniform_bind_group_layout: &wgpu::BindGroupLayout,
        models: &[Mesh],
    ) -> Self {
        let (vs_module, fs_module) = shaders::phong::compile_shaders(&mut compiler, &device);

        let handles = models
            .iter()
            .map(|mesh| MeshHandle::from_mesh(&device, mesh))
            .collect_vec();

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = create_render_pipeline::<VertexPosNorm>(
            &device,
            render_pipeline_layout,
            &vs_module,
            &fs_module,
            wgpu::PrimitiveTopology::TriangleList,
            true,
        );

        MeshRenderPass {
            render_pipeline,
            handles,
        }
    }
}

pub trait DrawMesh<'a, 'b>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, handle: &'b MeshHandle);
    fn draw_selected_mesh(&mut self, meshes: &'b MeshRenderPass, selected: usize);
}

impl<'a, 'b> DrawMesh<'a, 'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, handle: &'b MeshHandle) {
        self.set_vertex_buffer(0, handle.vertex_buffer.slice(..));
        self.set_index_buffer(handle.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..handle.num_elements as u32, 0, 0..1);
    }

    fn draw_selected_mesh(&mut self, meshes: &'b MeshRenderPass, selected: usize) {
        self.set_pipeline(&meshes.render_pipeline);
        self.draw_mesh(&meshes.handles[selected]);
    }
}
