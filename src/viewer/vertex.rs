pub trait Vertex {
    fn desc<'a>() -> wgpu::VertexBufferLayout<'a>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct VertexPosNorm {
    position: glm::Vec3,
    normal: glm::Vec3,
}

unsafe impl bytemuck::Zeroable for VertexPosNorm {}

unsafe impl bytemuck::Pod for VertexPosNorm {}

impl From<(&na::Point3<f32>, &na::Vector3<f32>)> for VertexPosNorm {
    fn from(pair: (&na::Point3<f32>, &na::Vector3<f32>)) -> Self {
        let (position, normal) = pair;
        VertexPosNorm {
            position: position.coords,
            normal: *normal,
        }
    }
}

impl Vertex for VertexPosNorm {
    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPosNorm>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<glm::Vec3>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
