use crate::common::Camera;

/// Keyboard-selected lighting mode, one light at a time like the fixed rig
/// it models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightMode {
    Off,
    Directional,
    Point,
    Spot,
}

/// The fixed lighting rig as a std140 uniform block. Vectors are padded to
/// vec4 and the scalar knobs are packed into `params`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct LightsUniform {
    dir_direction: glm::Vec4,
    dir_ambient: glm::Vec4,
    dir_diffuse: glm::Vec4,
    dir_specular: glm::Vec4,
    point_position: glm::Vec4,
    point_ambient: glm::Vec4,
    point_diffuse: glm::Vec4,
    point_specular: glm::Vec4,
    spot_position: glm::Vec4,
    spot_direction: glm::Vec4,
    spot_ambient: glm::Vec4,
    spot_diffuse: glm::Vec4,
    spot_specular: glm::Vec4,
    // x: point quadratic falloff, y: spot quadratic falloff,
    // z: spot cutoff cosine, w: spot exponent
    params: glm::Vec4,
    // x: directional on, y: point on, z: spot on
    toggles: glm::Vec4,
}

unsafe impl bytemuck::Zeroable for LightsUniform {}

unsafe impl bytemuck::Pod for LightsUniform {}

impl LightsUniform {
    pub fn new(camera: &Camera) -> Self {
        let mut lights = Self {
            dir_direction: glm::vec4(-0.2, -1.0, -0.3, 0.0),
            dir_ambient: glm::vec4(0.05, 0.05, 0.05, 0.0),
            dir_diffuse: glm::vec4(0.4, 0.4, 0.4, 0.0),
            dir_specular: glm::vec4(0.5, 0.5, 0.5, 0.0),
            point_position: glm::vec4(0.7, 0.2, 2.0, 0.0),
            point_ambient: glm::vec4(0.05, 0.05, 0.05, 0.0),
            point_diffuse: glm::vec4(0.8, 0.8, 0.8, 0.0),
            point_specular: glm::vec4(1.0, 1.0, 1.0, 0.0),
            spot_position: glm::Vec4::zeros(),
            spot_direction: glm::Vec4::zeros(),
            spot_ambient: glm::Vec4::zeros(),
            spot_diffuse: glm::vec4(0.8, 0.8, 0.0, 0.0),
            spot_specular: glm::vec4(0.8, 0.8, 0.0, 0.0),
            params: glm::vec4(0.032, 0.032, 12.5_f32.to_radians().cos(), 2.0),
            toggles: glm::vec4(1.0, 0.0, 0.0, 0.0),
        };
        lights.follow_camera(camera);
        lights
    }

    /// The spot light sits at the eye and shines along the view direction.
    pub fn follow_camera(&mut self, camera: &Camera) {
        let eye = camera.eye();
        let front = camera.front();
        self.spot_position = glm::vec4(eye.x, eye.y, eye.z, 0.0);
        self.spot_direction = glm::vec4(front.x, front.y, front.z, 0.0);
    }

    pub fn set_mode(&mut self, mode: LightMode) {
        self.toggles = match mode {
            LightMode::Off => glm::vec4(0.0, 0.0, 0.0, 0.0),
            LightMode::Directional => glm::vec4(1.0, 0.0, 0.0, 0.0),
            LightMode::Point => glm::vec4(0.0, 1.0, 0.0, 0.0),
            LightMode::Spot => glm::vec4(0.0, 0.0, 1.0, 0.0),
        };
    }

    pub fn create_bind_group_layout_entry() -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }
}
