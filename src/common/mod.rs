pub mod mesh;
pub mod trackball;

lazy_static::lazy_static! {
    pub static ref DEFAULT_RESOLUTION: glm::Vec2 = glm::vec2(640.0, 480.0);
}

static DEFAULT_Z_NEAR: f32 = 0.1;
static DEFAULT_Z_FAR: f32 = 1000.0;
static DEFAULT_FOVY: f32 = 45.0 * std::f32::consts::PI / 180.0;

/// Fixed viewing rig, eye on the +z axis looking at the origin.
pub struct Camera {
    pub cam_to_world: na::Isometry3<f32>,
    pub cam_to_screen: na::Perspective3<f32>,
}

impl Camera {
    pub fn new(
        cam_to_world: &na::Isometry3<f32>,
        cam_to_screen: &na::Perspective3<f32>,
    ) -> Camera {
        Camera {
            cam_to_world: *cam_to_world,
            cam_to_screen: *cam_to_screen,
        }
    }

    pub fn eye(&self) -> na::Point3<f32> {
        na::Point3::from(self.cam_to_world.translation.vector)
    }

    /// Unit vector from the eye towards the look-at target.
    pub fn front(&self) -> na::Vector3<f32> {
        self.cam_to_world * -na::Vector3::z()
    }

    pub fn view_proj(&self) -> glm::Mat4 {
        (self.cam_to_screen.to_projective() * self.cam_to_world.inverse()).to_homogeneous()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.cam_to_screen.set_aspect(aspect);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(
            &na::Isometry3::look_at_rh(
                &na::Point3::new(0.0, 0.0, 20.0),
                &na::Point3::origin(),
                &na::Vector3::new(0.0, 1.0, 0.0),
            )
            .inverse(),
            &na::Perspective3::new(
                DEFAULT_RESOLUTION.x / DEFAULT_RESOLUTION.y,
                DEFAULT_FOVY,
                DEFAULT_Z_NEAR,
                DEFAULT_Z_FAR,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_world_to_cam() {
        let test_cam = Camera::default();

        let test_cam_space = test_cam.cam_to_world.inverse() * na::Point3::origin();
        approx::assert_relative_eq!(
            test_cam_space,
            na::Point3::new(0.0, 0.0, -20.0),
            epsilon = 0.000_001
        );
    }

    #[test]
    fn test_camera_front() {
        let test_cam = Camera::default();

        approx::assert_relative_eq!(
            test_cam.front(),
            na::Vector3::new(0.0, 0.0, -1.0),
            epsilon = 0.000_001
        );
    }
}
