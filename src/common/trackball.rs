//! Maps 2D cursor positions onto a logical unit hemisphere centered in the
//! viewport, so a mouse drag becomes an axis/angle rotation.

/// Drags shorter than this are treated as jitter, not input.
pub const DRAG_EPSILON: f32 = 1e-4;

/// Projects a cursor position onto the hemisphere. Points outside the unit
/// circle land on the equator rather than off the sphere. Returns a unit
/// vector.
pub fn project(x: f64, y: f64, width: u32, height: u32) -> glm::Vec3 {
    let width = width as f32;
    let height = height as f32;
    let mut v = glm::vec3(
        (2.0 * x as f32 - width) / width,
        // Screen y grows downward, the sphere's y grows upward.
        (height - 2.0 * y as f32) / height,
        0.0,
    );
    let d = glm::length(&v).min(1.0);
    // The excess over 1.0 keeps the root real at d == 1 despite float error.
    v.z = (1.001 - d * d).sqrt();
    glm::normalize(&v)
}

/// Derives the rotation carrying `last` onto `cur`. Returns `None` for
/// displacements below `DRAG_EPSILON` or a degenerate axis.
pub fn rotation_between(last: &glm::Vec3, cur: &glm::Vec3) -> Option<(f32, glm::Vec3)> {
    if glm::length(&(cur - last)) < DRAG_EPSILON {
        return None;
    }

    let cos_angle = glm::dot(last, cur) / (glm::length(last) * glm::length(cur));
    let angle = cos_angle.clamp(-1.0, 1.0).acos();

    let axis = glm::cross(cur, last);
    if glm::length(&axis) < DRAG_EPSILON {
        return None;
    }

    Some((angle, glm::normalize(&axis)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_viewport_center_hits_apex() {
        let mapped = project(320.0, 240.0, 640, 480);
        approx::assert_relative_eq!(mapped.x, 0.0);
        approx::assert_relative_eq!(mapped.y, 0.0);
        approx::assert_relative_eq!(mapped.z, 1.0, epsilon = 0.001);
        approx::assert_relative_eq!(glm::length(&mapped), 1.0, epsilon = 0.000_001);
    }

    #[test]
    fn test_project_viewport_edge_clamps_to_equator() {
        let mapped = project(640.0, 240.0, 640, 480);
        // Planar distance clamps to 1, leaving z = sqrt(0.001) before the
        // final normalization.
        approx::assert_relative_eq!(
            mapped.z / mapped.x,
            0.001_f32.sqrt(),
            epsilon = 0.000_01
        );
        approx::assert_relative_eq!(glm::length(&mapped), 1.0, epsilon = 0.000_001);
    }

    #[test]
    fn test_project_far_outside_viewport_stays_on_sphere() {
        let mapped = project(6400.0, -2000.0, 640, 480);
        assert!(mapped.z.is_finite());
        approx::assert_relative_eq!(glm::length(&mapped), 1.0, epsilon = 0.000_001);
    }

    #[test]
    fn test_rotation_between_quarter_turn() {
        let last = glm::vec3(0.0, 0.0, 1.0);
        let cur = glm::vec3(1.0, 0.0, 0.0);
        let (angle, axis) = rotation_between(&last, &cur).unwrap();

        approx::assert_relative_eq!(angle, std::f32::consts::FRAC_PI_2, epsilon = 0.000_001);
        // cross(cur, last) points along -y for a drag to the right.
        approx::assert_relative_eq!(axis, glm::vec3(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_rotation_between_computes_all_axis_components() {
        let last = glm::normalize(&glm::vec3(0.3, 0.4, 0.86));
        let cur = glm::normalize(&glm::vec3(-0.2, 0.5, 0.84));
        let (_, axis) = rotation_between(&last, &cur).unwrap();

        assert!(axis.x != 0.0);
        assert!(axis.y != 0.0);
        assert!(axis.z != 0.0);
        approx::assert_relative_eq!(glm::dot(&axis, &last), 0.0, epsilon = 0.000_001);
        approx::assert_relative_eq!(glm::dot(&axis, &cur), 0.0, epsilon = 0.000_001);
    }

    #[test]
    fn test_rotation_suppressed_below_epsilon() {
        let last = glm::vec3(0.0, 0.0, 1.0);
        let cur = glm::vec3(0.000_01, 0.0, 1.0);
        assert!(rotation_between(&last, &cur).is_none());
    }

    #[test]
    fn test_rotation_suppressed_for_identical_points() {
        let point = project(100.0, 100.0, 640, 480);
        assert!(rotation_between(&point, &point).is_none());
    }
}
