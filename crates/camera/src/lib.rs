#![warn(missing_docs)]
//! Perspective look-at camera for picking scenes.

use glam::{Mat4, Vec3};

/// Camera transforms for one frame, read by the picker and never mutated by it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Camera position in world space.
    pub position: Vec3,
    /// World space -> camera space.
    pub view: Mat4,
    /// Camera space -> clip space.
    pub projection: Mat4,
}

impl CameraState {
    /// Combined `projection * view`.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Camera looking from `position` toward `target`.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// World up direction.
    pub up: Vec3,

    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect: 4.0 / 3.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Compute the projection matrix (camera space -> clip space).
    ///
    /// Depth maps to `[0, 1]`, so normalized depth 1.0 lies on the far plane.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio (call when the viewport resizes).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Snapshot the transforms for the current frame.
    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            view: self.view_matrix(),
            projection: self.projection_matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_default_initialization() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 100.0);
    }

    #[test]
    fn camera_forward_points_at_target() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!(forward.y.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn view_matrix_moves_target_in_front() {
        let camera = Camera::default();
        let target_in_view = camera.view_matrix().transform_point3(camera.target);
        // Right-handed view space looks down -Z.
        assert!((target_in_view - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn far_plane_maps_to_depth_one() {
        let camera = Camera::default();
        let far_point = camera.position + camera.forward() * camera.far;
        let ndc = camera.view_projection_matrix().project_point3(far_point);
        assert!((ndc.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn set_aspect_handles_zero_height() {
        let mut camera = Camera::default();
        camera.set_aspect(800, 600);
        assert!((camera.aspect - 4.0 / 3.0).abs() < 1e-6);
        camera.set_aspect(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }

    #[test]
    fn state_snapshot_matches_matrices() {
        let camera = Camera::looking_at(Vec3::new(3.0, 4.0, 5.0), Vec3::ONE);
        let state = camera.state();
        assert_eq!(state.position, camera.position);
        assert_eq!(state.view, camera.view_matrix());
        assert_eq!(state.view_projection(), camera.view_projection_matrix());

        assert!(state.view.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(state.projection.to_cols_array().iter().all(|x| x.is_finite()));
    }
}
