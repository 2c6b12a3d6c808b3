//! World-space rays built from screen positions.

use glam::{Mat4, Vec2, Vec3};

use crate::{PickError, Viewport};

/// Normalized depth used when unprojecting the cursor: the far plane.
///
/// Any depth on the line through the camera gives the same direction.
pub const UNPROJECT_DEPTH: f32 = 1.0;

/// Half-line starting at `origin` and extending along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start of the ray in world space.
    pub origin: Vec3,
    /// Unit-length direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    ///
    /// Zero-length or non-finite directions yield [`PickError::DegenerateDirection`].
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, PickError> {
        let direction = direction
            .try_normalize()
            .ok_or(PickError::DegenerateDirection)?;
        Ok(Self { origin, direction })
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Turn a screen position into the ray from the camera through that pixel.
///
/// The pixel is unprojected at [`UNPROJECT_DEPTH`] with an identity world
/// transform. The origin is `camera_position` itself, not the unprojected point.
pub fn unproject_to_ray(
    screen: Vec2,
    viewport: &Viewport,
    projection: &Mat4,
    view: &Mat4,
    camera_position: Vec3,
) -> Result<Ray, PickError> {
    unproject_to_ray_at_depth(
        screen,
        UNPROJECT_DEPTH,
        viewport,
        projection,
        view,
        camera_position,
    )
}

/// [`unproject_to_ray`] with an explicit normalized depth.
pub fn unproject_to_ray_at_depth(
    screen: Vec2,
    depth: f32,
    viewport: &Viewport,
    projection: &Mat4,
    view: &Mat4,
    camera_position: Vec3,
) -> Result<Ray, PickError> {
    let world_point = viewport.unproject(
        screen.extend(depth),
        projection,
        view,
        &Mat4::IDENTITY,
    )?;
    Ray::new(camera_position, world_point - camera_position)
}
