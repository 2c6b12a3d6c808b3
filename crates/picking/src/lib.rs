#![warn(missing_docs)]
//! Screen-to-world ray picking.
//!
//! A cursor position is unprojected through the camera into a world-space
//! [`Ray`], which is then tested against the bounding volumes of pickable
//! objects. Everything here is a pure function of the current frame's inputs.

mod ray;
mod viewport;
mod volume;

pub use ray::{unproject_to_ray, unproject_to_ray_at_depth, Ray, UNPROJECT_DEPTH};
pub use viewport::Viewport;
pub use volume::{intersects, Aabb, BoundingSphere, BoundingVolume};

use glam::Vec2;
use pickray_camera::CameraState;
use thiserror::Error;
use tracing::{debug, trace};

/// Failures surfaced by unprojection and ray construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickError {
    /// `projection * view` cannot be inverted.
    #[error("view-projection transform is not invertible")]
    SingularTransform,
    /// The unprojected point coincides with the camera, so no direction exists.
    #[error("ray direction has zero length")]
    DegenerateDirection,
    /// The unprojected point has a homogeneous `w` of zero.
    #[error("unprojected point lies at infinity")]
    PointAtInfinity,
    /// Viewport has zero width or height.
    #[error("viewport has zero area")]
    EmptyViewport,
}

/// Per-object pick results for one frame, in the order the volumes were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickReport {
    /// Distance along the ray to each volume, `None` on a miss.
    pub hits: Vec<Option<f32>>,
}

impl PickReport {
    /// Report with every one of `count` objects missed.
    pub fn all_missed(count: usize) -> Self {
        Self {
            hits: vec![None; count],
        }
    }

    /// Collapsed flag: did anything get hit.
    pub fn any(&self) -> bool {
        self.hits.iter().any(Option::is_some)
    }

    /// Index of the first volume (in enumeration order) that was hit.
    pub fn first(&self) -> Option<usize> {
        self.hits.iter().position(Option::is_some)
    }

    /// Whether the object at `index` was hit.
    pub fn is_hit(&self, index: usize) -> bool {
        matches!(self.hits.get(index), Some(Some(_)))
    }
}

/// Test the ray against every volume and keep each result.
pub fn pick_each(ray: &Ray, volumes: &[BoundingVolume]) -> PickReport {
    PickReport {
        hits: volumes.iter().map(|volume| volume.intersect(ray)).collect(),
    }
}

/// Stop at the first volume the ray hits and report a single flag.
pub fn pick_any(ray: &Ray, volumes: &[BoundingVolume]) -> bool {
    volumes.iter().any(|volume| volume.intersects(ray))
}

/// Per-frame picking entry point: unproject the cursor, then test every volume.
#[derive(Debug, Clone, Copy)]
pub struct RayPicker {
    /// Normalized depth the cursor is unprojected at.
    pub depth: f32,
}

impl Default for RayPicker {
    fn default() -> Self {
        Self {
            depth: UNPROJECT_DEPTH,
        }
    }
}

impl RayPicker {
    /// Create a picker using [`UNPROJECT_DEPTH`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the ray for `screen` through `camera`.
    pub fn ray(
        &self,
        screen: Vec2,
        viewport: &Viewport,
        camera: &CameraState,
    ) -> Result<Ray, PickError> {
        unproject_to_ray_at_depth(
            screen,
            self.depth,
            viewport,
            &camera.projection,
            &camera.view,
            camera.position,
        )
    }

    /// Pick every volume from `screen`.
    ///
    /// A degenerate ray direction counts as a miss for every object; other
    /// errors are returned for the caller to handle.
    pub fn pick(
        &self,
        screen: Vec2,
        viewport: &Viewport,
        camera: &CameraState,
        volumes: &[BoundingVolume],
    ) -> Result<PickReport, PickError> {
        let ray = match self.ray(screen, viewport, camera) {
            Ok(ray) => ray,
            Err(PickError::DegenerateDirection) => {
                debug!(x = screen.x, y = screen.y, "degenerate pick ray; treating as miss");
                return Ok(PickReport::all_missed(volumes.len()));
            }
            Err(err) => return Err(err),
        };
        trace!(origin = ?ray.origin, direction = ?ray.direction, "pick ray");
        Ok(pick_each(&ray, volumes))
    }
}
