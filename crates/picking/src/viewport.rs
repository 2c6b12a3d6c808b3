//! Viewport rectangle and screen-space unprojection.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::PickError;

/// Rectangle of the render target that screen positions are measured against.
///
/// `x`/`y` offset the rectangle inside the window; the depth range maps
/// normalized device depth onto the values callers pass to [`Viewport::unproject`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Depth value mapped to the near plane.
    pub min_depth: f32,
    /// Depth value mapped to the far plane.
    pub max_depth: f32,
}

impl Viewport {
    /// Full-window viewport with the default `[0, 1]` depth range.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Size as a vector, for bounds checks against screen positions.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Map a screen point (pixels, plus depth in `[min_depth, max_depth]`) back into
    /// the space `world` places geometry in.
    ///
    /// Screen Y grows downward, so it is flipped on the way to normalized device
    /// coordinates. The combined `projection * view * world` transform must be
    /// invertible.
    pub fn unproject(
        &self,
        source: Vec3,
        projection: &Mat4,
        view: &Mat4,
        world: &Mat4,
    ) -> Result<Vec3, PickError> {
        if self.width == 0 || self.height == 0 {
            return Err(PickError::EmptyViewport);
        }

        let combined = *projection * *view * *world;
        let det = combined.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(PickError::SingularTransform);
        }
        let inverse = combined.inverse();

        let depth_range = self.max_depth - self.min_depth;
        let ndc_z = if depth_range == 0.0 {
            0.0
        } else {
            (source.z - self.min_depth) / depth_range
        };
        let ndc = Vec4::new(
            (source.x - self.x) / self.width as f32 * 2.0 - 1.0,
            -((source.y - self.y) / self.height as f32 * 2.0 - 1.0),
            ndc_z,
            1.0,
        );

        let point = inverse * ndc;
        if point.w == 0.0 || !point.w.is_finite() {
            return Err(PickError::PointAtInfinity);
        }
        Ok(point.truncate() / point.w)
    }
}
