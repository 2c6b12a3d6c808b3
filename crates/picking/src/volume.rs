//! Bounding volumes and ray intersection tests.

use glam::Vec3;

use crate::Ray;

/// Sphere approximating an object's extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center in world space.
    pub center: Vec3,
    /// Radius (non-negative).
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a sphere from center and radius.
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "sphere radius must be non-negative");
        Self { center, radius }
    }

    /// Whether `point` lies inside or on the sphere.
    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Nearest non-negative ray parameter at which the ray meets the sphere.
    ///
    /// Solves `|o + t·d - c|² = r²` for unit `d`. Returns `Some(0.0)` when the
    /// origin is already inside, `None` when both roots lie behind the origin or
    /// the ray misses.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let offset = ray.origin - self.center;
        let b = offset.dot(ray.direction);
        let c = offset.length_squared() - self.radius * self.radius;

        if c <= 0.0 {
            return Some(0.0);
        }
        // Outside and facing away.
        if b > 0.0 {
            return None;
        }

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        Some((-b - discriminant.sqrt()).max(0.0))
    }
}

/// Axis-aligned box, usable wherever a sphere is too loose a fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all(), "aabb min must not exceed max");
        Self { min, max }
    }

    /// Create a box from center position and full size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Nearest non-negative ray parameter at which the ray enters the box (slab test).
    ///
    /// Faces are closed: a ray grazing a face or edge counts as a hit, as with a
    /// tangent sphere.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            // Parallel to this slab: either always inside it or never.
            if direction == 0.0 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = direction.recip();
            let t1 = (lo - origin) * inv;
            let t2 = (hi - origin) * inv;
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }

        // Entire box behind the origin, or slabs never overlap.
        if tmax < 0.0 || tmin > tmax {
            return None;
        }

        Some(tmin.max(0.0))
    }
}

/// Convex volume tested by the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    /// Bounding sphere.
    Sphere(BoundingSphere),
    /// Axis-aligned bounding box.
    Aabb(Aabb),
}

impl BoundingVolume {
    /// Distance along `ray` to the volume, if it is in front of (or around) the origin.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            BoundingVolume::Sphere(sphere) => sphere.intersect(ray),
            BoundingVolume::Aabb(aabb) => aabb.intersect(ray),
        }
    }

    /// Boolean form of [`BoundingVolume::intersect`].
    pub fn intersects(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }
}

impl From<BoundingSphere> for BoundingVolume {
    fn from(sphere: BoundingSphere) -> Self {
        BoundingVolume::Sphere(sphere)
    }
}

impl From<Aabb> for BoundingVolume {
    fn from(aabb: Aabb) -> Self {
        BoundingVolume::Aabb(aabb)
    }
}

/// Test `ray` against a single volume.
pub fn intersects(ray: &Ray, volume: &BoundingVolume) -> bool {
    volume.intersects(ray)
}
