//! Property-based tests for pick rays
//!
//! Validates ray invariants for every on-screen cursor position:
//! - Direction is unit length
//! - Origin is exactly the camera position
//! - Building the same ray twice gives the same result
//! - A sphere placed on the ray in front of the camera is always hit

use glam::{Vec2, Vec3};
use pickray_camera::Camera;
use pickray_picking::{unproject_to_ray, BoundingSphere, Ray, Viewport};
use proptest::prelude::*;

fn scene() -> (Viewport, Camera) {
    let viewport = Viewport::new(800, 600);
    let mut camera = Camera::default();
    camera.set_aspect(viewport.width, viewport.height);
    (viewport, camera)
}

fn ray_for(screen: Vec2, camera_pos: Vec3) -> Ray {
    let (viewport, mut camera) = scene();
    camera.position = camera_pos;
    let state = camera.state();
    unproject_to_ray(
        screen,
        &viewport,
        &state.projection,
        &state.view,
        state.position,
    )
    .expect("well-formed camera yields a ray")
}

proptest! {
    /// Property: ray direction is always normalized
    #[test]
    fn direction_is_unit_length(x in 0.0f32..800.0, y in 0.0f32..600.0) {
        let ray = ray_for(Vec2::new(x, y), Vec3::new(0.0, 0.0, 10.0));
        prop_assert!((ray.direction.length() - 1.0).abs() < 1e-4);
    }

    /// Property: ray origin equals the supplied camera position bit-for-bit
    #[test]
    fn origin_is_camera_position(
        x in 0.0f32..800.0,
        y in 0.0f32..600.0,
        cx in -20.0f32..20.0,
        cy in -20.0f32..20.0,
        cz in 5.0f32..30.0,
    ) {
        let camera_pos = Vec3::new(cx, cy, cz);
        let ray = ray_for(Vec2::new(x, y), camera_pos);
        prop_assert_eq!(ray.origin, camera_pos);
    }

    /// Property: unprojection is a pure function of its inputs
    #[test]
    fn unprojection_is_idempotent(x in -100.0f32..900.0, y in -100.0f32..700.0) {
        let a = ray_for(Vec2::new(x, y), Vec3::new(0.0, 0.0, 10.0));
        let b = ray_for(Vec2::new(x, y), Vec3::new(0.0, 0.0, 10.0));
        prop_assert_eq!(a, b);
    }

    /// Property: a sphere centered on the ray ahead of the origin is hit
    #[test]
    fn sphere_on_ray_is_hit(
        x in 0.0f32..800.0,
        y in 0.0f32..600.0,
        distance in 0.5f32..20.0,
        radius in 0.25f32..3.0,
    ) {
        let ray = ray_for(Vec2::new(x, y), Vec3::new(0.0, 0.0, 10.0));
        let sphere = BoundingSphere::new(ray.at(distance), radius);
        prop_assert!(sphere.intersect(&ray).is_some());
    }

    /// Property: a sphere entirely behind the origin is never hit
    #[test]
    fn sphere_behind_is_missed(
        x in 0.0f32..800.0,
        y in 0.0f32..600.0,
        distance in 2.0f32..50.0,
        radius in 0.01f32..1.5,
    ) {
        let ray = ray_for(Vec2::new(x, y), Vec3::new(0.0, 0.0, 10.0));
        let sphere = BoundingSphere::new(ray.at(-distance), radius);
        prop_assert!(sphere.intersect(&ray).is_none());
    }
}
