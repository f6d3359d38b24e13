use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::geometry::MeshData;

// Pointer travel (in CSS pixels) under which a press/release counts as a click
// rather than an orbit drag.
pub const CLICK_MAX_TRAVEL_PX: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Un-projects a canvas pixel into a world-space ray.
pub fn screen_ray(view: Mat4, proj: Mat4, px: f32, py: f32, width: f32, height: f32) -> Ray {
    let w = width.max(1.0);
    let h = height.max(1.0);
    let ndc_x = (2.0 * px / w) - 1.0;
    let ndc_y = 1.0 - (2.0 * py / h);
    let inv = (proj * view).inverse();
    let near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p0 = near.truncate() / near.w;
    let p1 = far.truncate() / far.w;
    Ray {
        origin: p0,
        dir: (p1 - p0).normalize_or_zero(),
    }
}

/// Möller–Trumbore; returns the ray parameter of the hit, front or back face.
pub fn ray_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }
    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = f * ray.dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Nearest hit of `ray` against `mesh` placed with `model`.
pub fn pick_mesh(ray: &Ray, model: Mat4, mesh: &MeshData) -> Option<f32> {
    let inv = model.inverse();
    // direction is left unnormalized so t stays in world units
    let local = Ray {
        origin: inv.transform_point3(ray.origin),
        dir: inv.transform_vector3(ray.dir),
    };
    mesh.triangles()
        .filter_map(|[a, b, c]| ray_triangle(&local, a, b, c))
        .fold(None, |best: Option<f32>, t| match best {
            Some(bt) if bt <= t => Some(bt),
            _ => Some(t),
        })
}

/// Whether a press at `down` released at `up` is a click.
#[inline]
pub fn is_click(down: Vec2, up: Vec2) -> bool {
    down.distance(up) <= CLICK_MAX_TRAVEL_PX
}
