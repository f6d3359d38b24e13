//! Indexed triangle meshes for the registry primitives.
//!
//! Vertex order, UV layout and winding follow the usual web 3D primitive
//! builders, so textures tile the same way across shapes: UV seams and box
//! faces are split vertices, and indices wind counter-clockwise.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::config::Shape;
use crate::registry::{GeometryDescriptor, Primitive};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push_vertex(&mut self, p: Vec3, n: Vec3, uv: [f32; 2]) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push(p.to_array());
        self.normals.push(n.to_array());
        self.uvs.push(uv);
        idx
    }

    fn push_tri(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |t| {
            [
                Vec3::from(self.positions[t[0] as usize]),
                Vec3::from(self.positions[t[1] as usize]),
                Vec3::from(self.positions[t[2] as usize]),
            ]
        })
    }

    /// Distance from the origin to the farthest vertex.
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| Vec3::from(*p).length())
            .fold(0.0, f32::max)
    }

    /// Replaces the normals with smooth, area-weighted vertex normals.
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for t in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (t[0] as usize, t[1] as usize, t[2] as usize);
            let pa = Vec3::from(self.positions[ia]);
            let pb = Vec3::from(self.positions[ib]);
            let pc = Vec3::from(self.positions[ic]);
            // cross of the edges is twice the face area along the face normal
            let face = (pc - pb).cross(pa - pb);
            acc[ia] += face;
            acc[ib] += face;
            acc[ic] += face;
        }
        self.normals = acc
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }
}

pub fn build_primitive(primitive: &Primitive) -> MeshData {
    match *primitive {
        Primitive::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(radius, width_segments.max(3), height_segments.max(2)),
        Primitive::Cuboid {
            width,
            height,
            depth,
        } => cuboid(width, height, depth),
        Primitive::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(radius, tube, radial_segments.max(2), tubular_segments.max(3)),
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => cylinder(radius_top, radius_bottom, height, radial_segments.max(3)),
    }
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        // pole rows shift u by half a segment so the fan UVs stay centered
        let u_offset = if iy == 0 {
            0.5 / width_segments as f32
        } else if iy == height_segments {
            -0.5 / width_segments as f32
        } else {
            0.0
        };
        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let (sin_theta, cos_theta) = (v * PI).sin_cos();
            let p = Vec3::new(
                -radius * cos_phi * sin_theta,
                radius * cos_theta,
                radius * sin_phi * sin_theta,
            );
            row.push(mesh.push_vertex(p, p.normalize_or_zero(), [u + u_offset, 1.0 - v]));
        }
        grid.push(row);
    }
    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.push_tri(a, b, d);
            }
            if iy != height_segments as usize - 1 {
                mesh.push_tri(b, c, d);
            }
        }
    }
    mesh
}

// One face of the box, spanned by axes `u` and `v` and offset along `w`.
#[allow(clippy::too_many_arguments)]
fn box_face(
    mesh: &mut MeshData,
    (u, v, w): (usize, usize, usize),
    udir: f32,
    vdir: f32,
    width: f32,
    height: f32,
    depth: f32,
) {
    let start = mesh.positions.len() as u32;
    for iy in 0..=1u32 {
        let y = iy as f32 * height - height / 2.0;
        for ix in 0..=1u32 {
            let x = ix as f32 * width - width / 2.0;
            let mut p = [0.0f32; 3];
            p[u] = x * udir;
            p[v] = y * vdir;
            p[w] = depth / 2.0;
            let mut n = [0.0f32; 3];
            n[w] = if depth > 0.0 { 1.0 } else { -1.0 };
            mesh.push_vertex(Vec3::from(p), Vec3::from(n), [ix as f32, 1.0 - iy as f32]);
        }
    }
    let (a, b, c, d) = (start, start + 2, start + 3, start + 1);
    mesh.push_tri(a, b, d);
    mesh.push_tri(b, c, d);
}

fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (0, 1, 2);
    let mut mesh = MeshData::default();
    box_face(&mut mesh, (z, y, x), -1.0, -1.0, depth, height, width);
    box_face(&mut mesh, (z, y, x), 1.0, -1.0, depth, height, -width);
    box_face(&mut mesh, (x, z, y), 1.0, 1.0, width, depth, height);
    box_face(&mut mesh, (x, z, y), 1.0, -1.0, width, depth, -height);
    box_face(&mut mesh, (x, y, z), 1.0, -1.0, width, height, depth);
    box_face(&mut mesh, (x, y, z), -1.0, -1.0, width, height, -depth);
    mesh
}

fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let v = j as f32 / radial_segments as f32 * TAU;
            let ring = radius + tube * v.cos();
            let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push_vertex(
                p,
                (p - center).normalize_or_zero(),
                [
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ],
            );
        }
    }
    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.push_tri(a, b, d);
            mesh.push_tri(b, c, d);
        }
    }
    mesh
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;

    // torso: one height segment, rows at top (v = 0) and bottom (v = 1)
    let mut rows: [Vec<u32>; 2] = [Vec::new(), Vec::new()];
    for (y, row) in rows.iter_mut().enumerate() {
        let v = y as f32;
        let r = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=radial_segments {
            let u = x as f32 / radial_segments as f32;
            let (sin_t, cos_t) = (u * TAU).sin_cos();
            let p = Vec3::new(r * sin_t, -v * height + half, r * cos_t);
            let n = Vec3::new(sin_t, slope, cos_t).normalize_or_zero();
            row.push(mesh.push_vertex(p, n, [u, 1.0 - v]));
        }
    }
    for x in 0..radial_segments as usize {
        let a = rows[0][x];
        let b = rows[1][x];
        let c = rows[1][x + 1];
        let d = rows[0][x + 1];
        if radius_top > 0.0 {
            mesh.push_tri(a, b, d);
        }
        if radius_bottom > 0.0 {
            mesh.push_tri(b, c, d);
        }
    }

    if radius_top > 0.0 {
        cylinder_cap(&mut mesh, radius_top, half, radial_segments, true);
    }
    if radius_bottom > 0.0 {
        cylinder_cap(&mut mesh, radius_bottom, half, radial_segments, false);
    }
    mesh
}

fn cylinder_cap(mesh: &mut MeshData, radius: f32, half: f32, segments: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = Vec3::new(0.0, sign, 0.0);
    let center_start = mesh.positions.len() as u32;
    for _ in 0..segments {
        mesh.push_vertex(Vec3::new(0.0, half * sign, 0.0), normal, [0.5, 0.5]);
    }
    let rim_start = mesh.positions.len() as u32;
    for x in 0..=segments {
        let u = x as f32 / segments as f32;
        let (sin_t, cos_t) = (u * TAU).sin_cos();
        mesh.push_vertex(
            Vec3::new(radius * sin_t, half * sign, radius * cos_t),
            normal,
            [cos_t * 0.5 + 0.5, sin_t * 0.5 * sign + 0.5],
        );
    }
    for x in 0..segments {
        let c = center_start + x;
        let i = rim_start + x;
        if top {
            mesh.push_tri(i, i + 1, c);
        } else {
            mesh.push_tri(i + 1, i, c);
        }
    }
}

/// Holds the mesh of the current shape; rebuilding (with smooth normals) only
/// happens when the shape changes.
#[derive(Debug, Default)]
pub struct GeometryCache {
    current: Option<(Shape, MeshData)>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the cache hold `descriptor`'s mesh. Returns `true` if it was rebuilt.
    pub fn ensure(&mut self, descriptor: &GeometryDescriptor) -> bool {
        if matches!(&self.current, Some((shape, _)) if *shape == descriptor.shape) {
            return false;
        }
        let mut mesh = build_primitive(&descriptor.primitive);
        mesh.compute_vertex_normals();
        log::info!(
            "[geometry] built {} ({} vertices, {} triangles)",
            descriptor.shape.id(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        self.current = Some((descriptor.shape, mesh));
        true
    }

    pub fn shape(&self) -> Option<Shape> {
        self.current.as_ref().map(|(s, _)| *s)
    }

    pub fn mesh(&self) -> Option<&MeshData> {
        self.current.as_ref().map(|(_, m)| m)
    }
}
